//! Torrent add flows.
//!
//! # Endpoints
//!
//! ## `/upload` — multipart POST
//!
//! One `file` part of type `application/x-bittorrent`. Response:
//!
//! ```json
//! { "success": true, "files": ["/tmp/delugeweb-x/tmpY.torrent"], "errors": [] }
//! ```
//!
//! ## `add_torrent` — `web.add_torrents`
//!
//! Request params: `[[{ "path": "<staged path>", "options": {...} }]]`.
//!
//! ## `add_torrent_url` — `web.download_torrent_from_url`
//!
//! Request params: `[url, ""]`. The daemon fetches the file itself and the
//! result is the server-side path, registered like a staged upload.

use serde_json::{Value, json};
use tracing::debug;

use crate::client::DelugeClient;
use crate::error::{DelugeError, Result};
use crate::transport::{RawResponse, RpcTransport};
use crate::types::{TorrentOptions, TorrentSource, UploadMode, UploadResponse};

#[allow(private_bounds)]
impl<T: RpcTransport> DelugeClient<T> {
    /// Add a torrent from a local file, base64 payload, or byte buffer.
    ///
    /// In [`UploadMode::Staged`] (default) the file is uploaded to
    /// `/upload` and the staged path registered via `web.add_torrents`
    /// with `options`. In [`UploadMode::Direct`] the multipart POST itself
    /// registers the torrent and the staged paths are returned.
    pub fn add_torrent(&self, source: &TorrentSource, options: &TorrentOptions) -> Result<Value> {
        let data = source.resolve()?;
        debug!(bytes = data.len(), "uploading torrent file");
        let raw = self.transport().post_multipart(self.upload_url(), data)?;
        let upload = parse_upload(raw)?;
        match self.config().upload_mode {
            UploadMode::Staged => {
                let staged = upload.files.first().ok_or_else(|| {
                    DelugeError::Other("upload response contained no staged file".to_owned())
                })?;
                self.register_staged(staged, options)
            }
            UploadMode::Direct => Ok(json!(upload.files)),
        }
    }

    /// Add a torrent by URL: the daemon downloads the file server-side and
    /// the resulting path is registered with `options`.
    pub fn add_torrent_url(&self, url: &str, options: &TorrentOptions) -> Result<Value> {
        debug!(url, "adding torrent by URL");
        let result = self.rpc("web.download_torrent_from_url", vec![json!(url), json!("")])?;
        let staged = result.as_str().ok_or_else(|| {
            DelugeError::Other("daemon returned no staged path for URL".to_owned())
        })?;
        self.register_staged(staged, options)
    }

    fn register_staged(&self, path: &str, options: &TorrentOptions) -> Result<Value> {
        let entry = json!({ "path": path, "options": options });
        self.rpc("web.add_torrents", vec![json!([entry])])
    }
}

// `/upload` answers a plain status object, not a JSON-RPC envelope.
fn parse_upload(raw: RawResponse) -> Result<UploadResponse> {
    if raw.status != 200 {
        return Err(DelugeError::InvalidResponse { status: raw.status });
    }
    let upload: UploadResponse = serde_json::from_value(raw.body)?;
    if !upload.success {
        let detail = upload
            .errors
            .first()
            .map_or_else(|| "upload rejected by daemon".to_owned(), Value::to_string);
        return Err(DelugeError::Other(detail));
    }
    Ok(upload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Config;
    use crate::testutil::{client_with, client_with_config, rpc_ok};
    use crate::transport::MockRpcTransport;

    fn upload_ok(files: &[&str]) -> RawResponse {
        RawResponse {
            status: 200,
            set_cookie: false,
            body: json!({ "success": true, "files": files, "errors": [] }),
        }
    }

    #[test]
    fn staged_upload_registers_first_staged_path() {
        let mut mock = MockRpcTransport::new();
        mock.expect_post_multipart()
            .withf(|url, data| {
                url.as_str() == "http://127.0.0.1:8112/upload" && data == b"d8:announce0:e"
            })
            .times(1)
            .returning(|_, _| Ok(upload_ok(&["/tmp/staged.torrent"])));
        mock.expect_post_json()
            .withf(|_, body| {
                body["method"] == "web.add_torrents"
                    && body["params"][0][0]["path"] == "/tmp/staged.torrent"
                    && body["params"][0][0]["options"]["add_paused"] == json!(false)
            })
            .times(1)
            .returning(|_, _| Ok(rpc_ok(json!(true))));

        let source = TorrentSource::Bytes(b"d8:announce0:e".to_vec());
        client_with(mock)
            .add_torrent(&source, &TorrentOptions::default())
            .unwrap();
    }

    #[test]
    fn staged_upload_sends_caller_options() {
        let mut mock = MockRpcTransport::new();
        mock.expect_post_multipart()
            .returning(|_, _| Ok(upload_ok(&["/tmp/staged.torrent"])));
        mock.expect_post_json()
            .withf(|_, body| {
                let options = &body["params"][0][0]["options"];
                options["add_paused"] == json!(true) && options["max_connections"] == json!(-1)
            })
            .times(1)
            .returning(|_, _| Ok(rpc_ok(json!(true))));

        let options = TorrentOptions {
            add_paused: true,
            ..TorrentOptions::default()
        };
        client_with(mock)
            .add_torrent(&TorrentSource::Bytes(vec![0]), &options)
            .unwrap();
    }

    #[test]
    fn rejected_upload_surfaces_error_without_registration() {
        // No post_json expectation: a registration call would panic.
        let mut mock = MockRpcTransport::new();
        mock.expect_post_multipart().returning(|_, _| {
            Ok(RawResponse {
                status: 200,
                set_cookie: false,
                body: json!({ "success": false, "files": [], "errors": ["not a torrent"] }),
            })
        });

        let err = client_with(mock)
            .add_torrent(&TorrentSource::Bytes(vec![0]), &TorrentOptions::default())
            .unwrap_err();
        assert!(err.to_string().contains("not a torrent"));
    }

    #[test]
    fn upload_with_no_staged_file_is_an_error() {
        let mut mock = MockRpcTransport::new();
        mock.expect_post_multipart()
            .returning(|_, _| Ok(upload_ok(&[])));

        let err = client_with(mock)
            .add_torrent(&TorrentSource::Bytes(vec![0]), &TorrentOptions::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "upload response contained no staged file");
    }

    #[test]
    fn direct_mode_registers_in_one_post() {
        let mut mock = MockRpcTransport::new();
        mock.expect_post_multipart()
            .times(1)
            .returning(|_, _| Ok(upload_ok(&["/tmp/staged.torrent"])));

        let config = Config {
            upload_mode: UploadMode::Direct,
            ..Config::default()
        };
        let result = client_with_config(mock, config)
            .add_torrent(&TorrentSource::Bytes(vec![0]), &TorrentOptions::default())
            .unwrap();
        assert_eq!(result, json!(["/tmp/staged.torrent"]));
    }

    #[test]
    fn add_torrent_url_fetches_then_registers() {
        let mut mock = MockRpcTransport::new();
        mock.expect_post_json()
            .withf(|_, body| {
                body["method"] == "web.download_torrent_from_url"
                    && body["params"] == json!(["http://example.com/a.torrent", ""])
            })
            .times(1)
            .returning(|_, _| Ok(rpc_ok(json!("/tmp/fetched.torrent"))));
        mock.expect_post_json()
            .withf(|_, body| {
                body["method"] == "web.add_torrents"
                    && body["params"][0][0]["path"] == "/tmp/fetched.torrent"
            })
            .times(1)
            .returning(|_, _| Ok(rpc_ok(json!(true))));

        client_with(mock)
            .add_torrent_url("http://example.com/a.torrent", &TorrentOptions::default())
            .unwrap();
    }
}
