//! Internal HTTP transport behind the client.
//!
//! [`RpcTransport`] abstracts the two wire operations the web API needs
//! (JSON POST and multipart file POST) so the request/response mapping in
//! the rest of the crate can be tested against a mock. The production
//! implementation is a `reqwest` blocking client owning the session cookie
//! store.

use std::time::Duration;

use reqwest::blocking::{Client, Response, multipart};
use reqwest::header;
use serde_json::Value;
use url::Url;

use crate::client::Config;
use crate::error::Result;

const TORRENT_MIME: &str = "application/x-bittorrent";

/// Transport-level view of one HTTP response.
#[derive(Debug, Clone)]
pub(crate) struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Whether the response carried a `Set-Cookie` header.
    pub set_cookie: bool,
    /// Response body parsed as JSON; `Null` if the body was not JSON.
    pub body: Value,
}

/// Internal trait abstracting the HTTP layer. `Send + Sync` because
/// multi-hash actions fan out calls from worker threads sharing one client.
#[cfg_attr(test, mockall::automock)]
pub(crate) trait RpcTransport: Send + Sync {
    /// POST `body` as JSON to `url`.
    fn post_json(&self, url: &Url, body: &Value) -> Result<RawResponse>;

    /// POST `data` to `url` as a multipart form with a single
    /// `application/x-bittorrent` file part.
    fn post_multipart(&self, url: &Url, data: Vec<u8>) -> Result<RawResponse>;
}

/// Production transport: a blocking `reqwest` client with the session
/// cookie store, gzip transport, and the configured timeout / extra CA.
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    pub(crate) fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .cookie_store(true)
            .gzip(true);
        if let Some(pem) = &config.ca_certificate {
            builder = builder.add_root_certificate(reqwest::Certificate::from_pem(pem)?);
        }
        Ok(Self {
            http: builder.build()?,
        })
    }
}

impl RpcTransport for HttpTransport {
    fn post_json(&self, url: &Url, body: &Value) -> Result<RawResponse> {
        let response = self.http.post(url.clone()).json(body).send()?;
        Ok(into_raw(response))
    }

    fn post_multipart(&self, url: &Url, data: Vec<u8>) -> Result<RawResponse> {
        let part = multipart::Part::bytes(data)
            .file_name("upload.torrent")
            .mime_str(TORRENT_MIME)?;
        let form = multipart::Form::new().part("file", part);
        let response = self.http.post(url.clone()).multipart(form).send()?;
        Ok(into_raw(response))
    }
}

fn into_raw(response: Response) -> RawResponse {
    let status = response.status().as_u16();
    let set_cookie = response.headers().contains_key(header::SET_COOKIE);
    // A non-JSON body (error pages, empty bodies) normalizes to Null; the
    // status check in the client surfaces it.
    let body = response.json().unwrap_or(Value::Null);
    RawResponse {
        status,
        set_cookie,
        body,
    }
}
