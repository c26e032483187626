//! HTTP client for the Deluge web UI JSON-RPC API.
//!
//! Every call is an HTTP POST of a JSON-RPC envelope to `<base>/json`:
//!
//! ```json
//! { "method": "core.pause_torrent", "params": [["<hash>"]], "id": 7 }
//! ```
//!
//! The daemon answers with:
//!
//! ```json
//! { "result": ..., "error": null, "id": 7 }
//! ```
//!
//! `id` starts at 0 and increases by one per call for the lifetime of a
//! client instance, never reused even across errors. Authentication is a
//! session cookie issued by `auth.login` and carried by the cookie store on
//! every subsequent request; no token is resent explicitly.

use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::{Value, json};
use tracing::debug;
use url::Url;

use crate::error::{DelugeError, Result};
use crate::transport::{HttpTransport, RawResponse, RpcTransport};
use crate::types::UploadMode;

/// Connection settings for a [`DelugeClient`]. Immutable once the client
/// is constructed.
#[derive(Debug, Clone)]
pub struct Config {
    /// Web UI host. Default `127.0.0.1`.
    pub host: String,
    /// Web UI port. Default `8112`.
    pub port: u16,
    /// Path the web UI is mounted under. Default `/`.
    pub base_path: String,
    /// Account name. The web API authenticates with the password alone;
    /// kept for completeness of the connection surface.
    pub username: Option<String>,
    /// Web UI password, sent by [`DelugeClient::login`].
    pub password: Option<String>,
    /// Use HTTPS instead of HTTP.
    pub use_tls: bool,
    /// Extra root CA certificate (PEM) for TLS verification.
    pub ca_certificate: Option<Vec<u8>>,
    /// Per-request timeout in milliseconds. Default 5000.
    pub timeout_ms: u64,
    /// Which torrent upload flow to use. Default [`UploadMode::Staged`].
    pub upload_mode: UploadMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8112,
            base_path: "/".to_owned(),
            username: None,
            password: None,
            use_tls: false,
            ca_certificate: None,
            timeout_ms: 5000,
            upload_mode: UploadMode::Staged,
        }
    }
}

impl Config {
    /// Derive the base URL. The path is normalized to start and end with a
    /// slash so endpoint names append instead of replacing the last
    /// segment.
    pub(crate) fn base_url(&self) -> Result<Url> {
        let scheme = if self.use_tls { "https" } else { "http" };
        let mut path = self.base_path.clone();
        if !path.starts_with('/') {
            path.insert(0, '/');
        }
        if !path.ends_with('/') {
            path.push('/');
        }
        Url::parse(&format!("{scheme}://{}:{}{path}", self.host, self.port))
            .map_err(|e| DelugeError::Other(format!("invalid base URL: {e}")))
    }
}

/// Client for one Deluge web UI instance.
///
/// Holds the HTTP transport (with the session cookie store) and the
/// request-id counter. API methods are implemented in separate modules
/// (`auth`, `torrents`, `upload`) as `impl DelugeClient` blocks.
///
/// The counter is atomic and the transport is shared, so one client may
/// issue calls from several threads concurrently; every call still
/// observes a unique id.
#[allow(private_bounds)]
pub struct DelugeClient<T: RpcTransport = HttpTransport> {
    transport: T,
    config: Config,
    json_url: Url,
    upload_url: Url,
    next_id: AtomicU64,
}

impl DelugeClient {
    /// Create a new client for the given connection settings.
    pub fn new(config: Config) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Self::assemble(transport, config)
    }
}

#[allow(private_bounds)]
impl<T: RpcTransport> DelugeClient<T> {
    /// Create a client with a custom transport implementation.
    /// This is primarily useful for testing with mocks.
    #[cfg(test)]
    pub(crate) fn with_transport(transport: T, config: Config) -> Result<Self> {
        Self::assemble(transport, config)
    }

    fn assemble(transport: T, config: Config) -> Result<Self> {
        let base = config.base_url()?;
        let json_url = base
            .join("json")
            .map_err(|e| DelugeError::Other(format!("invalid base URL: {e}")))?;
        let upload_url = base
            .join("upload")
            .map_err(|e| DelugeError::Other(format!("invalid base URL: {e}")))?;
        Ok(Self {
            transport,
            config,
            json_url,
            upload_url,
            next_id: AtomicU64::new(0),
        })
    }

    /// Return the connection settings this client was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }

    pub(crate) fn upload_url(&self) -> &Url {
        &self.upload_url
    }

    /// Issue one RPC call and normalize the response down to its `result`
    /// field.
    pub(crate) fn rpc(&self, method: &str, params: Vec<Value>) -> Result<Value> {
        normalize(self.rpc_raw(method, params)?)
    }

    /// Issue one RPC call, returning the transport-level response. Used by
    /// `login`, which inspects the `Set-Cookie` header before the body.
    pub(crate) fn rpc_raw(&self, method: &str, params: Vec<Value>) -> Result<RawResponse> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let envelope = json!({ "method": method, "params": params, "id": id });
        debug!(method, id, "dispatching RPC call");
        self.transport.post_json(&self.json_url, &envelope)
    }
}

/// Normalize a transport response into the three failure kinds: non-200
/// status or a non-object body is a protocol error, a non-null `error`
/// field is an application error, anything else yields the `result` field.
pub(crate) fn normalize(raw: RawResponse) -> Result<Value> {
    if raw.status != 200 {
        return Err(DelugeError::InvalidResponse { status: raw.status });
    }
    let Value::Object(mut body) = raw.body else {
        return Err(DelugeError::InvalidResponse { status: raw.status });
    };
    match body.remove("error") {
        Some(error) if !error.is_null() => Err(DelugeError::Rpc {
            code: error["code"].as_i64().unwrap_or(0),
            message: error["message"]
                .as_str()
                .unwrap_or("unknown error")
                .to_owned(),
        }),
        _ => Ok(body.remove("result").unwrap_or(Value::Null)),
    }
}
