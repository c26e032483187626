//! Session and daemon-connection API.
//!
//! # Endpoints
//!
//! ## `login` — `auth.login`
//!
//! Request params: `[password]`.
//!
//! The body result is a boolean, but the authoritative success signal is
//! the `Set-Cookie` header: the daemon issues the session cookie there and
//! omits the header on a wrong password.
//!
//! ## `get_hosts` — `web.get_hosts`
//!
//! Response result: `[["<id>", "127.0.0.1", 58846, "Online"], ...]`,
//! one row per daemon backend the web UI knows about.
//!
//! ## `connect` — `web.connect`
//!
//! Request params: `[host_id]`. Attaches the web session to one backend.

use serde_json::{Value, json};
use tracing::debug;

use crate::client::{DelugeClient, normalize};
use crate::error::{DelugeError, Result};
use crate::transport::RpcTransport;
use crate::types::Host;

#[allow(private_bounds)]
impl<T: RpcTransport> DelugeClient<T> {
    /// Authenticate with the configured password.
    ///
    /// On success the session cookie is in the cookie store and every
    /// subsequent call presents it automatically.
    ///
    /// # Errors
    ///
    /// - [`DelugeError::InvalidPassword`] — the response carried no
    ///   session cookie, whatever the body said
    /// - [`DelugeError::Http`] — network failure
    pub fn login(&self) -> Result<()> {
        let password = self.config().password.clone().unwrap_or_default();
        let raw = self.rpc_raw("auth.login", vec![Value::String(password)])?;
        if !raw.set_cookie {
            return Err(DelugeError::InvalidPassword);
        }
        normalize(raw)?;
        debug!("session established");
        Ok(())
    }

    /// List the daemon backends known to the web UI.
    pub fn get_hosts(&self) -> Result<Vec<Host>> {
        let result = self.rpc("web.get_hosts", vec![])?;
        let rows: Vec<(String, String, u16, String)> = serde_json::from_value(result)?;
        Ok(rows.into_iter().map(Host::from).collect())
    }

    /// Attach the web session to the daemon with the given host id.
    pub fn connect(&self, host_id: &str) -> Result<Value> {
        debug!(host_id, "connecting to daemon backend");
        self.rpc("web.connect", vec![json!(host_id)])
    }

    /// Attach to a daemon by positional index into [`get_hosts`](Self::get_hosts).
    pub fn connect_nth(&self, index: usize) -> Result<Value> {
        let hosts = self.get_hosts()?;
        let host = hosts
            .get(index)
            .ok_or_else(|| DelugeError::Other(format!("no daemon host at index {index}")))?;
        self.connect(&host.id)
    }
}
