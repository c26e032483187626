//! Shared test fixtures.

use serde_json::{Value, json};

use crate::client::{Config, DelugeClient};
use crate::transport::{MockRpcTransport, RawResponse};

/// A well-formed RPC response carrying `result`.
pub(crate) fn rpc_ok(result: Value) -> RawResponse {
    RawResponse {
        status: 200,
        set_cookie: false,
        body: json!({ "result": result, "error": null, "id": 0 }),
    }
}

/// A well-formed RPC response carrying an application error.
pub(crate) fn rpc_err(code: i64, message: &str) -> RawResponse {
    RawResponse {
        status: 200,
        set_cookie: false,
        body: json!({
            "result": null,
            "error": { "code": code, "message": message },
            "id": 0,
        }),
    }
}

pub(crate) fn client_with(mock: MockRpcTransport) -> DelugeClient<MockRpcTransport> {
    DelugeClient::with_transport(mock, Config::default()).unwrap()
}

pub(crate) fn client_with_config(
    mock: MockRpcTransport,
    config: Config,
) -> DelugeClient<MockRpcTransport> {
    DelugeClient::with_transport(mock, config).unwrap()
}
