//! Deluge web UI JSON-RPC API client library.
//!
//! Provides authenticated access to the Deluge torrent daemon through its
//! web UI: login, daemon host selection, torrent listing, torrent-file and
//! by-URL upload, and per-torrent actions (pause, resume, recheck, queue
//! reordering, remove).
//!
//! # Authentication
//!
//! The web API authenticates with a password; `auth.login` answers with a
//! session cookie that the client's cookie store replays on every
//! subsequent request. The session lives as long as the client instance.
//!
//! ```no_run
//! use deluge_api::{Config, DelugeClient};
//!
//! let client = DelugeClient::new(Config {
//!     password: Some("deluge".into()),
//!     ..Config::default()
//! }).unwrap();
//! client.login().unwrap();
//! for torrent in client.get_torrents().unwrap() {
//!     println!("{} {} {:.1}%", torrent.hash, torrent.name, torrent.progress);
//! }
//! ```
//!
//! # API endpoint mapping
//!
//! | Method                               | RPC method                      | Description            |
//! |--------------------------------------|---------------------------------|------------------------|
//! | [`DelugeClient::login`]              | `auth.login`                    | Obtain session cookie  |
//! | [`DelugeClient::get_hosts`]          | `web.get_hosts`                 | List daemon backends   |
//! | [`DelugeClient::connect`]            | `web.connect`                   | Select a backend       |
//! | [`DelugeClient::get_torrents`]       | `web.update_ui`                 | List torrents          |
//! | [`DelugeClient::add_torrent`]        | `/upload` + `web.add_torrents`  | Upload a torrent file  |
//! | [`DelugeClient::add_torrent_url`]    | `web.download_torrent_from_url` | Add by URL             |
//! | [`DelugeClient::pause`]              | `core.pause_torrent`            | Pause (batch)          |
//! | [`DelugeClient::resume`]             | `core.resume_torrent`           | Resume (batch)         |
//! | [`DelugeClient::verify`]             | `core.force_recheck`            | Force recheck (batch)  |
//! | [`DelugeClient::queue_top`] (`_bottom`, `_up`, `_down`) | `core.queue_*` | Queue reordering |
//! | [`DelugeClient::remove`]             | `core.remove_torrent`           | Remove, one call/hash  |
//! | [`DelugeClient::remove_and_delete`]  | `core.remove_torrent`           | Remove with data       |
//!
//! Batch methods take the full hash slice in one call; removal fans out
//! one call per hash because the daemon's method takes a single hash.

mod auth;
pub mod client;
pub mod error;
mod torrents;
pub mod transport;
pub mod types;
mod upload;

#[cfg(test)]
mod testutil;

pub use client::{Config, DelugeClient};
pub use error::{DelugeError, Result};
pub use types::{Host, Torrent, TorrentOptions, TorrentSource, UploadMode, UploadResponse};
