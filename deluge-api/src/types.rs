//! Data types for Deluge web API requests and responses.
//!
//! Response types are deserialized from the raw JSON returned by the
//! `/json` endpoint. Field names match the daemon's status keys, which are
//! already `snake_case`.

use base64::{Engine, engine::general_purpose::STANDARD as B64};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// One torrent row from `web.update_ui`.
///
/// The daemon returns torrents as a map keyed by hash; [`hash`](Self::hash)
/// is filled in from that key. All other fields are the status keys this
/// library requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Torrent {
    /// Torrent info-hash (map key in the daemon response).
    pub hash: String,
    /// Swarm redundancy (copies of the rarest piece).
    pub distributed_copies: f64,
    /// Current download rate in bytes/s.
    pub download_payload_rate: u64,
    /// Estimated seconds until completion.
    pub eta: i64,
    /// Whether the torrent is auto-managed by the queue.
    pub is_auto_managed: bool,
    /// Per-torrent download limit in KiB/s (-1 = unlimited).
    pub max_download_speed: f64,
    /// Per-torrent upload limit in KiB/s (-1 = unlimited).
    pub max_upload_speed: f64,
    /// Display name.
    pub name: String,
    /// Connected peers.
    pub num_peers: i64,
    /// Connected seeds.
    pub num_seeds: i64,
    /// Completion percentage (0.0 – 100.0).
    pub progress: f64,
    /// Queue position (0-based).
    pub queue: i64,
    /// Share ratio.
    pub ratio: f64,
    /// Download directory on the daemon host.
    pub save_path: String,
    /// Seeds-to-peers ratio of the swarm.
    pub seeds_peers_ratio: f64,
    /// State string (`Downloading`, `Seeding`, `Paused`, ...).
    pub state: String,
    /// Unix timestamp when the torrent was added.
    pub time_added: f64,
    /// Bytes downloaded and verified.
    pub total_done: u64,
    /// Total peers in the swarm.
    pub total_peers: i64,
    /// Total seeds in the swarm.
    pub total_seeds: i64,
    /// Total bytes uploaded.
    pub total_uploaded: u64,
    /// Total bytes wanted (selected files).
    pub total_wanted: u64,
    /// Hostname of the active tracker.
    pub tracker_host: String,
    /// Current upload rate in bytes/s.
    pub upload_payload_rate: u64,
}

/// A daemon backend known to the web UI, from `web.get_hosts`.
///
/// The daemon returns each host as a positional array
/// `[id, address, port, status]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    /// Opaque host id, passed to `web.connect`.
    pub id: String,
    /// Daemon address.
    pub address: String,
    /// Daemon port.
    pub port: u16,
    /// Connection status string (`Online`, `Offline`, `Connected`).
    pub status: String,
}

impl From<(String, String, u16, String)> for Host {
    fn from((id, address, port, status): (String, String, u16, String)) -> Self {
        Self {
            id,
            address,
            port,
            status,
        }
    }
}

/// Per-torrent options for `web.add_torrents`.
///
/// `Default` supplies the daemon's stock values (nothing paused, nothing
/// limited); override individual fields with struct-update syntax:
///
/// ```
/// use deluge_api::TorrentOptions;
///
/// let options = TorrentOptions {
///     add_paused: true,
///     ..TorrentOptions::default()
/// };
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct TorrentOptions {
    /// Per-file priorities (empty = daemon default for every file).
    pub file_priorities: Vec<u32>,
    /// Add the torrent in paused state.
    pub add_paused: bool,
    /// Use compact disk allocation.
    pub compact_allocation: bool,
    /// Connection limit (-1 = unlimited).
    pub max_connections: i64,
    /// Download limit in KiB/s (-1 = unlimited).
    pub max_download_speed: f64,
    /// Upload slot limit (-1 = unlimited).
    pub max_upload_slots: i64,
    /// Upload limit in KiB/s (-1 = unlimited).
    pub max_upload_speed: f64,
    /// Prioritize first and last pieces of each file.
    pub prioritize_first_last_pieces: bool,
}

impl Default for TorrentOptions {
    fn default() -> Self {
        Self {
            file_priorities: Vec::new(),
            add_paused: false,
            compact_allocation: false,
            max_connections: -1,
            max_download_speed: -1.0,
            max_upload_slots: -1,
            max_upload_speed: -1.0,
            prioritize_first_last_pieces: false,
        }
    }
}

/// Input to [`DelugeClient::add_torrent`](crate::DelugeClient::add_torrent).
///
/// The historical API took one dynamically-typed parameter and sniffed what
/// it was; this is the same polymorphism as an explicit tagged type. Use
/// [`detect`](Self::detect) for the sniffing behavior or construct a
/// variant directly when the kind is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TorrentSource {
    /// Path to a `.torrent` file on the local filesystem.
    FilePath(PathBuf),
    /// Base64-encoded torrent file contents.
    Base64(String),
    /// Raw torrent file bytes.
    Bytes(Vec<u8>),
}

impl TorrentSource {
    /// Classify a string input the way the historical client did: an
    /// existing local file wins, otherwise a string that decodes as base64
    /// is treated as a base64 payload, otherwise the string's bytes are
    /// taken verbatim.
    pub fn detect(input: &str) -> Self {
        let path = Path::new(input);
        if path.exists() {
            return Self::FilePath(path.to_path_buf());
        }
        if B64.decode(input).is_ok() {
            Self::Base64(input.to_owned())
        } else {
            Self::Bytes(input.as_bytes().to_vec())
        }
    }

    /// Produce the torrent file bytes to upload.
    pub fn resolve(&self) -> Result<Vec<u8>> {
        match self {
            Self::FilePath(path) => Ok(std::fs::read(path)?),
            Self::Base64(payload) => Ok(B64.decode(payload)?),
            Self::Bytes(bytes) => Ok(bytes.clone()),
        }
    }
}

impl From<Vec<u8>> for TorrentSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

/// Which upload flow [`DelugeClient::add_torrent`](crate::DelugeClient::add_torrent)
/// uses.
///
/// Two incompatible flows exist across web UI versions: staging the file
/// via `/upload` and registering the staged path with `web.add_torrents`,
/// or a single multipart POST to an endpoint that does both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadMode {
    /// Two-step: multipart upload, then `web.add_torrents` with the staged
    /// path and per-torrent options.
    #[default]
    Staged,
    /// One-step: the multipart POST itself registers the torrent. The
    /// daemon applies its own defaults; per-torrent options are not sent.
    Direct,
}

/// Response of the `/upload` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    /// Whether the daemon accepted the file.
    pub success: bool,
    /// Server-side staged file paths, one per uploaded part.
    #[serde(default)]
    pub files: Vec<String>,
    /// Daemon-reported upload errors.
    #[serde(default)]
    pub errors: Vec<Value>,
}
