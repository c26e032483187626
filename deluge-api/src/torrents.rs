//! Torrent listing and per-torrent actions.
//!
//! # Endpoints
//!
//! ## `get_torrents` — `web.update_ui`
//!
//! Request params: `[[...status fields...], {}]` (field list, empty filter).
//!
//! Response result:
//! ```json
//! {
//!   "connected": true,
//!   "torrents": {
//!     "<hash>": { "name": "...", "state": "Downloading", "progress": 42.5, ... }
//!   }
//! }
//! ```
//!
//! ## Actions
//!
//! Most per-torrent core methods accept a batch: one call with the hash
//! list as first parameter (`core.pause_torrent`, `core.resume_torrent`,
//! `core.force_recheck`, the `core.queue_*` family). `core.remove_torrent`
//! takes a single hash per call, so removal fans out one call per hash.

use std::collections::BTreeMap;
use std::thread;

use serde_json::{Value, json};
use tracing::debug;

use crate::client::DelugeClient;
use crate::error::{DelugeError, Result};
use crate::transport::RpcTransport;
use crate::types::Torrent;

/// Status fields requested from `web.update_ui`; mirrors [`Torrent`].
const TORRENT_FIELDS: [&str; 23] = [
    "distributed_copies",
    "download_payload_rate",
    "eta",
    "is_auto_managed",
    "max_download_speed",
    "max_upload_speed",
    "name",
    "num_peers",
    "num_seeds",
    "progress",
    "queue",
    "ratio",
    "save_path",
    "seeds_peers_ratio",
    "state",
    "time_added",
    "total_done",
    "total_peers",
    "total_seeds",
    "total_uploaded",
    "total_wanted",
    "tracker_host",
    "upload_payload_rate",
];

#[allow(private_bounds)]
impl<T: RpcTransport> DelugeClient<T> {
    /// List all torrents with their status fields.
    pub fn get_torrents(&self) -> Result<Vec<Torrent>> {
        let result = self.rpc("web.update_ui", vec![json!(TORRENT_FIELDS), json!({})])?;
        let rows = result.get("torrents").cloned().unwrap_or_else(|| json!({}));
        let rows: BTreeMap<String, Torrent> = serde_json::from_value(rows)?;
        Ok(rows
            .into_iter()
            .map(|(hash, mut torrent)| {
                torrent.hash = hash;
                torrent
            })
            .collect())
    }

    /// Issue one batch call: `params = [hashes, ...extra]`.
    ///
    /// For core methods that natively accept a hash list.
    pub fn do_action(&self, method: &str, hashes: &[&str], extra: Vec<Value>) -> Result<Value> {
        let mut params = vec![json!(hashes)];
        params.extend(extra);
        self.rpc(method, params)
    }

    /// Issue one call per hash: `params = [hash, ...extra]` for each.
    ///
    /// For core methods that reject batches. Calls are fanned out on
    /// worker threads and all of them are joined before this returns, so
    /// completion is reported exactly once; a failing call does not halt
    /// its siblings. The first error in input order wins; if every call
    /// succeeds the last hash's result is returned. An empty hash list
    /// issues no calls.
    pub fn do_multi_action(
        &self,
        method: &str,
        hashes: &[&str],
        extra: Vec<Value>,
    ) -> Result<Value> {
        debug!(method, count = hashes.len(), "fanning out per-hash calls");
        let results: Vec<Result<Value>> = thread::scope(|scope| {
            let handles: Vec<_> = hashes
                .iter()
                .map(|hash| {
                    let extra = extra.clone();
                    scope.spawn(move || {
                        let mut params = vec![json!(hash)];
                        params.extend(extra);
                        self.rpc(method, params)
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|_| Err(DelugeError::Other("request thread panicked".to_owned())))
                })
                .collect()
        });

        let mut last = Value::Null;
        for result in results {
            last = result?;
        }
        Ok(last)
    }

    /// Pause the given torrents (`core.pause_torrent`).
    pub fn pause(&self, hashes: &[&str]) -> Result<Value> {
        self.do_action("core.pause_torrent", hashes, vec![])
    }

    /// Resume the given torrents (`core.resume_torrent`).
    pub fn resume(&self, hashes: &[&str]) -> Result<Value> {
        self.do_action("core.resume_torrent", hashes, vec![])
    }

    /// Force a recheck of the given torrents (`core.force_recheck`).
    pub fn verify(&self, hashes: &[&str]) -> Result<Value> {
        self.do_action("core.force_recheck", hashes, vec![])
    }

    /// Move the given torrents to the top of the queue.
    pub fn queue_top(&self, hashes: &[&str]) -> Result<Value> {
        self.do_action("core.queue_top", hashes, vec![])
    }

    /// Move the given torrents to the bottom of the queue.
    pub fn queue_bottom(&self, hashes: &[&str]) -> Result<Value> {
        self.do_action("core.queue_bottom", hashes, vec![])
    }

    /// Move the given torrents one position up in the queue.
    pub fn queue_up(&self, hashes: &[&str]) -> Result<Value> {
        self.do_action("core.queue_up", hashes, vec![])
    }

    /// Move the given torrents one position down in the queue.
    pub fn queue_down(&self, hashes: &[&str]) -> Result<Value> {
        self.do_action("core.queue_down", hashes, vec![])
    }

    /// Remove the given torrents, keeping downloaded data.
    ///
    /// Issues one `core.remove_torrent` call per hash.
    pub fn remove(&self, hashes: &[&str]) -> Result<Value> {
        self.do_multi_action("core.remove_torrent", hashes, vec![json!(false)])
    }

    /// Remove the given torrents and delete their data.
    ///
    /// Issues one `core.remove_torrent` call per hash.
    pub fn remove_and_delete(&self, hashes: &[&str]) -> Result<Value> {
        self.do_multi_action("core.remove_torrent", hashes, vec![json!(true)])
    }
}
