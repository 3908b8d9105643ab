//! Persisted sync history
//!
//! The history document is the only state that survives a pass. It lives as
//! a hidden JSON file in the local root, regardless of direction, and maps
//! remote paths to the timestamps observed right after the last successful
//! transfer of that path. The transfer policy reads it to decide skip vs
//! transfer; nothing else does.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::SyncError;
use crate::types::{Direction, Timestamp};

/// Name of the history document inside the local root.
///
/// Excluded from every diff, transfer and delete pass.
pub const HISTORY_FILE: &str = ".sftp_sync_data";

/// Timestamps of one path right after its last successful transfer.
///
/// Serialized as a two-element `[local_mtime, remote_mtime]` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(Timestamp, Timestamp)", into = "(Timestamp, Timestamp)")]
pub struct SyncRecord {
	pub local_mtime: Timestamp,
	pub remote_mtime: Timestamp,
}

impl SyncRecord {
	/// The destination-side mtime recorded for the given direction.
	pub fn destination_mtime(&self, direction: Direction) -> Timestamp {
		match direction {
			Direction::Push => self.remote_mtime,
			Direction::Pull => self.local_mtime,
		}
	}
}

impl From<(Timestamp, Timestamp)> for SyncRecord {
	fn from((local_mtime, remote_mtime): (Timestamp, Timestamp)) -> Self {
		SyncRecord { local_mtime, remote_mtime }
	}
}

impl From<SyncRecord> for (Timestamp, Timestamp) {
	fn from(r: SyncRecord) -> Self {
		(r.local_mtime, r.remote_mtime)
	}
}

/// Per-direction maps of remote path to last sync record.
///
/// The remote path is the canonical key in both directions. A path holds at
/// most one record per direction; recording again overwrites. Owned
/// exclusively by one pass: loaded once, mutated in place, saved once.
/// Concurrent passes against the same local root are unsupported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncHistory {
	#[serde(default)]
	pub push: BTreeMap<String, SyncRecord>,

	#[serde(default)]
	pub pull: BTreeMap<String, SyncRecord>,
}

impl SyncHistory {
	fn map(&self, direction: Direction) -> &BTreeMap<String, SyncRecord> {
		match direction {
			Direction::Push => &self.push,
			Direction::Pull => &self.pull,
		}
	}

	fn map_mut(&mut self, direction: Direction) -> &mut BTreeMap<String, SyncRecord> {
		match direction {
			Direction::Push => &mut self.push,
			Direction::Pull => &mut self.pull,
		}
	}

	/// Look up the last record for a remote path in one direction.
	pub fn get(&self, direction: Direction, remote_path: &str) -> Option<&SyncRecord> {
		self.map(direction).get(remote_path)
	}

	/// Record a completed transfer, replacing any prior record.
	pub fn record(&mut self, direction: Direction, remote_path: String, record: SyncRecord) {
		self.map_mut(direction).insert(remote_path, record);
	}

	/// Path of the history document under a local root.
	pub fn document_path(local_root: &Path) -> PathBuf {
		local_root.join(HISTORY_FILE)
	}

	/// Load history from the local root.
	///
	/// An absent document yields a fresh empty history; a document that
	/// exists but does not parse is a hard error, so a pass never makes
	/// policy decisions from garbage state.
	pub async fn load(local_root: &Path) -> Result<Self, SyncError> {
		let path = Self::document_path(local_root);

		let contents = match tokio::fs::read_to_string(&path).await {
			Ok(contents) => contents,
			Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(SyncHistory::default()),
			Err(e) => return Err(SyncError::HistoryLoad { path, source: e }),
		};

		serde_json::from_str(&contents)
			.map_err(|e| SyncError::HistoryCorrupted { path, message: e.to_string() })
	}

	/// Save history to the local root, overwriting the prior document.
	pub async fn save(&self, local_root: &Path) -> Result<(), SyncError> {
		let path = Self::document_path(local_root);

		let json = serde_json::to_string(self)
			.map_err(|e| SyncError::HistorySave { path: path.clone(), source: Box::new(e) })?;

		tokio::fs::write(&path, json)
			.await
			.map_err(|e| SyncError::HistorySave { path, source: Box::new(e) })
	}
}


// vim: ts=4
