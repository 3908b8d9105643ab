//! Small path and time helpers

use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::Timestamp;

/// Join a name onto a remote directory path with `/` separators.
pub fn join_remote(dir: &str, name: &str) -> String {
	if dir.is_empty() || dir.ends_with('/') {
		format!("{}{}", dir, name)
	} else {
		format!("{}/{}", dir, name)
	}
}

/// Convert a [`SystemTime`] to Unix seconds, negative before the epoch.
pub fn unix_seconds(t: SystemTime) -> Timestamp {
	match t.duration_since(UNIX_EPOCH) {
		Ok(d) => d.as_secs() as Timestamp,
		Err(e) => -(e.duration().as_secs() as Timestamp),
	}
}


// vim: ts=4
