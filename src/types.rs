//! Shared types for sync passes

use std::fmt;

/// Modification timestamp, seconds since the Unix epoch.
///
/// Signed so pre-epoch mtimes survive a round trip through the history
/// document. Comparison happens at whatever resolution the transport
/// provides; the core never sub-divides seconds.
pub type Timestamp = i64;

/// Direction of a sync pass.
///
/// `Push`: local is the source, remote is the destination.
/// `Pull`: remote is the source, local is the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
	Push,
	Pull,
}

impl Direction {
	pub fn as_str(&self) -> &'static str {
		match self {
			Direction::Push => "push",
			Direction::Pull => "pull",
		}
	}
}

impl fmt::Display for Direction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One entry of a directory listing, on either side.
///
/// Transient: produced by listing, consumed by the differ, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
	/// Entry name, no path components
	pub name: String,

	/// True for directories; symlinks and special files count as files
	pub is_dir: bool,
}

impl TreeEntry {
	pub fn file(name: impl Into<String>) -> Self {
		TreeEntry { name: name.into(), is_dir: false }
	}

	pub fn dir(name: impl Into<String>) -> Self {
		TreeEntry { name: name.into(), is_dir: true }
	}
}


// vim: ts=4
