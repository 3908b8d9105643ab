//! Error types for sync operations

use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Main error type for a sync pass
#[derive(Debug)]
pub enum SyncError {
	/// Remote-side failure, surfaced by the transport
	Transport(TransportError),

	/// Local filesystem failure, with the operation and path that failed
	LocalIo { op: &'static str, path: PathBuf, source: io::Error },

	/// History document could not be read
	HistoryLoad { path: PathBuf, source: io::Error },

	/// History document could not be written
	HistorySave { path: PathBuf, source: Box<dyn Error + Send + Sync> },

	/// History document exists but is malformed; the pass aborts before
	/// any transfer rather than deciding policy from garbage state
	HistoryCorrupted { path: PathBuf, message: String },

	/// An exclusion glob failed to compile
	Pattern(globset::Error),
}

impl fmt::Display for SyncError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SyncError::Transport(e) => write!(f, "Transport error: {}", e),
			SyncError::LocalIo { op, path, source } => {
				write!(f, "Local {} failed on {}: {}", op, path.display(), source)
			}
			SyncError::HistoryLoad { path, source } => {
				write!(f, "Failed to load sync history {}: {}", path.display(), source)
			}
			SyncError::HistorySave { path, source } => {
				write!(f, "Failed to save sync history {}: {}", path.display(), source)
			}
			SyncError::HistoryCorrupted { path, message } => {
				write!(f, "Sync history {} is corrupted: {}", path.display(), message)
			}
			SyncError::Pattern(e) => write!(f, "Invalid exclusion pattern: {}", e),
		}
	}
}

impl Error for SyncError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match self {
			SyncError::Transport(e) => Some(e),
			SyncError::LocalIo { source, .. } => Some(source),
			SyncError::HistoryLoad { source, .. } => Some(source),
			SyncError::HistorySave { source, .. } => Some(source.as_ref()),
			SyncError::Pattern(e) => Some(e),
			SyncError::HistoryCorrupted { .. } => None,
		}
	}
}

impl From<TransportError> for SyncError {
	fn from(e: TransportError) -> Self {
		SyncError::Transport(e)
	}
}

impl From<globset::Error> for SyncError {
	fn from(e: globset::Error) -> Self {
		SyncError::Pattern(e)
	}
}

/// Errors surfaced by a [`Transport`](crate::transport::Transport)
/// implementation.
///
/// `NotFound` doubles as a signal: a remote stat against a missing path is
/// caught by the synchronizer and treated as "no prior remote state", which
/// forces a transfer. Every other variant aborts the pass.
#[derive(Debug)]
pub enum TransportError {
	/// Path does not exist on the remote side
	NotFound { path: String },

	/// Remote I/O failure, with the operation and path that failed
	Io { op: &'static str, path: String, source: io::Error },

	/// Connection was closed (by the peer, or by a cancelling caller)
	Closed,

	/// Remote replied with something the client could not interpret
	Protocol { message: String },
}

impl TransportError {
	pub fn is_not_found(&self) -> bool {
		matches!(self, TransportError::NotFound { .. })
	}
}

impl fmt::Display for TransportError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			TransportError::NotFound { path } => write!(f, "Remote path not found: {}", path),
			TransportError::Io { op, path, source } => {
				write!(f, "Remote {} failed on {}: {}", op, path, source)
			}
			TransportError::Closed => write!(f, "Transport connection closed"),
			TransportError::Protocol { message } => write!(f, "Protocol error: {}", message),
		}
	}
}

impl Error for TransportError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match self {
			TransportError::Io { source, .. } => Some(source),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_not_found_is_signal() {
		let err = TransportError::NotFound { path: "/a/b".into() };
		assert!(err.is_not_found());
		let err = TransportError::Closed;
		assert!(!err.is_not_found());
	}

	#[test]
	fn test_display_names_path_and_op() {
		let err = SyncError::LocalIo {
			op: "read-dir",
			path: PathBuf::from("/data"),
			source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
		};
		let msg = err.to_string();
		assert!(msg.contains("read-dir"));
		assert!(msg.contains("/data"));
	}
}

// vim: ts=4
