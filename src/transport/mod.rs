//! Abstract remote-filesystem capability
//!
//! The sync core consumes this trait and nothing else about the remote
//! side; session setup and authentication belong to the implementation.
//! Operations are awaited one at a time, in order, so an implementation
//! never sees overlapping calls from a single pass.

mod local;

pub use local::LocalTransport;

use async_trait::async_trait;
use std::path::Path;

use crate::error::TransportError;
use crate::types::{Timestamp, TreeEntry};

/// Result type for transport operations
pub type TransportResult<T> = Result<T, TransportError>;

/// Remote-filesystem operations the sync core needs.
///
/// Remote paths are `/`-separated strings; the core builds them by joining
/// names onto the remote root and never inspects them beyond that.
#[async_trait]
pub trait Transport: Send {
	/// List the entries of a remote directory. `.` and `..` are never
	/// included.
	async fn list(&mut self, path: &str) -> TransportResult<Vec<TreeEntry>>;

	/// Modification time of a remote file.
	///
	/// A missing path is reported as [`TransportError::NotFound`], which the
	/// sync core treats as a signal rather than a failure.
	async fn stat_mtime(&mut self, path: &str) -> TransportResult<Timestamp>;

	/// Copy a local file to a remote path, overwriting any existing file.
	async fn upload(&mut self, local: &Path, remote: &str) -> TransportResult<()>;

	/// Copy a remote file to a local path, overwriting any existing file.
	async fn download(&mut self, remote: &str, local: &Path) -> TransportResult<()>;

	/// Create a remote directory. No-op if it already exists.
	async fn make_dir(&mut self, path: &str) -> TransportResult<()>;

	/// Remove a remote file.
	async fn remove_file(&mut self, path: &str) -> TransportResult<()>;

	/// Remove a remote directory. The directory must be empty.
	async fn remove_dir(&mut self, path: &str) -> TransportResult<()>;

	/// Release the connection.
	///
	/// The synchronizer never closes on its own; the caller that opened the
	/// connection is expected to close it on every exit path of a top-level
	/// pass, including after an error (see `Synchronizer::close`).
	async fn close(&mut self) -> TransportResult<()>;
}

// vim: ts=4
