//! Callback trait for sync pass events
//!
//! The core reports what it did through an injected observer instead of a
//! global logger, so library callers choose their own sink. All methods
//! default to no-ops.

use tracing::{debug, info};

use crate::error::SyncError;
use crate::types::Direction;

// Type aliases to reduce complexity
type PathEventFn = dyn Fn(Direction, &str) + Send + Sync;

/// Observer for per-entry events during a sync pass.
///
/// `remote_path` is the canonical key of the entry (the same string the
/// history document uses); for deletions of local entries the local path is
/// reported instead.
pub trait SyncCallbacks: Send + Sync {
	/// A file was transferred to the destination
	fn on_transfer(&self, _direction: Direction, _remote_path: &str) {}

	/// A file was left alone by the transfer policy
	fn on_skip(&self, _direction: Direction, _remote_path: &str) {}

	/// A stale destination entry was deleted
	fn on_delete(&self, _direction: Direction, _path: &str) {}

	/// A missing destination directory was created
	fn on_dir_create(&self, _direction: Direction, _path: &str) {}

	/// The pass is about to abort with this error
	fn on_error(&self, _error: &SyncError) {}
}

/// Default observer that does nothing
pub struct NoCallbacks;

impl SyncCallbacks for NoCallbacks {}

/// Observer that reports through `tracing`, used by the CLI
pub struct LogCallbacks;

impl SyncCallbacks for LogCallbacks {
	fn on_transfer(&self, direction: Direction, remote_path: &str) {
		info!("{}: transferred {}", direction, remote_path);
	}

	fn on_skip(&self, direction: Direction, remote_path: &str) {
		debug!("{}: up to date {}", direction, remote_path);
	}

	fn on_delete(&self, direction: Direction, path: &str) {
		info!("{}: deleted stale {}", direction, path);
	}

	fn on_dir_create(&self, direction: Direction, path: &str) {
		debug!("{}: created directory {}", direction, path);
	}

	fn on_error(&self, error: &SyncError) {
		tracing::error!("sync pass failed: {}", error);
	}
}

/// Builder for callbacks using function closures
pub struct CallbackBuilder {
	transfer: Option<Box<PathEventFn>>,
	skip: Option<Box<PathEventFn>>,
	delete: Option<Box<PathEventFn>>,
}

impl CallbackBuilder {
	pub fn new() -> Self {
		CallbackBuilder { transfer: None, skip: None, delete: None }
	}

	pub fn on_transfer<F>(mut self, callback: F) -> Self
	where
		F: Fn(Direction, &str) + Send + Sync + 'static,
	{
		self.transfer = Some(Box::new(callback));
		self
	}

	pub fn on_skip<F>(mut self, callback: F) -> Self
	where
		F: Fn(Direction, &str) + Send + Sync + 'static,
	{
		self.skip = Some(Box::new(callback));
		self
	}

	pub fn on_delete<F>(mut self, callback: F) -> Self
	where
		F: Fn(Direction, &str) + Send + Sync + 'static,
	{
		self.delete = Some(Box::new(callback));
		self
	}

	pub fn build(self) -> Box<dyn SyncCallbacks> {
		Box::new(CompositeCallbacks {
			transfer: self.transfer,
			skip: self.skip,
			delete: self.delete,
		})
	}
}

impl Default for CallbackBuilder {
	fn default() -> Self {
		Self::new()
	}
}

struct CompositeCallbacks {
	transfer: Option<Box<PathEventFn>>,
	skip: Option<Box<PathEventFn>>,
	delete: Option<Box<PathEventFn>>,
}

impl SyncCallbacks for CompositeCallbacks {
	fn on_transfer(&self, direction: Direction, remote_path: &str) {
		if let Some(ref callback) = self.transfer {
			callback(direction, remote_path);
		}
	}

	fn on_skip(&self, direction: Direction, remote_path: &str) {
		if let Some(ref callback) = self.skip {
			callback(direction, remote_path);
		}
	}

	fn on_delete(&self, direction: Direction, path: &str) {
		if let Some(ref callback) = self.delete {
			callback(direction, path);
		}
	}
}


// vim: ts=4
