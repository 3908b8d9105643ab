//! Sync pass orchestration
//!
//! One pass: load history, ensure the destination root exists, walk the
//! tree pair depth-first (per level: transfers for common and source-only
//! entries, then deletions for destination-only entries, before unwinding),
//! save history. A pass that fails mid-walk saves nothing; completed
//! transfers stay on disk and get re-decided next run.

use futures::future::BoxFuture;
use std::io;
use std::path::Path;
use tracing::{debug, info};

use crate::callbacks::{NoCallbacks, SyncCallbacks};
use crate::delete;
use crate::diff;
use crate::error::SyncError;
use crate::exclude::ExcludeSet;
use crate::history::{SyncHistory, SyncRecord};
use crate::policy::{self, Decision};
use crate::transport::Transport;
use crate::types::{Direction, Timestamp, TreeEntry};
use crate::util;

/// Counters for one completed pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
	pub transferred: usize,
	pub skipped: usize,
	pub deleted: usize,
}

/// Drives one-directional sync passes over a transport.
///
/// Owns the transport for its lifetime; a pass is strictly sequential, one
/// transport operation outstanding at a time. Running two passes over the
/// same local root concurrently is unsupported: the history document has no
/// locking and the last writer wins.
pub struct Synchronizer<T: Transport> {
	transport: T,
	exclude: ExcludeSet,
	callbacks: Box<dyn SyncCallbacks>,
}

impl<T: Transport> Synchronizer<T> {
	/// Wrap a connected transport with the built-in exclusion set and no
	/// observer.
	pub fn new(transport: T) -> Result<Self, SyncError> {
		Ok(Synchronizer {
			transport,
			exclude: ExcludeSet::new(&[])?,
			callbacks: Box::new(NoCallbacks),
		})
	}

	/// Replace the exclusion set.
	pub fn exclude(mut self, exclude: ExcludeSet) -> Self {
		self.exclude = exclude;
		self
	}

	/// Attach an observer for per-entry events.
	pub fn callbacks(mut self, callbacks: Box<dyn SyncCallbacks>) -> Self {
		self.callbacks = callbacks;
		self
	}

	/// Sync local to remote. Local is the source; with `delete_stale`,
	/// remote-only entries are removed.
	pub async fn push(
		&mut self,
		remote_root: &str,
		local_root: &Path,
		delete_stale: bool,
	) -> Result<SyncStats, SyncError> {
		self.sync(Direction::Push, remote_root, local_root, delete_stale).await
	}

	/// Sync remote to local. Remote is the source; with `delete_stale`,
	/// local-only entries are removed.
	pub async fn pull(
		&mut self,
		remote_root: &str,
		local_root: &Path,
		delete_stale: bool,
	) -> Result<SyncStats, SyncError> {
		self.sync(Direction::Pull, remote_root, local_root, delete_stale).await
	}

	/// Release the transport connection.
	pub async fn close(&mut self) -> Result<(), SyncError> {
		self.transport.close().await.map_err(SyncError::from)
	}

	async fn sync(
		&mut self,
		direction: Direction,
		remote_root: &str,
		local_root: &Path,
		delete_stale: bool,
	) -> Result<SyncStats, SyncError> {
		let result = self.run_pass(direction, remote_root, local_root, delete_stale).await;
		if let Err(ref e) = result {
			self.callbacks.on_error(e);
		}
		result
	}

	async fn run_pass(
		&mut self,
		direction: Direction,
		remote_root: &str,
		local_root: &Path,
		delete_stale: bool,
	) -> Result<SyncStats, SyncError> {
		info!("{} pass: remote {} / local {}", direction, remote_root, local_root.display());

		// History lives in the local root in both directions. Absent is
		// fine; malformed aborts here, before any transfer.
		let mut history = SyncHistory::load(local_root).await?;

		match direction {
			Direction::Push => self.transport.make_dir(remote_root).await?,
			Direction::Pull => {
				tokio::fs::create_dir_all(local_root).await.map_err(|e| SyncError::LocalIo {
					op: "create-dir",
					path: local_root.to_path_buf(),
					source: e,
				})?
			}
		}

		let mut stats = SyncStats::default();
		self.walk(direction, local_root, remote_root, delete_stale, &mut history, &mut stats)
			.await?;

		history.save(local_root).await?;
		info!(
			"{} pass done: {} transferred, {} skipped, {} deleted",
			direction, stats.transferred, stats.skipped, stats.deleted
		);
		Ok(stats)
	}

	/// Process one directory pair and recurse depth-first.
	///
	/// Deletions run after transfers at each level, and a directory's
	/// children are fully handled before the walk unwinds to its parent.
	fn walk<'a>(
		&'a mut self,
		direction: Direction,
		local_dir: &'a Path,
		remote_dir: &'a str,
		delete_stale: bool,
		history: &'a mut SyncHistory,
		stats: &'a mut SyncStats,
	) -> BoxFuture<'a, Result<(), SyncError>> {
		Box::pin(async move {
			debug!("{}: walking {} <-> {}", direction, local_dir.display(), remote_dir);

			let (source, destination) = match direction {
				Direction::Push => {
					(list_local(local_dir).await?, self.transport.list(remote_dir).await?)
				}
				Direction::Pull => {
					(self.transport.list(remote_dir).await?, list_local(local_dir).await?)
				}
			};
			let sets = diff::diff(&source, &destination, &self.exclude);

			for entry in sets.source_entries() {
				let child_local = local_dir.join(&entry.name);
				let child_remote = util::join_remote(remote_dir, &entry.name);

				if entry.is_dir {
					// A source-only directory has no destination subtree
					// yet; create it, then recurse as if it were empty.
					if sets.source_only.contains(entry) {
						self.ensure_destination_dir(direction, &child_local, &child_remote)
							.await?;
					}
					self.walk(
						direction,
						&child_local,
						&child_remote,
						delete_stale,
						history,
						stats,
					)
					.await?;
				} else {
					self.sync_file(direction, &child_local, &child_remote, history, stats)
						.await?;
				}
			}

			delete::reconcile(
				&mut self.transport,
				direction,
				local_dir,
				remote_dir,
				&sets.destination_only,
				delete_stale,
				self.callbacks.as_ref(),
				stats,
			)
			.await
		})
	}

	async fn sync_file(
		&mut self,
		direction: Direction,
		local: &Path,
		remote: &str,
		history: &mut SyncHistory,
		stats: &mut SyncStats,
	) -> Result<(), SyncError> {
		let destination_mtime = self.destination_mtime(direction, local, remote).await?;
		let recorded =
			history.get(direction, remote).map(|r| r.destination_mtime(direction));

		match policy::decide(destination_mtime, recorded) {
			Decision::Transfer => {
				debug!("{}: transferring {}", direction, remote);
				match direction {
					Direction::Push => self.transport.upload(local, remote).await?,
					Direction::Pull => self.transport.download(remote, local).await?,
				}

				let record = self.read_back(local, remote).await?;
				history.record(direction, remote.to_string(), record);
				self.callbacks.on_transfer(direction, remote);
				stats.transferred += 1;
			}
			Decision::Skip => {
				self.callbacks.on_skip(direction, remote);
				stats.skipped += 1;
			}
		}
		Ok(())
	}

	/// Current destination mtime, `None` when the destination file is
	/// absent. A remote NotFound is the recoverable signal from the error
	/// design; anything else propagates.
	async fn destination_mtime(
		&mut self,
		direction: Direction,
		local: &Path,
		remote: &str,
	) -> Result<Option<Timestamp>, SyncError> {
		match direction {
			Direction::Push => match self.transport.stat_mtime(remote).await {
				Ok(mtime) => Ok(Some(mtime)),
				Err(e) if e.is_not_found() => Ok(None),
				Err(e) => Err(e.into()),
			},
			Direction::Pull => local_mtime(local).await,
		}
	}

	/// Post-transfer baseline for the history record. Both sides are
	/// re-read, never taken from pre-transfer values, because the copy
	/// itself sets the destination's mtime.
	async fn read_back(&mut self, local: &Path, remote: &str) -> Result<SyncRecord, SyncError> {
		let local_mtime = local_mtime(local).await?.ok_or_else(|| SyncError::LocalIo {
			op: "stat",
			path: local.to_path_buf(),
			source: io::Error::new(io::ErrorKind::NotFound, "file missing after transfer"),
		})?;
		let remote_mtime = self.transport.stat_mtime(remote).await?;
		Ok(SyncRecord { local_mtime, remote_mtime })
	}

	async fn ensure_destination_dir(
		&mut self,
		direction: Direction,
		local: &Path,
		remote: &str,
	) -> Result<(), SyncError> {
		match direction {
			Direction::Push => {
				self.transport.make_dir(remote).await?;
				self.callbacks.on_dir_create(direction, remote);
			}
			Direction::Pull => match tokio::fs::create_dir(local).await {
				Ok(()) => self.callbacks.on_dir_create(direction, &local.to_string_lossy()),
				Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
				Err(e) => {
					return Err(SyncError::LocalIo {
						op: "create-dir",
						path: local.to_path_buf(),
						source: e,
					})
				}
			},
		}
		Ok(())
	}
}

async fn list_local(dir: &Path) -> Result<Vec<TreeEntry>, SyncError> {
	let io_err = |e| SyncError::LocalIo { op: "read-dir", path: dir.to_path_buf(), source: e };

	let mut reader = tokio::fs::read_dir(dir).await.map_err(io_err)?;
	let mut entries = Vec::new();
	while let Some(entry) = reader.next_entry().await.map_err(io_err)? {
		let file_type = entry.file_type().await.map_err(|e| SyncError::LocalIo {
			op: "stat",
			path: entry.path(),
			source: e,
		})?;
		entries.push(TreeEntry {
			name: entry.file_name().to_string_lossy().into_owned(),
			is_dir: file_type.is_dir(),
		});
	}
	Ok(entries)
}

async fn local_mtime(path: &Path) -> Result<Option<Timestamp>, SyncError> {
	match tokio::fs::metadata(path).await {
		Ok(meta) => {
			let modified = meta.modified().map_err(|e| SyncError::LocalIo {
				op: "stat",
				path: path.to_path_buf(),
				source: e,
			})?;
			Ok(Some(util::unix_seconds(modified)))
		}
		Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
		Err(e) => Err(SyncError::LocalIo { op: "stat", path: path.to_path_buf(), source: e }),
	}
}


// vim: ts=4
