//! Stale-entry reconciliation
//!
//! Removes destination entries the differ found on the destination side
//! only. Directories go depth-first, children before parent, so the
//! transport's empty-directory-only `remove_dir` is always satisfied. Any
//! failure propagates and aborts the pass.

use futures::future::BoxFuture;
use std::path::Path;

use crate::callbacks::SyncCallbacks;
use crate::error::SyncError;
use crate::sync::SyncStats;
use crate::transport::Transport;
use crate::types::{Direction, TreeEntry};
use crate::util;

/// Delete the stale entries of one directory level.
///
/// No-op when `delete_enabled` is false. On push the destination is remote
/// and deletion goes through the transport; on pull it is the local tree.
pub async fn reconcile<T: Transport>(
	transport: &mut T,
	direction: Direction,
	local_dir: &Path,
	remote_dir: &str,
	stale: &[TreeEntry],
	delete_enabled: bool,
	callbacks: &dyn SyncCallbacks,
	stats: &mut SyncStats,
) -> Result<(), SyncError> {
	if !delete_enabled {
		return Ok(());
	}

	for entry in stale {
		match direction {
			Direction::Push => {
				let path = util::join_remote(remote_dir, &entry.name);
				remove_remote_tree(transport, &path, entry.is_dir, callbacks, stats).await?;
			}
			Direction::Pull => {
				let path = local_dir.join(&entry.name);
				remove_local_tree(&path, entry.is_dir, callbacks, stats).await?;
			}
		}
	}
	Ok(())
}

/// Remove a remote entry, recursing into directories children-first.
fn remove_remote_tree<'a, T: Transport>(
	transport: &'a mut T,
	path: &'a str,
	is_dir: bool,
	callbacks: &'a dyn SyncCallbacks,
	stats: &'a mut SyncStats,
) -> BoxFuture<'a, Result<(), SyncError>> {
	Box::pin(async move {
		if is_dir {
			let children = transport.list(path).await?;
			for child in children {
				let child_path = util::join_remote(path, &child.name);
				remove_remote_tree(transport, &child_path, child.is_dir, callbacks, stats)
					.await?;
			}
			transport.remove_dir(path).await?;
		} else {
			transport.remove_file(path).await?;
		}
		callbacks.on_delete(Direction::Push, path);
		stats.deleted += 1;
		Ok(())
	})
}

/// Remove a local entry, recursing into directories children-first.
fn remove_local_tree<'a>(
	path: &'a Path,
	is_dir: bool,
	callbacks: &'a dyn SyncCallbacks,
	stats: &'a mut SyncStats,
) -> BoxFuture<'a, Result<(), SyncError>> {
	Box::pin(async move {
		if is_dir {
			let mut reader = tokio::fs::read_dir(path).await.map_err(|e| {
				SyncError::LocalIo { op: "read-dir", path: path.to_path_buf(), source: e }
			})?;
			while let Some(entry) = reader.next_entry().await.map_err(|e| {
				SyncError::LocalIo { op: "read-dir", path: path.to_path_buf(), source: e }
			})? {
				let file_type = entry.file_type().await.map_err(|e| {
					SyncError::LocalIo { op: "stat", path: entry.path(), source: e }
				})?;
				remove_local_tree(&entry.path(), file_type.is_dir(), callbacks, stats)
					.await?;
			}
			tokio::fs::remove_dir(path).await.map_err(|e| SyncError::LocalIo {
				op: "remove-dir",
				path: path.to_path_buf(),
				source: e,
			})?;
		} else {
			tokio::fs::remove_file(path).await.map_err(|e| SyncError::LocalIo {
				op: "remove-file",
				path: path.to_path_buf(),
				source: e,
			})?;
		}
		callbacks.on_delete(Direction::Pull, &path.to_string_lossy());
		stats.deleted += 1;
		Ok(())
	})
}


// vim: ts=4
