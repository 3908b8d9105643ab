//! Directory-backed transport
//!
//! Maps remote paths onto a directory of the local filesystem. This is what
//! the CLI drives when the remote side is reachable as a mounted path, and
//! it doubles as the reference implementation of the transport contract in
//! the test suite.

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};

use super::{Transport, TransportResult};
use crate::error::TransportError;
use crate::types::{Timestamp, TreeEntry};
use crate::util;

/// Transport over a local directory acting as the remote root
#[derive(Debug)]
pub struct LocalTransport {
	root: PathBuf,
}

impl LocalTransport {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		LocalTransport { root: root.into() }
	}

	fn resolve(&self, path: &str) -> PathBuf {
		self.root.join(path.trim_start_matches('/'))
	}
}

fn map_err(op: &'static str, path: &str, e: io::Error) -> TransportError {
	if e.kind() == io::ErrorKind::NotFound {
		TransportError::NotFound { path: path.to_string() }
	} else {
		TransportError::Io { op, path: path.to_string(), source: e }
	}
}

#[async_trait]
impl Transport for LocalTransport {
	async fn list(&mut self, path: &str) -> TransportResult<Vec<TreeEntry>> {
		let dir = self.resolve(path);
		let mut reader =
			tokio::fs::read_dir(&dir).await.map_err(|e| map_err("list", path, e))?;

		let mut entries = Vec::new();
		while let Some(entry) =
			reader.next_entry().await.map_err(|e| map_err("list", path, e))?
		{
			let file_type =
				entry.file_type().await.map_err(|e| map_err("list", path, e))?;
			entries.push(TreeEntry {
				name: entry.file_name().to_string_lossy().into_owned(),
				is_dir: file_type.is_dir(),
			});
		}
		Ok(entries)
	}

	async fn stat_mtime(&mut self, path: &str) -> TransportResult<Timestamp> {
		let meta = tokio::fs::metadata(self.resolve(path))
			.await
			.map_err(|e| map_err("stat", path, e))?;
		let modified = meta.modified().map_err(|e| map_err("stat", path, e))?;
		Ok(util::unix_seconds(modified))
	}

	async fn upload(&mut self, local: &Path, remote: &str) -> TransportResult<()> {
		tokio::fs::copy(local, self.resolve(remote))
			.await
			.map_err(|e| map_err("upload", remote, e))?;
		Ok(())
	}

	async fn download(&mut self, remote: &str, local: &Path) -> TransportResult<()> {
		tokio::fs::copy(self.resolve(remote), local)
			.await
			.map_err(|e| map_err("download", remote, e))?;
		Ok(())
	}

	async fn make_dir(&mut self, path: &str) -> TransportResult<()> {
		match tokio::fs::create_dir(self.resolve(path)).await {
			Ok(()) => Ok(()),
			Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
			Err(e) => Err(map_err("mkdir", path, e)),
		}
	}

	async fn remove_file(&mut self, path: &str) -> TransportResult<()> {
		tokio::fs::remove_file(self.resolve(path))
			.await
			.map_err(|e| map_err("remove-file", path, e))
	}

	async fn remove_dir(&mut self, path: &str) -> TransportResult<()> {
		tokio::fs::remove_dir(self.resolve(path))
			.await
			.map_err(|e| map_err("remove-dir", path, e))
	}

	async fn close(&mut self) -> TransportResult<()> {
		Ok(())
	}
}


// vim: ts=4
