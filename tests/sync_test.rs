use filetime::FileTime;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

use sftpsync::{
	CallbackBuilder, Direction, LocalTransport, SyncError, SyncHistory, Synchronizer,
	HISTORY_FILE,
};

fn write_file(root: &Path, name: &str, content: &[u8]) {
	let path = root.join(name);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent).unwrap();
	}
	std::fs::write(path, content).unwrap();
}

fn mtime_of(path: &Path) -> i64 {
	FileTime::from_last_modification_time(&std::fs::metadata(path).unwrap()).unix_seconds()
}

fn synchronizer(remote: &TempDir) -> Synchronizer<LocalTransport> {
	Synchronizer::new(LocalTransport::new(remote.path())).unwrap()
}

#[tokio::test]
async fn push_copies_source_only_file_and_records_history() {
	let remote = TempDir::new().unwrap();
	let local = TempDir::new().unwrap();
	write_file(local.path(), "a.txt", b"hello");

	let mut sync = synchronizer(&remote);
	let stats = sync.push("/", local.path(), false).await.unwrap();

	assert_eq!(stats.transferred, 1);
	assert_eq!(std::fs::read(remote.path().join("a.txt")).unwrap(), b"hello");

	// History holds the post-transfer mtimes of both sides, keyed by the
	// remote path
	let history = SyncHistory::load(local.path()).await.unwrap();
	let record = history.get(Direction::Push, "/a.txt").copied().unwrap();
	assert_eq!(record.local_mtime, mtime_of(&local.path().join("a.txt")));
	assert_eq!(record.remote_mtime, mtime_of(&remote.path().join("a.txt")));
}

#[tokio::test]
async fn second_push_skips_everything() {
	let remote = TempDir::new().unwrap();
	let local = TempDir::new().unwrap();
	write_file(local.path(), "a.txt", b"one");
	write_file(local.path(), "sub/b.txt", b"two");

	let mut sync = synchronizer(&remote);
	let first = sync.push("/", local.path(), false).await.unwrap();
	assert_eq!(first.transferred, 2);

	let transfers = Arc::new(AtomicUsize::new(0));
	let counter = transfers.clone();
	let mut sync = synchronizer(&remote).callbacks(
		CallbackBuilder::new()
			.on_transfer(move |_, _| {
				counter.fetch_add(1, Ordering::SeqCst);
			})
			.build(),
	);

	let second = sync.push("/", local.path(), false).await.unwrap();
	assert_eq!(second.transferred, 0);
	assert_eq!(second.skipped, 2);
	assert_eq!(transfers.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn pull_downloads_then_skips_on_rerun() {
	let remote = TempDir::new().unwrap();
	let local = TempDir::new().unwrap();
	write_file(remote.path(), "b.txt", b"remote data");

	let mut sync = synchronizer(&remote);
	let first = sync.pull("/", local.path(), false).await.unwrap();
	assert_eq!(first.transferred, 1);
	assert_eq!(std::fs::read(local.path().join("b.txt")).unwrap(), b"remote data");

	let second = sync.pull("/", local.path(), false).await.unwrap();
	assert_eq!(second.transferred, 0);
	assert_eq!(second.skipped, 1);
}

#[tokio::test]
async fn nested_source_tree_is_recreated_on_destination() {
	let remote = TempDir::new().unwrap();
	let local = TempDir::new().unwrap();
	write_file(local.path(), "a/b/c.txt", b"deep");
	std::fs::create_dir(local.path().join("empty")).unwrap();

	let mut sync = synchronizer(&remote);
	let stats = sync.push("/", local.path(), false).await.unwrap();

	assert_eq!(stats.transferred, 1);
	assert_eq!(std::fs::read(remote.path().join("a/b/c.txt")).unwrap(), b"deep");
	assert!(remote.path().join("empty").is_dir());
}

#[tokio::test]
async fn destination_only_entries_survive_without_delete() {
	let remote = TempDir::new().unwrap();
	let local = TempDir::new().unwrap();
	write_file(remote.path(), "stale.txt", b"old");

	let mut sync = synchronizer(&remote);
	let stats = sync.push("/", local.path(), false).await.unwrap();

	assert_eq!(stats.deleted, 0);
	assert!(remote.path().join("stale.txt").exists());
}

#[tokio::test]
async fn push_with_delete_removes_remote_only_tree() {
	let remote = TempDir::new().unwrap();
	let local = TempDir::new().unwrap();
	write_file(local.path(), "keep.txt", b"keep");
	write_file(remote.path(), "stale/deep/x.txt", b"x");
	write_file(remote.path(), "stale/y.txt", b"y");

	let mut sync = synchronizer(&remote);
	let stats = sync.push("/", local.path(), true).await.unwrap();

	// remove_dir only succeeds on empty directories, so a surviving pass
	// proves descendants went first
	assert!(!remote.path().join("stale").exists());
	assert!(remote.path().join("keep.txt").exists());
	assert_eq!(stats.deleted, 4);
}

#[tokio::test]
async fn pull_with_delete_removes_local_only_entries_not_remote_ones() {
	let remote = TempDir::new().unwrap();
	let local = TempDir::new().unwrap();
	write_file(remote.path(), "stale.txt", b"still wanted");
	write_file(local.path(), "keep.txt", b"local only");

	let mut sync = synchronizer(&remote);
	let stats = sync.pull("/", local.path(), true).await.unwrap();

	// Remote-only means source-only on a pull: downloaded, never deleted
	assert!(remote.path().join("stale.txt").exists());
	assert_eq!(std::fs::read(local.path().join("stale.txt")).unwrap(), b"still wanted");

	// Local-only is destination-only on a pull: removed
	assert!(!local.path().join("keep.txt").exists());
	assert_eq!(stats.deleted, 1);

	// The history document lives in the local root and is never stale
	assert!(SyncHistory::document_path(local.path()).exists());
}

#[tokio::test]
async fn changed_destination_is_rewritten() {
	let remote = TempDir::new().unwrap();
	let local = TempDir::new().unwrap();
	write_file(local.path(), "a.txt", b"v1");

	let mut sync = synchronizer(&remote);
	sync.push("/", local.path(), false).await.unwrap();

	// Out-of-band edit on the destination: bump its mtime past the
	// recorded baseline
	let remote_file = remote.path().join("a.txt");
	let bumped = FileTime::from_unix_time(mtime_of(&remote_file) + 100, 0);
	filetime::set_file_mtime(&remote_file, bumped).unwrap();
	write_file(local.path(), "a.txt", b"v2");

	let stats = sync.push("/", local.path(), false).await.unwrap();
	assert_eq!(stats.transferred, 1);
	assert_eq!(std::fs::read(&remote_file).unwrap(), b"v2");
}

#[tokio::test]
async fn unchanged_destination_is_skipped_even_when_source_changed() {
	let remote = TempDir::new().unwrap();
	let local = TempDir::new().unwrap();
	write_file(local.path(), "a.txt", b"v1");

	let mut sync = synchronizer(&remote);
	sync.push("/", local.path(), false).await.unwrap();

	// Only the source changes; the destination still matches its recorded
	// mtime, so the policy (destination-now vs destination-then) skips
	let local_file = local.path().join("a.txt");
	std::fs::write(&local_file, b"v2").unwrap();
	let bumped = FileTime::from_unix_time(mtime_of(&local_file) + 100, 0);
	filetime::set_file_mtime(&local_file, bumped).unwrap();

	let stats = sync.push("/", local.path(), false).await.unwrap();
	assert_eq!(stats.transferred, 0);
	assert_eq!(std::fs::read(remote.path().join("a.txt")).unwrap(), b"v1");
}

#[tokio::test]
async fn history_file_is_excluded_from_delete_passes() {
	let remote = TempDir::new().unwrap();
	let local = TempDir::new().unwrap();
	write_file(local.path(), "a.txt", b"a");

	let mut sync = synchronizer(&remote);
	sync.push("/", local.path(), false).await.unwrap();

	// A pull with delete enabled sees the local root as destination; the
	// history document it contains must not count as stale
	write_file(remote.path(), "a.txt", b"a");
	sync.pull("/", local.path(), true).await.unwrap();

	assert!(local.path().join(HISTORY_FILE).exists());
}

#[tokio::test]
async fn excluded_patterns_are_neither_transferred_nor_deleted() {
	let remote = TempDir::new().unwrap();
	let local = TempDir::new().unwrap();
	write_file(local.path(), "code.rs", b"fn main() {}");
	write_file(local.path(), "scratch.tmp", b"junk");
	write_file(remote.path(), "old.tmp", b"stale junk");

	let transport = LocalTransport::new(remote.path());
	let mut sync = Synchronizer::new(transport)
		.unwrap()
		.exclude(sftpsync::ExcludeSet::new(&["*.tmp".to_string()]).unwrap());

	let stats = sync.push("/", local.path(), true).await.unwrap();

	assert_eq!(stats.transferred, 1);
	assert_eq!(stats.deleted, 0);
	assert!(!remote.path().join("scratch.tmp").exists());
	assert!(remote.path().join("old.tmp").exists());
}

#[tokio::test]
async fn aborted_pass_saves_no_history() {
	let remote = TempDir::new().unwrap();
	let local = TempDir::new().unwrap();
	write_file(local.path(), "a.txt", b"a");
	std::fs::write(SyncHistory::document_path(local.path()), b"][").unwrap();

	let mut sync = synchronizer(&remote);
	let err = sync.push("/", local.path(), false).await;
	assert!(matches!(err, Err(SyncError::HistoryCorrupted { .. })));

	// The malformed document is left as-is; nothing was transferred
	assert_eq!(std::fs::read(SyncHistory::document_path(local.path())).unwrap(), b"][");
	assert!(!remote.path().join("a.txt").exists());
}

#[tokio::test]
async fn failed_transfer_mid_walk_saves_no_history() {
	let remote = TempDir::new().unwrap();
	let local = TempDir::new().unwrap();
	write_file(local.path(), "a.txt", b"payload");
	// A remote directory squatting on the file's name makes the upload fail
	// partway through the walk, after history was loaded cleanly
	std::fs::create_dir(remote.path().join("a.txt")).unwrap();

	let mut sync = synchronizer(&remote);
	let err = sync.push("/", local.path(), false).await;

	assert!(matches!(err, Err(SyncError::Transport(_))));
	// An aborted walk persists nothing: the history document is never written
	assert!(!SyncHistory::document_path(local.path()).exists());
}

#[tokio::test]
async fn pull_records_are_keyed_by_remote_path() {
	let remote = TempDir::new().unwrap();
	let local = TempDir::new().unwrap();
	write_file(remote.path(), "sub/b.txt", b"b");

	let mut sync = synchronizer(&remote);
	sync.pull("/", local.path(), false).await.unwrap();

	let history = SyncHistory::load(local.path()).await.unwrap();
	let record = history.get(Direction::Pull, "/sub/b.txt").copied().unwrap();
	assert_eq!(record.local_mtime, mtime_of(&local.path().join("sub/b.txt")));
	assert_eq!(record.remote_mtime, mtime_of(&remote.path().join("sub/b.txt")));
	assert!(history.push.is_empty());
}
