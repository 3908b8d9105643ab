//! Per-level tree classification
//!
//! One call classifies the entries of a single directory pair. The sync walk
//! recurses depth-first and calls this once per level; the differ itself
//! never touches the filesystem.

use std::collections::BTreeMap;

use crate::exclude::ExcludeSet;
use crate::types::TreeEntry;

/// Classification of one directory level.
///
/// Entries are carried whole (name plus kind) because the caller needs the
/// kind on both sides: source entries drive recursion and transfer, and
/// destination-only entries drive deletion. Name-sorted, so the walk order
/// is deterministic; correctness does not depend on it.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DiffSets {
	/// Present on both sides (source side's view of the entry)
	pub common: Vec<TreeEntry>,

	/// Present only on the source side
	pub source_only: Vec<TreeEntry>,

	/// Present only on the destination side; stale if deletion is enabled
	pub destination_only: Vec<TreeEntry>,
}

impl DiffSets {
	/// Source-side entries in name order: common first would be arbitrary,
	/// so this merges the two sorted sets instead.
	pub fn source_entries(&self) -> Vec<&TreeEntry> {
		let mut entries: Vec<&TreeEntry> =
			self.common.iter().chain(self.source_only.iter()).collect();
		entries.sort_by(|a, b| a.name.cmp(&b.name));
		entries
	}
}

/// Classify one directory level by exact, case-sensitive name match.
///
/// Excluded names are dropped from both sides before classification, so an
/// excluded entry can neither be transferred nor reported stale.
pub fn diff(source: &[TreeEntry], destination: &[TreeEntry], exclude: &ExcludeSet) -> DiffSets {
	let source: BTreeMap<&str, &TreeEntry> = source
		.iter()
		.filter(|e| !exclude.is_excluded(&e.name))
		.map(|e| (e.name.as_str(), e))
		.collect();
	let destination: BTreeMap<&str, &TreeEntry> = destination
		.iter()
		.filter(|e| !exclude.is_excluded(&e.name))
		.map(|e| (e.name.as_str(), e))
		.collect();

	let mut sets = DiffSets::default();
	for (name, entry) in &source {
		if destination.contains_key(name) {
			sets.common.push((*entry).clone());
		} else {
			sets.source_only.push((*entry).clone());
		}
	}
	for (name, entry) in &destination {
		if !source.contains_key(name) {
			sets.destination_only.push((*entry).clone());
		}
	}
	sets
}


// vim: ts=4
