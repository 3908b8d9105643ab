//! Pattern-based entry exclusion using glob patterns
//!
//! Excluded names are dropped from both sides of a listing before
//! classification, so they are never transferred and never deleted.
//! The sync-history document is always in the built-in set.

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::SyncError;
use crate::history::HISTORY_FILE;

/// Compiled set of entry names excluded from every pass
#[derive(Debug)]
pub struct ExcludeSet {
	set: GlobSet,
}

impl ExcludeSet {
	/// Compile an exclusion set from user glob patterns.
	///
	/// The history document name is always added, whether or not the caller
	/// lists it.
	pub fn new(patterns: &[String]) -> Result<Self, SyncError> {
		let mut builder = GlobSetBuilder::new();
		builder.add(Glob::new(HISTORY_FILE)?);
		for pattern in patterns {
			builder.add(Glob::new(pattern)?);
		}
		Ok(ExcludeSet { set: builder.build()? })
	}

	/// True if an entry with this name must be skipped.
	///
	/// `.` and `..` never name real entries and are always excluded.
	pub fn is_excluded(&self, name: &str) -> bool {
		name == "." || name == ".." || self.set.is_match(name)
	}
}


// vim: ts=4
