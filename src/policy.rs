//! Per-file transfer policy
//!
//! The decision is driven by whether the destination changed since the last
//! recorded sync, not by comparing source and destination timestamps against
//! each other. A destination untouched since its record was written is
//! assumed current and skipped; a destination with no file, no record, or an
//! out-of-band modification is (re)written. Narrow-diff, last-writer-wins
//! per direction.

use crate::types::Timestamp;

/// Outcome of the transfer policy for one file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
	Transfer,
	Skip,
}

/// Decide whether a file needs transferring.
///
/// `destination_mtime` is the destination file's current mtime, `None` when
/// it is absent or unstatable. `recorded_destination_mtime` is the
/// destination-side mtime stored by the last transfer of this path in this
/// direction, `None` when no record exists.
pub fn decide(
	destination_mtime: Option<Timestamp>,
	recorded_destination_mtime: Option<Timestamp>,
) -> Decision {
	match (destination_mtime, recorded_destination_mtime) {
		// No file on the destination side yet
		(None, _) => Decision::Transfer,
		// Never synced in this direction
		(_, None) => Decision::Transfer,
		// Destination changed out-of-band since the last sync
		(Some(now), Some(then)) if now > then => Decision::Transfer,
		_ => Decision::Skip,
	}
}


// vim: ts=4
