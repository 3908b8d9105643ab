//! # sftpsync - One-way directory synchronizer
//!
//! Synchronizes a directory tree in one direction between the local
//! filesystem and a remote filesystem reached through an abstract
//! file-transfer [`Transport`]. Change detection is timestamp-based,
//! driven by a persisted history of prior transfers; no checksums, no
//! two-way merge.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sftpsync::{LocalTransport, Synchronizer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = LocalTransport::new("/mnt/backup");
//!     let mut sync = Synchronizer::new(transport)?;
//!     let stats = sync.push("/", "./data".as_ref(), false).await?;
//!     println!("{} files transferred", stats.transferred);
//!     sync.close().await?;
//!     Ok(())
//! }
//! ```

pub mod callbacks;
pub mod delete;
pub mod diff;
pub mod error;
pub mod exclude;
pub mod history;
pub mod logging;
pub mod policy;
pub mod sync;
pub mod transport;
pub mod types;
pub mod util;

// Re-export commonly used types
pub use callbacks::{CallbackBuilder, LogCallbacks, NoCallbacks, SyncCallbacks};
pub use error::{SyncError, TransportError};
pub use exclude::ExcludeSet;
pub use history::{SyncHistory, SyncRecord, HISTORY_FILE};
pub use sync::{SyncStats, Synchronizer};
pub use transport::{LocalTransport, Transport};
pub use types::{Direction, Timestamp, TreeEntry};

// vim: ts=4
