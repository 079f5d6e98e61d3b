//! Read-only record store for a note store's sync-object table.
//!
//! The object engine never talks to a database directly. It asks a
//! [`RecordStore`] for rows keyed by foreign key and builds its trees from
//! the answers. Column and table naming stay inside this crate.
//!
//! # Storage Backends
//!
//! - [`InMemoryRecordStore`] -- `Vec`-backed store for tests and embedding
//! - [`SqliteRecordStore`] -- read-only `rusqlite` connection to a dump
//!
//! # Design Rules
//!
//! 1. The store is never written through this interface.
//! 2. Rows come back in store order; callers must not re-sort them.
//! 3. An empty result is `Ok(vec![])`, never an error.
//! 4. All I/O and query errors are propagated, never silently ignored.

pub mod error;
pub mod memory;
pub mod rows;
pub mod sqlite;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryRecordStore;
pub use rows::{AttachmentRow, MediaRow, SyncObjectRow, ThumbnailRow};
pub use sqlite::SqliteRecordStore;
pub use traits::RecordStore;
