//! Embedded object composition and report flattening.
//!
//! A note store keeps every attachment of a note as a flat row in its
//! sync-object table. This crate turns those rows into an
//! [`ObjectTree`]: objects own their children (by key) and the thumbnails
//! that preview them, and every tree can be flattened into fixed-width
//! [`ReportRow`]s suitable for CSV.
//!
//! # Flattening order
//!
//! Pre-order: an object's own row, then each child subtree in insertion
//! order, then each thumbnail in the order the store returned them.
//!
//! # Invariants
//!
//! - Object keys are unique within a tree.
//! - An object has at most one parent; parent chains always terminate.
//! - Every report row has exactly [`ReportRow::HEADERS`]`.len()` columns.

pub mod content;
pub mod error;
pub mod loader;
pub mod object;
pub mod report;
pub mod thumbnail;
pub mod tree;

pub use content::{EmbeddedContent, ObjectRecord};
pub use error::{ObjectError, ObjectResult};
pub use loader::load_note_objects;
pub use object::{EmbeddedObject, MediaRef, ObjectKind};
pub use report::{report_headers, write_csv, write_json, ReportRow};
pub use thumbnail::{find_thumbnails_for, Thumbnail};
pub use tree::ObjectTree;
