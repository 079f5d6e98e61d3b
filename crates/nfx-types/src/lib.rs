//! Foundation types for the note forensics toolkit.
//!
//! Every other `nfx-*` crate depends on `nfx-types`. The types here are thin
//! wrappers around the raw columns of a note store's sync-object table, so
//! that an object key is never confused with a note id at compile time.
//!
//! # Key Types
//!
//! - [`ObjectKey`] — `Z_PK` of a sync-object row
//! - [`NoteId`] — identifier of the note that owns an object
//! - [`TypeTag`] — uniform type identifier describing an object's format
//! - [`TypeCategory`] — coarse classification of a [`TypeTag`]

pub mod error;
pub mod key;
pub mod type_tag;

pub use error::TypeError;
pub use key::{NoteId, ObjectKey};
pub use type_tag::{TypeCategory, TypeTag};
