//! Error types for object construction, composition and reporting.

use nfx_store::StoreError;
use nfx_types::ObjectKey;

/// Errors that can occur while building or flattening object trees.
#[derive(Debug, thiserror::Error)]
pub enum ObjectError {
    /// The record store could not answer a query.
    #[error("record store error: {0}")]
    Store(#[from] StoreError),

    /// A referenced object is not part of the tree.
    #[error("object not found: {0}")]
    NotFound(ObjectKey),

    /// Attempted to insert an object whose key already exists.
    #[error("duplicate object: {0}")]
    DuplicateObject(ObjectKey),

    /// Attaching `child` under `parent` would close a loop in the parent chain.
    #[error("cyclic attachment: {child} is {parent} or one of its ancestors")]
    CyclicAttachment {
        parent: ObjectKey,
        child: ObjectKey,
    },

    /// The child already belongs to a different parent.
    #[error("object {child} is already attached to {parent}")]
    AlreadyAttached {
        child: ObjectKey,
        parent: ObjectKey,
    },

    /// Writing a CSV report failed.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Writing a JSON report failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error while writing a report.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for object results.
pub type ObjectResult<T> = Result<T, ObjectError>;
