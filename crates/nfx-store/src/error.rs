use nfx_types::ObjectKey;

/// Errors from record store operations.
///
/// Every variant means the store could not answer; none of them is used for
/// "no rows matched".
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing store cannot be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Query failure reported by SQLite.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A row exists but a required column is missing or malformed.
    #[error("corrupt row {key}: {reason}")]
    CorruptRow { key: ObjectKey, reason: String },
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
