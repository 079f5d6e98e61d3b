use nfx_types::{NoteId, ObjectKey};

use crate::error::StoreResult;
use crate::rows::{AttachmentRow, MediaRow, ThumbnailRow};

/// Read-only view of the sync-object table.
///
/// All implementations must satisfy these invariants:
/// - Results are returned in store iteration order, stable within a query.
/// - Zero matching rows is `Ok(vec![])`.
/// - Connectivity and query failures are returned as `Err`, never swallowed.
pub trait RecordStore: Send + Sync {
    /// All rows whose attachment reference (`ZATTACHMENT`) equals `attachment`.
    fn thumbnail_rows(&self, attachment: ObjectKey) -> StoreResult<Vec<ThumbnailRow>>;

    /// All embedded-object rows owned by `note`.
    ///
    /// Thumbnail rows are excluded; they are reached through
    /// [`thumbnail_rows`](Self::thumbnail_rows) from their owner.
    fn attachment_rows(&self, note: NoteId) -> StoreResult<Vec<AttachmentRow>>;

    /// The media row with primary key `key`, if any.
    fn media_row(&self, key: ObjectKey) -> StoreResult<Option<MediaRow>>;
}
