use std::sync::RwLock;

use nfx_types::{NoteId, ObjectKey};

use crate::error::{StoreError, StoreResult};
use crate::rows::{AttachmentRow, MediaRow, SyncObjectRow, ThumbnailRow};
use crate::traits::RecordStore;

/// In-memory, `Vec`-backed record store.
///
/// Intended for tests and embedding. Rows are kept in insertion order, which
/// is the iteration order every query reports. A store can be marked
/// offline to exercise the unavailable-store path.
pub struct InMemoryRecordStore {
    rows: RwLock<Vec<SyncObjectRow>>,
    offline: RwLock<bool>,
}

impl InMemoryRecordStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            offline: RwLock::new(false),
        }
    }

    /// Create a store pre-populated with `rows`, in order.
    pub fn from_rows(rows: impl IntoIterator<Item = SyncObjectRow>) -> Self {
        let store = Self::new();
        for row in rows {
            store.insert(row);
        }
        store
    }

    /// Append a row.
    pub fn insert(&self, row: SyncObjectRow) {
        self.rows.write().expect("lock poisoned").push(row);
    }

    /// Remove every row with primary key `key`. Returns the number removed.
    pub fn remove(&self, key: ObjectKey) -> usize {
        let mut rows = self.rows.write().expect("lock poisoned");
        let before = rows.len();
        rows.retain(|row| row.key != key);
        before - rows.len()
    }

    /// Number of rows currently stored.
    pub fn len(&self) -> usize {
        self.rows.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.read().expect("lock poisoned").is_empty()
    }

    /// Make every subsequent query fail (or succeed again).
    pub fn set_offline(&self, offline: bool) {
        *self.offline.write().expect("lock poisoned") = offline;
    }

    fn ensure_online(&self) -> StoreResult<()> {
        if *self.offline.read().expect("lock poisoned") {
            return Err(StoreError::Unavailable("in-memory store is offline".into()));
        }
        Ok(())
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for InMemoryRecordStore {
    fn thumbnail_rows(&self, attachment: ObjectKey) -> StoreResult<Vec<ThumbnailRow>> {
        self.ensure_online()?;
        let rows = self.rows.read().expect("lock poisoned");
        Ok(rows
            .iter()
            .filter(|row| row.attachment == Some(attachment))
            .map(|row| ThumbnailRow {
                key: row.key,
                uuid: row.uuid.clone(),
                height: row.height.unwrap_or(0),
                width: row.width.unwrap_or(0),
            })
            .collect())
    }

    fn attachment_rows(&self, note: NoteId) -> StoreResult<Vec<AttachmentRow>> {
        self.ensure_online()?;
        let rows = self.rows.read().expect("lock poisoned");
        Ok(rows
            .iter()
            .filter(|row| row.note == Some(note) && row.attachment.is_none())
            .filter_map(|row| {
                let type_tag = row.type_tag.clone()?;
                Some(AttachmentRow {
                    key: row.key,
                    uuid: row.uuid.clone(),
                    type_tag,
                    note,
                    parent_attachment: row.parent_attachment,
                    media: row.media,
                })
            })
            .collect())
    }

    fn media_row(&self, key: ObjectKey) -> StoreResult<Option<MediaRow>> {
        self.ensure_online()?;
        let rows = self.rows.read().expect("lock poisoned");
        Ok(rows.iter().find(|row| row.key == key).map(|row| MediaRow {
            key: row.key,
            uuid: row.uuid.clone(),
            filename: row.filename.clone().unwrap_or_default(),
        }))
    }
}

impl std::fmt::Debug for InMemoryRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.len();
        f.debug_struct("InMemoryRecordStore")
            .field("row_count", &count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_store() -> InMemoryRecordStore {
        InMemoryRecordStore::from_rows([
            SyncObjectRow::attachment(10, "IMG-1", "public.jpeg", 1).with_media(50),
            SyncObjectRow::thumbnail(11, "THUMB-A", 10, 96, 128),
            SyncObjectRow::thumbnail(12, "THUMB-B", 10, 192, 256),
            SyncObjectRow::attachment(20, "GAL-1", "com.apple.notes.gallery", 1),
            SyncObjectRow::attachment(21, "PAGE-1", "public.jpeg", 1).with_parent(20),
            SyncObjectRow::attachment(30, "OTHER-NOTE", "public.url", 2),
            SyncObjectRow::media(50, "MEDIA-1", "IMG_0001.jpeg"),
        ])
    }

    // -----------------------------------------------------------------------
    // Thumbnails
    // -----------------------------------------------------------------------

    #[test]
    fn thumbnails_in_insertion_order() {
        let store = make_store();
        let rows = store.thumbnail_rows(ObjectKey::new(10)).unwrap();
        let keys: Vec<i64> = rows.iter().map(|r| r.key.get()).collect();
        assert_eq!(keys, vec![11, 12]);
        assert_eq!(rows[0].height, 96);
        assert_eq!(rows[0].width, 128);
    }

    #[test]
    fn no_thumbnails_is_empty_not_error() {
        let store = make_store();
        assert!(store.thumbnail_rows(ObjectKey::new(20)).unwrap().is_empty());
    }

    #[test]
    fn missing_dimensions_read_as_zero() {
        let mut row = SyncObjectRow::thumbnail(2, "T", 1, 0, 0);
        row.height = None;
        row.width = None;
        let store = InMemoryRecordStore::from_rows([row]);
        let rows = store.thumbnail_rows(ObjectKey::new(1)).unwrap();
        assert_eq!((rows[0].height, rows[0].width), (0, 0));
    }

    // -----------------------------------------------------------------------
    // Attachments
    // -----------------------------------------------------------------------

    #[test]
    fn attachments_filtered_by_note() {
        let store = make_store();
        let rows = store.attachment_rows(NoteId::new(1)).unwrap();
        let keys: Vec<i64> = rows.iter().map(|r| r.key.get()).collect();
        assert_eq!(keys, vec![10, 20, 21]);
        assert_eq!(rows[2].parent_attachment, Some(ObjectKey::new(20)));
        assert_eq!(rows[0].media, Some(ObjectKey::new(50)));
    }

    #[test]
    fn attachments_exclude_thumbnails_and_media() {
        let store = make_store();
        let rows = store.attachment_rows(NoteId::new(1)).unwrap();
        assert!(rows.iter().all(|r| r.type_tag != "thumbnail"));
        assert!(rows.iter().all(|r| r.key != ObjectKey::new(50)));
    }

    // -----------------------------------------------------------------------
    // Media
    // -----------------------------------------------------------------------

    #[test]
    fn media_row_lookup() {
        let store = make_store();
        let media = store.media_row(ObjectKey::new(50)).unwrap().unwrap();
        assert_eq!(media.filename, "IMG_0001.jpeg");
        assert_eq!(media.uuid, "MEDIA-1");
        assert!(store.media_row(ObjectKey::new(999)).unwrap().is_none());
    }

    // -----------------------------------------------------------------------
    // Availability
    // -----------------------------------------------------------------------

    #[test]
    fn offline_store_fails_every_query() {
        let store = make_store();
        store.set_offline(true);
        assert!(matches!(
            store.thumbnail_rows(ObjectKey::new(10)),
            Err(StoreError::Unavailable(_))
        ));
        assert!(store.attachment_rows(NoteId::new(1)).is_err());
        assert!(store.media_row(ObjectKey::new(50)).is_err());

        store.set_offline(false);
        assert!(store.thumbnail_rows(ObjectKey::new(10)).is_ok());
    }

    #[test]
    fn remove_and_len() {
        let store = make_store();
        assert_eq!(store.len(), 7);
        assert_eq!(store.remove(ObjectKey::new(11)), 1);
        assert_eq!(store.len(), 6);
        assert_eq!(store.thumbnail_rows(ObjectKey::new(10)).unwrap().len(), 1);
    }

    #[test]
    fn default_creates_empty_store() {
        let store = InMemoryRecordStore::default();
        assert!(store.is_empty());
    }

    #[test]
    fn debug_format() {
        let store = make_store();
        let debug = format!("{store:?}");
        assert!(debug.contains("InMemoryRecordStore"));
        assert!(debug.contains("row_count"));
    }
}
