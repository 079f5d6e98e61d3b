//! Row shapes returned by a [`RecordStore`](crate::RecordStore).
//!
//! These mirror the subset of `ZICCLOUDSYNCINGOBJECT` columns the object
//! engine needs. Nullable columns are `Option`s; integer dimensions that are
//! NULL in the store read as zero.

use serde::{Deserialize, Serialize};

use nfx_types::{NoteId, ObjectKey};

/// A thumbnail row: `Z_PK`, `ZIDENTIFIER`, `ZHEIGHT`, `ZWIDTH`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThumbnailRow {
    pub key: ObjectKey,
    pub uuid: String,
    pub height: u32,
    pub width: u32,
}

/// An embedded-object row belonging to a note.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRow {
    pub key: ObjectKey,
    pub uuid: String,
    /// Raw `ZTYPEUTI` value.
    pub type_tag: String,
    pub note: NoteId,
    /// Enclosing object (`ZPARENTATTACHMENT`), e.g. the gallery of a page.
    pub parent_attachment: Option<ObjectKey>,
    /// Media row holding the file (`ZMEDIA`).
    pub media: Option<ObjectKey>,
}

/// A media row: the file backing a media-pointer object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRow {
    pub key: ObjectKey,
    pub uuid: String,
    pub filename: String,
}

/// A full sync-object row, as held by the in-memory store.
///
/// One struct covers attachments, thumbnails and media rows; which role a
/// row plays is decided by which foreign keys are set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncObjectRow {
    pub key: ObjectKey,
    pub uuid: String,
    pub type_tag: Option<String>,
    pub note: Option<NoteId>,
    pub attachment: Option<ObjectKey>,
    pub parent_attachment: Option<ObjectKey>,
    pub media: Option<ObjectKey>,
    pub filename: Option<String>,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

impl SyncObjectRow {
    /// An embedded object of type `type_tag` owned by `note`.
    pub fn attachment(
        key: i64,
        uuid: impl Into<String>,
        type_tag: impl Into<String>,
        note: i64,
    ) -> Self {
        Self {
            uuid: uuid.into(),
            type_tag: Some(type_tag.into()),
            note: Some(NoteId::new(note)),
            ..Self::empty(key)
        }
    }

    /// A thumbnail previewing the object `owner`.
    pub fn thumbnail(
        key: i64,
        uuid: impl Into<String>,
        owner: i64,
        height: u32,
        width: u32,
    ) -> Self {
        Self {
            uuid: uuid.into(),
            attachment: Some(ObjectKey::new(owner)),
            height: Some(height),
            width: Some(width),
            ..Self::empty(key)
        }
    }

    /// A media row holding `filename`.
    pub fn media(key: i64, uuid: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            filename: Some(filename.into()),
            ..Self::empty(key)
        }
    }

    /// Nest this object under `parent`.
    pub fn with_parent(mut self, parent: i64) -> Self {
        self.parent_attachment = Some(ObjectKey::new(parent));
        self
    }

    /// Point this object at the media row `media`.
    pub fn with_media(mut self, media: i64) -> Self {
        self.media = Some(ObjectKey::new(media));
        self
    }

    fn empty(key: i64) -> Self {
        Self {
            key: ObjectKey::new(key),
            uuid: String::new(),
            type_tag: None,
            note: None,
            attachment: None,
            parent_attachment: None,
            media: None,
            filename: None,
            height: None,
            width: None,
        }
    }
}
