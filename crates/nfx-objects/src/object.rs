//! The embedded object entity and its kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

use nfx_store::{MediaRow, RecordStore};
use nfx_types::{NoteId, ObjectKey, TypeTag};

use crate::content::{EmbeddedContent, ObjectRecord};
use crate::error::ObjectResult;
use crate::thumbnail::{find_thumbnails_for, Thumbnail};

/// File referenced by a media-pointer object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    pub key: ObjectKey,
    pub uuid: String,
    pub filename: String,
    /// Device-side path; filled in by the file locator.
    pub filepath: String,
}

impl From<MediaRow> for MediaRef {
    fn from(row: MediaRow) -> Self {
        Self {
            key: row.key,
            uuid: row.uuid,
            filename: row.filename,
            filepath: String::new(),
        }
    }
}

/// Which specialisation an object is.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    /// No specialised behaviour.
    #[default]
    Plain,
    /// The object's file lives in a separate media row.
    MediaPointer(MediaRef),
    /// Container whose children are its pages.
    Gallery,
}

/// One embedded object of a note.
///
/// Children are held by key; the owning [`ObjectTree`](crate::ObjectTree)
/// resolves them. Thumbnails are owned directly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedObject {
    record: ObjectRecord,
    kind: ObjectKind,
    parent: Option<ObjectKey>,
    children: Vec<ObjectKey>,
    thumbnails: Vec<Thumbnail>,
}

impl EmbeddedObject {
    /// Construct an object and resolve its thumbnails from `store`.
    ///
    /// Fails only if the store query fails; the object is never returned
    /// with a partial thumbnail list.
    pub fn new(
        key: ObjectKey,
        uuid: impl Into<String>,
        type_tag: TypeTag,
        note: NoteId,
        store: &dyn RecordStore,
    ) -> ObjectResult<Self> {
        let record = ObjectRecord::new(key, uuid, type_tag, note);
        let thumbnails = find_thumbnails_for(store, &record)?;
        Ok(Self {
            record,
            kind: ObjectKind::Plain,
            parent: None,
            children: Vec::new(),
            thumbnails,
        })
    }

    /// Replace the object's kind.
    pub fn with_kind(mut self, kind: ObjectKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn key(&self) -> ObjectKey {
        self.record.key()
    }

    pub fn kind(&self) -> &ObjectKind {
        &self.kind
    }

    /// The referenced media, for media-pointer objects.
    pub fn media_mut(&mut self) -> Option<&mut MediaRef> {
        match &mut self.kind {
            ObjectKind::MediaPointer(media) => Some(media),
            _ => None,
        }
    }

    pub fn record_mut(&mut self) -> &mut ObjectRecord {
        &mut self.record
    }

    /// Child keys in insertion order.
    pub fn children(&self) -> &[ObjectKey] {
        &self.children
    }

    /// Thumbnails in store order.
    pub fn thumbnails(&self) -> &[Thumbnail] {
        &self.thumbnails
    }

    pub fn thumbnails_mut(&mut self) -> &mut [Thumbnail] {
        &mut self.thumbnails
    }

    /// Re-query the store and replace the thumbnail list.
    ///
    /// On failure the current list is kept and the error returned.
    pub fn refresh_thumbnails(&mut self, store: &dyn RecordStore) -> ObjectResult<()> {
        self.thumbnails = find_thumbnails_for(store, &self.record)?;
        Ok(())
    }

    pub(crate) fn set_parent(&mut self, parent: ObjectKey) {
        self.parent = Some(parent);
    }

    pub(crate) fn push_child(&mut self, child: ObjectKey) {
        self.children.push(child);
    }
}

impl EmbeddedContent for EmbeddedObject {
    fn record(&self) -> &ObjectRecord {
        &self.record
    }

    fn parent_key(&self) -> Option<ObjectKey> {
        self.parent
    }

    fn display_string(&self) -> String {
        match &self.kind {
            ObjectKind::Plain => self.record.base_display_string(),
            ObjectKind::MediaPointer(media) => format!(
                "{} (media {}: {})",
                self.record.base_display_string(),
                media.uuid,
                media.filename
            ),
            ObjectKind::Gallery => format!(
                "{} with {} pages",
                self.record.base_display_string(),
                self.children.len()
            ),
        }
    }

    fn media_uuid(&self) -> &str {
        match &self.kind {
            ObjectKind::MediaPointer(media) => &media.uuid,
            _ => self.record.uuid(),
        }
    }

    fn media_filepath(&self) -> &str {
        match &self.kind {
            ObjectKind::MediaPointer(media) => &media.filepath,
            _ => &self.record.filepath,
        }
    }

    fn media_filename(&self) -> &str {
        match &self.kind {
            ObjectKind::MediaPointer(media) => &media.filename,
            _ => &self.record.filename,
        }
    }
}

impl fmt::Display for EmbeddedObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_string())
    }
}
