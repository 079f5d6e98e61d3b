//! Shared identity/placement record and the capability trait every object
//! kind implements.
//!
//! [`ObjectRecord`] holds what every embedded object has in common: the
//! immutable identity read from the store and the placement fields filled in
//! later by whoever locates the object's file. [`EmbeddedContent`] is the
//! polymorphic surface (display string, markup, media accessors) with
//! defaults that specialisations override only where the default is wrong.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use nfx_types::{NoteId, ObjectKey, TypeTag};

use crate::report::ReportRow;

/// Identity and placement of one sync-object row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRecord {
    key: ObjectKey,
    uuid: String,
    type_tag: TypeTag,
    note: NoteId,
    /// Path of the file as recorded on the original device.
    pub filepath: String,
    pub filename: String,
    /// Path of the locally recovered copy, once one has been found.
    pub backup_location: Option<PathBuf>,
}

impl ObjectRecord {
    /// A record with empty placement fields.
    pub fn new(key: ObjectKey, uuid: impl Into<String>, type_tag: TypeTag, note: NoteId) -> Self {
        Self {
            key,
            uuid: uuid.into(),
            type_tag,
            note,
            filepath: String::new(),
            filename: String::new(),
            backup_location: None,
        }
    }

    pub fn key(&self) -> ObjectKey {
        self.key
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    pub fn type_tag(&self) -> &TypeTag {
        &self.type_tag
    }

    /// The note that owns this object.
    pub fn note(&self) -> NoteId {
        self.note
    }

    pub fn backup_location(&self) -> Option<&Path> {
        self.backup_location.as_deref()
    }

    /// The base display form, `Embedded Object <type>: <uuid>`.
    ///
    /// Specialisations that override [`EmbeddedContent::display_string`]
    /// can still fall back to this.
    pub fn base_display_string(&self) -> String {
        format!("Embedded Object {}: {}", self.type_tag, self.uuid)
    }
}

/// Capabilities shared by every embedded object kind.
pub trait EmbeddedContent {
    /// The identity/placement record backing this object.
    fn record(&self) -> &ObjectRecord;

    /// Key of the enclosing object, or `None` for a root.
    fn parent_key(&self) -> Option<ObjectKey>;

    /// Human-readable description.
    fn display_string(&self) -> String {
        self.record().base_display_string()
    }

    /// Fragment for inclusion in a larger document. Not escaped.
    fn render_markup(&self) -> String {
        self.display_string()
    }

    /// Identifier of the media this object shows.
    fn media_uuid(&self) -> &str {
        self.record().uuid()
    }

    /// Device-side path of the media this object shows.
    fn media_filepath(&self) -> &str {
        &self.record().filepath
    }

    /// File name of the media this object shows.
    fn media_filename(&self) -> &str {
        &self.record().filename
    }

    /// This object's own report row (no children, no thumbnails).
    fn report_row(&self) -> ReportRow {
        ReportRow::new(self.record(), self.parent_key())
    }
}
