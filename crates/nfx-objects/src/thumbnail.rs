//! Thumbnails and the resolver that materialises them from the store.

use serde::{Deserialize, Serialize};
use tracing::debug;

use nfx_store::RecordStore;
use nfx_types::{ObjectKey, TypeTag};

use crate::content::{EmbeddedContent, ObjectRecord};
use crate::error::ObjectResult;

/// Rendered preview of another embedded object.
///
/// A thumbnail never owns thumbnails or children of its own. Its parent is
/// always the object it previews.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    record: ObjectRecord,
    owner: ObjectKey,
    height: u32,
    width: u32,
}

impl Thumbnail {
    /// Key of the object this thumbnail previews.
    pub fn owner(&self) -> ObjectKey {
        self.owner
    }

    /// Height in pixels; zero when unknown.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width in pixels; zero when unknown.
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn record_mut(&mut self) -> &mut ObjectRecord {
        &mut self.record
    }
}

impl EmbeddedContent for Thumbnail {
    fn record(&self) -> &ObjectRecord {
        &self.record
    }

    fn parent_key(&self) -> Option<ObjectKey> {
        Some(self.owner)
    }

    fn display_string(&self) -> String {
        format!(
            "{} with height {} and width {}",
            self.record.base_display_string(),
            self.height,
            self.width
        )
    }
}

/// Query the store for every thumbnail previewing `owner`.
///
/// Rows come back in store order and are not re-sorted. Zero matches is an
/// empty vec; a store failure is returned unchanged.
pub fn find_thumbnails_for(
    store: &dyn RecordStore,
    owner: &ObjectRecord,
) -> ObjectResult<Vec<Thumbnail>> {
    let rows = store.thumbnail_rows(owner.key())?;
    debug!(owner = %owner.key(), count = rows.len(), "resolved thumbnails");

    Ok(rows
        .into_iter()
        .map(|row| Thumbnail {
            record: ObjectRecord::new(row.key, row.uuid, TypeTag::thumbnail(), owner.note()),
            owner: owner.key(),
            height: row.height,
            width: row.width,
        })
        .collect())
}
