//! Builds the object tree of one note from the record store.
//!
//! All objects are constructed and inserted before any parent link is made,
//! so row order in the store does not have to put parents first.

use tracing::{debug, warn};

use nfx_store::{AttachmentRow, RecordStore};
use nfx_types::{NoteId, TypeCategory, TypeTag};

use crate::error::{ObjectError, ObjectResult};
use crate::object::{EmbeddedObject, MediaRef, ObjectKind};
use crate::tree::ObjectTree;

/// Load every embedded object of `note`, with thumbnails and composition.
///
/// A store failure aborts the whole load. Rows without a type tag are
/// skipped. Parent links are attached one child at a time: a child whose
/// parent is outside the note, or whose link would form a cycle, stays a
/// root. Both cases are logged.
pub fn load_note_objects(store: &dyn RecordStore, note: NoteId) -> ObjectResult<ObjectTree> {
    let rows = store.attachment_rows(note)?;
    let mut tree = ObjectTree::new();

    for row in &rows {
        let Ok(type_tag) = TypeTag::new(row.type_tag.clone()) else {
            warn!(object = %row.key, note = %note, "skipping object with empty type tag");
            continue;
        };
        let kind = resolve_kind(store, row, &type_tag)?;
        let object = EmbeddedObject::new(row.key, row.uuid.clone(), type_tag, note, store)?
            .with_kind(kind);
        tree.insert(object)?;
    }

    for row in &rows {
        let Some(parent) = row.parent_attachment else {
            continue;
        };
        if !tree.contains(row.key) {
            continue;
        }
        if !tree.contains(parent) {
            warn!(object = %row.key, parent = %parent, "parent object not in note, keeping as root");
            continue;
        }
        match tree.add_child(parent, row.key) {
            Ok(()) => {}
            Err(
                err @ (ObjectError::CyclicAttachment { .. }
                | ObjectError::AlreadyAttached { .. }),
            ) => {
                warn!(object = %row.key, parent = %parent, error = %err, "bad parent link, keeping as root");
            }
            Err(err) => return Err(err),
        }
    }

    debug!(note = %note, objects = tree.len(), roots = tree.roots().len(), "loaded note objects");
    Ok(tree)
}

fn resolve_kind(
    store: &dyn RecordStore,
    row: &AttachmentRow,
    type_tag: &TypeTag,
) -> ObjectResult<ObjectKind> {
    if type_tag.category() == TypeCategory::Gallery {
        return Ok(ObjectKind::Gallery);
    }
    let Some(media_key) = row.media else {
        if type_tag.category() == TypeCategory::Media {
            warn!(object = %row.key, tag = %type_tag, "media object without a media reference");
        }
        return Ok(ObjectKind::Plain);
    };
    match store.media_row(media_key)? {
        Some(media) => Ok(ObjectKind::MediaPointer(MediaRef::from(media))),
        None => {
            warn!(object = %row.key, media = %media_key, "media row missing");
            Ok(ObjectKind::Plain)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::EmbeddedContent;
    use nfx_store::{InMemoryRecordStore, SyncObjectRow};
    use nfx_types::ObjectKey;

    fn key(raw: i64) -> ObjectKey {
        ObjectKey::new(raw)
    }

    fn make_store() -> InMemoryRecordStore {
        InMemoryRecordStore::from_rows([
            // Page listed before its gallery.
            SyncObjectRow::attachment(21, "PAGE-1", TypeTag::JPEG, 1)
                .with_parent(20)
                .with_media(51),
            SyncObjectRow::attachment(20, "GAL-1", TypeTag::GALLERY, 1),
            SyncObjectRow::attachment(22, "PAGE-2", TypeTag::JPEG, 1)
                .with_parent(20)
                .with_media(52),
            SyncObjectRow::attachment(30, "URL-1", TypeTag::URL, 1),
            SyncObjectRow::thumbnail(40, "THUMB-GAL", 20, 100, 200),
            SyncObjectRow::thumbnail(41, "THUMB-P1", 21, 50, 60),
            SyncObjectRow::media(51, "MEDIA-1", "IMG_0001.jpeg"),
            SyncObjectRow::media(52, "MEDIA-2", "IMG_0002.jpeg"),
            SyncObjectRow::attachment(90, "OTHER", TypeTag::URL, 2),
        ])
    }

    #[test]
    fn builds_gallery_with_pages() {
        let store = make_store();
        let tree = load_note_objects(&store, NoteId::new(1)).unwrap();

        assert_eq!(tree.len(), 4);
        let roots: Vec<i64> = tree.roots().iter().map(|o| o.key().get()).collect();
        assert_eq!(roots, vec![20, 30]);

        let gallery = tree.get(key(20)).unwrap();
        assert_eq!(gallery.kind(), &ObjectKind::Gallery);
        assert_eq!(gallery.children(), &[key(21), key(22)]);
        assert_eq!(tree.parent_key(key(22)).unwrap(), Some(key(20)));
    }

    #[test]
    fn media_pointers_resolve_media_rows() {
        let store = make_store();
        let tree = load_note_objects(&store, NoteId::new(1)).unwrap();
        let page = tree.get(key(21)).unwrap();
        assert_eq!(page.media_uuid(), "MEDIA-1");
        assert_eq!(page.media_filename(), "IMG_0001.jpeg");
        let url = tree.get(key(30)).unwrap();
        assert_eq!(url.kind(), &ObjectKind::Plain);
        assert_eq!(url.media_uuid(), "URL-1");
    }

    #[test]
    fn note_report_is_pre_order() {
        let store = make_store();
        let tree = load_note_objects(&store, NoteId::new(1)).unwrap();
        let keys: Vec<i64> = tree
            .note_report_rows()
            .iter()
            .map(|r| r.object_key.get())
            .collect();
        // gallery, page 1, page 1 thumb, page 2, gallery thumb, url
        assert_eq!(keys, vec![20, 21, 41, 22, 40, 30]);
    }

    #[test]
    fn orphaned_child_stays_root() {
        let store = InMemoryRecordStore::from_rows([
            SyncObjectRow::attachment(1, "A", TypeTag::URL, 1).with_parent(999),
        ]);
        let tree = load_note_objects(&store, NoteId::new(1)).unwrap();
        assert_eq!(tree.roots().len(), 1);
        assert_eq!(tree.parent_key(key(1)).unwrap(), None);
    }

    #[test]
    fn self_parent_stays_root() {
        let store = InMemoryRecordStore::from_rows([
            SyncObjectRow::attachment(1, "A", TypeTag::URL, 1),
            SyncObjectRow::attachment(2, "B", TypeTag::URL, 1).with_parent(2),
        ]);
        let tree = load_note_objects(&store, NoteId::new(1)).unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.parent_key(key(2)).unwrap(), None);
        assert!(tree.get(key(2)).unwrap().children().is_empty());
        let roots: Vec<i64> = tree.roots().iter().map(|o| o.key().get()).collect();
        assert_eq!(roots, vec![1, 2]);
    }

    #[test]
    fn mutual_parents_keep_first_link() {
        let store = InMemoryRecordStore::from_rows([
            SyncObjectRow::attachment(1, "A", TypeTag::URL, 1),
            SyncObjectRow::attachment(2, "B", TypeTag::URL, 1).with_parent(3),
            SyncObjectRow::attachment(3, "C", TypeTag::URL, 1).with_parent(2),
        ]);
        let tree = load_note_objects(&store, NoteId::new(1)).unwrap();
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.parent_key(key(2)).unwrap(), Some(key(3)));
        assert_eq!(tree.parent_key(key(3)).unwrap(), None);
        let keys: Vec<i64> = tree
            .note_report_rows()
            .iter()
            .map(|r| r.object_key.get())
            .collect();
        assert_eq!(keys, vec![1, 3, 2]);
    }

    #[test]
    fn longer_cycle_is_broken_once() {
        let store = InMemoryRecordStore::from_rows([
            SyncObjectRow::attachment(1, "A", TypeTag::URL, 1).with_parent(3),
            SyncObjectRow::attachment(2, "B", TypeTag::URL, 1).with_parent(1),
            SyncObjectRow::attachment(3, "C", TypeTag::URL, 1).with_parent(2),
        ]);
        let tree = load_note_objects(&store, NoteId::new(1)).unwrap();
        assert_eq!(tree.roots().len(), 1);
        assert_eq!(tree.note_report_rows().len(), 3);
        for raw in [1, 2, 3] {
            assert!(tree.ancestors(key(raw)).unwrap().len() < 3);
        }
    }

    #[test]
    fn good_links_survive_a_bad_one() {
        let store = InMemoryRecordStore::from_rows([
            SyncObjectRow::attachment(20, "GAL", TypeTag::GALLERY, 1),
            SyncObjectRow::attachment(21, "PAGE", TypeTag::JPEG, 1).with_parent(20),
            SyncObjectRow::attachment(22, "SELF", TypeTag::JPEG, 1).with_parent(22),
        ]);
        let tree = load_note_objects(&store, NoteId::new(1)).unwrap();
        assert_eq!(tree.get(key(20)).unwrap().children(), &[key(21)]);
        assert_eq!(tree.parent_key(key(22)).unwrap(), None);
    }

    #[test]
    fn media_tag_without_media_reference_is_plain() {
        let store = InMemoryRecordStore::from_rows([
            SyncObjectRow::attachment(1, "A", TypeTag::JPEG, 1),
        ]);
        let tree = load_note_objects(&store, NoteId::new(1)).unwrap();
        let obj = tree.get(key(1)).unwrap();
        assert_eq!(obj.kind(), &ObjectKind::Plain);
        assert_eq!(obj.media_uuid(), "A");
    }

    #[test]
    fn missing_media_row_falls_back_to_plain() {
        let store = InMemoryRecordStore::from_rows([
            SyncObjectRow::attachment(1, "A", TypeTag::PNG, 1).with_media(77),
        ]);
        let tree = load_note_objects(&store, NoteId::new(1)).unwrap();
        assert_eq!(tree.get(key(1)).unwrap().kind(), &ObjectKind::Plain);
    }

    #[test]
    fn empty_type_tag_row_is_skipped() {
        let store = InMemoryRecordStore::from_rows([
            SyncObjectRow::attachment(1, "A", "", 1),
            SyncObjectRow::attachment(2, "B", TypeTag::URL, 1).with_parent(1),
        ]);
        let tree = load_note_objects(&store, NoteId::new(1)).unwrap();
        assert_eq!(tree.len(), 1);
        assert!(tree.contains(key(2)));
        assert_eq!(tree.parent_key(key(2)).unwrap(), None);
    }

    #[test]
    fn unknown_note_is_empty_tree() {
        let store = make_store();
        let tree = load_note_objects(&store, NoteId::new(404)).unwrap();
        assert!(tree.is_empty());
        assert!(tree.note_report_rows().is_empty());
    }

    #[test]
    fn store_failure_aborts_load() {
        let store = make_store();
        store.set_offline(true);
        let err = load_note_objects(&store, NoteId::new(1)).unwrap_err();
        assert!(matches!(err, ObjectError::Store(_)));
    }

    #[test]
    fn duplicate_rows_are_rejected() {
        let store = InMemoryRecordStore::from_rows([
            SyncObjectRow::attachment(1, "A", TypeTag::URL, 1),
            SyncObjectRow::attachment(1, "A", TypeTag::URL, 1),
        ]);
        let err = load_note_objects(&store, NoteId::new(1)).unwrap_err();
        assert!(matches!(err, ObjectError::DuplicateObject(k) if k == key(1)));
    }
}
