//! Arena of embedded objects with parent/child relations by key.
//!
//! [`ObjectTree`] owns every object of one note in a map keyed by
//! [`ObjectKey`] and remembers insertion order so roots and reports come out
//! deterministically. The parent link is a plain key, never an owning
//! reference, so the arena cannot form ownership cycles.
//!
//! # Invariants
//!
//! - Keys are unique within the tree.
//! - An object has at most one parent, set only by [`ObjectTree::add_child`].
//! - Following parent links always reaches a root.

use std::collections::HashMap;

use tracing::debug;

use nfx_types::ObjectKey;

use crate::content::EmbeddedContent;
use crate::error::{ObjectError, ObjectResult};
use crate::object::{EmbeddedObject, ObjectKind};
use crate::report::ReportRow;

/// The embedded objects of one note and their composition.
#[derive(Clone, Debug, Default)]
pub struct ObjectTree {
    objects: HashMap<ObjectKey, EmbeddedObject>,
    /// Keys in insertion order.
    order: Vec<ObjectKey>,
}

impl ObjectTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of objects (thumbnails not counted).
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if the tree has no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn contains(&self, key: ObjectKey) -> bool {
        self.objects.contains_key(&key)
    }

    // ---------------------------------------------------------------
    // Mutation
    // ---------------------------------------------------------------

    /// Add a detached object. Fails if its key is already present.
    pub fn insert(&mut self, object: EmbeddedObject) -> ObjectResult<()> {
        let key = object.key();
        if self.objects.contains_key(&key) {
            return Err(ObjectError::DuplicateObject(key));
        }
        debug!(object = %key, thumbnails = object.thumbnails().len(), "inserted object");
        self.order.push(key);
        self.objects.insert(key, object);
        Ok(())
    }

    /// Append `child` to `parent`'s children and point `child` back at it.
    ///
    /// Attaching the same child to the same parent twice records it twice.
    /// Attaching it to a second parent, to itself, or under one of its own
    /// descendants is rejected.
    pub fn add_child(&mut self, parent: ObjectKey, child: ObjectKey) -> ObjectResult<()> {
        if !self.objects.contains_key(&parent) {
            return Err(ObjectError::NotFound(parent));
        }
        let current = self
            .objects
            .get(&child)
            .ok_or(ObjectError::NotFound(child))?
            .parent_key();

        if let Some(existing) = current {
            if existing != parent {
                return Err(ObjectError::AlreadyAttached {
                    child,
                    parent: existing,
                });
            }
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(ObjectError::CyclicAttachment { parent, child });
        }

        if let Some(obj) = self.objects.get_mut(&parent) {
            obj.push_child(child);
        }
        if let Some(obj) = self.objects.get_mut(&child) {
            obj.set_parent(parent);
        }
        debug!(parent = %parent, child = %child, "attached child object");
        Ok(())
    }

    // ---------------------------------------------------------------
    // Lookup
    // ---------------------------------------------------------------

    pub fn get(&self, key: ObjectKey) -> Option<&EmbeddedObject> {
        self.objects.get(&key)
    }

    /// Mutable access, for filling in placement fields.
    pub fn get_mut(&mut self, key: ObjectKey) -> Option<&mut EmbeddedObject> {
        self.objects.get_mut(&key)
    }

    /// Objects in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &EmbeddedObject> {
        self.order.iter().filter_map(|key| self.objects.get(key))
    }

    /// Objects without a parent, in insertion order.
    pub fn roots(&self) -> Vec<&EmbeddedObject> {
        self.iter().filter(|obj| obj.parent_key().is_none()).collect()
    }

    /// The parent's key, or `None` for a root.
    pub fn parent_key(&self, key: ObjectKey) -> ObjectResult<Option<ObjectKey>> {
        Ok(self.require(key)?.parent_key())
    }

    /// Parent chain of `key`, nearest first. Empty for a root.
    pub fn ancestors(&self, key: ObjectKey) -> ObjectResult<Vec<ObjectKey>> {
        let mut chain = Vec::new();
        let mut current = self.require(key)?.parent_key();
        while let Some(parent) = current {
            chain.push(parent);
            current = self.objects.get(&parent).and_then(|obj| obj.parent_key());
        }
        Ok(chain)
    }

    /// The root that `key` ultimately hangs from (itself if it is a root).
    pub fn root_of(&self, key: ObjectKey) -> ObjectResult<ObjectKey> {
        Ok(self.ancestors(key)?.last().copied().unwrap_or(key))
    }

    /// Returns `true` if `candidate` is on the parent chain of `key`.
    fn is_ancestor(&self, candidate: ObjectKey, key: ObjectKey) -> bool {
        let mut current = self.objects.get(&key).and_then(|obj| obj.parent_key());
        while let Some(parent) = current {
            if parent == candidate {
                return true;
            }
            current = self.objects.get(&parent).and_then(|obj| obj.parent_key());
        }
        false
    }

    fn require(&self, key: ObjectKey) -> ObjectResult<&EmbeddedObject> {
        self.objects.get(&key).ok_or(ObjectError::NotFound(key))
    }

    // ---------------------------------------------------------------
    // Flattening
    // ---------------------------------------------------------------

    /// Pre-order report rows for the subtree at `key`: the object itself,
    /// each child subtree in insertion order, then each thumbnail.
    pub fn report_rows(&self, key: ObjectKey) -> ObjectResult<Vec<ReportRow>> {
        let mut rows = Vec::new();
        self.collect_rows(self.require(key)?, &mut rows);
        Ok(rows)
    }

    /// Report rows for every root, in insertion order.
    pub fn note_report_rows(&self) -> Vec<ReportRow> {
        let mut rows = Vec::new();
        for root in self.roots() {
            self.collect_rows(root, &mut rows);
        }
        rows
    }

    fn collect_rows(&self, object: &EmbeddedObject, rows: &mut Vec<ReportRow>) {
        rows.push(object.report_row());
        for child in object.children() {
            if let Some(child) = self.objects.get(child) {
                self.collect_rows(child, rows);
            }
        }
        rows.extend(object.thumbnails().iter().map(|thumb| thumb.report_row()));
    }

    /// Markup fragment for the object at `key`.
    ///
    /// Galleries render their pages one per line; everything else uses its
    /// own [`EmbeddedContent::render_markup`].
    pub fn render_markup(&self, key: ObjectKey) -> ObjectResult<String> {
        let object = self.require(key)?;
        match object.kind() {
            ObjectKind::Gallery if !object.children().is_empty() => {
                let pages = object
                    .children()
                    .iter()
                    .map(|child| self.render_markup(*child))
                    .collect::<ObjectResult<Vec<_>>>()?;
                Ok(pages.join("\n"))
            }
            _ => Ok(object.render_markup()),
        }
    }
}
