//! Id and parent lookups over a materialized category forest.
//!
//! Records do not point at their parents. A [`CategoryIndex`] borrows the
//! forest and answers "which record has this id" and "which record is its
//! parent" from the tree shape alone.

use std::collections::HashMap;

use crate::category::{CategoryRecord, Walk};

/// Borrowed lookup table over one or more category trees.
///
/// When the same id appears more than once, the first occurrence in
/// depth-first order wins.
#[derive(Debug, Default)]
pub struct CategoryIndex<'a> {
    by_id: HashMap<&'a str, &'a CategoryRecord>,
    parents: HashMap<&'a str, &'a CategoryRecord>,
}

impl<'a> CategoryIndex<'a> {
    /// Index every category in `roots` and below.
    pub fn build(roots: &'a [CategoryRecord]) -> Self {
        let mut index = Self::default();
        for record in Walk::over(roots) {
            index.by_id.entry(record.category_id.as_str()).or_insert(record);
            for child in &record.children {
                index.parents.entry(child.category_id.as_str()).or_insert(record);
            }
        }
        index
    }

    /// Index a single tree.
    pub fn from_root(root: &'a CategoryRecord) -> Self {
        Self::build(std::slice::from_ref(root))
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn get(&self, category_id: &str) -> Option<&'a CategoryRecord> {
        self.by_id.get(category_id).copied()
    }

    /// The category `category_id` was enumerated under. `None` for roots and
    /// unknown ids.
    pub fn parent(&self, category_id: &str) -> Option<&'a CategoryRecord> {
        self.parents.get(category_id).copied()
    }

    /// Resolve a record's `parent_id` link.
    pub fn resolve_parent(&self, record: &CategoryRecord) -> Option<&'a CategoryRecord> {
        record.parent_id.as_deref().and_then(|id| self.get(id))
    }

    /// Ancestors of `category_id`, nearest first.
    pub fn ancestors(&self, category_id: &str) -> Vec<&'a CategoryRecord> {
        let mut out = Vec::new();
        let mut current = self.parent(category_id);
        while let Some(parent) = current {
            // Duplicate ids can make the parent chain loop.
            if parent.category_id == category_id
                || out.iter().any(|seen: &&CategoryRecord| seen.category_id == parent.category_id)
            {
                break;
            }
            out.push(parent);
            current = self.parent(&parent.category_id);
        }
        out
    }

    /// Names from the root down to `category_id`, e.g. `["Microsoft", "Windows", "Windows 11"]`.
    pub fn path(&self, category_id: &str) -> Vec<&'a str> {
        let Some(record) = self.get(category_id) else {
            return Vec::new();
        };
        let mut names: Vec<&'a str> = self
            .ancestors(category_id)
            .into_iter()
            .map(|c| c.name.as_str())
            .collect();
        names.reverse();
        names.push(record.name.as_str());
        names
    }
}
