//! The category tree record and its traversal helpers.

use serde::{Deserialize, Serialize};

use crate::image::ImageInfo;
use crate::update::UpdateIdentity;

/// One node of the update classification tree (`ICategory`).
///
/// A record only exists after every required property of its remote object,
/// and of every object below it, was read and converted. Each child is an
/// independently owned subtree; nothing is shared and nothing points back up.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CategoryRecord {
    /// Unique identifier of the category.
    #[serde(rename = "CategoryID")]
    pub category_id: String,
    /// Child categories in remote enumeration order. Empty when the remote
    /// `Children` collection was null or had no items.
    pub children: Vec<CategoryRecord>,
    pub description: String,
    /// `None` when the remote `Image` property was null.
    pub image: Option<ImageInfo>,
    pub name: String,
    /// Suggested display order among siblings.
    pub order: i32,
    /// Id of the category this one was enumerated under.
    ///
    /// Only populated when [`MaterializeOptions::link_parents`] is set. This
    /// is a lookup key, not a reference; resolve it with a
    /// [`CategoryIndex`].
    ///
    /// [`MaterializeOptions::link_parents`]: crate::MaterializeOptions::link_parents
    /// [`CategoryIndex`]: crate::CategoryIndex
    #[serde(rename = "ParentID", default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Classification tag, e.g. `"Company"`, `"Product"`, `"UpdateClassification"`.
    #[serde(rename = "Type")]
    pub category_type: String,
    /// Reserved. Never read from the remote object.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub updates: Vec<UpdateIdentity>,
}

impl CategoryRecord {
    /// Returns `true` if the category has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of categories below this one, at any depth.
    pub fn descendant_count(&self) -> usize {
        self.walk().count() - 1
    }

    /// Depth-first, pre-order traversal starting at `self`.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Find a category by id in this subtree, `self` included.
    pub fn find(&self, category_id: &str) -> Option<&CategoryRecord> {
        self.walk().find(|c| c.category_id == category_id)
    }
}

/// Iterator returned by [`CategoryRecord::walk`].
#[derive(Debug)]
pub struct Walk<'a> {
    stack: Vec<&'a CategoryRecord>,
}

impl<'a> Walk<'a> {
    /// Walk several roots in order, as if they shared an invisible parent.
    pub fn over(roots: &'a [CategoryRecord]) -> Self {
        Self {
            stack: roots.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a CategoryRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(id: &str) -> CategoryRecord {
        CategoryRecord {
            category_id: id.to_string(),
            ..Default::default()
        }
    }

    fn sample() -> CategoryRecord {
        let mut a = leaf("A");
        a.children = vec![leaf("A1"), leaf("A2")];
        let mut root = leaf("ROOT");
        root.children = vec![a, leaf("B")];
        root
    }

    #[test]
    fn walk_is_depth_first_pre_order() {
        let root = sample();
        let ids: Vec<&str> = root.walk().map(|c| c.category_id.as_str()).collect();
        assert_eq!(ids, vec!["ROOT", "A", "A1", "A2", "B"]);
    }

    #[test]
    fn walk_over_multiple_roots() {
        let roots = vec![sample(), leaf("OTHER")];
        let ids: Vec<&str> = Walk::over(&roots).map(|c| c.category_id.as_str()).collect();
        assert_eq!(ids, vec!["ROOT", "A", "A1", "A2", "B", "OTHER"]);
    }

    #[test]
    fn counts_and_leaves() {
        let root = sample();
        assert_eq!(root.descendant_count(), 4);
        assert!(!root.is_leaf());
        assert!(root.find("B").unwrap().is_leaf());
        assert_eq!(leaf("X").descendant_count(), 0);
    }

    #[test]
    fn find_searches_whole_subtree() {
        let root = sample();
        assert_eq!(root.find("A2").map(|c| c.category_id.as_str()), Some("A2"));
        assert!(root.find("missing").is_none());
    }

    #[test]
    fn serializes_with_automation_names() {
        let mut record = leaf("CAT1");
        record.category_type = "Company".into();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["CategoryID"], "CAT1");
        assert_eq!(json["Type"], "Company");
        assert!(json["Image"].is_null());
        assert!(json.get("ParentID").is_none());
        assert!(json.get("Updates").is_none());

        let back: CategoryRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
