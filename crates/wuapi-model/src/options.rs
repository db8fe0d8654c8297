//! Materialization options, loadable from TOML.

use serde::{Deserialize, Serialize};

/// Knobs for a [`Materializer`](crate::Materializer).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterializeOptions {
    /// Fill each child's `parent_id` with the id of the category it was
    /// enumerated under. The remote `Parent` property is still never read.
    pub link_parents: bool,
}

impl MaterializeOptions {
    /// Options that record parent ids on every child.
    pub fn linked() -> Self {
        Self { link_parents: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_leaves_parents_unlinked() {
        assert!(!MaterializeOptions::default().link_parents);
        assert!(MaterializeOptions::linked().link_parents);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let opts: MaterializeOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts, MaterializeOptions::default());

        let opts: MaterializeOptions = serde_json::from_str(r#"{"link_parents": true}"#).unwrap();
        assert_eq!(opts, MaterializeOptions::linked());
    }
}
