//! Update identity records.

use serde::{Deserialize, Serialize};

/// Identity of one revision of an update (`IUpdateIdentity`).
///
/// This is the element type of [`CategoryRecord::updates`], which category
/// materialization leaves empty.
///
/// [`CategoryRecord::updates`]: crate::CategoryRecord::updates
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateIdentity {
    pub revision_number: i32,
    #[serde(rename = "UpdateID")]
    pub update_id: String,
}
