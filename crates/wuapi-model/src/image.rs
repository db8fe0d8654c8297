//! Image metadata records.

use serde::{Deserialize, Serialize};

/// Image metadata attached to a category (`IImageInformation`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImageInfo {
    /// Alternate text for the image.
    pub alt_text: String,
    /// Height in pixels.
    pub height: i64,
    /// Location of the image.
    pub source: String,
    /// Width in pixels.
    pub width: i64,
}
