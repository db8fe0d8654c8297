//! Error types for materialization.

use thiserror::Error;
use wuapi_dispatch::TransportError;
use wuapi_variant::ConversionError;

/// The first failure met while materializing a record tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MaterializeError {
    /// The automation call failed. Carried through unmodified.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A property carried a different tag than its field requires.
    #[error("type mismatch: {0}")]
    TypeMismatch(#[from] ConversionError),
}

/// Convenience type alias for materialization.
pub type Result<T> = std::result::Result<T, MaterializeError>;
