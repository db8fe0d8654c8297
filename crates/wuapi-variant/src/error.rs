use thiserror::Error;

use crate::variant::VariantKind;

/// A variant's tag did not match the type the caller asked for.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("not a {expected} (got {actual})")]
pub struct ConversionError {
    /// Name of the requested type, e.g. `"int32"`.
    pub expected: &'static str,
    /// Tag the value actually carried.
    pub actual: VariantKind,
}

impl ConversionError {
    pub fn new(expected: &'static str, actual: VariantKind) -> Self {
        Self { expected, actual }
    }
}

/// Convenience type alias for conversions.
pub type Result<T> = std::result::Result<T, ConversionError>;
