//! Tagged automation values for the Windows Update Agent marshaling layer.
//!
//! Automation servers hand back every property read as a loosely-typed
//! variant. This crate models that result as a small closed enum,
//! [`Variant`], and provides checked conversions from it into the primitive
//! shapes typed records are built from.
//!
//! # Conversion contract
//!
//! - A transport error is propagated unchanged; the value is never inspected.
//! - An absent value ([`Variant::Empty`]) converts to the target's zero value.
//! - Any other tag must match the target exactly. There is no numeric
//!   widening and no string parsing: `I32(5)` is not an `int64`.
//!
//! # Key Types
//!
//! - [`Variant`] — The tagged result of one property or item read
//! - [`VariantKind`] — The bare tag, used in diagnostics
//! - [`FromVariant`] — Per-target conversion rule
//! - [`ConversionError`] — Tag mismatch carrying the expected type name

pub mod convert;
pub mod error;
pub mod variant;

pub use convert::{
    convert, to_bool, to_f32, to_f64, to_i32, to_i64, to_object, to_string, to_string_vec,
    to_time, FromVariant,
};
pub use error::{ConversionError, Result};
pub use variant::{Variant, VariantKind};
