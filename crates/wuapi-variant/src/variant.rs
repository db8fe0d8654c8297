use std::fmt;

use chrono::{DateTime, Utc};

/// The loosely-typed result of a single property or item read.
///
/// `H` is the transport's object handle type. A variant is produced once by
/// the transport and consumed once by a conversion; nothing mutates it in
/// between.
#[derive(Clone, Debug, PartialEq)]
pub enum Variant<H> {
    /// The server returned null / no value.
    Empty,
    String(String),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Bool(bool),
    Date(DateTime<Utc>),
    /// A handle to another automation object.
    Object(H),
    /// A safe array. Elements are usually all strings or all handles.
    Array(Vec<Variant<H>>),
}

/// The tag of a [`Variant`] without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VariantKind {
    Empty,
    String,
    I32,
    I64,
    F32,
    F64,
    Bool,
    Date,
    Object,
    Array,
}

impl<H> Variant<H> {
    /// The tag this value carries.
    pub fn kind(&self) -> VariantKind {
        match self {
            Variant::Empty => VariantKind::Empty,
            Variant::String(_) => VariantKind::String,
            Variant::I32(_) => VariantKind::I32,
            Variant::I64(_) => VariantKind::I64,
            Variant::F32(_) => VariantKind::F32,
            Variant::F64(_) => VariantKind::F64,
            Variant::Bool(_) => VariantKind::Bool,
            Variant::Date(_) => VariantKind::Date,
            Variant::Object(_) => VariantKind::Object,
            Variant::Array(_) => VariantKind::Array,
        }
    }

    /// Returns `true` if the server returned no value.
    pub fn is_empty(&self) -> bool {
        matches!(self, Variant::Empty)
    }
}

impl<H> Default for Variant<H> {
    fn default() -> Self {
        Variant::Empty
    }
}

impl<H> From<&str> for Variant<H> {
    fn from(s: &str) -> Self {
        Variant::String(s.to_string())
    }
}

impl<H> From<String> for Variant<H> {
    fn from(s: String) -> Self {
        Variant::String(s)
    }
}

impl<H> From<i32> for Variant<H> {
    fn from(v: i32) -> Self {
        Variant::I32(v)
    }
}

impl<H> From<i64> for Variant<H> {
    fn from(v: i64) -> Self {
        Variant::I64(v)
    }
}

impl<H> From<f32> for Variant<H> {
    fn from(v: f32) -> Self {
        Variant::F32(v)
    }
}

impl<H> From<f64> for Variant<H> {
    fn from(v: f64) -> Self {
        Variant::F64(v)
    }
}

impl<H> From<bool> for Variant<H> {
    fn from(v: bool) -> Self {
        Variant::Bool(v)
    }
}

impl<H> From<DateTime<Utc>> for Variant<H> {
    fn from(v: DateTime<Utc>) -> Self {
        Variant::Date(v)
    }
}

impl VariantKind {
    /// Diagnostic name, matching the names used in [`ConversionError`].
    ///
    /// [`ConversionError`]: crate::ConversionError
    pub fn name(&self) -> &'static str {
        match self {
            VariantKind::Empty => "empty",
            VariantKind::String => "string",
            VariantKind::I32 => "int32",
            VariantKind::I64 => "int64",
            VariantKind::F32 => "float32",
            VariantKind::F64 => "float64",
            VariantKind::Bool => "bool",
            VariantKind::Date => "time",
            VariantKind::Object => "object",
            VariantKind::Array => "array",
        }
    }
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
