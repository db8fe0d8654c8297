//! Checked conversions from [`Variant`] into typed fields.
//!
//! Every helper takes the whole `Result` of a transport read so callers can
//! write `to_string(dispatch.get_property(&h, "Name"))?` without unpacking the
//! transport error themselves. The error type `E` is the caller's own; it only
//! has to absorb a [`ConversionError`].

use chrono::{DateTime, Utc};

use crate::error::{ConversionError, Result};
use crate::variant::Variant;

/// A target type that can be read out of a [`Variant`].
///
/// [`Variant::Empty`] maps to the type's zero value. Any other tag must match
/// the target's tag exactly.
pub trait FromVariant<H>: Sized {
    /// Name reported in [`ConversionError::expected`].
    const TYPE_NAME: &'static str;

    fn from_variant(value: Variant<H>) -> Result<Self>;
}

macro_rules! scalar_from_variant {
    ($ty:ty, $tag:ident, $name:literal) => {
        impl<H> FromVariant<H> for $ty {
            const TYPE_NAME: &'static str = $name;

            fn from_variant(value: Variant<H>) -> Result<Self> {
                match value {
                    Variant::Empty => Ok(<$ty>::default()),
                    Variant::$tag(v) => Ok(v),
                    other => Err(ConversionError::new($name, other.kind())),
                }
            }
        }
    };
}

scalar_from_variant!(String, String, "string");
scalar_from_variant!(i32, I32, "int32");
scalar_from_variant!(i64, I64, "int64");
scalar_from_variant!(f32, F32, "float32");
scalar_from_variant!(f64, F64, "float64");
scalar_from_variant!(bool, Bool, "bool");

/// `None` means the server reported no timestamp.
impl<H> FromVariant<H> for Option<DateTime<Utc>> {
    const TYPE_NAME: &'static str = "time";

    fn from_variant(value: Variant<H>) -> Result<Self> {
        match value {
            Variant::Empty => Ok(None),
            Variant::Date(v) => Ok(Some(v)),
            other => Err(ConversionError::new(
                <Self as FromVariant<H>>::TYPE_NAME,
                other.kind(),
            )),
        }
    }
}

/// A null array collapses to an empty vector. Null elements read as `""`.
impl<H> FromVariant<H> for Vec<String> {
    const TYPE_NAME: &'static str = "array";

    fn from_variant(value: Variant<H>) -> Result<Self> {
        match value {
            Variant::Empty => Ok(Vec::new()),
            Variant::Array(items) => items.into_iter().map(String::from_variant).collect(),
            other => Err(ConversionError::new(
                <Self as FromVariant<H>>::TYPE_NAME,
                other.kind(),
            )),
        }
    }
}

/// Convert the result of one transport read into `T`.
///
/// A transport error is returned as is, before the value is looked at.
pub fn convert<T, H, E>(result: std::result::Result<Variant<H>, E>) -> std::result::Result<T, E>
where
    T: FromVariant<H>,
    E: From<ConversionError>,
{
    let value = result?;
    T::from_variant(value).map_err(E::from)
}

/// Read an object handle. `None` means the property was null.
pub fn to_object<H, E>(result: std::result::Result<Variant<H>, E>) -> std::result::Result<Option<H>, E>
where
    E: From<ConversionError>,
{
    match result? {
        Variant::Empty => Ok(None),
        Variant::Object(handle) => Ok(Some(handle)),
        other => Err(ConversionError::new("object", other.kind()).into()),
    }
}

pub fn to_string<H, E>(result: std::result::Result<Variant<H>, E>) -> std::result::Result<String, E>
where
    E: From<ConversionError>,
{
    convert(result)
}

pub fn to_i32<H, E>(result: std::result::Result<Variant<H>, E>) -> std::result::Result<i32, E>
where
    E: From<ConversionError>,
{
    convert(result)
}

pub fn to_i64<H, E>(result: std::result::Result<Variant<H>, E>) -> std::result::Result<i64, E>
where
    E: From<ConversionError>,
{
    convert(result)
}

pub fn to_f32<H, E>(result: std::result::Result<Variant<H>, E>) -> std::result::Result<f32, E>
where
    E: From<ConversionError>,
{
    convert(result)
}

pub fn to_f64<H, E>(result: std::result::Result<Variant<H>, E>) -> std::result::Result<f64, E>
where
    E: From<ConversionError>,
{
    convert(result)
}

pub fn to_bool<H, E>(result: std::result::Result<Variant<H>, E>) -> std::result::Result<bool, E>
where
    E: From<ConversionError>,
{
    convert(result)
}

pub fn to_time<H, E>(
    result: std::result::Result<Variant<H>, E>,
) -> std::result::Result<Option<DateTime<Utc>>, E>
where
    E: From<ConversionError>,
{
    convert(result)
}

pub fn to_string_vec<H, E>(
    result: std::result::Result<Variant<H>, E>,
) -> std::result::Result<Vec<String>, E>
where
    E: From<ConversionError>,
{
    convert(result)
}
