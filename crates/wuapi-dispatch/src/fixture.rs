//! Builds an [`InMemoryDispatch`] object graph from JSON.
//!
//! Mapping rules:
//!
//! - `null` → [`Variant::Empty`]; booleans and strings map to their tags
//! - integers → `I32` when they fit, otherwise `I64`; other numbers → `F64`
//! - a JSON object → a new automation object, one property per key
//! - an array whose items are all objects → a collection (`Count`/`Item`)
//! - any other array → [`Variant::Array`]
//!
//! Single-key objects whose key starts with `$` select a tag explicitly:
//! `{"$i64": 5}`, `{"$f32": 1.5}`, `{"$date": "2022-03-08T12:00:00Z"}`,
//! `{"$collection": []}` (e.g. an empty collection) and
//! `{"$error": "description"}`, which makes the enclosing property or
//! collection item fail with an `E_FAIL` exception when read.

use chrono::{DateTime, Utc};
use serde_json::{Map, Number, Value};
use tracing::debug;
use wuapi_variant::Variant;

use crate::error::{FixtureError, TransportError};
use crate::memory::{InMemoryDispatch, ObjectRef, Slot};

/// Parse `json` and add its object graph to `dispatch`.
///
/// Returns the value the document's root maps to, usually
/// [`Variant::Object`].
pub fn load_fixture(
    dispatch: &mut InMemoryDispatch,
    json: &str,
) -> Result<Variant<ObjectRef>, FixtureError> {
    let value: Value = serde_json::from_str(json)?;
    let before = dispatch.len();
    let root = load_value(dispatch, &value)?;
    debug!(objects = dispatch.len() - before, "fixture loaded");
    Ok(root)
}

/// Add the graph described by an already-parsed JSON value.
pub fn load_value(
    dispatch: &mut InMemoryDispatch,
    value: &Value,
) -> Result<Variant<ObjectRef>, FixtureError> {
    match load_slot(dispatch, value)? {
        Slot::Value(v) => Ok(v),
        Slot::Fail(_) => Err(FixtureError::MisplacedError),
    }
}

fn load_slot(dispatch: &mut InMemoryDispatch, value: &Value) -> Result<Slot, FixtureError> {
    let variant = match value {
        Value::Null => Variant::Empty,
        Value::Bool(b) => Variant::Bool(*b),
        Value::String(s) => Variant::String(s.clone()),
        Value::Number(n) => number(n)?,
        Value::Array(items) => array(dispatch, items)?,
        Value::Object(map) => match tagged(map) {
            Some((tag, inner)) => return tag_slot(dispatch, tag, inner),
            None => Variant::Object(object(dispatch, map)?),
        },
    };
    Ok(Slot::Value(variant))
}

fn number(n: &Number) -> Result<Variant<ObjectRef>, FixtureError> {
    if let Some(i) = n.as_i64() {
        return Ok(match i32::try_from(i) {
            Ok(small) => Variant::I32(small),
            Err(_) => Variant::I64(i),
        });
    }
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            return Ok(Variant::F64(f));
        }
    }
    Err(FixtureError::NumberOutOfRange(n.to_string()))
}

/// `Some((tag, value))` for a single-key `{"$tag": value}` object.
fn tagged(map: &Map<String, Value>) -> Option<(&str, &Value)> {
    if map.len() != 1 {
        return None;
    }
    let (key, value) = map.iter().next()?;
    key.starts_with('$').then_some((key.as_str(), value))
}

fn tag_slot(
    dispatch: &mut InMemoryDispatch,
    tag: &str,
    value: &Value,
) -> Result<Slot, FixtureError> {
    let invalid = |reason: &str| FixtureError::InvalidTag {
        tag: tag.to_string(),
        reason: reason.to_string(),
    };
    let variant = match tag {
        "$i64" => Variant::I64(value.as_i64().ok_or_else(|| invalid("expected an integer"))?),
        "$f32" => Variant::F32(value.as_f64().ok_or_else(|| invalid("expected a number"))? as f32),
        "$date" => {
            let text = value.as_str().ok_or_else(|| invalid("expected a string"))?;
            let parsed = DateTime::parse_from_rfc3339(text)
                .map_err(|e| invalid(&e.to_string()))?;
            Variant::Date(parsed.with_timezone(&Utc))
        }
        "$collection" => {
            let items = value.as_array().ok_or_else(|| invalid("expected an array"))?;
            Variant::Object(collection(dispatch, items)?)
        }
        "$error" => {
            let description = value.as_str().ok_or_else(|| invalid("expected a string"))?;
            return Ok(Slot::Fail(TransportError::exception(description)));
        }
        other => return Err(FixtureError::UnknownTag(other.to_string())),
    };
    Ok(Slot::Value(variant))
}

fn object(
    dispatch: &mut InMemoryDispatch,
    map: &Map<String, Value>,
) -> Result<ObjectRef, FixtureError> {
    let handle = dispatch.object(std::iter::empty());
    for (name, value) in map {
        let slot = load_slot(dispatch, value)?;
        dispatch.set_slot(handle, name, slot)?;
    }
    Ok(handle)
}

fn collection(dispatch: &mut InMemoryDispatch, items: &[Value]) -> Result<ObjectRef, FixtureError> {
    let handle = dispatch.collection(std::iter::empty());
    for item in items {
        let slot = load_slot(dispatch, item)?;
        dispatch.push_item(handle, slot)?;
    }
    Ok(handle)
}

fn array(dispatch: &mut InMemoryDispatch, items: &[Value]) -> Result<Variant<ObjectRef>, FixtureError> {
    if !items.is_empty() && items.iter().all(is_object_like) {
        return Ok(Variant::Object(collection(dispatch, items)?));
    }
    let values = items
        .iter()
        .map(|item| load_value(dispatch, item))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Variant::Array(values))
}

/// Items that become collection entries: plain objects and `$error`.
fn is_object_like(value: &Value) -> bool {
    match value {
        Value::Object(map) => match tagged(map) {
            Some((tag, _)) => tag == "$error" || tag == "$collection",
            None => true,
        },
        _ => false,
    }
}
