//! In-memory automation object graph for testing and offline inspection.
//!
//! [`InMemoryDispatch`] holds every object in a `Vec` addressed by
//! [`ObjectRef`]. Collections answer `Count` and `Item(i)` the way automation
//! collections do. Every read is appended to a call log so tests can assert
//! exactly which properties were touched and in what order.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;

use tracing::trace;
use wuapi_variant::Variant;

use crate::error::{Result, TransportError};
use crate::traits::Dispatch;

/// Handle to an object inside one [`InMemoryDispatch`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectRef(usize);

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "obj#{}", self.0)
    }
}

/// One recorded transport call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Property { object: ObjectRef, name: String },
    Indexed { object: ObjectRef, name: String, index: i32 },
}

impl Call {
    /// The member name that was read.
    pub fn name(&self) -> &str {
        match self {
            Call::Property { name, .. } | Call::Indexed { name, .. } => name,
        }
    }
}

/// What a read of one property or item produces.
#[derive(Clone, Debug)]
pub(crate) enum Slot {
    Value(Variant<ObjectRef>),
    Fail(TransportError),
}

impl Slot {
    fn read(&self) -> Result<Variant<ObjectRef>> {
        match self {
            Slot::Value(v) => Ok(v.clone()),
            Slot::Fail(e) => Err(e.clone()),
        }
    }
}

#[derive(Debug, Default)]
struct MemoryObject {
    properties: BTreeMap<String, Slot>,
    /// `Some` for collections.
    items: Option<Vec<Slot>>,
}

/// An in-memory implementation of [`Dispatch`].
///
/// The graph is built through `&mut self` and read through `&self`. The call
/// log uses a `RefCell`, so like a single-apartment server this type is not
/// `Sync`.
#[derive(Debug, Default)]
pub struct InMemoryDispatch {
    objects: Vec<MemoryObject>,
    calls: RefCell<Vec<Call>>,
}

impl InMemoryDispatch {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of objects in the graph, collections included.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if no object has been created yet.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    // ---------------------------------------------------------------
    // Construction
    // ---------------------------------------------------------------

    /// Create an object with the given properties.
    pub fn object<'a, I>(&mut self, properties: I) -> ObjectRef
    where
        I: IntoIterator<Item = (&'a str, Variant<ObjectRef>)>,
    {
        let properties = properties
            .into_iter()
            .map(|(name, value)| (name.to_string(), Slot::Value(value)))
            .collect();
        self.push(MemoryObject {
            properties,
            items: None,
        })
    }

    /// Create a collection. `Count` reports the item count unless it is
    /// overridden with [`set_property`](Self::set_property).
    pub fn collection<I>(&mut self, items: I) -> ObjectRef
    where
        I: IntoIterator<Item = Variant<ObjectRef>>,
    {
        self.push(MemoryObject {
            properties: BTreeMap::new(),
            items: Some(items.into_iter().map(Slot::Value).collect()),
        })
    }

    /// Create a collection whose items are the given object handles.
    pub fn collection_of<I>(&mut self, objects: I) -> ObjectRef
    where
        I: IntoIterator<Item = ObjectRef>,
    {
        self.collection(objects.into_iter().map(Variant::Object))
    }

    /// Set (or replace) a property value.
    pub fn set_property(
        &mut self,
        object: ObjectRef,
        name: &str,
        value: impl Into<Variant<ObjectRef>>,
    ) -> Result<()> {
        self.get_mut(object)?
            .properties
            .insert(name.to_string(), Slot::Value(value.into()));
        Ok(())
    }

    /// Make every read of `name` on `object` fail with `error`.
    pub fn fail_property(
        &mut self,
        object: ObjectRef,
        name: &str,
        error: TransportError,
    ) -> Result<()> {
        self.get_mut(object)?
            .properties
            .insert(name.to_string(), Slot::Fail(error));
        Ok(())
    }

    /// Make `Item(index)` on `collection` fail with `error`.
    pub fn fail_item(
        &mut self,
        collection: ObjectRef,
        index: i32,
        error: TransportError,
    ) -> Result<()> {
        let items = self
            .get_mut(collection)?
            .items
            .as_mut()
            .ok_or_else(|| TransportError::UnknownMember {
                name: "Item".to_string(),
            })?;
        let slot = usize::try_from(index)
            .ok()
            .and_then(|i| items.get_mut(i))
            .ok_or_else(|| TransportError::IndexOutOfRange {
                name: "Item".to_string(),
                index,
            })?;
        *slot = Slot::Fail(error);
        Ok(())
    }

    /// Append an item to a collection.
    pub(crate) fn push_item(&mut self, collection: ObjectRef, item: Slot) -> Result<()> {
        self.get_mut(collection)?
            .items
            .as_mut()
            .ok_or_else(|| TransportError::UnknownMember {
                name: "Item".to_string(),
            })?
            .push(item);
        Ok(())
    }

    pub(crate) fn set_slot(&mut self, object: ObjectRef, name: &str, slot: Slot) -> Result<()> {
        self.get_mut(object)?.properties.insert(name.to_string(), slot);
        Ok(())
    }

    fn push(&mut self, object: MemoryObject) -> ObjectRef {
        self.objects.push(object);
        ObjectRef(self.objects.len() - 1)
    }

    fn get(&self, object: ObjectRef) -> Result<&MemoryObject> {
        self.objects
            .get(object.0)
            .ok_or_else(|| TransportError::InvalidHandle(object.to_string()))
    }

    fn get_mut(&mut self, object: ObjectRef) -> Result<&mut MemoryObject> {
        self.objects
            .get_mut(object.0)
            .ok_or_else(|| TransportError::InvalidHandle(object.to_string()))
    }

    // ---------------------------------------------------------------
    // Call log
    // ---------------------------------------------------------------

    /// Every call made so far, oldest first.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Number of calls that read `name` (property or indexed).
    pub fn calls_named(&self, name: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.name() == name).count()
    }

    /// Forget all recorded calls.
    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

/// `Count` is an `I32`; larger collections cannot report their size.
fn count_variant(len: usize) -> Result<Variant<ObjectRef>> {
    i32::try_from(len)
        .map(Variant::I32)
        .map_err(|_| {
            TransportError::exception(format!("collection of {len} items overflows Count"))
        })
}

impl Dispatch for InMemoryDispatch {
    type Handle = ObjectRef;

    fn get_property(&self, handle: &ObjectRef, name: &str) -> Result<Variant<ObjectRef>> {
        trace!(object = %handle, property = name, "get property");
        self.record(Call::Property {
            object: *handle,
            name: name.to_string(),
        });
        let object = self.get(*handle)?;
        match (object.properties.get(name), &object.items) {
            (Some(slot), _) => slot.read(),
            (None, Some(items)) if name == "Count" => count_variant(items.len()),
            (None, _) => Err(TransportError::UnknownMember {
                name: name.to_string(),
            }),
        }
    }

    fn get_indexed_property(
        &self,
        handle: &ObjectRef,
        name: &str,
        index: i32,
    ) -> Result<Variant<ObjectRef>> {
        trace!(object = %handle, property = name, index, "get indexed property");
        self.record(Call::Indexed {
            object: *handle,
            name: name.to_string(),
            index,
        });
        let unknown = || TransportError::UnknownMember {
            name: name.to_string(),
        };
        if name != "Item" {
            return Err(unknown());
        }
        let items = self.get(*handle)?.items.as_ref().ok_or_else(unknown)?;
        usize::try_from(index)
            .ok()
            .and_then(|i| items.get(i))
            .ok_or_else(|| TransportError::IndexOutOfRange {
                name: name.to_string(),
                index,
            })?
            .read()
    }
}
