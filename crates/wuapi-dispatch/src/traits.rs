//! The [`Dispatch`] trait defining the automation transport interface.
//!
//! A COM `IDispatch` bridge, an RPC proxy, or the in-memory graph used by the
//! tests all implement this trait.

use std::fmt;

use wuapi_variant::Variant;

use crate::error::Result;

/// Late-bound access to automation objects.
///
/// There is deliberately no `Send` or `Sync` bound. Automation servers are
/// commonly single-apartment, so a `Dispatch` is used from one thread and
/// callers serialize access themselves.
pub trait Dispatch {
    /// Reference to one remote object. Handles returned inside a [`Variant`]
    /// are independent of the handle they were read from.
    type Handle: Clone + fmt::Debug;

    /// Read the named property of `handle`.
    fn get_property(&self, handle: &Self::Handle, name: &str) -> Result<Variant<Self::Handle>>;

    /// Read an indexed property, e.g. `Item(index)` on a collection.
    fn get_indexed_property(
        &self,
        handle: &Self::Handle,
        name: &str,
        index: i32,
    ) -> Result<Variant<Self::Handle>>;
}
