//! The automation transport seam for the Windows Update Agent marshaling
//! layer.
//!
//! Automation servers expose objects only through "get named property" and
//! "get indexed property" calls that return a loosely-typed [`Variant`].
//! This crate defines that capability as the [`Dispatch`] trait so the
//! materialization code never depends on a concrete transport.
//!
//! # Modules
//!
//! - [`error`] — [`TransportError`] and [`FixtureError`]
//! - [`traits`] — The [`Dispatch`] trait
//! - [`memory`] — [`InMemoryDispatch`], an object graph held in memory that
//!   records every call, for tests and offline inspection
//! - [`fixture`] — Builds an [`InMemoryDispatch`] graph from JSON
//!
//! [`Variant`]: wuapi_variant::Variant

pub mod error;
pub mod fixture;
pub mod memory;
pub mod traits;

pub use error::{FixtureError, Result, TransportError};
pub use fixture::{load_fixture, load_value};
pub use memory::{Call, InMemoryDispatch, ObjectRef};
pub use traits::Dispatch;
