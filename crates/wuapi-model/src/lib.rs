//! Typed Windows Update Agent records materialized from automation objects.
//!
//! A [`Materializer`] reads a fixed set of named properties off a remote
//! object through a [`Dispatch`] transport, converts each one with
//! `wuapi-variant`, and recurses into nested objects and `Count`/`Item`
//! collections until a fully owned record tree is built.
//!
//! # Guarantees
//!
//! - Materialization is eager and depth-first: a child subtree is complete
//!   before its next sibling is read.
//! - It is all or nothing: the first transport error or tag mismatch anywhere
//!   in the subtree is returned and no partial record is ever handed back.
//! - Collection order is the remote enumeration order (`Item(0)`, `Item(1)`, ...).
//! - The remote `Parent` and `Updates` properties are never read. The tree has
//!   no back-references; see [`CategoryIndex`] for parent lookups.
//!
//! # Modules
//!
//! - [`error`] — [`MaterializeError`]
//! - [`options`] — [`MaterializeOptions`]
//! - [`category`] — [`CategoryRecord`] and tree traversal
//! - [`image`] — [`ImageInfo`]
//! - [`update`] — [`UpdateIdentity`]
//! - [`materialize`] — The [`Materializer`] and the collection enumeration
//! - [`index`] — [`CategoryIndex`] id and parent lookup
//!
//! [`Dispatch`]: wuapi_dispatch::Dispatch

pub mod category;
pub mod error;
pub mod image;
pub mod index;
pub mod materialize;
pub mod options;
pub mod update;

pub use category::{CategoryRecord, Walk};
pub use error::{MaterializeError, Result};
pub use image::ImageInfo;
pub use index::CategoryIndex;
pub use materialize::Materializer;
pub use options::MaterializeOptions;
pub use update::UpdateIdentity;
