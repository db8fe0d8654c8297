//! Reading typed records off remote automation objects.
//!
//! Every procedure here is a plain synchronous function over one handle:
//! read the named properties in a fixed order, convert each one, recurse into
//! nested objects and collections, and stop at the first error.

use tracing::{debug, trace};
use wuapi_dispatch::Dispatch;
use wuapi_variant::{convert, to_object, ConversionError, FromVariant, VariantKind};

use crate::category::CategoryRecord;
use crate::error::{MaterializeError, Result};
use crate::image::ImageInfo;
use crate::options::MaterializeOptions;
use crate::update::UpdateIdentity;

/// Builds typed records from objects reachable through a [`Dispatch`].
///
/// A materializer borrows the transport and holds no other state, so one can
/// be created per call or kept around.
#[derive(Debug)]
pub struct Materializer<'d, D: Dispatch> {
    dispatch: &'d D,
    options: MaterializeOptions,
}

impl<'d, D: Dispatch> Materializer<'d, D> {
    /// Create a materializer with default options.
    pub fn new(dispatch: &'d D) -> Self {
        Self::with_options(dispatch, MaterializeOptions::default())
    }

    pub fn with_options(dispatch: &'d D, options: MaterializeOptions) -> Self {
        Self { dispatch, options }
    }

    pub fn options(&self) -> &MaterializeOptions {
        &self.options
    }

    // ---------------------------------------------------------------
    // Property access
    // ---------------------------------------------------------------

    /// Read and convert one named property.
    pub fn property<T>(&self, handle: &D::Handle, name: &str) -> Result<T>
    where
        T: FromVariant<D::Handle>,
    {
        let expected = <T as FromVariant<D::Handle>>::TYPE_NAME;
        trace!(property = name, expected, "read property");
        convert(self.dispatch.get_property(handle, name).map_err(MaterializeError::from))
    }

    /// Read a property holding an object handle. `None` if it was null.
    pub fn object_property(&self, handle: &D::Handle, name: &str) -> Result<Option<D::Handle>> {
        trace!(property = name, expected = "object", "read property");
        to_object(self.dispatch.get_property(handle, name).map_err(MaterializeError::from))
    }

    // ---------------------------------------------------------------
    // Collections
    // ---------------------------------------------------------------

    /// Materialize every element of an automation collection.
    ///
    /// Reads `Count`, then `Item(0)` .. `Item(Count - 1)` in ascending order,
    /// handing each element handle to `each`. A zero (or negative) count
    /// issues no `Item` reads. The first failing index aborts the whole
    /// enumeration and the elements already built are dropped.
    ///
    /// A null `Item(i)` is a mismatch against `object`: a collection that
    /// reports an element must be able to produce it.
    pub fn enumerate<T, F>(&self, collection: &D::Handle, mut each: F) -> Result<Vec<T>>
    where
        F: FnMut(&Self, &D::Handle) -> Result<T>,
    {
        let count: i32 = self.property(collection, "Count")?;
        // Never reserve from `Count`: it is whatever the server reports.
        let mut items = Vec::new();
        for index in 0..count {
            let read = self
                .dispatch
                .get_indexed_property(collection, "Item", index)
                .map_err(MaterializeError::from);
            let handle = to_object(read)?
                .ok_or_else(|| ConversionError::new("object", VariantKind::Empty))?;
            items.push(each(self, &handle)?);
        }
        debug!(count, "enumerated collection");
        Ok(items)
    }

    // ---------------------------------------------------------------
    // Categories
    // ---------------------------------------------------------------

    /// Materialize one category and its whole subtree.
    pub fn category(&self, handle: &D::Handle) -> Result<CategoryRecord> {
        self.category_under(handle, None)
    }

    /// Materialize every category of a `ICategoryCollection`.
    pub fn categories(&self, collection: &D::Handle) -> Result<Vec<CategoryRecord>> {
        self.enumerate(collection, |m, h| m.category(h))
    }

    fn category_under(&self, handle: &D::Handle, parent_id: Option<&str>) -> Result<CategoryRecord> {
        let category_id: String = self.property(handle, "CategoryID")?;

        let children = match self.object_property(handle, "Children")? {
            Some(collection) => self.enumerate(&collection, |m, h| {
                m.category_under(h, Some(category_id.as_str()))
            })?,
            None => Vec::new(),
        };

        let description = self.property(handle, "Description")?;

        let image = match self.object_property(handle, "Image")? {
            Some(image) => Some(self.image(&image)?),
            None => None,
        };

        let name = self.property(handle, "Name")?;
        let order = self.property(handle, "Order")?;
        let category_type = self.property(handle, "Type")?;

        // `Parent` and `Updates` are not read: following `Parent` from a
        // child would walk back up the tree being built.
        let parent_id = if self.options.link_parents {
            parent_id.map(str::to_string)
        } else {
            None
        };

        debug!(
            category = %category_id,
            children = children.len(),
            "materialized category"
        );

        Ok(CategoryRecord {
            category_id,
            children,
            description,
            image,
            name,
            order,
            parent_id,
            category_type,
            updates: Vec::new(),
        })
    }

    // ---------------------------------------------------------------
    // Leaf records
    // ---------------------------------------------------------------

    /// Materialize an `IImageInformation` object.
    pub fn image(&self, handle: &D::Handle) -> Result<ImageInfo> {
        Ok(ImageInfo {
            alt_text: self.property(handle, "AltText")?,
            height: self.property(handle, "Height")?,
            source: self.property(handle, "Source")?,
            width: self.property(handle, "Width")?,
        })
    }

    /// Materialize an `IUpdateIdentity` object.
    pub fn update_identity(&self, handle: &D::Handle) -> Result<UpdateIdentity> {
        Ok(UpdateIdentity {
            revision_number: self.property(handle, "RevisionNumber")?,
            update_id: self.property(handle, "UpdateID")?,
        })
    }

    /// Materialize a collection of `IUpdateIdentity` objects.
    pub fn update_identities(&self, collection: &D::Handle) -> Result<Vec<UpdateIdentity>> {
        self.enumerate(collection, |m, h| m.update_identity(h))
    }
}
