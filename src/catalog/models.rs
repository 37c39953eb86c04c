//! Catalog Models

use serde::{Deserialize, Serialize};

use crate::uuids::TypedUuid;

/// Product id.
pub type ProductId = TypedUuid<Product>;

/// A sellable product with its live stock level.
///
/// `price` is in minor currency units; `stock` can never go negative by
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique, stable identity.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Unit price in minor currency units.
    pub price: u64,

    /// Units currently available for sale.
    pub stock: u32,

    /// Optional binary-as-text image blob.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Data for a product about to be created; the catalog assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    /// Display name; must not be blank.
    pub name: String,

    /// Unit price in minor currency units.
    pub price: u64,

    /// Initial stock level.
    pub stock: u32,

    /// Optional binary-as-text image blob.
    pub image: Option<String>,
}

/// Full replacement for a product's mutable fields.
///
/// Updates are whole-record: every mutable field is supplied, so readers
/// never observe a partially updated product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductUpdate {
    /// New display name; must not be blank.
    pub name: String,

    /// New unit price in minor currency units.
    pub price: u64,

    /// New stock level.
    pub stock: u32,

    /// New image blob, or `None` to clear it.
    pub image: Option<String>,
}
