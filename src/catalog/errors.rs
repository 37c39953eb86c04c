//! Catalog errors.

use thiserror::Error;

use crate::{catalog::models::ProductId, store::StoreError};

#[derive(Debug, Error)]
pub enum CatalogError {
    /// The product name was empty or blank.
    #[error("product name must not be empty")]
    InvalidName,

    /// No product with the given id exists.
    #[error("product not found")]
    NotFound,

    /// A stock deduction would take a product below zero.
    #[error("cannot deduct {requested} from stock {available} of product {product}")]
    InsufficientStock {
        /// The product whose stock was too low (or which no longer exists).
        product: ProductId,
        /// Units the sale asked for.
        requested: u32,
        /// Units actually available.
        available: u32,
    },

    /// Persisting the catalog snapshot failed.
    #[error("storage error")]
    Store(#[from] StoreError),
}
