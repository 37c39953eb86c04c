//! Cart errors.

use thiserror::Error;

use crate::{catalog::models::ProductId, store::StoreError};

#[derive(Debug, Error)]
pub enum CartError {
    /// The requested quantity is not covered by the product's live stock.
    ///
    /// An unknown product id surfaces here too, with zero availability: to
    /// the cashier it is the same answer, the item cannot be sold.
    #[error("insufficient stock for product {product}: requested {requested}, available {available}")]
    Stock {
        /// The product that could not be added or resized.
        product: ProductId,
        /// Units the caller asked for in total.
        requested: u32,
        /// Units the catalog currently has.
        available: u32,
    },

    /// Persisting the cart snapshot failed.
    #[error("storage error")]
    Store(#[from] StoreError),
}
