//! Cart
//!
//! The cart engine owns the in-progress lines and the `cart` store key. It
//! never caches stock: every mutation re-checks availability against the
//! live catalog, while prices stay frozen in each line's snapshot. The cart
//! is persisted after every successful mutation so a reload of the shell
//! does not lose the sale in progress.

use std::sync::Arc;

use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::{
    catalog::Catalog,
    store::{self, CART_KEY, Store},
};

pub mod errors;
pub mod models;

pub use errors::CartError;
pub use models::{CartLine, ProductSnapshot};

use crate::catalog::models::ProductId;

/// Manager for the in-progress cart.
#[derive(Clone)]
pub struct Cart {
    store: Arc<dyn Store>,
    lines: SmallVec<[CartLine; 8]>,
}

impl std::fmt::Debug for Cart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cart")
            .field("lines", &self.lines)
            .finish_non_exhaustive()
    }
}

impl Cart {
    /// Opens the cart, restoring any persisted in-progress lines.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the snapshot cannot be read or decoded.
    pub fn open(store: Arc<dyn Store>) -> Result<Self, CartError> {
        let lines = store::load_json(store.as_ref(), CART_KEY)?.unwrap_or_default();

        Ok(Self { store, lines })
    }

    /// Current lines in first-added order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of lines (not units) in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Cart total: Σ quantity × snapshot price.
    ///
    /// Live catalog prices are deliberately not consulted; a sale in
    /// progress is never silently repriced.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.lines.iter().map(CartLine::total).sum()
    }

    /// Adds one unit of a product, creating a line with a fresh name/price
    /// snapshot on first add.
    ///
    /// # Errors
    ///
    /// - [`CartError::Stock`]: the product is unknown, out of stock, or the
    ///   line already holds every available unit. The cart is unchanged.
    /// - [`CartError::Store`]: persisting the snapshot failed.
    pub fn add_item(&mut self, catalog: &Catalog, product: ProductId) -> Result<(), CartError> {
        let Some(record) = catalog.get(product) else {
            warn!(%product, "add to cart rejected: unknown product");

            return Err(CartError::Stock {
                product,
                requested: 1,
                available: 0,
            });
        };

        let available = record.stock;

        match self.lines.iter_mut().find(|line| line.product == product) {
            Some(line) => {
                if line.quantity >= available {
                    warn!(%product, quantity = line.quantity, available, "add to cart rejected: stock exhausted");

                    return Err(CartError::Stock {
                        product,
                        requested: line.quantity.saturating_add(1),
                        available,
                    });
                }

                line.quantity += 1;
            }
            None => {
                if available < 1 {
                    warn!(%product, "add to cart rejected: out of stock");

                    return Err(CartError::Stock {
                        product,
                        requested: 1,
                        available,
                    });
                }

                self.lines.push(CartLine {
                    product,
                    snapshot: ProductSnapshot {
                        name: record.name.clone(),
                        price: record.price,
                    },
                    quantity: 1,
                });
            }
        }

        self.persist()
    }

    /// Sets a line's quantity, re-checked against live stock.
    ///
    /// Any quantity below 1 (zero or negative) removes the line, matching
    /// the shell's spinner semantics. Setting a quantity for a product with
    /// no line is a no-op as long as stock covers it.
    ///
    /// # Errors
    ///
    /// - [`CartError::Stock`]: the quantity exceeds current live stock (an
    ///   unknown product has none). The cart is unchanged.
    /// - [`CartError::Store`]: persisting the snapshot failed.
    pub fn set_quantity(
        &mut self,
        catalog: &Catalog,
        product: ProductId,
        quantity: i64,
    ) -> Result<(), CartError> {
        let quantity = match u32::try_from(quantity) {
            Ok(0) | Err(_) => return self.remove_item(product),
            Ok(quantity) => quantity,
        };

        let available = catalog.get(product).map_or(0, |record| record.stock);

        if quantity > available {
            warn!(%product, quantity, available, "quantity change rejected: stock exhausted");

            return Err(CartError::Stock {
                product,
                requested: quantity,
                available,
            });
        }

        if let Some(line) = self.lines.iter_mut().find(|line| line.product == product) {
            line.quantity = quantity;
        }

        self.persist()
    }

    /// Removes a product's line if present; removing an absent line is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError::Store`] if persisting the snapshot failed.
    pub fn remove_item(&mut self, product: ProductId) -> Result<(), CartError> {
        self.lines.retain(|line| line.product != product);

        self.persist()
    }

    /// Empties the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError::Store`] if persisting the snapshot failed.
    pub fn clear(&mut self) -> Result<(), CartError> {
        self.lines.clear();

        self.persist()
    }

    fn persist(&self) -> Result<(), CartError> {
        store::save_json(self.store.as_ref(), CART_KEY, &self.lines)?;

        debug!(lines = self.lines.len(), "persisted cart snapshot");

        Ok(())
    }
}
