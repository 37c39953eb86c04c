//! Cart Models

use serde::{Deserialize, Serialize};

use crate::catalog::models::ProductId;

/// Name and price of a product frozen at the moment it entered the cart.
///
/// Kept separate from the product id on purpose: the snapshot is what the
/// sale charges, the id is only used to query live stock. A later price
/// change in the catalog never reprices a line already in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    /// Name at add-to-cart time.
    pub name: String,

    /// Unit price at add-to-cart time, in minor currency units.
    pub price: u64,
}

/// One line of an in-progress cart: a product reference, its frozen
/// snapshot and a positive quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Catalog id, consulted for live stock checks only.
    pub product: ProductId,

    /// Frozen name/price used for totals and the eventual order.
    pub snapshot: ProductSnapshot,

    /// Units in the cart; always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Line total: quantity times the snapshot price.
    #[must_use]
    pub fn total(&self) -> u64 {
        u64::from(self.quantity) * self.snapshot.price
    }
}
