//! Journal Models

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{cart::models::CartLine, uuids::TypedUuid};

/// Order id.
pub type OrderId = TypedUuid<Order>;

/// An immutable record of one completed sale.
///
/// The lines are a frozen copy of the cart at checkout time; nothing in the
/// system ever mutates or deletes an order once it is journaled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique identity assigned at checkout.
    pub id: OrderId,

    /// The sold lines with their frozen name/price snapshots.
    pub items: Vec<CartLine>,

    /// Sale total in minor currency units.
    pub total: u64,

    /// Moment the sale was committed.
    pub date: Timestamp,
}

impl Order {
    /// Units sold across all lines.
    #[must_use]
    pub fn units_sold(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }
}
