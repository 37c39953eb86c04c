//! Sales Journal
//!
//! Append-only system of record for completed sales, owner of the
//! `salesJournal` store key. Reporting reads it; checkout appends to it;
//! nothing else touches it.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::store::{self, JOURNAL_KEY, Store, StoreError};

pub mod models;

pub use models::{Order, OrderId};

/// Journal errors.
#[derive(Debug, Error)]
pub enum JournalError {
    /// Persisting the journal snapshot failed.
    #[error("storage error")]
    Store(#[from] StoreError),
}

/// Manager for the append-only order history.
#[derive(Clone)]
pub struct SalesJournal {
    store: Arc<dyn Store>,
    orders: Vec<Order>,
}

impl std::fmt::Debug for SalesJournal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SalesJournal")
            .field("orders", &self.orders)
            .finish_non_exhaustive()
    }
}

impl SalesJournal {
    /// Opens the journal, loading the persisted history if one exists.
    ///
    /// # Errors
    ///
    /// Returns a [`JournalError`] if the snapshot cannot be read or decoded.
    pub fn open(store: Arc<dyn Store>) -> Result<Self, JournalError> {
        let orders = store::load_json(store.as_ref(), JOURNAL_KEY)?.unwrap_or_default();

        Ok(Self { store, orders })
    }

    /// Recorded orders in append order.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Number of recorded orders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Whether no sale has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Appends an order and persists the journal. The only mutation the
    /// journal supports.
    ///
    /// # Errors
    ///
    /// Returns a [`JournalError`] if persisting the snapshot failed.
    pub fn append(&mut self, order: Order) -> Result<(), JournalError> {
        self.orders.push(order);

        store::save_json(self.store.as_ref(), JOURNAL_KEY, &self.orders)?;

        debug!(orders = self.orders.len(), "persisted sales journal");

        Ok(())
    }
}
