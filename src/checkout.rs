//! Checkout
//!
//! The one multi-step operation in the system: turn a valid cart into a
//! durable order. Two stores change under one cart snapshot (the catalog
//! loses stock, the journal gains an order), so the steps are strictly
//! ordered and the cart is only cleared after both writes succeeded. A
//! failure before the commit point leaves the sale fully intact for retry.

use thiserror::Error;
use tracing::info;

use crate::{
    cart::{Cart, CartError},
    catalog::{Catalog, CatalogError, models::ProductId},
    clock::Clock,
    journal::{JournalError, Order, OrderId, SalesJournal},
};

/// Checkout errors.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Checkout was attempted with no lines in the cart.
    #[error("cannot check out an empty cart")]
    EmptyCart,

    /// A line's quantity is no longer covered by live stock.
    ///
    /// Stock is re-validated at checkout time; a cart edited minutes ago
    /// may have been overtaken by the management screen.
    #[error("insufficient stock for product {product}: requested {requested}, available {available}")]
    Stock {
        /// The product whose stock ran out (or which was deleted).
        product: ProductId,
        /// Units the cart holds.
        requested: u32,
        /// Units actually available.
        available: u32,
    },

    /// The catalog's stock deduction could not be persisted.
    #[error("catalog update failed")]
    Catalog(#[source] CatalogError),

    /// The order could not be appended to the journal.
    #[error("journal append failed")]
    Journal(#[source] JournalError),

    /// The cart could not be cleared after the sale was recorded.
    #[error("cart clear failed")]
    Cart(#[source] CartError),
}

/// Converts the cart into a persisted [`Order`].
///
/// Steps, in order: re-validate and deduct stock as one unit, persist the
/// catalog; append the order to the journal; clear the cart (the commit
/// point); return the order for receipt display.
///
/// If the journal append fails the cart is left untouched, so no sale can
/// end up recorded nowhere while the cashier believes it went through.
///
/// # Errors
///
/// - [`CheckoutError::EmptyCart`]: the cart has no lines; nothing is
///   written.
/// - [`CheckoutError::Stock`]: live stock no longer covers a line; nothing
///   is written.
/// - [`CheckoutError::Catalog`] / [`CheckoutError::Journal`] /
///   [`CheckoutError::Cart`]: a persistence step failed; earlier steps are
///   not rolled back but the cart survives any failure before its clear.
pub fn checkout(
    cart: &mut Cart,
    catalog: &mut Catalog,
    journal: &mut SalesJournal,
    clock: &dyn Clock,
) -> Result<Order, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let deductions: Vec<(ProductId, u32)> = cart
        .lines()
        .iter()
        .map(|line| (line.product, line.quantity))
        .collect();

    catalog
        .deduct_stock(&deductions)
        .map_err(|err| match err {
            CatalogError::InsufficientStock {
                product,
                requested,
                available,
            } => CheckoutError::Stock {
                product,
                requested,
                available,
            },
            other => CheckoutError::Catalog(other),
        })?;

    let order = Order {
        id: OrderId::new(),
        items: cart.lines().to_vec(),
        total: cart.total(),
        date: clock.now(),
    };

    journal
        .append(order.clone())
        .map_err(CheckoutError::Journal)?;

    cart.clear().map_err(CheckoutError::Cart)?;

    info!(order = %order.id, total = order.total, lines = order.items.len(), "checkout committed");

    Ok(order)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use testresult::TestResult;

    use crate::{
        catalog::{NewProduct, ProductUpdate},
        fixtures::FixedClock,
        store::{MemoryStore, Store},
    };

    use super::*;

    struct Registers {
        catalog: Catalog,
        cart: Cart,
        journal: SalesJournal,
        clock: FixedClock,
    }

    fn registers() -> Registers {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::default());

        Registers {
            catalog: Catalog::open(store.clone()).expect("catalog should open"),
            cart: Cart::open(store.clone()).expect("cart should open"),
            journal: SalesJournal::open(store).expect("journal should open"),
            clock: FixedClock("2026-08-06T03:00:00Z".parse().expect("valid timestamp")),
        }
    }

    fn kopi(catalog: &mut Catalog, stock: u32) -> ProductId {
        catalog
            .add(NewProduct {
                name: "Kopi".to_string(),
                price: 15_000,
                stock,
                image: None,
            })
            .expect("product should be added")
            .id
    }

    #[test]
    fn empty_cart_checkout_fails_without_writes() -> TestResult {
        let Registers {
            mut catalog,
            mut cart,
            mut journal,
            clock,
        } = registers();
        kopi(&mut catalog, 2);

        let result = checkout(&mut cart, &mut catalog, &mut journal, &clock);

        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
        assert!(journal.is_empty());
        assert_eq!(catalog.list().first().map(|p| p.stock), Some(2));

        Ok(())
    }

    #[test]
    fn checkout_commits_stock_journal_and_cart_together() -> TestResult {
        let Registers {
            mut catalog,
            mut cart,
            mut journal,
            clock,
        } = registers();
        let kopi = kopi(&mut catalog, 2);

        cart.add_item(&catalog, kopi)?;
        cart.add_item(&catalog, kopi)?;

        let order = checkout(&mut cart, &mut catalog, &mut journal, &clock)?;

        assert_eq!(order.total, 30_000);
        assert_eq!(order.units_sold(), 2);
        assert_eq!(order.date, clock.0);

        assert_eq!(catalog.get(kopi).map(|p| p.stock), Some(0));
        assert_eq!(journal.len(), 1);
        assert_eq!(journal.orders().first(), Some(&order));
        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn orders_get_distinct_ids() -> TestResult {
        let Registers {
            mut catalog,
            mut cart,
            mut journal,
            clock,
        } = registers();
        let kopi = kopi(&mut catalog, 5);

        cart.add_item(&catalog, kopi)?;
        let first = checkout(&mut cart, &mut catalog, &mut journal, &clock)?;

        cart.add_item(&catalog, kopi)?;
        let second = checkout(&mut cart, &mut catalog, &mut journal, &clock)?;

        assert_ne!(first.id, second.id);
        assert_eq!(journal.len(), 2);

        Ok(())
    }

    #[test]
    fn stale_cart_is_rejected_when_stock_shrank() -> TestResult {
        let Registers {
            mut catalog,
            mut cart,
            mut journal,
            clock,
        } = registers();
        let kopi = kopi(&mut catalog, 2);

        cart.add_item(&catalog, kopi)?;
        cart.add_item(&catalog, kopi)?;

        // Stock shrinks between the last cart edit and checkout.
        catalog.update(
            kopi,
            ProductUpdate {
                name: "Kopi".to_string(),
                price: 15_000,
                stock: 1,
                image: None,
            },
        )?;

        let result = checkout(&mut cart, &mut catalog, &mut journal, &clock);

        assert!(matches!(
            result,
            Err(CheckoutError::Stock {
                requested: 2,
                available: 1,
                ..
            })
        ));

        // Nothing moved: stock, journal and cart are all as before.
        assert_eq!(catalog.get(kopi).map(|p| p.stock), Some(1));
        assert!(journal.is_empty());
        assert_eq!(cart.len(), 1);

        Ok(())
    }

    #[test]
    fn deleted_product_fails_checkout_cleanly() -> TestResult {
        let Registers {
            mut catalog,
            mut cart,
            mut journal,
            clock,
        } = registers();
        let kopi = kopi(&mut catalog, 2);

        cart.add_item(&catalog, kopi)?;
        catalog.remove(kopi)?;

        let result = checkout(&mut cart, &mut catalog, &mut journal, &clock);

        assert!(matches!(
            result,
            Err(CheckoutError::Stock { available: 0, .. })
        ));
        assert!(journal.is_empty());
        assert_eq!(cart.len(), 1, "the cart keeps its line for the cashier");

        Ok(())
    }

    #[test]
    fn checkout_charges_snapshot_prices_not_live_prices() -> TestResult {
        let Registers {
            mut catalog,
            mut cart,
            mut journal,
            clock,
        } = registers();
        let kopi = kopi(&mut catalog, 2);

        cart.add_item(&catalog, kopi)?;

        catalog.update(
            kopi,
            ProductUpdate {
                name: "Kopi".to_string(),
                price: 20_000,
                stock: 2,
                image: None,
            },
        )?;

        let order = checkout(&mut cart, &mut catalog, &mut journal, &clock)?;

        assert_eq!(order.total, 15_000);

        Ok(())
    }
}
