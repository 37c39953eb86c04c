//! Fixtures
//!
//! Seed data for first runs and deterministic helpers for tests. The seed
//! catalog lives in a YAML file so the defaults are data, not code.

use std::num::TryFromIntError;

use jiff::Timestamp;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    catalog::{Catalog, CatalogError, NewProduct},
    clock::Clock,
};

const DEFAULT_CATALOG: &str = include_str!("catalog.yaml");

/// Fixture parsing errors.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// YAML parsing error.
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A fixture price was negative or out of range.
    #[error("Invalid price in fixture")]
    InvalidPrice(#[source] TryFromIntError),

    /// A fixture stock level was negative or out of range.
    #[error("Invalid stock in fixture")]
    InvalidStock(#[source] TryFromIntError),

    /// Seeding the catalog failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[derive(Debug, Deserialize)]
struct CatalogFixture {
    products: Vec<ProductFixture>,
}

#[derive(Debug, Deserialize)]
struct ProductFixture {
    name: String,
    price: i64,
    stock: i64,
    #[serde(default)]
    image: Option<String>,
}

impl ProductFixture {
    fn into_new_product(self) -> Result<NewProduct, FixtureError> {
        let price = u64::try_from(self.price).map_err(FixtureError::InvalidPrice)?;
        let stock = u32::try_from(self.stock).map_err(FixtureError::InvalidStock)?;

        Ok(NewProduct {
            name: self.name,
            price,
            stock,
            image: self.image,
        })
    }
}

/// Parses the bundled default catalog.
///
/// # Errors
///
/// Returns a [`FixtureError`] if the bundled YAML is malformed or holds
/// out-of-range numbers.
pub fn default_products() -> Result<Vec<NewProduct>, FixtureError> {
    let fixture: CatalogFixture = serde_norway::from_str(DEFAULT_CATALOG)?;

    fixture
        .products
        .into_iter()
        .map(ProductFixture::into_new_product)
        .collect()
}

/// Seeds the default products into an empty catalog; a catalog that
/// already has products is left untouched (seeding is a first-run
/// behavior, not a reset).
///
/// # Errors
///
/// Returns a [`FixtureError`] if parsing the defaults or inserting them
/// fails.
pub fn seed_default_products(catalog: &mut Catalog) -> Result<(), FixtureError> {
    if !catalog.is_empty() {
        return Ok(());
    }

    for product in default_products()? {
        catalog.add(product)?;
    }

    Ok(())
}

/// A clock that always returns a fixed point in time.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use testresult::TestResult;

    use crate::store::{MemoryStore, Store};

    use super::*;

    #[test]
    fn default_catalog_parses() -> TestResult {
        let products = default_products()?;

        assert_eq!(products.len(), 6);

        let kopi = products.first().expect("expected at least one product");

        assert_eq!(kopi.name, "Kopi");
        assert_eq!(kopi.price, 15_000);
        assert_eq!(kopi.stock, 50);

        Ok(())
    }

    #[test]
    fn seeding_fills_an_empty_catalog_once() -> TestResult {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::default());
        let mut catalog = Catalog::open(store)?;

        seed_default_products(&mut catalog)?;

        assert_eq!(catalog.len(), 6);

        // A second seed must not duplicate anything.
        seed_default_products(&mut catalog)?;

        assert_eq!(catalog.len(), 6);

        Ok(())
    }

    #[test]
    fn seeding_skips_a_managed_catalog() -> TestResult {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::default());
        let mut catalog = Catalog::open(store)?;

        catalog.add(NewProduct {
            name: "Bakso".to_string(),
            price: 20_000,
            stock: 10,
            image: None,
        })?;

        seed_default_products(&mut catalog)?;

        assert_eq!(catalog.len(), 1);

        Ok(())
    }
}
