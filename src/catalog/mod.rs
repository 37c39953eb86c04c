//! Catalog
//!
//! The catalog manager exclusively owns the product list and the `products`
//! store key. Every mutation updates the in-memory model first and then
//! flushes the whole snapshot, so readers never see partial state.

use std::sync::Arc;

use tracing::debug;

use crate::store::{self, PRODUCTS_KEY, Store};

pub mod errors;
pub mod models;

pub use errors::CatalogError;
pub use models::{NewProduct, Product, ProductId, ProductUpdate};

/// Manager for the product catalog.
#[derive(Clone)]
pub struct Catalog {
    store: Arc<dyn Store>,
    products: Vec<Product>,
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("products", &self.products)
            .finish_non_exhaustive()
    }
}

impl Catalog {
    /// Opens the catalog, loading the persisted snapshot if one exists.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the snapshot cannot be read or decoded.
    pub fn open(store: Arc<dyn Store>) -> Result<Self, CatalogError> {
        let products = store::load_json(store.as_ref(), PRODUCTS_KEY)?.unwrap_or_default();

        Ok(Self { store, products })
    }

    /// Current catalog in insertion order.
    #[must_use]
    pub fn list(&self) -> &[Product] {
        &self.products
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Live lookup by id; this is what the cart consults for stock checks.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Adds a product, assigning it a fresh id.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidName`]: the name was empty or blank.
    /// - [`CatalogError::Store`]: persisting the snapshot failed.
    pub fn add(&mut self, new: NewProduct) -> Result<Product, CatalogError> {
        validate_name(&new.name)?;

        let product = Product {
            id: ProductId::new(),
            name: new.name,
            price: new.price,
            stock: new.stock,
            image: new.image,
        };

        self.products.push(product.clone());
        self.persist()?;

        Ok(product)
    }

    /// Replaces all mutable fields of a product at once.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidName`]: the new name was empty or blank.
    /// - [`CatalogError::NotFound`]: no product with this id exists.
    /// - [`CatalogError::Store`]: persisting the snapshot failed.
    pub fn update(&mut self, id: ProductId, update: ProductUpdate) -> Result<Product, CatalogError> {
        validate_name(&update.name)?;

        let product = self
            .products
            .iter_mut()
            .find(|product| product.id == id)
            .ok_or(CatalogError::NotFound)?;

        product.name = update.name;
        product.price = update.price;
        product.stock = update.stock;
        product.image = update.image;

        let updated = product.clone();

        self.persist()?;

        Ok(updated)
    }

    /// Removes a product.
    ///
    /// Removal is strict: an unknown id is an error, not a no-op. Existing
    /// cart lines and recorded orders keep their snapshots untouched.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::NotFound`]: no product with this id exists.
    /// - [`CatalogError::Store`]: persisting the snapshot failed.
    pub fn remove(&mut self, id: ProductId) -> Result<(), CatalogError> {
        let index = self
            .products
            .iter()
            .position(|product| product.id == id)
            .ok_or(CatalogError::NotFound)?;

        self.products.remove(index);
        self.persist()
    }

    /// Applies a sale's stock deductions as one unit: every deduction is
    /// validated before any is applied, then the snapshot is persisted once.
    ///
    /// A product that disappeared since the cart was built counts as having
    /// zero available stock.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InsufficientStock`]: a deduction would underflow;
    ///   no stock level is changed.
    /// - [`CatalogError::Store`]: persisting the snapshot failed.
    pub fn deduct_stock(&mut self, deductions: &[(ProductId, u32)]) -> Result<(), CatalogError> {
        let mut updated = self.products.clone();

        for &(id, quantity) in deductions {
            let Some(product) = updated.iter_mut().find(|product| product.id == id) else {
                return Err(CatalogError::InsufficientStock {
                    product: id,
                    requested: quantity,
                    available: 0,
                });
            };

            let available = product.stock;

            product.stock =
                available
                    .checked_sub(quantity)
                    .ok_or(CatalogError::InsufficientStock {
                        product: id,
                        requested: quantity,
                        available,
                    })?;
        }

        self.products = updated;
        self.persist()
    }

    fn persist(&self) -> Result<(), CatalogError> {
        store::save_json(self.store.as_ref(), PRODUCTS_KEY, &self.products)?;

        debug!(products = self.products.len(), "persisted catalog snapshot");

        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), CatalogError> {
    if name.trim().is_empty() {
        return Err(CatalogError::InvalidName);
    }

    Ok(())
}
