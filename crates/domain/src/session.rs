//! Per-user session state.

use crate::product::{Product, ProductStore};

/// Everything the application keeps for one user between requests.
///
/// A fresh session starts with the seeded product list and no flash.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    products: ProductStore,
    flash: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session around an existing product list.
    pub fn with_products(products: ProductStore) -> Self {
        Self {
            products,
            flash: None,
        }
    }

    pub fn products(&self) -> &ProductStore {
        &self.products
    }

    pub fn products_mut(&mut self) -> &mut ProductStore {
        &mut self.products
    }

    /// Leaves a message for the next page view, replacing any pending one.
    pub fn set_flash(&mut self, message: impl Into<String>) {
        self.flash = Some(message.into());
    }

    /// Returns the pending flash message without consuming it.
    pub fn peek_flash(&self) -> Option<&str> {
        self.flash.as_deref()
    }

    /// Returns the pending flash message and clears it.
    pub fn take_flash(&mut self) -> Option<String> {
        self.flash.take()
    }

    /// Consumes the flash and copies out the product list for rendering.
    pub fn take_page(&mut self) -> PageSnapshot {
        PageSnapshot {
            flash: self.take_flash(),
            products: self.products.products().to_vec(),
        }
    }
}

/// What a page view needs from the session, taken in one step.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSnapshot {
    pub flash: Option<String>,
    pub products: Vec<Product>,
}
