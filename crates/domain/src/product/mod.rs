//! Product records and the per-session product list.

mod store;
mod value_objects;

pub use store::ProductStore;
pub use value_objects::{Category, Price, ProductId};

use serde::{Deserialize, Serialize};

/// A product that has passed validation but has not been assigned an ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub category: Category,
}

/// A product in the inventory. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub category: Category,
}

impl Product {
    /// Assigns an ID to a validated product.
    pub fn from_new(id: ProductId, new: NewProduct) -> Self {
        Self {
            id,
            name: new.name,
            description: new.description,
            price: new.price,
            category: new.category,
        }
    }
}
