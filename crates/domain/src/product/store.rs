use super::{Category, NewProduct, Price, Product, ProductId};

/// Ordered, append-only list of products belonging to one session.
///
/// IDs are derived from the list length at insertion time. That is only
/// unique because nothing is ever removed.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductStore {
    products: Vec<Product>,
}

impl ProductStore {
    /// Creates a store without the seed products.
    pub fn empty() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    /// Creates a store holding the two products every new session starts with.
    pub fn seeded() -> Self {
        let mut store = Self::empty();
        store.append(seed(
            "Laptop",
            "15\" display, 8GB RAM, 512GB SSD",
            899.99,
            "Electronics",
        ));
        store.append(seed(
            "Coffee Maker",
            "Automatic drip maker with timer",
            49.99,
            "Home Appliances",
        ));
        store
    }

    /// Returns the products in insertion order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// The ID the next appended product will receive.
    pub fn next_id(&self) -> ProductId {
        ProductId::new(self.products.len() as u64 + 1)
    }

    /// Appends a product and returns it with its assigned ID.
    pub fn append(&mut self, new: NewProduct) -> &Product {
        let product = Product::from_new(self.next_id(), new);
        self.products.push(product);
        &self.products[self.products.len() - 1]
    }
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::seeded()
    }
}

fn seed(name: &str, description: &str, price: f64, category: &str) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        description: description.to_string(),
        price: Price::seed(price),
        category: Category::new(category),
    }
}
