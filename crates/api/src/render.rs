//! HTML rendering of the inventory page.
//!
//! The page template is compiled into the binary. Its name ends in
//! `.html`, which turns on minijinja's HTML auto-escaping for every
//! interpolated value.

use std::collections::BTreeMap;

use domain::{Category, Field, FormState, Product};
use minijinja::Environment;
use serde::Serialize;

const PAGE_TEMPLATE: &str = "inventory.html";

/// One row of the product table.
#[derive(Debug, Serialize)]
struct ProductRow<'a> {
    id: u64,
    name: &'a str,
    description: &'a str,
    price: String,
    category: &'a str,
}

impl<'a> From<&'a Product> for ProductRow<'a> {
    fn from(product: &'a Product) -> Self {
        Self {
            id: product.id.value(),
            name: &product.name,
            description: &product.description,
            price: product.price.to_string(),
            category: product.category.as_str(),
        }
    }
}

#[derive(Debug, Serialize)]
struct PageContext<'a> {
    action: &'a str,
    flash: Option<&'a str>,
    error_summary: Option<String>,
    errors: BTreeMap<&'static str, &'static str>,
    submitted: BTreeMap<&'static str, &'a str>,
    products: Vec<ProductRow<'a>>,
    categories: &'static [&'static str],
}

/// Renders the inventory page.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    /// Loads the page template.
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(PAGE_TEMPLATE, include_str!("../templates/inventory.html"))?;
        Ok(Self { env })
    }

    /// Renders the product list, an optional flash message and the form.
    ///
    /// `action` is the URL the form posts to.
    pub fn render_page(
        &self,
        action: &str,
        products: &[Product],
        flash: Option<&str>,
        form: &FormState,
    ) -> Result<String, minijinja::Error> {
        let context = PageContext {
            action,
            flash,
            error_summary: error_summary(form.errors.len()),
            errors: form
                .errors
                .iter()
                .map(|(field, message)| (field.as_str(), message))
                .collect(),
            submitted: Field::ALL
                .iter()
                .map(|field| (field.as_str(), form.submitted.value(*field)))
                .collect(),
            products: products.iter().map(ProductRow::from).collect(),
            categories: &Category::OPTIONS,
        };

        self.env.get_template(PAGE_TEMPLATE)?.render(context)
    }
}

/// Banner text shown above the page when the form has errors.
pub fn error_summary(count: usize) -> Option<String> {
    match count {
        0 => None,
        1 => Some("There is 1 error in the form. Please fix them below.".to_string()),
        n => Some(format!(
            "There are {n} errors in the form. Please fix them below."
        )),
    }
}
