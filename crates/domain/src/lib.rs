//! Domain layer for the product inventory page.
//!
//! This crate provides:
//! - Product records and the append-only per-session product list
//! - Field-by-field validation of the add-product form
//! - The submission flow that either stores a product and redirects,
//!   or hands the form back with errors
//! - An inventory service running those operations against a session store

pub mod error;
pub mod product;
pub mod service;
pub mod session;
pub mod submission;
pub mod validation;

pub use error::DomainError;
pub use product::{Category, NewProduct, Price, Product, ProductId, ProductStore};
pub use service::InventoryService;
pub use session::{PageSnapshot, Session};
pub use submission::{FormState, Outcome, PRODUCT_ADDED, SubmissionHandler};
pub use validation::{
    CategoryPolicy, ErrorSet, Field, RawProductForm, SubmittedInput, Validator, validate,
};
