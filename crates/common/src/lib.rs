//! Shared types for the product inventory service.

pub mod types;

pub use types::SessionId;
