//! Session state storage.
//!
//! A session store maps a [`SessionId`] to one value of application state.
//! State is created lazily from `Default` on first access and every
//! mutation runs inside [`SessionStore::update`], which serializes
//! read-modify-write cycles on the store.

pub mod error;
pub mod memory;
pub mod store;

pub use common::SessionId;
pub use error::{Result, SessionStoreError};
pub use memory::InMemorySessionStore;
pub use store::{SessionStore, StoreOptions};
