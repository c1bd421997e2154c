//! Client-side key-value persistence for the session (token and identifiers).
//!
//! Stores are passed in explicitly: [`memory::MemoryStore`] keeps entries in memory and
//! [`file::FileStore`] persists them as JSON.

pub mod error;
pub mod file;
pub mod memory;
pub mod session;

use crate::store::error::StoreError;

/// A string-to-string store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}
