//! Key-value storage for the PrintEase storefront.
//!
//! The storefront keeps its state the way a browser keeps `localStorage`:
//! string values under well-known keys. This crate provides the [`Store`]
//! port plus two backends:
//!
//! - [`MemoryStore`]: process-local map, used by tests and embedders
//! - [`FileStore`]: one JSON file per key under a directory
//!
//! # Example
//!
//! ```rust
//! use printease_store::{MemoryStore, Store, StoreExt};
//!
//! let mut store = MemoryStore::new();
//! store.set_json("printease_cart", &vec!["sticker"]).unwrap();
//!
//! let items: Option<Vec<String>> = store.get_json("printease_cart").unwrap();
//! assert_eq!(items, Some(vec!["sticker".to_string()]));
//! ```

mod error;
mod file;
mod kv;
mod memory;

pub use error::StoreError;
pub use file::FileStore;
pub use kv::{Store, StoreExt};
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FileStore, MemoryStore, Store, StoreError, StoreExt};
}
