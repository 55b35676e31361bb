// Copyright 2025 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=vantage_store --heading-base-level=0

//! Vantage Store: private page-lifetime state for the other Vantage crates.
//!
//! - [`KeyedStore`] maps arbitrary serializable keys to values.
//!   Keys are canonicalized, so structurally-equal keys address the same entry.
//! - [`KeyGenerator`] hands out fixed-length random identifiers that never repeat
//!   for the lifetime of the generator. Issued keys are tracked in a [`KeyedStore`].
//! - [`inspect`] holds the small value predicates used for input validation.
//!
//! Nothing here evicts: entries live until they are deleted or the store is dropped.
//!
//! # Example
//!
//! ```rust
//! use vantage_store::{KeyGenerator, KeyedStore};
//! use serde_json::json;
//!
//! let mut store: KeyedStore<&str> = KeyedStore::new();
//! store.set(&json!({ "route": "/feed", "page": 2 }), "cached").unwrap();
//!
//! // A different value with the same structure finds the same entry.
//! assert_eq!(store.get(&json!({ "page": 2, "route": "/feed" })), Some(&"cached"));
//! assert!(store.delete(&json!({ "route": "/feed", "page": 2 })));
//! assert!(store.is_empty());
//!
//! let mut keys = KeyGenerator::new();
//! let a = keys.generate();
//! let b = keys.generate();
//! assert_eq!(a.chars().count(), 15);
//! assert_ne!(a, b);
//! ```

mod cache;
pub mod inspect;
mod keygen;

pub use cache::{CacheKey, KEY_PREFIX, KeyedStore, StoreError};
pub use keygen::{ALPHABET, KEY_LEN, KeyGenerator};
