// Copyright 2025 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyed store with value-canonical keys.
//!
//! ## Canonical keys
//!
//! A key is first converted to a [`serde_json::Value`] and then rendered as compact JSON.
//! Object members are ordered by name in that rendering, so two maps with the same
//! entries produce the same [`CacheKey`] regardless of insertion order.
//! Structurally-equal keys intentionally address the same entry; callers key by value.
//!
//! Keys that have no JSON form (for example a map with non-string keys) are rejected
//! with [`StoreError::Key`] on write and are never found on read.

use std::collections::HashMap;

use serde::Serialize;

/// Prefix carried by every canonical key.
pub const KEY_PREFIX: &str = "front_cache_";

/// Errors produced by [`KeyedStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The key could not be serialized into its canonical form.
    #[error("cache key has no canonical form: {0}")]
    Key(#[source] serde_json::Error),
}

/// Canonical form of a store key.
///
/// Build one with [`CacheKey::new`] for arbitrary keys, or [`CacheKey::from_name`]
/// for plain string names (which cannot fail). Precomputed keys skip the
/// serialization step on every access.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Canonicalize any serializable value.
    pub fn new<K: Serialize + ?Sized>(key: &K) -> Result<Self, StoreError> {
        let value = serde_json::to_value(key).map_err(StoreError::Key)?;
        Ok(Self::from_value(&value))
    }

    /// Canonicalize a string name.
    pub fn from_name(name: &str) -> Self {
        Self::from_value(&serde_json::Value::String(name.to_owned()))
    }

    fn from_value(value: &serde_json::Value) -> Self {
        let mut out = String::from(KEY_PREFIX);
        out.push_str(&value.to_string());
        Self(out)
    }

    /// The canonical string, including [`KEY_PREFIX`].
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Map from canonicalized keys to values.
///
/// There is no eviction, TTL, or capacity bound.
pub struct KeyedStore<V> {
    entries: HashMap<CacheKey, V>,
}

impl<V> core::fmt::Debug for KeyedStore<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KeyedStore")
            .field("len", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl<V> Default for KeyedStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> KeyedStore<V> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn set<K: Serialize + ?Sized>(&mut self, key: &K, value: V) -> Result<(), StoreError> {
        let key = CacheKey::new(key)?;
        self.set_key(key, value);
        Ok(())
    }

    /// Look up the value stored under `key`.
    pub fn get<K: Serialize + ?Sized>(&self, key: &K) -> Option<&V> {
        self.get_key(&CacheKey::new(key).ok()?)
    }

    /// Mutable variant of [`KeyedStore::get`].
    pub fn get_mut<K: Serialize + ?Sized>(&mut self, key: &K) -> Option<&mut V> {
        let key = CacheKey::new(key).ok()?;
        self.get_key_mut(&key)
    }

    /// Remove the entry under `key`. Returns true if one existed.
    pub fn delete<K: Serialize + ?Sized>(&mut self, key: &K) -> bool {
        CacheKey::new(key).is_ok_and(|key| self.delete_key(&key).is_some())
    }

    /// True if an entry exists under `key`.
    pub fn contains<K: Serialize + ?Sized>(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Store under a precomputed key. Returns the replaced value, if any.
    pub fn set_key(&mut self, key: CacheKey, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    /// Look up a precomputed key.
    pub fn get_key(&self, key: &CacheKey) -> Option<&V> {
        self.entries.get(key)
    }

    /// Mutable lookup of a precomputed key.
    pub fn get_key_mut(&mut self, key: &CacheKey) -> Option<&mut V> {
        self.entries.get_mut(key)
    }

    /// Look up a precomputed key, inserting `default()` first if it is vacant.
    pub fn get_key_or_insert_with(
        &mut self,
        key: CacheKey,
        default: impl FnOnce() -> V,
    ) -> &mut V {
        self.entries.entry(key).or_insert_with(default)
    }

    /// Remove and return the value under a precomputed key.
    pub fn delete_key(&mut self, key: &CacheKey) -> Option<V> {
        self.entries.remove(key)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
