// Copyright 2025 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collision-free random key generation.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cache::{CacheKey, KeyedStore};

/// Length, in characters, of every generated key.
pub const KEY_LEN: usize = 15;

/// Symbols a generated key is drawn from.
pub const ALPHABET: &[u8; 72] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*()";

/// Random identifier source that never repeats a key.
///
/// Every issued key is recorded in a set held in a private [`KeyedStore`] slot, and
/// [`generate`](Self::generate) draws again until it finds one not in that set.
/// The set grows for the lifetime of the generator.
///
/// The random source is pluggable: [`KeyGenerator::new`] seeds from OS entropy, while
/// [`KeyGenerator::with_rng`] accepts any [`Rng`] (use a seeded one for reproducible tests).
pub struct KeyGenerator<R = StdRng> {
    rng: R,
    store: KeyedStore<HashSet<String>>,
    slot: CacheKey,
}

impl<R> core::fmt::Debug for KeyGenerator<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KeyGenerator")
            .field("slot", &self.slot)
            .field("issued", &self.issued_count())
            .finish_non_exhaustive()
    }
}

impl KeyGenerator<StdRng> {
    /// Create a generator seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Default for KeyGenerator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> KeyGenerator<R> {
    /// True if `key` was issued (or reserved) by this generator.
    pub fn is_issued(&self, key: &str) -> bool {
        self.store
            .get_key(&self.slot)
            .is_some_and(|issued| issued.contains(key))
    }

    /// Number of keys issued or reserved so far.
    pub fn issued_count(&self) -> usize {
        self.store.get_key(&self.slot).map_or(0, HashSet::len)
    }

    /// Mark `key` as taken so it is never returned by [`generate`](Self::generate).
    ///
    /// Returns false if it was already taken.
    pub fn reserve(&mut self, key: &str) -> bool {
        self.issued_mut().insert(key.to_owned())
    }

    fn issued_mut(&mut self) -> &mut HashSet<String> {
        self.store.get_key_or_insert_with(self.slot.clone(), HashSet::new)
    }
}

impl<R: Rng> KeyGenerator<R> {
    /// Create a generator drawing from `rng`.
    pub fn with_rng(mut rng: R) -> Self {
        let slot = CacheKey::from_name(&format!("generated_keys_{}", draw(&mut rng)));
        let mut store = KeyedStore::new();
        store.set_key(slot.clone(), HashSet::new());
        Self { rng, store, slot }
    }

    /// Produce a [`KEY_LEN`]-character key that this generator has never issued.
    pub fn generate(&mut self) -> String {
        loop {
            let candidate = draw(&mut self.rng);
            if self.is_issued(&candidate) {
                tracing::trace!(
                    target: "vantage.store",
                    key = %candidate,
                    "generated key collided; drawing again"
                );
                continue;
            }
            self.issued_mut().insert(candidate.clone());
            return candidate;
        }
    }
}

fn draw<R: Rng>(rng: &mut R) -> String {
    (0..KEY_LEN)
        .map(|_| char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]))
        .collect()
}
