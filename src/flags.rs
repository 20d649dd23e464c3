//! Persisted session flags behind a key-value capability.
//!
//! The store is injected at construction so game logic can be exercised
//! without a browser. Values are JSON under a single fixed key; anything
//! unreadable falls back to defaults, since promotional state is never worth
//! an error.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::consts::{FLAGS_KEY, SLOT_START_CREDITS};

/// Minimal persistent key-value surface (LocalStorage-shaped).
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store for tests and the native binary.
#[derive(Debug, Default)]
pub struct MemoryStore {
    map: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.map.insert(key.to_string(), value.to_string());
    }
}

// Shared handles count too; lets one backing store serve several sessions.
impl<S: KvStore> KvStore for Rc<RefCell<S>> {
    fn get(&self, key: &str) -> Option<String> {
        self.borrow().get(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        self.borrow_mut().set(key, value);
    }
}

/// The handful of values that survive a page reload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionFlags {
    /// Slot machine credits remaining.
    pub credits: u32,
    /// The slot promotion has already paid out.
    pub promo_claimed: bool,
}

impl Default for SessionFlags {
    fn default() -> Self {
        Self {
            credits: SLOT_START_CREDITS,
            promo_claimed: false,
        }
    }
}

impl SessionFlags {
    /// Read flags from the store; a missing or unreadable value yields
    /// defaults.
    pub fn load(store: &dyn KvStore) -> Self {
        match store.get(FLAGS_KEY) {
            Some(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                log::warn!("unreadable session flags, using defaults: {e}");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    pub fn save(&self, store: &mut dyn KvStore) {
        match serde_json::to_string(self) {
            Ok(json) => store.set(FLAGS_KEY, &json),
            Err(e) => log::warn!("failed to serialize session flags: {e}"),
        }
    }
}
