//! # Session Storage
//!
//! The tab-scoped key/value slot the cart is written to, and the JSON codec
//! for the value stored there.
//!
//! ## Storage Format
//! ```text
//! key:   "lamsa-cart"
//! value: [{"id":1,"name":"...","price":75,"img":"https://...","qty":2}, ...]
//! ```
//!
//! One key holds the whole cart. Every write replaces the previous value.

use std::collections::HashMap;

use crate::cart::CartState;
use crate::error::{CoreResult, StorageError};

// =============================================================================
// Storage Trait
// =============================================================================

/// A string key/value store living as long as the browsing tab.
///
/// Mirrors the browser's `sessionStorage`: reads never fail (a missing or
/// inaccessible key is `None`), writes may be rejected.
pub trait SessionStorage {
    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove_item(&mut self, key: &str);
}

// =============================================================================
// In-Memory Storage
// =============================================================================

/// In-memory [`SessionStorage`], optionally with a byte quota.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that rejects writes once keys plus values exceed `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        MemoryStorage {
            entries: HashMap::new(),
            quota_bytes: Some(bytes),
        }
    }

    /// Pre-populated storage, as when a tab is reloaded.
    pub fn with_item(key: &str, value: &str) -> Self {
        let mut storage = Self::new();
        storage.entries.insert(key.to_string(), value.to_string());
        storage
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(quota) = self.quota_bytes {
            let needed = self.used_bytes_without(key) + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    bytes: value.len(),
                });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

// =============================================================================
// Codec
// =============================================================================

/// Serializes the full cart to the storage JSON array.
pub fn encode_cart(cart: &CartState) -> CoreResult<String> {
    Ok(serde_json::to_string(cart)?)
}

/// Parses the storage JSON array.
///
/// Only the syntax is checked here; invariant repair happens when the
/// store restores the cart.
pub fn decode_cart(raw: &str) -> CoreResult<CartState> {
    Ok(serde_json::from_str(raw)?)
}
