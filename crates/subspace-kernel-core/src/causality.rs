//! Causality tracking: independent logical counters keyed by scope.
//!
//! Each subspace carries one `SubspaceKeys` tracker, mutated exclusively by
//! whatever process accepts operations into that subspace. Counters are
//! independent per-key scalars, not a merged vector clock: no ordering is
//! defined across different key ids.
//!
//! The mutation contract assumes sequential, non-overlapping updates.
//! Callers that share a tracker across threads must serialize access
//! themselves (single writer per subspace, or a lock around mutations).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A causality key: an identifier scoping one Lamport-style counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CausalityKey {
    /// Causality key identifier.
    pub key: u32,
    /// Lamport clock value.
    pub counter: u64,
}

impl CausalityKey {
    /// Create a new causality key.
    pub fn new(key: u32, counter: u64) -> Self {
        Self { key, counter }
    }
}

/// Per-subspace causality tracker: a map of independent counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubspaceKeys {
    subspace_id: u32,
    keys: HashMap<u32, CausalityKey>,
}

impl SubspaceKeys {
    /// Create a tracker for a subspace with an empty key map.
    pub fn new(subspace_id: u32) -> Self {
        Self {
            subspace_id,
            keys: HashMap::new(),
        }
    }

    /// The subspace this tracker belongs to.
    pub fn subspace_id(&self) -> u32 {
        self.subspace_id
    }

    /// Insert a causality key, unconditionally overwriting any existing
    /// entry for that key id.
    ///
    /// There is no max-merge: a stale write can regress a counter.
    pub fn add_key(&mut self, key: CausalityKey) {
        self.keys.insert(key.key, key);
    }

    /// Look up the causality key for a key id.
    pub fn get_key(&self, key_id: u32) -> Option<&CausalityKey> {
        self.keys.get(&key_id)
    }

    /// Set the counter for a key id, only if the key already exists.
    ///
    /// An absent key id is a silent no-op: counters are never created here.
    pub fn update_counter(&mut self, key_id: u32, counter: u64) {
        if let Some(key) = self.keys.get_mut(&key_id) {
            key.counter = counter;
        }
    }

    /// Number of tracked keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the tracker has no keys yet.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_causality_key() {
        let key = CausalityKey::new(30300, 1);
        assert_eq!(key.key, 30300);
        assert_eq!(key.counter, 1);
    }

    #[test]
    fn add_and_get() {
        let mut keys = SubspaceKeys::new(7);
        assert_eq!(keys.subspace_id(), 7);
        assert!(keys.is_empty());

        keys.add_key(CausalityKey::new(30300, 5));
        assert_eq!(keys.get_key(30300), Some(&CausalityKey::new(30300, 5)));
        assert_eq!(keys.get_key(30301), None);
        assert_eq!(keys.len(), 1);
    }

    #[test]
    fn add_key_overwrites_not_max_merges() {
        let mut keys = SubspaceKeys::new(1);
        keys.add_key(CausalityKey::new(30300, 10));
        keys.add_key(CausalityKey::new(30300, 3));
        // Second write wins even though the counter went backwards.
        assert_eq!(keys.get_key(30300).unwrap().counter, 3);
        assert_eq!(keys.len(), 1);
    }

    #[test]
    fn update_counter_on_absent_key_is_a_noop() {
        let mut keys = SubspaceKeys::new(1);
        keys.update_counter(30300, 42);
        assert_eq!(keys.get_key(30300), None);
        assert!(keys.is_empty());
    }

    #[test]
    fn update_counter_on_existing_key() {
        let mut keys = SubspaceKeys::new(1);
        keys.add_key(CausalityKey::new(30300, 1));
        keys.update_counter(30300, 9);
        assert_eq!(keys.get_key(30300).unwrap().counter, 9);
    }
}
