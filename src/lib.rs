//! # chainmap
//!
//! A fixed-capacity hash table with per-bucket overflow chains.
//!
//! The bucket array is allocated once and never resized, so lookups never
//! pay for rehashing. Keys are written once: a second `put` of an existing
//! key is ignored and the first value wins.
//!
//! ## Example
//!
//! ```rust
//! use chainmap::FixedCapacityHashStore;
//! use std::num::NonZeroUsize;
//!
//! let capacity = NonZeroUsize::new(1024).unwrap();
//! let mut store: FixedCapacityHashStore<f64> = FixedCapacityHashStore::new(capacity);
//! store.put("hello", 1.0);
//! store.put("world", 2.0);
//! assert!(!store.put("hello", 3.0));
//!
//! assert_eq!(store.get("hello"), Ok(&1.0));
//! assert_eq!(store.get("world"), Ok(&2.0));
//! assert!(store.get("missing").is_err());
//! ```

#![deny(unsafe_op_in_unsafe_fn)]

mod arena;
mod err;

pub use err::StoreError;

use std::collections::hash_map::DefaultHasher;
use std::hash::{BuildHasher, BuildHasherDefault};
use std::num::NonZeroUsize;

use arena::{NodeArena, NodeRef};

/// Deterministic hasher: SipHash with fixed keys, so bucket placement is the
/// same on every run.
pub type DefaultHashBuilder = BuildHasherDefault<DefaultHasher>;

// =============================================================================
// Entries
// =============================================================================

#[derive(Clone, Debug)]
struct Entry<V> {
    key: Box<str>,
    value: V,
    next: Option<NodeRef>,
}

impl<V> Entry<V> {
    fn new(key: &str, value: V) -> Self {
        Self {
            key: key.into(),
            value,
            next: None,
        }
    }
}

/// Where a new overflow node gets linked in.
#[derive(Clone, Copy)]
enum Link {
    Root,
    Node(NodeRef),
}

enum Probe {
    Vacant,
    Present,
    Tail(Link),
}

// =============================================================================
// Stats
// =============================================================================

/// Shape of the bucket chains, for judging hash spread.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChainStats {
    /// Root slots holding an entry
    pub occupied_slots: usize,
    /// Entries stored outside the root array
    pub overflow_nodes: usize,
    /// Entries in the longest chain (root included)
    pub longest_chain: usize,
    /// Mean entries per occupied root slot
    pub mean_chain_len: f64,
}

// =============================================================================
// FixedCapacityHashStore
// =============================================================================

/// A write-once hash table with a fixed number of buckets.
///
/// Each bucket is a root slot embedded in the bucket array; collisions are
/// appended to a chain whose nodes live in a store-owned arena. All memory is
/// released together when the store is dropped.
pub struct FixedCapacityHashStore<V, S = DefaultHashBuilder> {
    slots: Box<[Option<Entry<V>>]>,
    overflow: NodeArena<Entry<V>>,
    hasher: S,
    count: usize,
    key_bytes: usize,
}

impl<V> FixedCapacityHashStore<V> {
    /// Create a store with `capacity` empty root slots and the default hasher.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self::with_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl<V, S: BuildHasher> FixedCapacityHashStore<V, S> {
    /// Create a store with `capacity` empty root slots hashing keys with `hasher`.
    pub fn with_hasher(capacity: NonZeroUsize, hasher: S) -> Self {
        let slots = std::iter::repeat_with(|| None)
            .take(capacity.get())
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Self {
            slots,
            overflow: NodeArena::new(),
            hasher,
            count: 0,
            key_bytes: 0,
        }
    }

    #[inline]
    fn bucket_index(&self, key: &str) -> usize {
        (self.hasher.hash_one(key) % self.slots.len() as u64) as usize
    }

    fn probe(&self, index: usize, key: &str) -> Probe {
        let Some(root) = &self.slots[index] else {
            return Probe::Vacant;
        };
        if &*root.key == key {
            return Probe::Present;
        }
        let mut tail = Link::Root;
        let mut next = root.next;
        while let Some(node) = next {
            let entry = self.overflow.get(node);
            if &*entry.key == key {
                return Probe::Present;
            }
            tail = Link::Node(node);
            next = entry.next;
        }
        Probe::Tail(tail)
    }

    /// Insert `key` unless it is already present.
    ///
    /// Returns `true` if the key was added. An existing key keeps its
    /// original value and the call returns `false`.
    pub fn put(&mut self, key: &str, value: V) -> bool {
        let index = self.bucket_index(key);
        let tail = match self.probe(index, key) {
            Probe::Vacant => {
                self.slots[index] = Some(Entry::new(key, value));
                self.count += 1;
                self.key_bytes += key.len();
                return true;
            }
            Probe::Present => return false,
            Probe::Tail(tail) => tail,
        };

        let node = self.overflow.alloc(Entry::new(key, value));
        match tail {
            Link::Root => {
                let Some(root) = &mut self.slots[index] else {
                    unreachable!("probe returned a tail for an empty root slot");
                };
                root.next = Some(node);
            }
            Link::Node(prev) => self.overflow.get_mut(prev).next = Some(node),
        }
        self.count += 1;
        self.key_bytes += key.len();
        true
    }

    fn find(&self, key: &str) -> Option<&V> {
        let mut entry = self.slots[self.bucket_index(key)].as_ref()?;
        loop {
            if &*entry.key == key {
                return Some(&entry.value);
            }
            entry = self.overflow.get(entry.next?);
        }
    }

    /// Look up the value stored for `key`.
    pub fn get(&self, key: &str) -> Result<&V, StoreError> {
        self.find(key).ok_or_else(|| StoreError::KeyNotFound {
            key: key.to_owned(),
        })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.find(key).is_some()
    }
}

impl<V, S> FixedCapacityHashStore<V, S> {
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of root slots. Fixed at creation.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn chain(&self, index: usize) -> Chain<'_, V> {
        Chain {
            overflow: &self.overflow,
            entry: self.slots[index].as_ref(),
        }
    }

    /// Iterate over all entries in bucket order, each chain root first.
    pub fn iter(&self) -> Iter<'_, V, S> {
        Iter {
            store: self,
            index: 0,
            chain: None,
        }
    }

    pub fn chain_stats(&self) -> ChainStats {
        let mut stats = ChainStats {
            overflow_nodes: self.overflow.len(),
            ..ChainStats::default()
        };
        for index in 0..self.slots.len() {
            let len = self.chain(index).count();
            if len > 0 {
                stats.occupied_slots += 1;
                stats.longest_chain = stats.longest_chain.max(len);
            }
        }
        if stats.occupied_slots > 0 {
            stats.mean_chain_len = self.count as f64 / stats.occupied_slots as f64;
        }
        stats
    }

    /// Approximate heap bytes held by the store.
    pub fn memory_usage(&self) -> usize {
        self.slots.len() * std::mem::size_of::<Option<Entry<V>>>()
            + self.overflow.capacity() * std::mem::size_of::<Entry<V>>()
            + self.key_bytes
    }
}

impl<V, S> std::fmt::Debug for FixedCapacityHashStore<V, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixedCapacityHashStore")
            .field("capacity", &self.capacity())
            .field("len", &self.count)
            .field("overflow_nodes", &self.overflow.len())
            .finish()
    }
}

struct Chain<'a, V> {
    overflow: &'a NodeArena<Entry<V>>,
    entry: Option<&'a Entry<V>>,
}

impl<'a, V> Iterator for Chain<'a, V> {
    type Item = &'a Entry<V>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.entry?;
        let overflow = self.overflow;
        self.entry = entry.next.map(|r| overflow.get(r));
        Some(entry)
    }
}

/// Iterator over `(key, value)` pairs of a [`FixedCapacityHashStore`].
pub struct Iter<'a, V, S> {
    store: &'a FixedCapacityHashStore<V, S>,
    index: usize,
    chain: Option<Chain<'a, V>>,
}

impl<'a, V, S> Iterator for Iter<'a, V, S> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain.as_mut().and_then(Chain::next) {
                return Some((&*entry.key, &entry.value));
            }
            let store = self.store;
            if self.index >= store.slots.len() {
                return None;
            }
            self.chain = Some(store.chain(self.index));
            self.index += 1;
        }
    }
}


#[cfg(test)]
mod proptests;
