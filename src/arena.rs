//! Node arena for overflow chains.
//!
//! Chained entries live in one contiguous `Vec` owned by the store and are
//! addressed by 32-bit [`NodeRef`]s instead of per-node boxes:
//! - no per-allocation overhead
//! - neighbouring overflow nodes share cache lines
//! - a link costs 4 bytes (`Option<NodeRef>` uses the zero niche)
//!
//! Nodes cannot be freed individually; the whole arena is dropped at once.

use std::num::NonZeroU32;

/// A 32-bit reference to a node in a [`NodeArena`].
///
/// Stored as `index + 1` so that `Option<NodeRef>` stays 4 bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct NodeRef(NonZeroU32);

impl NodeRef {
    /// Create a reference from an arena index.
    ///
    /// # Panics
    /// Panics if the index is not addressable with 32 bits.
    pub fn from_usize(index: usize) -> Self {
        let raw = u32::try_from(index)
            .ok()
            .and_then(|i| i.checked_add(1))
            .and_then(NonZeroU32::new);
        match raw {
            Some(raw) => Self(raw),
            None => panic!("overflow node index {index} is not u32 addressable"),
        }
    }

    /// Get the arena index.
    #[inline]
    pub fn as_usize(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

/// Append-only storage for chain nodes.
#[derive(Clone, Debug)]
pub struct NodeArena<T> {
    nodes: Vec<T>,
}

impl<T> NodeArena<T> {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Move a node into the arena and return its reference.
    pub fn alloc(&mut self, node: T) -> NodeRef {
        let r = NodeRef::from_usize(self.nodes.len());
        self.nodes.push(node);
        r
    }

    #[inline]
    pub fn get(&self, r: NodeRef) -> &T {
        &self.nodes[r.as_usize()]
    }

    #[inline]
    pub fn get_mut(&mut self, r: NodeRef) -> &mut T {
        &mut self.nodes[r.as_usize()]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }
}

impl<T> Default for NodeArena<T> {
    fn default() -> Self {
        Self::new()
    }
}
