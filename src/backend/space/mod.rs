//! AtomSpace: the indexed, concurrent store of atoms.
//!
//! The space is a *set* of atoms partitioned into buckets by index key. An
//! expression whose first child is a symbol is filed under that symbol; every
//! other atom lands in the catch-all bucket. Since atoms never mutate, an atom
//! stays in the bucket it was filed under for its whole lifetime. A `Head`
//! bucket is dropped once its last atom is removed; the catch-all bucket
//! always exists.
//!
//! # Architecture
//!
//! - `fact_storage` - add, remove, membership, counting
//! - `pattern_matching` - indexed queries yielding `(atom, substitution)` pairs
//!
//! # Thread Safety
//!
//! Buckets live in a `DashMap`, so each bucket is guarded by its shard's lock
//! and `add`/`remove`/`contains`/`query` are individually atomic. Queries copy
//! a bucket while holding the shard lock and unify after releasing it. There
//! is no transaction spanning several calls: a query racing with an add may or
//! may not see the new atom.

mod fact_storage;
mod pattern_matching;

pub use pattern_matching::QueryIter;

use std::collections::HashSet;
use std::sync::atomic::AtomicUsize;

use dashmap::DashMap;
use parking_lot::RwLock;

use super::models::Atom;

/// Bucket key of an atom
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndexKey {
    /// Expressions headed by this symbol
    Head(String),
    /// Everything else: symbols, variables, empty and variable-headed expressions
    CatchAll,
}

impl IndexKey {
    pub fn of(atom: &Atom) -> IndexKey {
        match atom.head_symbol() {
            Some(head) => IndexKey::Head(head.to_string()),
            None => IndexKey::CatchAll,
        }
    }
}

/// Atoms of one index key, in insertion order
#[derive(Debug, Default)]
pub(crate) struct Bucket {
    pub(crate) atoms: Vec<Atom>,
    pub(crate) members: HashSet<Atom>,
}

impl Bucket {
    /// Insert if absent; returns whether the atom was new
    pub(crate) fn insert(&mut self, atom: Atom) -> bool {
        if self.members.contains(&atom) {
            return false;
        }
        self.members.insert(atom.clone());
        self.atoms.push(atom);
        true
    }

    /// Remove preserving the order of the remaining atoms
    pub(crate) fn remove(&mut self, atom: &Atom) -> bool {
        if !self.members.remove(atom) {
            return false;
        }
        if let Some(pos) = self.atoms.iter().position(|a| a == atom) {
            self.atoms.remove(pos);
        }
        true
    }
}

pub struct AtomSpace {
    /// Index key -> bucket
    pub(crate) buckets: DashMap<IndexKey, Bucket>,

    /// Bucket keys in creation order; the catch-all bucket is always first.
    /// Buckets are created and dropped only under this lock.
    pub(crate) bucket_order: RwLock<Vec<IndexKey>>,

    /// Total atom count across all buckets
    pub(crate) len: AtomicUsize,
}

impl AtomSpace {
    pub fn new() -> Self {
        let buckets = DashMap::new();
        buckets.insert(IndexKey::CatchAll, Bucket::default());
        AtomSpace {
            buckets,
            bucket_order: RwLock::new(vec![IndexKey::CatchAll]),
            len: AtomicUsize::new(0),
        }
    }

    /// Create a space holding the given atoms
    pub fn from_atoms(atoms: impl IntoIterator<Item = Atom>) -> Self {
        let space = Self::new();
        space.add_range(atoms);
        space
    }
}

impl Default for AtomSpace {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AtomSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AtomSpace")
            .field("count", &self.count())
            .field("buckets", &self.bucket_order.read().len())
            .finish()
    }
}
