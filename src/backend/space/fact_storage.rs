//! Fact storage operations for AtomSpace.
//!
//! Provides methods for adding, removing, and checking atoms. All of them
//! use structural equality; adding an atom that is already present is a no-op.

use std::sync::atomic::Ordering;

use tracing::trace;

use super::{AtomSpace, Bucket, IndexKey};
use crate::backend::models::Atom;

impl AtomSpace {
    /// Add an atom; returns whether it was newly inserted
    pub fn add(&self, atom: Atom) -> bool {
        trace!(target: "atomspace::space::add", %atom);
        let key = IndexKey::of(&atom);

        let inserted = match self.buckets.get_mut(&key) {
            Some(mut bucket) => bucket.insert(atom),
            None => self.add_to_new_bucket(key, atom),
        };
        if inserted {
            self.len.fetch_add(1, Ordering::AcqRel);
        }
        inserted
    }

    /// Slow path of `add`: buckets are created and dropped only while the
    /// order lock is held, so `bucket_order` always matches the map
    fn add_to_new_bucket(&self, key: IndexKey, atom: Atom) -> bool {
        let mut order = self.bucket_order.write();
        let mut created = false;
        let inserted = self
            .buckets
            .entry(key.clone())
            .or_insert_with(|| {
                created = true;
                Bucket::default()
            })
            .insert(atom);
        if created {
            order.push(key);
        }
        inserted
    }

    /// Add every atom; each insertion is independent (no all-or-nothing)
    pub fn add_range(&self, atoms: impl IntoIterator<Item = Atom>) -> usize {
        let mut added = 0;
        for atom in atoms {
            if self.add(atom) {
                added += 1;
            }
        }
        added
    }

    /// Remove an atom; returns whether it was present
    ///
    /// A `Head` bucket left empty is dropped from the index, so the index
    /// only holds heads that currently have atoms.
    pub fn remove(&self, atom: &Atom) -> bool {
        trace!(target: "atomspace::space::remove", %atom);
        let key = IndexKey::of(atom);
        let (removed, now_empty) = match self.buckets.get_mut(&key) {
            Some(mut bucket) => {
                let removed = bucket.remove(atom);
                (removed, bucket.atoms.is_empty())
            }
            None => (false, false),
        };
        if removed {
            self.len.fetch_sub(1, Ordering::AcqRel);
        }
        if removed && now_empty && key != IndexKey::CatchAll {
            self.drop_bucket_if_empty(&key);
        }
        removed
    }

    /// An add may have refilled the bucket since it emptied; check again
    /// under the lock
    fn drop_bucket_if_empty(&self, key: &IndexKey) {
        let mut order = self.bucket_order.write();
        if self
            .buckets
            .remove_if(key, |_, bucket| bucket.atoms.is_empty())
            .is_some()
        {
            order.retain(|k| k != key);
        }
    }

    /// Structural-equality membership test
    pub fn contains(&self, atom: &Atom) -> bool {
        self.buckets
            .get(&IndexKey::of(atom))
            .is_some_and(|bucket| bucket.members.contains(atom))
    }

    /// Current total atom count across all buckets
    pub fn count(&self) -> usize {
        self.len.load(Ordering::Acquire)
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Every stored atom: buckets in creation order, atoms in insertion order
    pub fn all(&self) -> std::vec::IntoIter<Atom> {
        self.snapshot_all().into_iter()
    }

    /// Atoms filed under `key`, in insertion order
    pub fn atoms_with_key(&self, key: &IndexKey) -> Vec<Atom> {
        self.snapshot(key)
    }

    /// Copy one bucket while holding its shard lock
    pub(crate) fn snapshot(&self, key: &IndexKey) -> Vec<Atom> {
        self.buckets
            .get(key)
            .map(|bucket| bucket.atoms.clone())
            .unwrap_or_default()
    }

    /// Copy every bucket, catch-all first
    pub(crate) fn snapshot_all(&self) -> Vec<Atom> {
        let order = self.bucket_order.read().clone();
        let mut atoms = Vec::with_capacity(self.count());
        for key in &order {
            if let Some(bucket) = self.buckets.get(key) {
                atoms.extend(bucket.atoms.iter().cloned());
            }
        }
        atoms
    }
}
