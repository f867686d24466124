//! Pattern matching operations for AtomSpace.
//!
//! Provides indexed queries that unify a pattern against stored atoms.

use tracing::trace;

use super::{AtomSpace, IndexKey};
use crate::backend::models::{Atom, Substitution};
use crate::backend::unify::unify;

impl AtomSpace {
    /// Match a pattern against the stored atoms
    ///
    /// A symbol-headed expression pattern only scans its own bucket. Any other
    /// pattern (bare symbol, variable, variable-headed or empty expression)
    /// scans every bucket, catch-all first.
    ///
    /// The candidates are copied when `query` is called; unification happens
    /// lazily as the iterator is consumed. Each call is an independent pass.
    pub fn query(&self, pattern: &Atom) -> QueryIter {
        let candidates = match pattern.head_symbol() {
            Some(head) => self.snapshot(&IndexKey::Head(head.to_string())),
            None => self.snapshot_all(),
        };
        trace!(
            target: "atomspace::space::query",
            %pattern,
            candidates = candidates.len()
        );
        QueryIter {
            pattern: pattern.clone(),
            candidates: candidates.into_iter(),
        }
    }

    /// Check whether any stored atom unifies with `pattern`
    pub fn matches_any(&self, pattern: &Atom) -> bool {
        self.query(pattern).next().is_some()
    }
}

/// Lazy sequence of `(atom, substitution)` matches for one query
///
/// A clone continues from the same position over the same snapshot; call
/// `AtomSpace::query` again for a fresh pass.
#[derive(Debug, Clone)]
pub struct QueryIter {
    pattern: Atom,
    candidates: std::vec::IntoIter<Atom>,
}

impl QueryIter {
    pub fn pattern(&self) -> &Atom {
        &self.pattern
    }
}

impl Iterator for QueryIter {
    type Item = (Atom, Substitution);

    fn next(&mut self) -> Option<Self::Item> {
        for candidate in self.candidates.by_ref() {
            if let Some(subst) = unify(&self.pattern, &candidate) {
                return Some((candidate, subst));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.candidates.len()))
    }
}
