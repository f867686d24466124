//! Immutable variable substitutions
//!
//! Bindings live in a `SmallVec` so the common case (a handful of variables
//! per query) stays on the stack. Every operation that changes a substitution
//! returns a new one; the receiver is never mutated.
//!
//! Bindings are kept normalized: no bound value mentions a bound variable, so
//! a single lookup resolves a variable completely and `apply` never needs to
//! re-resolve its output.

use super::Atom;
use itertools::Itertools;
use smallvec::SmallVec;
use std::borrow::Cow;
use std::fmt;

#[derive(Debug, Clone, Default)]
pub struct Substitution {
    bindings: SmallVec<[(String, Atom); 4]>,
}

impl Substitution {
    /// Create an empty substitution
    #[inline]
    pub fn new() -> Self {
        Substitution {
            bindings: SmallVec::new(),
        }
    }

    /// Get the value bound to a variable
    #[inline]
    pub fn lookup(&self, name: &str) -> Option<&Atom> {
        self.bindings
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Iterate over `(variable, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Atom)> {
        self.bindings.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Substitute bound variables in `atom`
    pub fn apply(&self, atom: &Atom) -> Atom {
        self.apply_cow(atom).into_owned()
    }

    /// Substitute bound variables, borrowing when nothing changes
    pub fn apply_cow<'a>(&self, atom: &'a Atom) -> Cow<'a, Atom> {
        if self.bindings.is_empty() {
            return Cow::Borrowed(atom);
        }
        match atom {
            Atom::Variable(name) => match self.lookup(name) {
                Some(value) => Cow::Owned(value.clone()),
                None => Cow::Borrowed(atom),
            },
            Atom::Symbol(_) => Cow::Borrowed(atom),
            Atom::Expression(items) => {
                let mut needs_copy = false;
                let mut results: Vec<Cow<'a, Atom>> = Vec::with_capacity(items.len());
                for item in items {
                    let result = self.apply_cow(item);
                    if matches!(result, Cow::Owned(_)) {
                        needs_copy = true;
                    }
                    results.push(result);
                }
                if needs_copy {
                    Cow::Owned(Atom::Expression(
                        results.into_iter().map(Cow::into_owned).collect(),
                    ))
                } else {
                    Cow::Borrowed(atom)
                }
            }
        }
    }

    /// Extend with `name -> value`, keeping the bindings normalized
    ///
    /// Returns `None` when the binding is circular (the resolved value
    /// mentions `name`) or when `name` is already bound to a different value.
    pub fn bind(&self, name: &str, value: &Atom) -> Option<Substitution> {
        let value = self.apply(value);
        if let Some(existing) = self.lookup(name) {
            return (existing == &value).then(|| self.clone());
        }
        if let Atom::Variable(v) = &value {
            if v == name {
                return Some(self.clone());
            }
        }
        if value.contains_variable(name) {
            return None;
        }

        let single = Substitution {
            bindings: smallvec::smallvec![(name.to_string(), value)],
        };
        let mut bindings: SmallVec<[(String, Atom); 4]> = self
            .bindings
            .iter()
            .map(|(n, v)| (n.clone(), single.apply(v)))
            .collect();
        bindings.extend(single.bindings);
        Some(Substitution { bindings })
    }

    /// `self` applied first, `other` after
    ///
    /// Holds `s1.compose(&s2).apply(a) == s2.apply(&s1.apply(a))` for every atom.
    pub fn compose(&self, other: &Substitution) -> Substitution {
        let mut bindings: SmallVec<[(String, Atom); 4]> = SmallVec::new();
        for (name, value) in &self.bindings {
            let value = other.apply(value);
            // x -> $x is the identity; keeping it would be a circular binding
            if !matches!(&value, Atom::Variable(v) if v == name) {
                bindings.push((name.clone(), value));
            }
        }
        for (name, value) in &other.bindings {
            if !self.contains(name) {
                bindings.push((name.clone(), value.clone()));
            }
        }
        Substitution { bindings }
    }

    /// Keep only the bindings of the given variables
    pub fn restrict(&self, names: &[String]) -> Substitution {
        Substitution {
            bindings: self
                .bindings
                .iter()
                .filter(|(n, _)| names.contains(n))
                .cloned()
                .collect(),
        }
    }
}

/// Insertion order is irrelevant: two substitutions are equal when they bind
/// the same variables to the same values.
impl PartialEq for Substitution {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .bindings
                .iter()
                .all(|(n, v)| other.lookup(n) == Some(v))
    }
}

impl Eq for Substitution {}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.bindings
                .iter()
                .map(|(n, v)| format!("${} -> {}", n, v))
                .join(", ")
        )
    }
}
