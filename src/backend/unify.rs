//! Structural unification with occurs check.
//!
//! `unify` computes the most general substitution making two atoms equal.
//! Expression children are unified left to right, threading the accumulated
//! substitution, so bindings made by earlier children are visible to later
//! ones. Failure (including an occurs-check rejection) is `None`, never a panic.

use std::borrow::Cow;

use tracing::trace;

use super::models::{Atom, Substitution};

/// Unify two atoms starting from an empty substitution
pub fn unify(a: &Atom, b: &Atom) -> Option<Substitution> {
    unify_with(a, b, Substitution::new())
}

/// Unify two atoms on top of an existing substitution
pub fn unify_with(a: &Atom, b: &Atom, subst: Substitution) -> Option<Substitution> {
    let result = unify_impl(a, b, subst);
    trace!(target: "atomspace::unify", %a, %b, matched = result.is_some());
    result
}

/// `unify(a, b).is_some()`
pub fn can_unify(a: &Atom, b: &Atom) -> bool {
    unify(a, b).is_some()
}

/// Unify `pattern` against each candidate independently
///
/// Every candidate starts from a fresh empty substitution; matches are yielded
/// in candidate order.
pub fn unify_all<'a, I>(pattern: &'a Atom, atoms: I) -> impl Iterator<Item = (&'a Atom, Substitution)>
where
    I: IntoIterator<Item = &'a Atom>,
    I::IntoIter: 'a,
{
    atoms
        .into_iter()
        .filter_map(move |atom| unify(pattern, atom).map(|s| (atom, s)))
}

/// Replace a variable bound in `subst` with its value
fn dereference<'a>(atom: &'a Atom, subst: &Substitution) -> Cow<'a, Atom> {
    match atom {
        Atom::Variable(name) => match subst.lookup(name) {
            Some(value) => Cow::Owned(value.clone()),
            None => Cow::Borrowed(atom),
        },
        _ => Cow::Borrowed(atom),
    }
}

fn unify_impl(a: &Atom, b: &Atom, subst: Substitution) -> Option<Substitution> {
    let a = dereference(a, &subst);
    let b = dereference(b, &subst);

    match (a.as_ref(), b.as_ref()) {
        (Atom::Variable(x), Atom::Variable(y)) if x == y => Some(subst),
        (Atom::Variable(x), other) | (other, Atom::Variable(x)) => bind_variable(x, other, subst),
        (Atom::Symbol(p), Atom::Symbol(q)) => (p == q).then_some(subst),
        (Atom::Expression(xs), Atom::Expression(ys)) => {
            if xs.len() != ys.len() {
                return None;
            }
            xs.iter()
                .zip(ys.iter())
                .try_fold(subst, |acc, (x, y)| unify_impl(x, y, acc))
        }
        _ => None,
    }
}

fn bind_variable(name: &str, term: &Atom, subst: Substitution) -> Option<Substitution> {
    let term = subst.apply_cow(term);
    if term.contains_variable(name) {
        trace!(target: "atomspace::unify::occurs_check", name, term = %term);
        return None;
    }
    subst.bind(name, &term)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::models::{expr, sym, var};

    #[test]
    fn test_reflexivity_on_ground_atoms() {
        let atom = expr([sym("Human"), expr([sym("name"), sym("Socrates")])]);
        assert_eq!(unify(&atom, &atom), Some(Substitution::new()));
    }

    #[test]
    fn test_variable_binding() {
        let s = unify(&var("x"), &sym("Socrates")).unwrap();
        assert_eq!(s.lookup("x"), Some(&sym("Socrates")));
        assert_eq!(s.apply(&var("x")), sym("Socrates"));
    }

    #[test]
    fn test_binding_is_symmetric() {
        let s = unify(&sym("Socrates"), &var("x")).unwrap();
        assert_eq!(s.lookup("x"), Some(&sym("Socrates")));
    }

    #[test]
    fn test_same_variable_needs_no_binding() {
        assert_eq!(unify(&var("x"), &var("x")), Some(Substitution::new()));
    }

    #[test]
    fn test_occurs_check() {
        assert_eq!(unify(&var("x"), &expr([sym("f"), var("x")])), None);
        assert_eq!(unify(&expr([sym("f"), var("x")]), &var("x")), None);
    }

    #[test]
    fn test_indirect_occurs_check() {
        // x = y, then y = (f x) would make x infinite
        let a = expr([var("x"), var("y")]);
        let b = expr([var("y"), expr([sym("f"), var("x")])]);
        assert_eq!(unify(&a, &b), None);
    }

    #[test]
    fn test_arity_mismatch() {
        let a = expr([sym("a"), sym("b")]);
        let b = expr([sym("a"), sym("b"), sym("c")]);
        assert_eq!(unify(&a, &b), None);
    }

    #[test]
    fn test_symbol_mismatch() {
        assert_eq!(unify(&sym("a"), &sym("b")), None);
        assert_eq!(unify(&sym("a"), &expr([sym("a")])), None);
    }

    #[test]
    fn test_left_to_right_threading() {
        // The binding of x from the first child constrains the second
        let pattern = expr([sym("pair"), var("x"), var("x")]);
        assert!(unify(&pattern, &expr([sym("pair"), sym("a"), sym("a")])).is_some());
        assert_eq!(unify(&pattern, &expr([sym("pair"), sym("a"), sym("b")])), None);
    }

    #[test]
    fn test_bindings_on_both_sides() {
        let a = expr([sym("edge"), var("x"), sym("b")]);
        let b = expr([sym("edge"), sym("a"), var("y")]);
        let s = unify(&a, &b).unwrap();
        assert_eq!(s.apply(&a), s.apply(&b));
        assert_eq!(s.lookup("x"), Some(&sym("a")));
        assert_eq!(s.lookup("y"), Some(&sym("b")));
    }

    #[test]
    fn test_chained_variables_resolve_fully() {
        let a = expr([var("x"), var("y"), var("z")]);
        let b = expr([var("y"), var("z"), sym("end")]);
        let s = unify(&a, &b).unwrap();
        assert_eq!(s.apply(&var("x")), sym("end"));
        assert_eq!(s.apply(&a), s.apply(&b));
    }

    #[test]
    fn test_empty_expressions_unify() {
        assert_eq!(unify(&expr([]), &expr([])), Some(Substitution::new()));
    }

    #[test]
    fn test_unify_all_is_independent_per_candidate() {
        let pattern = expr([sym("Human"), var("x")]);
        let atoms = vec![
            expr([sym("Human"), sym("Socrates")]),
            expr([sym("Dog"), sym("Fido")]),
            expr([sym("Human"), sym("Plato")]),
        ];
        let matches: Vec<_> = unify_all(&pattern, &atoms).collect();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].1.lookup("x"), Some(&sym("Socrates")));
        assert_eq!(matches[1].1.lookup("x"), Some(&sym("Plato")));
    }
}
