//! Tests for fact removal
//!
//! Covers `AtomSpace::remove` directly and the `retract` operation through
//! the interpreter, including removal of rules.

use atomspace::{parse, parse_multiple, Atom, AtomSpace, Interpreter};
use std::sync::Arc;

fn space_with(program: &str) -> Arc<AtomSpace> {
    let space = Arc::new(AtomSpace::new());
    space.add_range(parse_multiple(program).unwrap());
    space
}

fn atom(text: &str) -> Atom {
    parse(text).unwrap()
}

#[test]
fn test_remove_exact_fact() {
    let space = space_with("(foo bar)");
    assert!(space.matches_any(&atom("(foo bar)")));

    assert!(space.remove(&atom("(foo bar)")));

    assert!(!space.matches_any(&atom("(foo bar)")));
    assert!(space.is_empty());
}

#[test]
fn test_remove_nonexistent_fact() {
    let space = space_with("(foo bar)");
    assert!(!space.remove(&atom("(foo baz)")));
    assert!(!space.remove(&atom("(other bar)")));
    assert_eq!(space.count(), 1);
}

#[test]
fn test_remove_is_structural_not_pattern() {
    let space = space_with("(foo bar) (foo baz)");
    // A variable only removes an identical stored variable
    assert!(!space.remove(&atom("(foo $x)")));
    assert_eq!(space.count(), 2);
}

#[test]
fn test_remove_from_multiple_facts() {
    let space = space_with(
        r#"
        (parent Alice Bob)
        (parent Bob Carol)
        (parent Carol Dave)
        "#,
    );

    assert!(space.remove(&atom("(parent Bob Carol)")));

    let remaining: Vec<Atom> = space
        .query(&atom("(parent $x $y)"))
        .map(|(atom, _)| atom)
        .collect();
    assert_eq!(
        remaining,
        vec![atom("(parent Alice Bob)"), atom("(parent Carol Dave)")]
    );
}

#[test]
fn test_readd_after_remove() {
    let space = space_with("(foo bar)");
    space.remove(&atom("(foo bar)"));
    assert!(space.add(atom("(foo bar)")));
    assert_eq!(space.count(), 1);
}

#[test]
fn test_retract_via_interpreter() {
    let interp = Interpreter::new(space_with("(Human Socrates) (Human Plato)"));

    assert_eq!(
        interp.evaluate(&atom("(retract (Human Plato))")),
        vec![Atom::unit()]
    );
    assert_eq!(
        interp.evaluate(&atom("(Human $x)")),
        vec![atom("(Human Socrates)")]
    );

    // Already gone: nothing to report
    assert!(interp.evaluate(&atom("(retract (Human Plato))")).is_empty());
}

#[test]
fn test_retracting_a_rule_stops_derivation() {
    let interp = Interpreter::new(space_with(
        r#"
        (Human Socrates)
        (implies (Human $x) (Mortal $x))
        "#,
    ));
    assert!(interp.succeeds(&atom("(Mortal Socrates)")));

    interp.evaluate(&atom("(retract (implies (Human $x) (Mortal $x)))"));

    assert!(!interp.succeeds(&atom("(Mortal Socrates)")));
    assert_eq!(interp.space().count(), 1);
}

#[test]
fn test_retract_premise_stops_derivation() {
    let interp = Interpreter::new(space_with(
        r#"
        (Human Socrates)
        (implies (Human $x) (Mortal $x))
        "#,
    ));
    interp.evaluate(&atom("(retract (Human Socrates))"));
    assert!(!interp.succeeds(&atom("(Mortal Socrates)")));
}
