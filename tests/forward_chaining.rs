//! End-to-end inference tests driven through the text syntax

use atomspace::config::EngineSection;
use atomspace::session::run_text;
use atomspace::{parse, parse_multiple, Atom, AtomSpace, Interpreter};
use std::sync::Arc;

fn interpreter(program: &str) -> Interpreter {
    let space = Arc::new(AtomSpace::new());
    space.add_range(parse_multiple(program).unwrap());
    Interpreter::new(space)
}

fn rendered(atoms: &[Atom]) -> Vec<String> {
    atoms.iter().map(|atom| atom.to_string()).collect()
}

fn eval(interp: &Interpreter, query: &str) -> Vec<String> {
    rendered(&interp.evaluate(&parse(query).unwrap()))
}

const TAXONOMY: &str = r#"
    ; a three-link chain
    (isa Fido Dog)
    (isa Dog Mammal)
    (isa Mammal Animal)
    (implies (and (isa $x $y) (isa $y $z)) (isa $x $z))
"#;

#[test]
fn test_socrates_is_mortal() {
    let interp = interpreter(
        r#"
        (Human Socrates)
        (implies (Human $x) (Mortal $x))
        "#,
    );
    assert_eq!(eval(&interp, "(Mortal Socrates)"), vec!["(Mortal Socrates)"]);
    assert!(eval(&interp, "(Mortal Plato)").is_empty());
    assert_eq!(eval(&interp, "(Mortal $who)"), vec!["(Mortal Socrates)"]);
}

#[test]
fn test_derived_results_come_before_stored_ones() {
    let interp = interpreter(TAXONOMY);
    assert_eq!(
        eval(&interp, "(isa Fido $what)"),
        vec!["(isa Fido Mammal)", "(isa Fido Dog)"]
    );
}

#[test]
fn test_open_query_over_taxonomy() {
    let interp = interpreter(TAXONOMY);
    assert_eq!(
        eval(&interp, "(isa $a $b)"),
        vec![
            "(isa Fido Mammal)",
            "(isa Dog Animal)",
            "(isa Fido Dog)",
            "(isa Dog Mammal)",
            "(isa Mammal Animal)",
        ]
    );
}

#[test]
fn test_chain_grows_one_hop_per_application() {
    let interp = interpreter(TAXONOMY);
    let rule = parse("(implies (and (isa $x $y) (isa $y $z)) (isa $x $z))").unwrap();

    assert!(!interp.succeeds(&parse("(isa Fido Animal)").unwrap()));

    let first = interp.apply_rule(&rule).unwrap();
    assert_eq!(rendered(&first), vec!["(isa Fido Mammal)", "(isa Dog Animal)"]);
    assert!(interp.succeeds(&parse("(isa Fido Animal)").unwrap()));

    let second = interp.apply_rule(&rule).unwrap();
    assert_eq!(rendered(&second), vec!["(isa Fido Animal)"]);

    assert!(interp.apply_rule(&rule).unwrap().is_empty());
}

#[test]
fn test_program_with_queries() {
    let interp = Interpreter::new(Arc::new(AtomSpace::new()));
    let program = r#"
        (parent Alice Bob)
        (parent Bob Carol)
        (implies (and (parent $x $y) (parent $y $z)) (grandparent $x $z))

        !(grandparent Alice $who)
        !(not (grandparent Bob $who))
        !(match (parent $p Carol) $p)
        !(assert (parent Carol Dave))
        !(grandparent Bob $who)
    "#;
    let output = run_text(&interp, program, &EngineSection::default()).unwrap();
    assert_eq!(
        output,
        vec![
            "[(grandparent Alice Carol)]",
            "[True]",
            "[Bob]",
            "[()]",
            "[(grandparent Bob Dave)]",
        ]
    );
}

#[test]
fn test_rule_variables_never_capture_query_variables() {
    let interp = interpreter(
        r#"
        (edge a b)
        (edge b c)
        (implies (edge $x $y) (linked $x $y))
        "#,
    );
    // Same names as the rule, swapped positions
    assert_eq!(
        eval(&interp, "(linked $y $x)"),
        vec!["(linked a b)", "(linked b c)"]
    );
}

#[test]
fn test_suffixed_query_variables_match_rule_conclusions() {
    let interp = interpreter(
        r#"
        (parent Bob Alice)
        (implies (parent $x $y) (child $y $x))
        "#,
    );
    assert_eq!(eval(&interp, "(child $q Bob)"), vec!["(child Alice Bob)"]);
    assert_eq!(eval(&interp, "(child $x_1 Bob)"), vec!["(child Alice Bob)"]);
    assert_eq!(eval(&interp, "(child $y_2 $x_1)"), vec!["(child Alice Bob)"]);
}

#[test]
fn test_equal_binds_without_evaluating() {
    let interp = interpreter("(Human Socrates)");
    let results = interp.evaluate_with_bindings(&parse("(equal (f $x) (f a))").unwrap());
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].0, Atom::truth());
    assert_eq!(
        results[0].1.lookup("x").map(|a| a.to_string()),
        Some("a".to_string())
    );

    // Arguments are compared as written
    assert!(eval(&interp, "(equal (Human Socrates) True)").is_empty());
}
