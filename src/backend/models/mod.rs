pub mod atom;
pub mod substitution;

pub use atom::{expr, sym, var, Atom};
pub use substitution::Substitution;

/// Result of evaluation with bindings: each derived atom paired with the
/// substitution that produced it
pub type BoundResults = Vec<(Atom, Substitution)>;

/// An implication rule stored as `(implies body head)`
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub body: Atom,
    pub head: Atom,
}

impl Rule {
    /// Create a new rule from its body (premise) and head (conclusion)
    pub fn new(body: Atom, head: Atom) -> Self {
        Rule { body, head }
    }

    /// Read a rule back from its stored form; `None` for any other atom
    pub fn from_atom(atom: &Atom) -> Option<Self> {
        match atom.children() {
            Some([Atom::Symbol(op), body, head]) if op == "implies" => {
                Some(Rule::new(body.clone(), head.clone()))
            }
            _ => None,
        }
    }

    /// The stored form `(implies body head)`
    pub fn to_atom(&self) -> Atom {
        expr([sym("implies"), self.body.clone(), self.head.clone()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_round_trip() {
        let rule = Rule::new(
            expr([sym("Human"), var("x")]),
            expr([sym("Mortal"), var("x")]),
        );
        assert_eq!(Rule::from_atom(&rule.to_atom()), Some(rule));
    }

    #[test]
    fn test_non_rule_atoms() {
        assert_eq!(Rule::from_atom(&expr([sym("Human"), sym("Socrates")])), None);
        assert_eq!(Rule::from_atom(&expr([sym("implies"), sym("a")])), None);
        assert_eq!(Rule::from_atom(&sym("implies")), None);
    }
}
