use itertools::Itertools;
use std::fmt;

/// Represents an atom as an s-expression
///
/// Atoms are immutable values compared structurally: two atoms are equal when
/// they have the same shape and names, never by identity. Equality and hashing
/// are both derived, so equal atoms always hash equally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Atom {
    /// An opaque constant
    Symbol(String),
    /// A placeholder used only for unification (name stored without the `$` sigil)
    Variable(String),
    /// An s-expression (ordered list of atoms)
    Expression(Vec<Atom>),
}

/// Create a symbol atom
pub fn sym(name: impl Into<String>) -> Atom {
    Atom::Symbol(name.into())
}

/// Create a variable atom; `var("x")` renders as `$x`
pub fn var(name: impl Into<String>) -> Atom {
    Atom::Variable(name.into())
}

/// Create an expression atom from its children
pub fn expr(children: impl IntoIterator<Item = Atom>) -> Atom {
    Atom::Expression(children.into_iter().collect())
}

impl Atom {
    /// The symbol yielded by predicates that succeed (`equal`, `not`)
    pub fn truth() -> Atom {
        sym("True")
    }

    /// The empty expression `()`, yielded by side-effecting operations
    pub fn unit() -> Atom {
        Atom::Expression(Vec::new())
    }

    pub fn is_symbol(&self) -> bool {
        matches!(self, Atom::Symbol(_))
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Atom::Variable(_))
    }

    pub fn is_expression(&self) -> bool {
        matches!(self, Atom::Expression(_))
    }

    /// Children of an expression, `None` for symbols and variables
    pub fn children(&self) -> Option<&[Atom]> {
        match self {
            Atom::Expression(items) => Some(items),
            _ => None,
        }
    }

    /// Number of children of an expression (0 for symbols and variables)
    pub fn arity(&self) -> usize {
        self.children().map_or(0, <[Atom]>::len)
    }

    /// Extract the head symbol used for indexing
    ///
    /// Only an expression whose first child is a symbol has a head; bare
    /// symbols, variables, empty expressions and variable-headed expressions
    /// return `None`.
    pub fn head_symbol(&self) -> Option<&str> {
        match self {
            Atom::Expression(items) => match items.first() {
                Some(Atom::Symbol(head)) => Some(head.as_str()),
                _ => None,
            },
            _ => None,
        }
    }

    /// True if any descendant (including the atom itself) is a variable
    pub fn contains_variables(&self) -> bool {
        match self {
            Atom::Symbol(_) => false,
            Atom::Variable(_) => true,
            Atom::Expression(items) => items.iter().any(Atom::contains_variables),
        }
    }

    /// True if the variable `name` occurs anywhere in this atom (the occurs check)
    pub fn contains_variable(&self, name: &str) -> bool {
        match self {
            Atom::Symbol(_) => false,
            Atom::Variable(v) => v == name,
            Atom::Expression(items) => items.iter().any(|item| item.contains_variable(name)),
        }
    }

    /// Variable names in first-occurrence order, without duplicates
    pub fn variables(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.collect_variables(&mut names);
        names
    }

    fn collect_variables(&self, names: &mut Vec<String>) {
        match self {
            Atom::Symbol(_) => {}
            Atom::Variable(v) => {
                if !names.iter().any(|n| n == v) {
                    names.push(v.clone());
                }
            }
            Atom::Expression(items) => {
                for item in items {
                    item.collect_variables(names);
                }
            }
        }
    }

    /// Canonical textual form, readable back by `sexpr::parse`
    pub fn to_sexpr(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Symbol(name) => write!(f, "{}", name),
            Atom::Variable(name) => write!(f, "${}", name),
            Atom::Expression(items) => write!(f, "({})", items.iter().join(" ")),
        }
    }
}

impl From<&str> for Atom {
    fn from(name: &str) -> Self {
        sym(name)
    }
}
