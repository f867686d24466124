//! Rule matching for forward chaining.
//!
//! Stored `(implies body head)` atoms are found through the `implies` bucket
//! of the space. Each rule's variables are renamed apart before its head is
//! unified with the query, so a rule written with `$x` never captures a `$x`
//! in the query. Renamed variables read `$x;N`, a name the parser cannot
//! produce, so no query variable can collide with one either.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::trace;

use super::{Chaining, Interpreter};
use crate::backend::models::{Atom, BoundResults, Rule};
use crate::backend::space::IndexKey;
use crate::backend::unify::unify;

static RULE_INSTANCE_COUNTER: AtomicU64 = AtomicU64::new(0);

impl Interpreter {
    /// Derive answers to `query` from every stored rule whose head unifies
    ///
    /// Rule bodies are evaluated with chaining disabled: a conclusion derived
    /// here never feeds another rule in the same evaluation.
    pub(super) fn forward_chain(&self, query: &Atom) -> BoundResults {
        let mut results = Vec::new();

        for stored in self
            .space
            .atoms_with_key(&IndexKey::Head("implies".to_string()))
        {
            let Some(rule) = Rule::from_atom(&stored) else {
                continue;
            };
            let rule = rename_apart(&rule);
            let Some(head_subst) = unify(&rule.head, query) else {
                continue;
            };

            let body = head_subst.apply(&rule.body);
            trace!(target: "atomspace::eval::forward_chain", %query, rule = %stored, %body);

            for (_, body_subst) in self.eval_step(&body, Chaining::Disabled) {
                let combined = head_subst.compose(&body_subst);
                results.push((combined.apply(query), combined));
            }
        }

        results
    }
}

/// Fresh copy of a rule whose variables cannot clash with any other atom
pub(crate) fn rename_apart(rule: &Rule) -> Rule {
    let id = RULE_INSTANCE_COUNTER.fetch_add(1, Ordering::Relaxed);
    Rule::new(
        rename_variables(&rule.body, id),
        rename_variables(&rule.head, id),
    )
}

/// Separator of renamed variables; the lexer ends a name at `;`, so no
/// parsed variable can contain it
const RENAME_SEPARATOR: char = ';';

/// Replace every `$name` with `$name;id`
fn rename_variables(atom: &Atom, id: u64) -> Atom {
    match atom {
        Atom::Variable(name) => Atom::Variable(format!("{}{}{}", name, RENAME_SEPARATOR, id)),
        Atom::Symbol(_) => atom.clone(),
        Atom::Expression(items) => {
            Atom::Expression(items.iter().map(|item| rename_variables(item, id)).collect())
        }
    }
}
