//! Logical operations.
//!
//! Provides the logical connectives over evaluation results:
//! - `AndOp` - Conjunction with sequential binding threading (and)
//! - `OrOp` - Disjunction as result concatenation (or)
//! - `NotOp` - Negation as failure (not)

use tracing::trace;

use super::{expect_args, truth_with, AtomSpace, EvalFn, GroundedOperation, GroundedResult};
use crate::backend::models::{Atom, Substitution};

/// Conjunction: (and goal ...)
///
/// Goals are evaluated left to right. Before a goal is evaluated, the
/// bindings accumulated from the goals before it are applied to it, so
/// `(and (Human $x) (Greek $x))` only checks `Greek` for the humans found.
/// Every binding thread that survives all goals yields the conjunction
/// instantiated with its composed substitution.
pub struct AndOp;

impl GroundedOperation for AndOp {
    fn name(&self) -> &str {
        "and"
    }

    fn execute(&self, args: &[Atom], _space: &AtomSpace, eval_fn: &EvalFn<'_>) -> GroundedResult {
        if args.is_empty() {
            return Ok(truth_with(Substitution::new()));
        }

        let mut threads = vec![Substitution::new()];
        for goal in args {
            let mut next = Vec::new();
            for acc in &threads {
                let instantiated = acc.apply(goal);
                for (_, subst) in eval_fn(&instantiated) {
                    next.push(acc.compose(&subst));
                }
            }
            trace!(target: "atomspace::grounded::and", %goal, threads = next.len());
            if next.is_empty() {
                return Ok(vec![]);
            }
            threads = next;
        }

        let conjunction = Atom::Expression(
            std::iter::once(Atom::Symbol("and".to_string()))
                .chain(args.iter().cloned())
                .collect(),
        );
        Ok(threads
            .into_iter()
            .map(|subst| (subst.apply(&conjunction), subst))
            .collect())
    }
}

/// Disjunction: (or goal ...)
pub struct OrOp;

impl GroundedOperation for OrOp {
    fn name(&self) -> &str {
        "or"
    }

    fn execute(&self, args: &[Atom], _space: &AtomSpace, eval_fn: &EvalFn<'_>) -> GroundedResult {
        Ok(args.iter().flat_map(|goal| eval_fn(goal)).collect())
    }
}

/// Negation as failure: (not goal)
pub struct NotOp;

impl GroundedOperation for NotOp {
    fn name(&self) -> &str {
        "not"
    }

    fn execute(&self, args: &[Atom], _space: &AtomSpace, eval_fn: &EvalFn<'_>) -> GroundedResult {
        let [goal] = expect_args::<1>(self.name(), args)?;
        if eval_fn(goal).is_empty() {
            Ok(truth_with(Substitution::new()))
        } else {
            Ok(vec![])
        }
    }
}
