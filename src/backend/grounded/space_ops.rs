//! Operations that read or mutate the AtomSpace.
//!
//! - `MatchOp` - Query the space (match)
//! - `AssertOp` - Add an atom (assert)
//! - `RetractOp` - Remove an atom (retract)
//!
//! `assert` and `retract` yield the unit marker `()` on success. The marker
//! signals that the side effect happened; it is not a derived fact.

use tracing::debug;

use super::{expect_args, AtomSpace, EvalFn, ExecError, GroundedOperation, GroundedResult};
use crate::backend::models::{Atom, Substitution};

/// Space query: (match pattern) or (match pattern template)
pub struct MatchOp;

impl GroundedOperation for MatchOp {
    fn name(&self) -> &str {
        "match"
    }

    fn execute(&self, args: &[Atom], space: &AtomSpace, _eval_fn: &EvalFn<'_>) -> GroundedResult {
        match args {
            [pattern] => Ok(space.query(pattern).collect()),
            [pattern, template] => Ok(space
                .query(pattern)
                .map(|(_, subst)| (subst.apply(template), subst))
                .collect()),
            _ => Err(ExecError::IncorrectArgument(format!(
                "match requires 1 or 2 arguments, got {}",
                args.len()
            ))),
        }
    }
}

/// Add an atom to the space: (assert atom)
pub struct AssertOp;

impl GroundedOperation for AssertOp {
    fn name(&self) -> &str {
        "assert"
    }

    fn execute(&self, args: &[Atom], space: &AtomSpace, _eval_fn: &EvalFn<'_>) -> GroundedResult {
        let [atom] = expect_args::<1>(self.name(), args)?;
        let added = space.add(atom.clone());
        debug!(target: "atomspace::grounded::assert", %atom, added);
        Ok(vec![(Atom::unit(), Substitution::new())])
    }
}

/// Remove an atom from the space: (retract atom)
pub struct RetractOp;

impl GroundedOperation for RetractOp {
    fn name(&self) -> &str {
        "retract"
    }

    fn execute(&self, args: &[Atom], space: &AtomSpace, _eval_fn: &EvalFn<'_>) -> GroundedResult {
        let [atom] = expect_args::<1>(self.name(), args)?;
        let removed = space.remove(atom);
        debug!(target: "atomspace::grounded::retract", %atom, removed);
        if removed {
            Ok(vec![(Atom::unit(), Substitution::new())])
        } else {
            Ok(vec![])
        }
    }
}
