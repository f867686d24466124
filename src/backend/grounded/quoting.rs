//! Operations that return their arguments without evaluating them.

use super::{expect_args, AtomSpace, EvalFn, GroundedOperation, GroundedResult};
use crate::backend::models::{expr, sym, Atom, Substitution};

/// Suppress evaluation: (quote atom)
pub struct QuoteOp;

impl GroundedOperation for QuoteOp {
    fn name(&self) -> &str {
        "quote"
    }

    fn execute(&self, args: &[Atom], _space: &AtomSpace, _eval_fn: &EvalFn<'_>) -> GroundedResult {
        let [atom] = expect_args::<1>(self.name(), args)?;
        Ok(vec![(atom.clone(), Substitution::new())])
    }
}

/// Implication rule: (implies body head)
///
/// Inert when evaluated directly; it yields the rule atom unchanged. Rules
/// take effect when stored in the space, where forward chaining finds them.
pub struct ImpliesOp;

impl GroundedOperation for ImpliesOp {
    fn name(&self) -> &str {
        "implies"
    }

    fn execute(&self, args: &[Atom], _space: &AtomSpace, _eval_fn: &EvalFn<'_>) -> GroundedResult {
        let [body, head] = expect_args::<2>(self.name(), args)?;
        let rule = expr([sym("implies"), body.clone(), head.clone()]);
        Ok(vec![(rule, Substitution::new())])
    }
}
