//! Comparison operations.

use super::{expect_args, truth_with, AtomSpace, EvalFn, GroundedOperation, GroundedResult};
use crate::backend::models::Atom;
use crate::backend::unify::unify;

/// Unification test: (equal a b)
///
/// Arguments are compared as written, not evaluated. Succeeds with the
/// unifier when the two atoms unify; never touches the space.
pub struct EqualOp;

impl GroundedOperation for EqualOp {
    fn name(&self) -> &str {
        "equal"
    }

    fn execute(&self, args: &[Atom], _space: &AtomSpace, _eval_fn: &EvalFn<'_>) -> GroundedResult {
        let [a, b] = expect_args::<2>(self.name(), args)?;
        Ok(unify(a, b).map(truth_with).unwrap_or_default())
    }
}
