//! Traits for grounded operations.
//!
//! Defines the `GroundedOperation` trait every built-in implements, plus
//! `FnOperation`, which adapts a plain closure to the trait.

use std::fmt;

use super::{AtomSpace, BoundResults, GroundedResult};
use crate::backend::models::Atom;

/// Function type for evaluating atoms
///
/// Handed to grounded operations so they can evaluate their arguments when
/// needed. Each result is paired with the substitution (restricted to the
/// evaluated atom's variables) that produced it.
pub type EvalFn<'a> = dyn Fn(&Atom) -> BoundResults + 'a;

/// A named host-code operation callable from an atom expression.
///
/// Operations receive RAW (unevaluated) arguments and evaluate them through
/// `eval_fn` only when they need to.
///
/// # Implementing a Grounded Operation
///
/// ```ignore
/// struct SameOp;
///
/// impl GroundedOperation for SameOp {
///     fn name(&self) -> &str { "same" }
///
///     fn execute(
///         &self,
///         args: &[Atom],
///         _space: &AtomSpace,
///         _eval_fn: &EvalFn<'_>,
///     ) -> GroundedResult {
///         let [a, b] = expect_args::<2>(self.name(), args)?;
///         if a == b {
///             Ok(vec![(Atom::truth(), Substitution::new())])
///         } else {
///             Ok(vec![])
///         }
///     }
/// }
/// ```
pub trait GroundedOperation: Send + Sync {
    /// The name of this operation (e.g., "and", "match")
    fn name(&self) -> &str;

    /// Execute the operation with unevaluated arguments.
    ///
    /// # Arguments
    /// * `args` - The expression's children after the head symbol
    /// * `space` - The space the interpreter is evaluating against
    /// * `eval_fn` - Function to evaluate sub-expressions when needed
    ///
    /// # Returns
    /// * `Ok(results)` - Zero or more `(atom, substitution)` pairs; empty means failure
    /// * `Err(...)` - Fault during execution (bad arity, host-code error)
    fn execute(&self, args: &[Atom], space: &AtomSpace, eval_fn: &EvalFn<'_>) -> GroundedResult;
}

/// Grounded operation backed by a closure
pub struct FnOperation<F> {
    name: String,
    func: F,
}

impl<F> FnOperation<F>
where
    F: Fn(&[Atom], &AtomSpace, &EvalFn<'_>) -> GroundedResult + Send + Sync,
{
    pub fn new(name: impl Into<String>, func: F) -> Self {
        FnOperation {
            name: name.into(),
            func,
        }
    }
}

impl<F> GroundedOperation for FnOperation<F>
where
    F: Fn(&[Atom], &AtomSpace, &EvalFn<'_>) -> GroundedResult + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&self, args: &[Atom], space: &AtomSpace, eval_fn: &EvalFn<'_>) -> GroundedResult {
        (self.func)(args, space, eval_fn)
    }
}

impl<F> fmt::Debug for FnOperation<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnOperation").field("name", &self.name).finish()
    }
}
