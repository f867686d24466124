//! Grounded operations for lazy evaluation.
//!
//! This module provides the `GroundedOperation` trait, the registry that maps
//! head symbols to operations, and the built-in operations. Built-ins receive
//! their arguments unevaluated and decide themselves when to evaluate them.
//!
//! # Built-ins
//!
//! | name      | arity | result                                                   |
//! |-----------|-------|----------------------------------------------------------|
//! | `equal`   | 2     | `True` with the unifier, if the arguments unify          |
//! | `not`     | 1     | `True` if the argument evaluates to nothing              |
//! | `and`     | any   | the instantiated conjunction, once per binding thread    |
//! | `or`      | any   | every operand's results, concatenated                    |
//! | `match`   | 1 / 2 | each stored match (or the template instantiated by it)   |
//! | `assert`  | 1     | `()` after adding the argument to the space              |
//! | `retract` | 1     | `()` if the argument was removed, nothing otherwise      |
//! | `quote`   | 1     | the argument, unevaluated                                |
//! | `implies` | 2     | the rule atom itself                                     |
//!
//! # Example
//!
//! ```ignore
//! (Human Socrates)
//! !(and (Human $x) (not (Dog $x)))
//! // `and` evaluates (Human $x), binds $x to Socrates, then evaluates
//! // (not (Dog Socrates)) and yields (and (Human Socrates) (not (Dog Socrates)))
//! ```

mod comparison;
mod logical;
mod quoting;
mod space_ops;
mod traits;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::models::{Atom, BoundResults, Substitution};
use super::space::AtomSpace;

// Re-export all public types
pub use comparison::EqualOp;
pub use logical::{AndOp, NotOp, OrOp};
pub use quoting::{ImpliesOp, QuoteOp};
pub use space_ops::{AssertOp, MatchOp, RetractOp};
pub use traits::{EvalFn, FnOperation, GroundedOperation};

/// Result type for grounded operations
/// Each result is an (atom, substitution) pair
pub type GroundedResult = Result<BoundResults, ExecError>;

/// Error type for grounded operation execution
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecError {
    /// Wrong number or shape of arguments
    #[error("Incorrect argument: {0}")]
    IncorrectArgument(String),

    /// Failure inside the operation itself
    #[error("Runtime error: {0}")]
    Runtime(String),
}

/// Check the argument count and borrow the arguments as an array
pub fn expect_args<'a, const N: usize>(
    name: &str,
    args: &'a [Atom],
) -> Result<&'a [Atom; N], ExecError> {
    args.try_into().map_err(|_| {
        ExecError::IncorrectArgument(format!(
            "{} requires {} argument{}, got {}",
            name,
            N,
            if N == 1 { "" } else { "s" },
            args.len()
        ))
    })
}

/// The single result `True` carrying `subst`
pub(crate) fn truth_with(subst: Substitution) -> BoundResults {
    vec![(Atom::truth(), subst)]
}

/// Registry of grounded operations, keyed by name
pub struct GroundedRegistry {
    operations: HashMap<String, Arc<dyn GroundedOperation>>,
}

impl GroundedRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        GroundedRegistry {
            operations: HashMap::new(),
        }
    }

    /// Create a registry with the built-in operations
    pub fn with_standard_ops() -> Self {
        let mut registry = Self::new();

        // Logical operations
        registry.register(Arc::new(AndOp));
        registry.register(Arc::new(OrOp));
        registry.register(Arc::new(NotOp));

        // Comparison
        registry.register(Arc::new(EqualOp));

        // Space operations
        registry.register(Arc::new(MatchOp));
        registry.register(Arc::new(AssertOp));
        registry.register(Arc::new(RetractOp));

        // Quoting
        registry.register(Arc::new(QuoteOp));
        registry.register(Arc::new(ImpliesOp));

        registry
    }

    /// Register a grounded operation; replaces any operation of the same name
    pub fn register(&mut self, op: Arc<dyn GroundedOperation>) {
        self.operations.insert(op.name().to_string(), op);
    }

    /// Register a closure as a grounded operation
    pub fn register_fn<F>(&mut self, name: impl Into<String>, func: F)
    where
        F: Fn(&[Atom], &AtomSpace, &EvalFn<'_>) -> GroundedResult + Send + Sync + 'static,
    {
        self.register(Arc::new(FnOperation::new(name, func)));
    }

    /// Look up a grounded operation by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn GroundedOperation>> {
        self.operations.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.operations.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for GroundedRegistry {
    fn default() -> Self {
        Self::with_standard_ops()
    }
}

impl Clone for GroundedRegistry {
    fn clone(&self) -> Self {
        GroundedRegistry {
            operations: self.operations.clone(),
        }
    }
}

impl fmt::Debug for GroundedRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroundedRegistry")
            .field("operations", &self.names())
            .finish()
    }
}
