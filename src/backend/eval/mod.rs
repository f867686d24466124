// Interpreter: grounded dispatch, single-step forward chaining, direct lookup
//
// eval(q) where head(q) is a grounded op  = op(args(q))
// eval(q) otherwise                       = chain(q) ++ query(q)
// chain(q) = for each stored (implies body head), renamed apart:
//              s = unify(head, q); for each (_, b) in eval'(s(body)): (s.b)(q)
// eval' is eval with chain disabled, so a rule body only sees grounded
// operations and stored facts.

mod rules;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, warn};

use super::grounded::{EvalFn, GroundedOperation, GroundedRegistry, GroundedResult};
use super::models::{Atom, BoundResults, Rule};
use super::space::AtomSpace;

/// Whether rule lookup is part of an evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Chaining {
    Enabled,
    Disabled,
}

/// Errors surfaced at the interpreter's call boundary
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("evaluation cancelled")]
    Cancelled,

    #[error("not a rule (expected (implies body head)): {0}")]
    NotARule(Atom),
}

/// Cooperative cancellation flag shared with an outer pipeline
///
/// The engine has no suspension points, so the token is only consulted when
/// an evaluation starts and when it finishes.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Evaluates query atoms against a shared AtomSpace
///
/// The interpreter keeps no state between calls besides the space and the
/// operation registry. Register operations before sharing the interpreter
/// across threads; registration needs `&mut self`.
pub struct Interpreter {
    space: Arc<AtomSpace>,
    registry: GroundedRegistry,
}

impl Interpreter {
    /// Create an interpreter with the built-in operations
    pub fn new(space: Arc<AtomSpace>) -> Self {
        Self::with_registry(space, GroundedRegistry::with_standard_ops())
    }

    pub fn with_registry(space: Arc<AtomSpace>, registry: GroundedRegistry) -> Self {
        Interpreter { space, registry }
    }

    pub fn space(&self) -> &Arc<AtomSpace> {
        &self.space
    }

    pub fn registry(&self) -> &GroundedRegistry {
        &self.registry
    }

    /// Register a grounded operation; last registration wins
    pub fn register(&mut self, op: Arc<dyn GroundedOperation>) {
        self.registry.register(op);
    }

    /// Register a closure as a grounded operation
    pub fn register_fn<F>(&mut self, name: impl Into<String>, func: F)
    where
        F: Fn(&[Atom], &AtomSpace, &EvalFn<'_>) -> GroundedResult + Send + Sync + 'static,
    {
        self.registry.register_fn(name, func);
    }

    /// Evaluate a query; failure is an empty result
    pub fn evaluate(&self, query: &Atom) -> Vec<Atom> {
        self.evaluate_with_bindings(query)
            .into_iter()
            .map(|(atom, _)| atom)
            .collect()
    }

    /// Evaluate a query, pairing each result with the substitution (over the
    /// query's variables) that produced it
    pub fn evaluate_with_bindings(&self, query: &Atom) -> BoundResults {
        let results = self.eval_step(query, Chaining::Enabled);
        debug!(target: "atomspace::eval", %query, results = results.len());
        results
    }

    pub fn succeeds(&self, query: &Atom) -> bool {
        !self.evaluate_with_bindings(query).is_empty()
    }

    pub fn evaluate_first(&self, query: &Atom) -> Option<Atom> {
        self.evaluate(query).into_iter().next()
    }

    /// `evaluate`, honoring a cancellation token at entry and exit
    pub fn evaluate_cancellable(
        &self,
        query: &Atom,
        token: &CancelToken,
    ) -> Result<Vec<Atom>, EvalError> {
        if token.is_cancelled() {
            return Err(EvalError::Cancelled);
        }
        let results = self.evaluate(query);
        if token.is_cancelled() {
            debug!(target: "atomspace::eval", %query, "cancelled after evaluation");
            return Err(EvalError::Cancelled);
        }
        Ok(results)
    }

    /// Store a rule and materialize its conclusions
    ///
    /// The body is evaluated once against the current space. Every ground
    /// instantiation of the head that is not already stored is added; the
    /// newly added facts are returned in derivation order. Calling this again
    /// after earlier conclusions were added advances a chain by one more hop.
    pub fn apply_rule(&self, rule_atom: &Atom) -> Result<Vec<Atom>, EvalError> {
        let rule =
            Rule::from_atom(rule_atom).ok_or_else(|| EvalError::NotARule(rule_atom.clone()))?;
        self.space.add(rule_atom.clone());

        let mut added = Vec::new();
        for (_, subst) in self.eval_step(&rule.body, Chaining::Disabled) {
            let conclusion = subst.apply(&rule.head);
            if conclusion.contains_variables() {
                debug!(target: "atomspace::eval::apply_rule", %conclusion, "skipping non-ground conclusion");
                continue;
            }
            if self.space.add(conclusion.clone()) {
                added.push(conclusion);
            }
        }
        debug!(target: "atomspace::eval::apply_rule", rule = %rule_atom, added = added.len());
        Ok(added)
    }

    /// One evaluation: grounded dispatch, else rules then stored facts
    pub(crate) fn eval_step(&self, query: &Atom, chaining: Chaining) -> BoundResults {
        let variables = query.variables();

        let results = match query.head_symbol().and_then(|head| self.registry.get(head)) {
            Some(op) => self.dispatch(op.as_ref(), query, chaining),
            None => {
                let mut results = match chaining {
                    Chaining::Enabled => self.forward_chain(query),
                    Chaining::Disabled => Vec::new(),
                };
                results.extend(self.space.query(query));
                results
            }
        };

        results
            .into_iter()
            .map(|(atom, subst)| (atom, subst.restrict(&variables)))
            .collect()
    }

    /// Run a grounded operation; faults and panics become no results
    fn dispatch(&self, op: &dyn GroundedOperation, query: &Atom, chaining: Chaining) -> BoundResults {
        let args = query.children().map(|c| &c[1..]).unwrap_or_default();
        let eval_fn = |atom: &Atom| self.eval_step(atom, chaining);

        match panic::catch_unwind(AssertUnwindSafe(|| op.execute(args, &self.space, &eval_fn))) {
            Ok(Ok(results)) => results,
            Ok(Err(err)) => {
                warn!(target: "atomspace::eval::grounded", op = op.name(), %query, %err, "grounded operation failed");
                Vec::new()
            }
            Err(payload) => {
                warn!(
                    target: "atomspace::eval::grounded",
                    op = op.name(),
                    %query,
                    panic = panic_message(payload.as_ref()),
                    "grounded operation panicked"
                );
                Vec::new()
            }
        }
    }
}

impl std::fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interpreter")
            .field("space", &self.space)
            .field("registry", &self.registry)
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
