//! Async fact-store bridge
//!
//! Text in, text out: every call parses its argument with `sexpr`, runs the
//! engine on tokio's blocking pool and renders results in `[a, b]` list
//! notation. Failures come back as `FactStoreError`; nothing panics across
//! this boundary.
//!
//! **Threading**: the engine is synchronous and CPU-bound, so each call is a
//! `spawn_blocking` task. Queries in one batch run in parallel against the
//! shared space; results keep the input order.

use std::sync::Arc;

use tokio::task;
use tracing::{debug, warn};

use crate::backend::{Atom, CancelToken, EvalError, Interpreter};
use crate::sexpr::{format_results, parse, ParseError};

#[derive(Debug, thiserror::Error)]
pub enum FactStoreError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error("evaluation task failed: {0}")]
    Join(#[from] task::JoinError),
}

/// Shared handle to an interpreter and its space
#[derive(Debug, Clone)]
pub struct FactStore {
    interpreter: Arc<Interpreter>,
    cancel: CancelToken,
}

impl FactStore {
    pub fn new(interpreter: Interpreter) -> Self {
        Self::from_shared(Arc::new(interpreter))
    }

    pub fn from_shared(interpreter: Arc<Interpreter>) -> Self {
        FactStore {
            interpreter,
            cancel: CancelToken::new(),
        }
    }

    pub fn interpreter(&self) -> &Arc<Interpreter> {
        &self.interpreter
    }

    /// Make every later query on this store (and its clones) fail with
    /// `EvalError::Cancelled`
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Parse one atom and add it to the space
    pub async fn add_fact(&self, text: &str) -> Result<(), FactStoreError> {
        let atom = parse(text)?;
        let interpreter = Arc::clone(&self.interpreter);
        let added = task::spawn_blocking(move || interpreter.space().add(atom)).await?;
        debug!(target: "atomspace::fact_store::add_fact", text, added);
        Ok(())
    }

    /// Parse one query atom, evaluate it and render the results
    pub async fn execute_query(&self, text: &str) -> Result<String, FactStoreError> {
        let query = parse(text)?;
        let results = self.evaluate(query).await??;
        Ok(format_results(&results))
    }

    /// Evaluate several queries in parallel; one rendered result per query
    ///
    /// All queries are parsed before any runs, so a parse error means
    /// nothing was evaluated.
    pub async fn execute_queries(&self, texts: &[&str]) -> Result<Vec<String>, FactStoreError> {
        let queries = texts
            .iter()
            .map(|text| parse(text))
            .collect::<Result<Vec<Atom>, ParseError>>()?;

        let tasks: Vec<_> = queries.into_iter().map(|query| self.evaluate(query)).collect();

        let mut rendered = Vec::with_capacity(tasks.len());
        for task_handle in tasks {
            let results = task_handle.await??;
            rendered.push(format_results(&results));
        }
        Ok(rendered)
    }

    /// Parse a rule, store it and materialize its conclusions
    ///
    /// Returns the newly derived facts.
    pub async fn apply_rule(&self, text: &str) -> Result<String, FactStoreError> {
        let rule = parse(text)?;
        let interpreter = Arc::clone(&self.interpreter);
        let added = task::spawn_blocking(move || interpreter.apply_rule(&rule)).await??;
        Ok(format_results(&added))
    }

    fn evaluate(&self, query: Atom) -> task::JoinHandle<Result<Vec<Atom>, EvalError>> {
        let interpreter = Arc::clone(&self.interpreter);
        let cancel = self.cancel.clone();
        task::spawn_blocking(move || {
            let result = interpreter.evaluate_cancellable(&query, &cancel);
            if let Err(e) = &result {
                warn!(target: "atomspace::fact_store::query", %query, error = %e);
            }
            result
        })
    }
}
