//! AtomSpace - symbolic inference engine library
//!
//! This library stores symbolic facts and rules as *atoms* in a concurrent,
//! indexed store and answers queries against them by unification and
//! single-step forward chaining.
//!
//! # Architecture
//!
//! 1. **S-expression Parsing** (`sexpr` module)
//!    - Tokenizes text with 1-based line/column positions
//!    - Parses `symbol`, `$variable` and `( ... )` into `Atom`s
//!    - `;` line comments
//!
//! 2. **Backend** (`backend` module)
//!    - `Atom` / `Substitution` value types
//!    - Unification with occurs check
//!    - `AtomSpace`: concurrent set of atoms bucketed by head symbol
//!    - Grounded operations (`and`, `or`, `not`, `equal`, `match`, ...)
//!    - `Interpreter`: grounded dispatch, forward chaining, direct lookup
//!
//! 3. **Boundaries**
//!    - `session`: run programs mixing facts and `!` queries
//!    - `fact_store` (feature `async`): text-in/text-out tokio bridge
//!    - `config`, `repl`: settings file and interactive shell
//!
//! # Example
//!
//! ```rust
//! use atomspace::backend::*;
//! use atomspace::sexpr::parse;
//! use std::sync::Arc;
//!
//! let space = Arc::new(AtomSpace::new());
//! space.add(parse("(Human Socrates)").unwrap());
//! space.add(parse("(implies (Human $x) (Mortal $x))").unwrap());
//!
//! let interpreter = Interpreter::new(space);
//! assert!(interpreter.succeeds(&parse("(Mortal Socrates)").unwrap()));
//! assert!(!interpreter.succeeds(&parse("(Mortal Plato)").unwrap()));
//! ```
//!
//! # Evaluation Strategy
//!
//! - **Single step**: a rule body is evaluated against stored facts and
//!   grounded operations only, never against other rules. Chains of more than
//!   one hop need the intermediate facts stored first (`assert`, or
//!   `Interpreter::apply_rule`).
//! - **Failure is empty**: no result is not an error. Faults inside grounded
//!   operations are logged and treated as no results.

pub mod backend;
pub mod config;
#[cfg(feature = "async")]
pub mod fact_store;
pub mod repl;
pub mod session;
pub mod sexpr;

pub use backend::{
    expr, sym, var, Atom, AtomSpace, CancelToken, EvalError, Interpreter, Substitution,
};
pub use config::EngineConfig;
#[cfg(feature = "async")]
pub use fact_store::{FactStore, FactStoreError};
pub use sexpr::{parse, parse_multiple, to_sexpr, try_parse, ParseError};
