// Backend module: the inference engine proper
//
// - `models`: atoms, substitutions, rules
// - `unify`: structural unification with occurs check
// - `space`: the indexed, concurrent AtomSpace
// - `grounded`: host-code operations callable from atoms
// - `eval`: the interpreter (grounded dispatch + single-step forward chaining)

pub mod eval;
pub mod grounded;
pub mod models;
pub mod space;
pub mod unify;

pub use eval::{CancelToken, EvalError, Interpreter};
pub use grounded::{
    EvalFn, ExecError, FnOperation, GroundedOperation, GroundedRegistry, GroundedResult,
};
pub use models::*;
pub use space::{AtomSpace, IndexKey, QueryIter};
pub use unify::{can_unify, unify, unify_all, unify_with};
