//! Runtime permission enforcement for permtree.
//!
//! After login the backend hands the client the user's filtered permission
//! list. [`RuntimeEvaluator`] answers "may this user do `code` (with
//! `action`)?" against that list. Evaluation is pure and the evaluator is
//! immutable, so one instance can be shared across threads.

mod evaluator;
mod grant;

pub use evaluator::{AllowReason, Decision, RuntimeEvaluator};
pub use grant::{Grant, GrantSet};
