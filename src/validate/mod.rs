//! Schedule validation.
//!
//! A read-only audit over players, partnerships, rounds and the court
//! count. It re-derives every invariant from its inputs alone, so it can
//! check schedules produced by any strategy, not just this crate's.
//!
//! Findings are data, never errors: structural violations go to
//! [`ValidationReport::errors`] and make the schedule unusable, fairness
//! shortfalls go to [`ValidationReport::warnings`].

mod types;
mod validator;

pub use types::{ValidationError, ValidationReport, ValidationWarning};
pub use validator::validate_tournament;
