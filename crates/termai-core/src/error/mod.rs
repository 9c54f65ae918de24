//! Error types for termai
//!
//! A single error enum is shared across all crates. Recoverable provider
//! failures (a failed attempt, primary exhaustion) never surface through
//! this type; they are absorbed by the fallback client and only influence
//! outcome metadata. Everything here is a terminal condition for the call
//! that produced it.

mod constructors;
mod conversions;
mod types;

pub use types::{TermaiError, TermaiResult};
