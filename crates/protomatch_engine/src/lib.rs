//! Protomatch Engine - structural pattern matching over protomatch values.
//!
//! A `MatchStatement` is an ordered list of `MatchArm`s. Each arm has a
//! `Pattern`, an optional guard, and an action. Evaluating a statement
//! against a `Value` commits to the first arm whose pattern matches and
//! whose guard accepts the captured `Bindings`, then runs that arm's action.
//!
//! # Patterns
//!
//! - `_` and captures match anything
//! - literals match scalars of the same kind and value
//! - record patterns test the type and then listed fields, reading unset
//!   fields as their defaults
//! - sequence patterns match positionally, with an optional star
//! - mapping patterns match a subset of keys, with an optional `**rest`
//! - or-patterns and `as` captures combine the above
//!
//! # Errors
//!
//! Structural mismatch is never an error. Referencing an undeclared field in
//! a record pattern is (`MatchError::Value`), as is finding no arm
//! (`MatchError::NoMatch`). Guard and action failures carry the caller's
//! own error type.

mod bindings;
mod check;
mod errors;
pub mod exec;
mod pattern;
mod statement;

#[cfg(test)]
mod test_helpers;

use std::sync::OnceLock;

pub use bindings::Bindings;
pub use errors::{CheckError, MatchError};
pub use exec::control::try_match;
pub use pattern::{Pattern, Rest};
pub use statement::{Commit, MatchArm, MatchStatement};

pub use protomatch_value as value;

static TRACING: OnceLock<bool> = OnceLock::new();

/// Install a `tracing` subscriber for match traces.
///
/// Does nothing unless `RUST_LOG` is set. A `RUST_LOG` that fails to parse
/// falls back to `protomatch_engine=warn`. Only the first call installs;
/// later calls return the same result.
///
/// `RUST_LOG=protomatch_engine=trace` shows each arm that was tried and the
/// record field that rejected it.
///
/// Returns `true` if a subscriber from this crate is active. Returns `false`
/// when `RUST_LOG` was unset or another global subscriber got there first.
pub fn init_tracing() -> bool {
    *TRACING.get_or_init(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let Ok(directives) = std::env::var("RUST_LOG") else {
            return false;
        };
        let filter =
            EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true))
            .with(filter)
            .try_init()
            .is_ok()
    })
}

const DEFAULT_DIRECTIVE: &str = "protomatch_engine=warn";
