//! Shared error base.
//!
//! Sub-crates define their own error enums and either convert into
//! `CoreError` via `From` impls or wrap it as one variant.  Absence of a
//! route, a conflict, or a solution is never an error anywhere in the
//! workspace; those are ordinary `Option`/status returns.

use thiserror::Error;

/// Errors common to all `rail-*` crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `rail-core` operations.
pub type CoreResult<T> = Result<T, CoreError>;
