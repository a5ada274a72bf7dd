//! Error types.

use thiserror::Error;

/// Errors surfaced by the indexer's mutation entry points.
///
/// These guard against programming errors; expected steady states like empty
/// row sets or an absent sort spec return neutral values instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    /// A column-filter mutation carried parameters but no column key.
    /// Accepting it would register an empty-key entry and corrupt the
    /// filter registry.
    #[error("column filter update requires a column key")]
    MissingColumnKey,
}

/// Failure reported by an external sort delegate.
///
/// Delegates are allowed to only support active column selections; the
/// indexer catches this error, logs a warning, and degrades to identity
/// order instead of propagating it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("sort delegate failed: {0}")]
pub struct SortDelegateError(pub String);
