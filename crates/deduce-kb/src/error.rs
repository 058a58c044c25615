//! Error types for the reasoning core.

use std::path::PathBuf;

use thiserror::Error;

use crate::term::Term;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LogicError>;

/// Errors raised by substitution, saturation and config loading.
///
/// Failing to unify or to prove a query is not an error.
#[derive(Error, Debug)]
pub enum LogicError {
    /// An arithmetic offset was applied to a term that cannot carry one: a compound
    /// function, or a constant that is not an integer. Also raised when the shifted
    /// integer would overflow `i64`.
    #[error("Cannot offset {replacement} by {offset} when substituting variable {variable}")]
    Structural {
        variable: String,
        offset: i64,
        replacement: Term,
    },
    #[error("Saturation stopped after {rounds} rounds with {clauses} clauses: resource limit reached")]
    ResourceLimit { rounds: usize, clauses: usize },
    #[error("Failed to read config file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse prover config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl LogicError {
    pub(crate) fn structural(variable: &str, offset: i64, replacement: &Term) -> Self {
        LogicError::Structural {
            variable: variable.to_string(),
            offset,
            replacement: replacement.clone(),
        }
    }
}
