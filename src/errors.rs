//! Unified error types and result handling.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("{referenced_by} references unknown {entity} {id}")]
    UnresolvedReference {
        entity: &'static str,
        id: String,
        referenced_by: String,
    },

    #[error("Duplicate {entity} id: {id}")]
    DuplicateId { entity: &'static str, id: String },

    #[error("Invalid loan {id}: {reason}")]
    InvalidLoan { id: String, reason: String },

    #[error("No alert ids left after {last_id}")]
    AlertIdsExhausted { last_id: u64 },
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
