//! Error taxonomy for the ingestion entry point.
//!
//! Two failure classes exist: bad input (caught before anything is
//! written) and adapter faults (wrapped into one stable shape so
//! callers see the same error surface regardless of which store
//! backs the pipeline). Degenerate inputs — text that normalizes to
//! nothing, queries that match nothing — are not errors anywhere in
//! the core; they are ordinary results.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    /// A required field was missing or blank. Nothing was persisted.
    #[error("invalid ingestion request: {reason}")]
    InvalidRequest { reason: String },

    /// The chunk store reported a failure. The underlying cause is
    /// flattened into the message; the call that produced it is
    /// terminal and no partial chunk set remains committed.
    #[error("chunk store failure: {message}")]
    Store { message: String },
}

impl IngestError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        IngestError::InvalidRequest {
            reason: reason.into(),
        }
    }

    pub fn store(err: anyhow::Error) -> Self {
        IngestError::Store {
            message: format!("{:#}", err),
        }
    }
}
