//! Failure taxonomy for the ranking core.

use std::time::Duration;

use thiserror::Error;

/// Errors raised by an `InteractionStore` read.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Why an aggregation did not complete.
#[derive(Debug, Error)]
pub enum AggregationCause {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("cancelled by caller")]
    Cancelled,

    #[error("timed out after {0:?}")]
    TimedOut(Duration),
}

#[derive(Debug, Error)]
pub enum RankingError {
    /// The identifier does not resolve to an existing entity.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The caller supplied a malformed identifier.
    #[error("invalid {field}: {reason}")]
    InvalidArgument { field: &'static str, reason: String },

    /// A read failed part way through; no partial result is returned.
    #[error("failed to {stage}: {source}")]
    AggregationFailure {
        stage: &'static str,
        #[source]
        source: AggregationCause,
    },
}

impl RankingError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn aggregation(stage: &'static str, source: impl Into<AggregationCause>) -> Self {
        Self::AggregationFailure {
            stage,
            source: source.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type RankingResult<T> = std::result::Result<T, RankingError>;
