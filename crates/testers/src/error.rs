//! Session failures.
//!
//! Everything except [`SessionError::Comparison`] is structural: the session
//! could not run a check at all, and stops immediately.

use thiserror::Error;

use valuecheck_assertions::AggregatedComparisonFailure;
use valuecheck_core::{CoreError, FieldDescriptor, InvocationError};
use valuecheck_instantiate::InstantiationError;
use valuecheck_mutate::MutationError;

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Resolution(#[from] CoreError),

    #[error(transparent)]
    Instantiation(#[from] InstantiationError),

    #[error("cannot mutate `{field}`: {source}")]
    Mutation {
        field: String,
        #[source]
        source: MutationError,
    },

    #[error("{operation} failed on `{field}`: {source}")]
    Invocation {
        operation: &'static str,
        field: String,
        #[source]
        source: InvocationError,
    },

    #[error(transparent)]
    Comparison(#[from] AggregatedComparisonFailure),
}

impl SessionError {
    pub fn mutation(field: &FieldDescriptor, source: MutationError) -> Self {
        Self::Mutation {
            field: field.to_string(),
            source,
        }
    }

    pub fn invocation(operation: &'static str, field: &FieldDescriptor, source: InvocationError) -> Self {
        Self::Invocation {
            operation,
            field: field.to_string(),
            source,
        }
    }

    /// True for deferred comparison failures, false for structural ones.
    pub fn is_comparison(&self) -> bool {
        matches!(self, Self::Comparison(_))
    }
}
