//! Instantiation failures.

use thiserror::Error;

use valuecheck_core::{CoreError, InvocationError, TypeName};

pub type InstantiationResult<T> = Result<T, InstantiationError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InstantiationError {
    /// The requested type could not be located (not retried).
    #[error(transparent)]
    Resolution(#[from] CoreError),

    /// The selected strategy could not produce an instance.
    #[error("cannot instantiate `{ty}`: {cause}")]
    ObjectInstantiation { ty: TypeName, cause: InstantiationCause },
}

impl InstantiationError {
    pub fn object(ty: &TypeName, cause: impl Into<InstantiationCause>) -> Self {
        Self::ObjectInstantiation {
            ty: ty.clone(),
            cause: cause.into(),
        }
    }

    /// Identity of the type that failed, if known.
    pub fn type_name(&self) -> Option<&TypeName> {
        match self {
            InstantiationError::ObjectInstantiation { ty, .. } => Some(ty),
            InstantiationError::Resolution(_) => None,
        }
    }
}

/// Root cause of an `ObjectInstantiation` failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InstantiationCause {
    #[error("enumeration declares no constants")]
    NoEnumConstants,

    #[error("no public constructor")]
    NoPublicConstructor,

    #[error("nested instantiation exceeded depth {limit}")]
    RecursionLimit { limit: usize },

    #[error(transparent)]
    Invocation(#[from] InvocationError),

    #[error("every public constructor failed: {}", render_attempts(.0))]
    AllConstructorsFailed(Vec<ConstructorAttempt>),
}

/// One failed candidate of the best-matching-constructor strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorAttempt {
    pub signature: String,
    pub failure: InstantiationError,
}

fn render_attempts(attempts: &[ConstructorAttempt]) -> String {
    attempts
        .iter()
        .map(|a| format!("[{} -> {}]", a.signature, a.failure))
        .collect::<Vec<_>>()
        .join(", ")
}
