//! Errors raised at the collaborator boundary.

use thiserror::Error;

use crate::types::TypeName;

/// Result type used across the core layer.
pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A requested type could not be located or classified.
    #[error("type resolution failed for `{name}`: {reason}")]
    TypeResolution { name: String, reason: String },

    /// The collaborator failed to construct, read or write.
    #[error(transparent)]
    Invocation(#[from] InvocationError),
}

impl CoreError {
    pub fn type_resolution(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::TypeResolution {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Failure reported by the introspection collaborator when it invokes
/// something on the engine's behalf.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvocationError {
    #[error("`{ty}` has no constructor accepting ({parameters})")]
    NoSuchConstructor { ty: TypeName, parameters: String },

    #[error("constructor `{signature}` rejected its arguments: {reason}")]
    Rejected { signature: String, reason: String },

    #[error("`{ty}` has no field `{field}`")]
    NoSuchField { ty: TypeName, field: String },

    #[error("expected an instance of `{expected}`, found {found}")]
    NotAnInstance { expected: TypeName, found: String },

    #[error("`{ty}` is unknown to the introspector")]
    UnknownType { ty: TypeName },
}

impl InvocationError {
    pub fn rejected(signature: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            signature: signature.into(),
            reason: reason.into(),
        }
    }

    pub fn no_such_field(ty: &TypeName, field: impl Into<String>) -> Self {
        Self::NoSuchField {
            ty: ty.clone(),
            field: field.into(),
        }
    }
}
