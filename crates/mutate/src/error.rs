//! Mutation failures.

use thiserror::Error;

use valuecheck_core::TypeName;
use valuecheck_instantiate::InstantiationError;

pub type MutationResult<T> = Result<T, MutationError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MutationError {
    /// Every link of the chain declined the field type.
    #[error("no mutator available for `{ty}`")]
    NoMutatorAvailable { ty: TypeName },

    /// The current value does not have the shape the field type implies.
    #[error("`{ty}` cannot hold a {found} value")]
    ValueMismatch { ty: TypeName, found: &'static str },

    #[error("`{constant}` is not a constant of `{ty}`")]
    UnknownConstant { ty: TypeName, constant: String },

    #[error("cannot synthesise an element for `{ty}`: {source}")]
    ElementSynthesis {
        ty: TypeName,
        #[source]
        source: InstantiationError,
    },

    /// A link returned a value equal to its input.
    #[error("mutator `{link}` returned an unchanged value for `{ty}`")]
    Unchanged { ty: TypeName, link: &'static str },
}

impl MutationError {
    pub fn mismatch(ty: &TypeName, found: &valuecheck_core::Value) -> Self {
        Self::ValueMismatch {
            ty: ty.clone(),
            found: found.shape(),
        }
    }
}
