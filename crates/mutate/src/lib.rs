//! `valuecheck-mutate` — produce a value guaranteed different from a field's
//! current one.
//!
//! A [`MutationChain`] is an ordered list of [`FieldMutator`] links. The first
//! link that claims a field type produces the new value; if none does, the
//! chain fails closed with [`MutationError::NoMutatorAvailable`].

pub mod chain;
pub mod error;
pub mod links;

pub use chain::{FieldMutator, MutationChain, MutationChainBuilder};
pub use error::{MutationError, MutationResult};
pub use links::{ContainerMutator, EnumerationMutator, PrimitiveMutator, TextMutator};
