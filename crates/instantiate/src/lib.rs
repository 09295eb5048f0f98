//! `valuecheck-instantiate` — manufacture a value of an arbitrary type.
//!
//! [`select_strategy`] picks exactly one [`ConstructionStrategy`] for a type;
//! [`Instantiator`] runs it against an introspector and a constructor registry.

pub mod dispatcher;
pub mod error;
pub mod strategy;

pub use dispatcher::{Instantiator, select_strategy};
pub use error::{ConstructorAttempt, InstantiationCause, InstantiationError, InstantiationResult};
pub use strategy::{ConstructionStrategy, TEXT_PLACEHOLDER};
