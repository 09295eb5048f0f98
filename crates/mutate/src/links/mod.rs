//! Built-in mutation links, in standard chain order.

mod container;
mod enumeration;
mod primitive;
mod text;

pub use container::ContainerMutator;
pub use enumeration::EnumerationMutator;
pub use primitive::PrimitiveMutator;
pub use text::{TEXT_LITERAL, TEXT_SUFFIX, TextMutator};
