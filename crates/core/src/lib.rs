//! `valuecheck-core` — shared building blocks for value-object testing.
//!
//! This crate contains the **type model** every other crate speaks: type
//! descriptors, opaque field values, the type classifier and the traits behind
//! which the external introspection collaborator lives.

pub mod classify;
pub mod error;
pub mod in_memory;
pub mod introspect;
pub mod registry;
pub mod types;
pub mod value;

pub use error::{CoreError, CoreResult, InvocationError};
pub use in_memory::{BehaviorProfile, FieldSelection, InMemoryIntrospector, TypeDefinition};
pub use introspect::{Introspector, ObjectContract};
pub use registry::{ConstructorRegistry, ConstructorSpec};
pub use types::{
    ConstructorDescriptor, ContainerKind, FieldDescriptor, PrimitiveKind, TypeDescriptor, TypeKind,
    TypeName, Visibility,
};
pub use value::{EnumConstant, Instance, Stub, Value};
