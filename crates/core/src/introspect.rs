//! Collaborator seams.
//!
//! The engine never inspects types itself. Everything it needs from the
//! outside world goes through these two traits:
//!
//! - [`Introspector`]: enumerate fields, read/write them, invoke constructors,
//!   resolve a type by name.
//! - [`ObjectContract`]: the behaviour under test (`equals`, `hashCode`,
//!   `toString`, accessors).
//!
//! Implementations make **no storage assumptions** and perform no IO on the
//! engine's behalf; the in-memory implementation lives in [`crate::in_memory`].

use crate::error::{CoreResult, InvocationError};
use crate::types::{FieldDescriptor, TypeDescriptor};
use crate::value::Value;

/// Type-introspection collaborator.
pub trait Introspector {
    /// Locate a type by name.
    fn resolve(&self, name: &str) -> CoreResult<TypeDescriptor>;

    /// Fields declared on `ty`, in declaration order.
    fn fields(&self, ty: &TypeDescriptor) -> Vec<FieldDescriptor>;

    /// Invoke the constructor of `ty` whose parameter list is `parameters`.
    fn construct(
        &self,
        ty: &TypeDescriptor,
        parameters: &[TypeDescriptor],
        args: Vec<Value>,
    ) -> Result<Value, InvocationError>;

    fn read(&self, instance: &Value, field: &FieldDescriptor) -> Result<Value, InvocationError>;

    fn write(
        &self,
        instance: &mut Value,
        field: &FieldDescriptor,
        value: Value,
    ) -> Result<(), InvocationError>;
}

/// Object behaviour exercised by the method testers.
pub trait ObjectContract {
    fn equals(&self, left: &Value, right: &Value) -> bool;

    fn hash_code(&self, value: &Value) -> u64;

    /// `toString` equivalent.
    fn render(&self, value: &Value) -> String;

    /// Invoke the getter for `field`, or `None` if the type has none.
    fn call_getter(
        &self,
        _instance: &Value,
        _field: &FieldDescriptor,
    ) -> Option<Result<Value, InvocationError>> {
        None
    }

    /// Invoke the setter for `field`, or `None` if the type has none.
    fn call_setter(
        &self,
        _instance: &mut Value,
        _field: &FieldDescriptor,
        _value: Value,
    ) -> Option<Result<(), InvocationError>> {
        None
    }
}
