//! Caller-supplied constructor arguments.

use std::collections::HashMap;

use crate::types::{TypeDescriptor, TypeName};
use crate::value::Value;

/// Ordered `(parameter type, argument)` pairs that force a construction path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstructorSpec {
    arguments: Vec<(TypeDescriptor, Value)>,
}

impl ConstructorSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_argument(mut self, parameter_type: TypeDescriptor, value: Value) -> Self {
        self.arguments.push((parameter_type, value));
        self
    }

    pub fn parameter_types(&self) -> Vec<TypeDescriptor> {
        self.arguments.iter().map(|(ty, _)| ty.clone()).collect()
    }

    pub fn values(&self) -> Vec<Value> {
        self.arguments.iter().map(|(_, v)| v.clone()).collect()
    }

    pub fn arity(&self) -> usize {
        self.arguments.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(TypeDescriptor, Value)> {
        self.arguments.iter()
    }
}

/// Session-lived mapping from type to its registered `ConstructorSpec`.
///
/// At most one spec per type; registering again replaces the previous one.
#[derive(Debug, Clone, Default)]
pub struct ConstructorRegistry {
    specs: HashMap<TypeName, ConstructorSpec>,
}

impl ConstructorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `spec` for `ty`, returning the spec it replaced (if any).
    pub fn register(&mut self, ty: &TypeDescriptor, spec: ConstructorSpec) -> Option<ConstructorSpec> {
        self.specs.insert(ty.name().clone(), spec)
    }

    pub fn with(mut self, ty: &TypeDescriptor, spec: ConstructorSpec) -> Self {
        self.register(ty, spec);
        self
    }

    pub fn get(&self, ty: &TypeDescriptor) -> Option<&ConstructorSpec> {
        self.specs.get(ty.name())
    }

    pub fn contains(&self, ty: &TypeDescriptor) -> bool {
        self.specs.contains_key(ty.name())
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
