//! In-memory introspector for tests/dev.
//!
//! Types are registered up front as [`TypeDefinition`]s: their fields, their
//! constructors (which simply assign arguments to fields) and a
//! [`BehaviorProfile`] describing how `equals`, `hashCode`, `toString` and the
//! accessors behave. Profiles make it easy to describe a *broken* value object
//! (e.g. an `equals` that ignores a field) and watch the testers catch it.

use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Arc;

use crate::classify;
use crate::error::{CoreError, CoreResult, InvocationError};
use crate::introspect::{Introspector, ObjectContract};
use crate::types::{
    ConstructorDescriptor, FieldDescriptor, PrimitiveKind, TypeDescriptor, TypeKind, TypeName,
};
use crate::value::{Instance, Value};

/// Which fields take part in a behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldSelection {
    #[default]
    All,
    Only(Vec<String>),
    Except(Vec<String>),
    Nothing,
}

impl FieldSelection {
    pub fn only<S: Into<String>>(fields: impl IntoIterator<Item = S>) -> Self {
        Self::Only(fields.into_iter().map(Into::into).collect())
    }

    pub fn except<S: Into<String>>(fields: impl IntoIterator<Item = S>) -> Self {
        Self::Except(fields.into_iter().map(Into::into).collect())
    }

    pub fn includes(&self, field: &str) -> bool {
        match self {
            FieldSelection::All => true,
            FieldSelection::Only(names) => names.iter().any(|n| n == field),
            FieldSelection::Except(names) => !names.iter().any(|n| n == field),
            FieldSelection::Nothing => false,
        }
    }
}

/// How instances of a registered type behave.
///
/// With `equality: Nothing` every two instances of the type compare equal.
#[derive(Debug, Clone, Default)]
pub struct BehaviorProfile {
    pub equality: FieldSelection,
    pub hashing: FieldSelection,
    pub rendering: FieldSelection,
    pub getters: FieldSelection,
    pub setters: FieldSelection,
}

impl BehaviorProfile {
    pub fn with_equality(mut self, selection: FieldSelection) -> Self {
        self.equality = selection;
        self
    }

    pub fn with_hashing(mut self, selection: FieldSelection) -> Self {
        self.hashing = selection;
        self
    }

    pub fn with_rendering(mut self, selection: FieldSelection) -> Self {
        self.rendering = selection;
        self
    }

    pub fn with_getters(mut self, selection: FieldSelection) -> Self {
        self.getters = selection;
        self
    }

    pub fn with_setters(mut self, selection: FieldSelection) -> Self {
        self.setters = selection;
        self
    }
}

/// Predicate a constructor runs over its arguments before assigning them.
#[derive(Clone)]
pub struct ArgumentGuard(Arc<dyn Fn(&[Value]) -> Result<(), String> + Send + Sync>);

impl core::fmt::Debug for ArgumentGuard {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("ArgumentGuard(..)")
    }
}

#[derive(Debug, Clone)]
struct ConstructorDefinition {
    assigns: Vec<String>,
    public: bool,
    guard: Option<ArgumentGuard>,
}

/// A class (or abstract class) to register with an [`InMemoryIntrospector`].
#[derive(Debug, Clone)]
pub struct TypeDefinition {
    name: TypeName,
    is_abstract: bool,
    fields: Vec<(String, TypeDescriptor)>,
    constructors: Vec<ConstructorDefinition>,
    profile: BehaviorProfile,
}

impl TypeDefinition {
    pub fn class(name: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            is_abstract: false,
            fields: Vec::new(),
            constructors: Vec::new(),
            profile: BehaviorProfile::default(),
        }
    }

    pub fn abstract_class(name: impl Into<TypeName>) -> Self {
        Self {
            is_abstract: true,
            ..Self::class(name)
        }
    }

    pub fn field(mut self, name: impl Into<String>, ty: TypeDescriptor) -> Self {
        self.fields.push((name.into(), ty));
        self
    }

    pub fn zero_arg_constructor(self) -> Self {
        self.constructor(&[])
    }

    /// Public constructor whose parameters are the named fields, in order.
    pub fn constructor(mut self, assigns: &[&str]) -> Self {
        self.constructors.push(ConstructorDefinition {
            assigns: assigns.iter().map(|s| s.to_string()).collect(),
            public: true,
            guard: None,
        });
        self
    }

    pub fn non_public_constructor(mut self, assigns: &[&str]) -> Self {
        self.constructors.push(ConstructorDefinition {
            assigns: assigns.iter().map(|s| s.to_string()).collect(),
            public: false,
            guard: None,
        });
        self
    }

    /// Public constructor that refuses arguments rejected by `guard`.
    pub fn guarded_constructor(
        mut self,
        assigns: &[&str],
        guard: impl Fn(&[Value]) -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        self.constructors.push(ConstructorDefinition {
            assigns: assigns.iter().map(|s| s.to_string()).collect(),
            public: true,
            guard: Some(ArgumentGuard(Arc::new(guard))),
        });
        self
    }

    pub fn profile(mut self, profile: BehaviorProfile) -> Self {
        self.profile = profile;
        self
    }
}

#[derive(Debug, Clone)]
struct RegisteredConstructor {
    descriptor: ConstructorDescriptor,
    assigns: Vec<String>,
    guard: Option<ArgumentGuard>,
}

#[derive(Debug, Clone)]
struct Entry {
    descriptor: TypeDescriptor,
    fields: Vec<FieldDescriptor>,
    constructors: Vec<RegisteredConstructor>,
    profile: BehaviorProfile,
}

impl Entry {
    fn default_instance(&self) -> Instance {
        self.fields.iter().fold(Instance::new(self.descriptor.name().clone()), |inst, f| {
            inst.with_field(f.name.clone(), default_value(&f.field_type))
        })
    }
}

fn default_value(ty: &TypeDescriptor) -> Value {
    match ty.kind() {
        TypeKind::Primitive(kind) => Value::default_for(*kind),
        _ => Value::Null,
    }
}

fn hash_of<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Introspector + object contract backed by registered definitions.
#[derive(Debug, Default)]
pub struct InMemoryIntrospector {
    types: HashMap<TypeName, Entry>,
}

impl InMemoryIntrospector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class definition and return its descriptor.
    pub fn register(&mut self, definition: TypeDefinition) -> Result<TypeDescriptor, InvocationError> {
        let TypeDefinition {
            name,
            is_abstract,
            fields,
            constructors,
            profile,
        } = definition;

        let fields: Vec<FieldDescriptor> = fields
            .into_iter()
            .map(|(field, ty)| FieldDescriptor::new(name.clone(), field, ty))
            .collect();

        let mut registered = Vec::with_capacity(constructors.len());
        for ctor in constructors {
            let mut parameters = Vec::with_capacity(ctor.assigns.len());
            for assign in &ctor.assigns {
                let field = fields
                    .iter()
                    .find(|f| &f.name == assign)
                    .ok_or_else(|| InvocationError::no_such_field(&name, assign.clone()))?;
                parameters.push(field.field_type.clone());
            }
            let descriptor = if ctor.public {
                ConstructorDescriptor::public(parameters)
            } else {
                ConstructorDescriptor::non_public(parameters)
            };
            registered.push(RegisteredConstructor {
                descriptor,
                assigns: ctor.assigns,
                guard: ctor.guard,
            });
        }

        let kind = if is_abstract { TypeKind::Abstract } else { TypeKind::Class };
        let descriptor = registered
            .iter()
            .fold(TypeDescriptor::new(name.clone(), kind), |ty, c| {
                ty.with_constructor(c.descriptor.clone())
            });

        tracing::trace!(ty = %name, fields = fields.len(), "registered in-memory type");
        self.types.insert(
            name,
            Entry {
                descriptor: descriptor.clone(),
                fields,
                constructors: registered,
                profile,
            },
        );
        Ok(descriptor)
    }

    /// Make a descriptor resolvable by name (interfaces, enumerations, ...).
    pub fn register_descriptor(&mut self, descriptor: TypeDescriptor) {
        self.types.insert(
            descriptor.name().clone(),
            Entry {
                descriptor,
                fields: Vec::new(),
                constructors: Vec::new(),
                profile: BehaviorProfile::default(),
            },
        );
    }

    fn entry_of<'a>(&'a self, value: &'a Value) -> Option<(&'a Instance, &'a Entry)> {
        let instance = value.as_instance()?;
        let entry = self.types.get(instance.ty())?;
        Some((instance, entry))
    }

    fn builtin(name: &str) -> Option<TypeDescriptor> {
        if name == "String" {
            return Some(TypeDescriptor::text());
        }
        PrimitiveKind::ALL.iter().find_map(|kind| {
            if kind.name() == name {
                Some(TypeDescriptor::primitive(*kind))
            } else if kind.boxed_name() == name {
                Some(TypeDescriptor::boxed(*kind))
            } else {
                None
            }
        })
    }
}

impl Introspector for InMemoryIntrospector {
    fn resolve(&self, name: &str) -> CoreResult<TypeDescriptor> {
        if let Some(entry) = self.types.get(&TypeName::from(name)) {
            return Ok(entry.descriptor.clone());
        }
        Self::builtin(name).ok_or_else(|| CoreError::type_resolution(name, "not registered"))
    }

    fn fields(&self, ty: &TypeDescriptor) -> Vec<FieldDescriptor> {
        self.types
            .get(ty.name())
            .map(|e| e.fields.clone())
            .unwrap_or_default()
    }

    fn construct(
        &self,
        ty: &TypeDescriptor,
        parameters: &[TypeDescriptor],
        args: Vec<Value>,
    ) -> Result<Value, InvocationError> {
        let entry = self
            .types
            .get(ty.name())
            .ok_or_else(|| InvocationError::UnknownType { ty: ty.name().clone() })?;

        let ctor = entry
            .constructors
            .iter()
            .find(|c| c.descriptor.parameters.as_slice() == parameters)
            .ok_or_else(|| InvocationError::NoSuchConstructor {
                ty: ty.name().clone(),
                parameters: parameters
                    .iter()
                    .map(|p| p.name().as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })?;

        let signature = ctor.descriptor.signature(ty.name());
        if classify::is_abstract_like(&entry.descriptor) {
            return Err(InvocationError::rejected(signature, "cannot instantiate an abstract type"));
        }
        if args.len() != ctor.assigns.len() {
            return Err(InvocationError::rejected(
                signature,
                format!("expected {} arguments, got {}", ctor.assigns.len(), args.len()),
            ));
        }
        if let Some(guard) = &ctor.guard {
            (guard.0)(&args).map_err(|reason| InvocationError::rejected(signature.clone(), reason))?;
        }

        let mut instance = entry.default_instance();
        for (field, arg) in ctor.assigns.iter().zip(args) {
            instance.set(field, arg);
        }
        Ok(Value::Object(instance))
    }

    fn read(&self, instance: &Value, field: &FieldDescriptor) -> Result<Value, InvocationError> {
        match instance {
            Value::Object(inst) if inst.ty() == &field.declaring_type => inst
                .get(&field.name)
                .cloned()
                .ok_or_else(|| InvocationError::no_such_field(inst.ty(), field.name.clone())),
            Value::Stub(_) => Ok(default_value(&field.field_type)),
            other => Err(InvocationError::NotAnInstance {
                expected: field.declaring_type.clone(),
                found: other.shape().to_string(),
            }),
        }
    }

    fn write(
        &self,
        instance: &mut Value,
        field: &FieldDescriptor,
        value: Value,
    ) -> Result<(), InvocationError> {
        match instance {
            Value::Object(inst) if inst.ty() == &field.declaring_type => {
                if inst.set(&field.name, value) {
                    Ok(())
                } else {
                    Err(InvocationError::no_such_field(inst.ty(), field.name.clone()))
                }
            }
            Value::Stub(_) => Ok(()),
            other => Err(InvocationError::NotAnInstance {
                expected: field.declaring_type.clone(),
                found: other.shape().to_string(),
            }),
        }
    }
}

impl ObjectContract for InMemoryIntrospector {
    fn equals(&self, left: &Value, right: &Value) -> bool {
        match (self.entry_of(left), right.as_instance()) {
            (Some((a, entry)), Some(b)) => {
                a.ty() == b.ty()
                    && entry
                        .fields
                        .iter()
                        .filter(|f| entry.profile.equality.includes(&f.name))
                        .all(|f| a.get(&f.name) == b.get(&f.name))
            }
            _ => left == right,
        }
    }

    fn hash_code(&self, value: &Value) -> u64 {
        match self.entry_of(value) {
            Some((instance, entry)) => {
                let mut hasher = DefaultHasher::new();
                instance.ty().hash(&mut hasher);
                for f in entry.fields.iter().filter(|f| entry.profile.hashing.includes(&f.name)) {
                    f.name.hash(&mut hasher);
                    instance.get(&f.name).hash(&mut hasher);
                }
                hasher.finish()
            }
            None => hash_of(value),
        }
    }

    fn render(&self, value: &Value) -> String {
        match self.entry_of(value) {
            Some((instance, entry)) => {
                let parts: Vec<String> = entry
                    .fields
                    .iter()
                    .filter(|f| entry.profile.rendering.includes(&f.name))
                    .map(|f| {
                        let rendered = instance.get(&f.name).map(ToString::to_string).unwrap_or_default();
                        format!("{}={}", f.name, rendered)
                    })
                    .collect();
                format!("{}{{{}}}", instance.ty(), parts.join(", "))
            }
            None => value.to_string(),
        }
    }

    fn call_getter(
        &self,
        instance: &Value,
        field: &FieldDescriptor,
    ) -> Option<Result<Value, InvocationError>> {
        let (_, entry) = self.entry_of(instance)?;
        if !entry.profile.getters.includes(&field.name) {
            return None;
        }
        Some(self.read(instance, field))
    }

    fn call_setter(
        &self,
        instance: &mut Value,
        field: &FieldDescriptor,
        value: Value,
    ) -> Option<Result<(), InvocationError>> {
        let (_, entry) = self.entry_of(instance)?;
        if !entry.profile.setters.includes(&field.name) {
            return None;
        }
        Some(self.write(instance, field, value))
    }
}
