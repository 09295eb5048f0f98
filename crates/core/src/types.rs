//! Type descriptors: identity + structural classification of a type.
//!
//! Descriptors are produced by the external introspection collaborator and are
//! immutable from the engine's point of view. Two descriptors are the same type
//! when their names are equal; the kind and constructor list are carried along
//! so the classifier can answer structural questions without calling back.

use core::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Name (identity) of a type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for TypeName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeName {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TypeName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The eight numeric/boolean/character kinds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Character,
    Short,
    Integer,
    Long,
    Float,
    Double,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 8] = [
        PrimitiveKind::Boolean,
        PrimitiveKind::Byte,
        PrimitiveKind::Character,
        PrimitiveKind::Short,
        PrimitiveKind::Integer,
        PrimitiveKind::Long,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
    ];

    /// Name of the unboxed form.
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Character => "char",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Integer => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
        }
    }

    /// Name of the boxed form.
    pub fn boxed_name(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "Boolean",
            PrimitiveKind::Byte => "Byte",
            PrimitiveKind::Character => "Character",
            PrimitiveKind::Short => "Short",
            PrimitiveKind::Integer => "Integer",
            PrimitiveKind::Long => "Long",
            PrimitiveKind::Float => "Float",
            PrimitiveKind::Double => "Double",
        }
    }
}

/// Homogeneous container shapes recognised by the engine.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    Array,
    Sequence,
    Set,
    Mapping,
}

/// Structural classification of a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Primitive(PrimitiveKind),
    Boxed(PrimitiveKind),
    Text,
    Enumeration { constants: Vec<String> },
    Array { element: Box<TypeDescriptor> },
    Sequence { element: Box<TypeDescriptor> },
    Set { element: Box<TypeDescriptor> },
    Mapping {
        key: Box<TypeDescriptor>,
        value: Box<TypeDescriptor>,
    },
    Interface,
    Annotation,
    Abstract,
    Class,
}

/// Whether a constructor can be invoked from outside its type.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    NonPublic,
}

/// A declared constructor: parameter types + visibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorDescriptor {
    pub parameters: Vec<TypeDescriptor>,
    #[serde(default)]
    pub visibility: Visibility,
}

impl ConstructorDescriptor {
    pub fn public(parameters: Vec<TypeDescriptor>) -> Self {
        Self {
            parameters,
            visibility: Visibility::Public,
        }
    }

    pub fn non_public(parameters: Vec<TypeDescriptor>) -> Self {
        Self {
            parameters,
            visibility: Visibility::NonPublic,
        }
    }

    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    /// Human-readable signature, e.g. `Person(String, int)`.
    pub fn signature(&self, owner: &TypeName) -> String {
        let params = self
            .parameters
            .iter()
            .map(|p| p.name().as_str())
            .collect::<Vec<_>>()
            .join(", ");
        format!("{owner}({params})")
    }
}

/// Identity + classification of a type, as supplied by the introspector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDescriptor {
    name: TypeName,
    kind: TypeKind,
    #[serde(default)]
    constructors: Vec<ConstructorDescriptor>,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<TypeName>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            constructors: Vec::new(),
        }
    }

    pub fn primitive(kind: PrimitiveKind) -> Self {
        Self::new(kind.name(), TypeKind::Primitive(kind))
    }

    pub fn boxed(kind: PrimitiveKind) -> Self {
        Self::new(kind.boxed_name(), TypeKind::Boxed(kind))
    }

    pub fn text() -> Self {
        Self::new("String", TypeKind::Text)
    }

    pub fn enumeration<S: Into<String>>(
        name: impl Into<TypeName>,
        constants: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::new(
            name,
            TypeKind::Enumeration {
                constants: constants.into_iter().map(Into::into).collect(),
            },
        )
    }

    pub fn array_of(element: TypeDescriptor) -> Self {
        Self::new(
            format!("{}[]", element.name),
            TypeKind::Array {
                element: Box::new(element),
            },
        )
    }

    pub fn sequence_of(element: TypeDescriptor) -> Self {
        Self::new(
            format!("List<{}>", element.name),
            TypeKind::Sequence {
                element: Box::new(element),
            },
        )
    }

    pub fn set_of(element: TypeDescriptor) -> Self {
        Self::new(
            format!("Set<{}>", element.name),
            TypeKind::Set {
                element: Box::new(element),
            },
        )
    }

    pub fn mapping_of(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        Self::new(
            format!("Map<{}, {}>", key.name, value.name),
            TypeKind::Mapping {
                key: Box::new(key),
                value: Box::new(value),
            },
        )
    }

    pub fn interface(name: impl Into<TypeName>) -> Self {
        Self::new(name, TypeKind::Interface)
    }

    pub fn annotation(name: impl Into<TypeName>) -> Self {
        Self::new(name, TypeKind::Annotation)
    }

    pub fn abstract_class(name: impl Into<TypeName>) -> Self {
        Self::new(name, TypeKind::Abstract)
    }

    pub fn class(name: impl Into<TypeName>) -> Self {
        Self::new(name, TypeKind::Class)
    }

    pub fn with_constructor(mut self, constructor: ConstructorDescriptor) -> Self {
        self.constructors.push(constructor);
        self
    }

    pub fn name(&self) -> &TypeName {
        &self.name
    }

    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    pub fn constructors(&self) -> &[ConstructorDescriptor] {
        &self.constructors
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for TypeDescriptor {}

impl Hash for TypeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl core::fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.name, f)
    }
}

/// A field declared on a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub declaring_type: TypeName,
    pub name: String,
    pub field_type: TypeDescriptor,
}

impl FieldDescriptor {
    pub fn new(
        declaring_type: impl Into<TypeName>,
        name: impl Into<String>,
        field_type: TypeDescriptor,
    ) -> Self {
        Self {
            declaring_type: declaring_type.into(),
            name: name.into(),
            field_type,
        }
    }
}

impl core::fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{}", self.declaring_type, self.name)
    }
}
