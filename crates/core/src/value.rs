//! Opaque field values.
//!
//! `Value` follows the equality rules of the type it represents rather than
//! Rust's defaults: floating point values compare by (canonical) bit pattern,
//! sets and mappings ignore insertion order, stubs compare by identity. `Hash`
//! is kept consistent with that equality so values can be used as keys.

use std::collections::BTreeMap;
use std::hash::{DefaultHasher, Hash, Hasher};

use uuid::Uuid;

use crate::types::{PrimitiveKind, TypeName};

/// A constant of an enumeration type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumConstant {
    pub ty: TypeName,
    pub name: String,
}

impl EnumConstant {
    pub fn new(ty: impl Into<TypeName>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
        }
    }
}

/// An instance of a concrete class: its type plus named field values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Instance {
    ty: TypeName,
    fields: BTreeMap<String, Value>,
}

impl Instance {
    pub fn new(ty: impl Into<TypeName>) -> Self {
        Self {
            ty: ty.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn ty(&self) -> &TypeName {
        &self.ty
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Overwrite an existing field. Returns `false` if the field is unknown.
    pub fn set(&mut self, field: &str, value: Value) -> bool {
        match self.fields.get_mut(field) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Identity-only stand-in for an interface, annotation or abstract type.
///
/// Every member of a stub is a no-op: field reads yield defaults and writes are
/// ignored by the introspectors that understand stubs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Stub {
    ty: TypeName,
    id: Uuid,
}

impl Stub {
    pub fn new(ty: impl Into<TypeName>) -> Self {
        Self {
            ty: ty.into(),
            id: Uuid::now_v7(),
        }
    }

    pub fn ty(&self) -> &TypeName {
        &self.ty
    }

    pub fn id(&self) -> &Uuid {
        &self.id
    }
}

/// A field value.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Boolean(bool),
    Byte(i8),
    Short(i16),
    Character(char),
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Text(String),
    Enum(EnumConstant),
    Array(Vec<Value>),
    Sequence(Vec<Value>),
    /// Insertion-ordered; elements are unique.
    Set(Vec<Value>),
    /// Insertion-ordered; keys are unique.
    Mapping(Vec<(Value, Value)>),
    Object(Instance),
    Stub(Stub),
}

impl Value {
    /// Canonical zero / `false` / `'\0'` value of a primitive kind.
    pub fn default_for(kind: PrimitiveKind) -> Value {
        match kind {
            PrimitiveKind::Boolean => Value::Boolean(false),
            PrimitiveKind::Byte => Value::Byte(0),
            PrimitiveKind::Character => Value::Character('\0'),
            PrimitiveKind::Short => Value::Short(0),
            PrimitiveKind::Integer => Value::Integer(0),
            PrimitiveKind::Long => Value::Long(0),
            PrimitiveKind::Float => Value::Float(0.0),
            PrimitiveKind::Double => Value::Double(0.0),
        }
    }

    pub fn text(value: impl Into<String>) -> Value {
        Value::Text(value.into())
    }

    /// Build a set, dropping duplicates while keeping first-seen order.
    pub fn set_from(items: impl IntoIterator<Item = Value>) -> Value {
        let mut out: Vec<Value> = Vec::new();
        for item in items {
            if !out.contains(&item) {
                out.push(item);
            }
        }
        Value::Set(out)
    }

    /// Build a mapping; a later entry for an existing key replaces its value.
    pub fn mapping_from(entries: impl IntoIterator<Item = (Value, Value)>) -> Value {
        let mut out: Vec<(Value, Value)> = Vec::new();
        for (key, value) in entries {
            match out.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = value,
                None => out.push((key, value)),
            }
        }
        Value::Mapping(out)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Number of elements for container values, `None` otherwise.
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::Array(items) | Value::Sequence(items) | Value::Set(items) => Some(items.len()),
            Value::Mapping(entries) => Some(entries.len()),
            _ => None,
        }
    }

    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            Value::Object(instance) => Some(instance),
            _ => None,
        }
    }

    pub fn as_instance_mut(&mut self) -> Option<&mut Instance> {
        match self {
            Value::Object(instance) => Some(instance),
            _ => None,
        }
    }

    /// Short label of the value's shape, used in error messages.
    pub fn shape(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Byte(_) => "byte",
            Value::Short(_) => "short",
            Value::Character(_) => "char",
            Value::Integer(_) => "int",
            Value::Long(_) => "long",
            Value::Float(_) => "float",
            Value::Double(_) => "double",
            Value::Text(_) => "text",
            Value::Enum(_) => "enum constant",
            Value::Array(_) => "array",
            Value::Sequence(_) => "sequence",
            Value::Set(_) => "set",
            Value::Mapping(_) => "mapping",
            Value::Object(_) => "object",
            Value::Stub(_) => "stub",
        }
    }
}

fn canonical_f32(v: f32) -> u32 {
    if v.is_nan() { f32::NAN.to_bits() } else { v.to_bits() }
}

fn canonical_f64(v: f64) -> u64 {
    if v.is_nan() { f64::NAN.to_bits() } else { v.to_bits() }
}

fn hash_of<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Order-insensitive comparison that counts duplicates, so it stays
/// symmetric for payloads built without `set_from`/`mapping_from`.
fn same_multiset<T: PartialEq>(a: &[T], b: &[T]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut matched = vec![false; b.len()];
    a.iter().all(|item| {
        match (0..b.len()).find(|&i| !matched[i] && b[i] == *item) {
            Some(i) => {
                matched[i] = true;
                true
            }
            None => false,
        }
    })
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Byte(a), Value::Byte(b)) => a == b,
            (Value::Short(a), Value::Short(b)) => a == b,
            (Value::Character(a), Value::Character(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => canonical_f32(*a) == canonical_f32(*b),
            (Value::Double(a), Value::Double(b)) => canonical_f64(*a) == canonical_f64(*b),
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Enum(a), Value::Enum(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Sequence(a), Value::Sequence(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => same_multiset(a, b),
            (Value::Mapping(a), Value::Mapping(b)) => same_multiset(a, b),
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Stub(a), Value::Stub(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Boolean(v) => v.hash(state),
            Value::Byte(v) => v.hash(state),
            Value::Short(v) => v.hash(state),
            Value::Character(v) => v.hash(state),
            Value::Integer(v) => v.hash(state),
            Value::Long(v) => v.hash(state),
            Value::Float(v) => canonical_f32(*v).hash(state),
            Value::Double(v) => canonical_f64(*v).hash(state),
            Value::Text(v) => v.hash(state),
            Value::Enum(v) => v.hash(state),
            Value::Array(items) | Value::Sequence(items) => items.hash(state),
            // Order-insensitive: combine element hashes commutatively.
            Value::Set(items) => {
                let combined = items
                    .iter()
                    .fold(0u64, |acc, item| acc.wrapping_add(hash_of(item)));
                items.len().hash(state);
                combined.hash(state);
            }
            Value::Mapping(entries) => {
                let combined = entries
                    .iter()
                    .fold(0u64, |acc, entry| acc.wrapping_add(hash_of(entry)));
                entries.len().hash(state);
                combined.hash(state);
            }
            Value::Object(v) => v.hash(state),
            Value::Stub(v) => v.hash(state),
        }
    }
}

fn write_joined<'a>(
    f: &mut core::fmt::Formatter<'_>,
    items: impl Iterator<Item = &'a Value>,
) -> core::fmt::Result {
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl core::fmt::Display for Value {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Byte(v) => write!(f, "{v}"),
            Value::Short(v) => write!(f, "{v}"),
            Value::Character(v) => write!(f, "{v}"),
            Value::Integer(v) => write!(f, "{v}"),
            Value::Long(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v:?}"),
            Value::Double(v) => write!(f, "{v:?}"),
            Value::Text(v) => f.write_str(v),
            Value::Enum(v) => f.write_str(&v.name),
            Value::Array(items) | Value::Sequence(items) | Value::Set(items) => {
                f.write_str("[")?;
                write_joined(f, items.iter())?;
                f.write_str("]")
            }
            Value::Mapping(entries) => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}={v}")?;
                }
                f.write_str("}")
            }
            Value::Object(instance) => {
                write!(f, "{}{{", instance.ty)?;
                for (i, (name, value)) in instance.fields().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}={value}")?;
                }
                f.write_str("}")
            }
            Value::Stub(stub) => write!(f, "{}$Stub@{}", stub.ty, stub.id.simple()),
        }
    }
}
