//! Type classifier: stateless predicates over `TypeDescriptor`s.
//!
//! Every construction and mutation decision in the engine is made from these
//! answers alone, never from the introspection mechanism itself.

use crate::types::{ConstructorDescriptor, ContainerKind, PrimitiveKind, TypeDescriptor, TypeKind};

pub fn is_primitive(ty: &TypeDescriptor) -> bool {
    matches!(ty.kind(), TypeKind::Primitive(_))
}

pub fn is_boxed_primitive(ty: &TypeDescriptor) -> bool {
    matches!(ty.kind(), TypeKind::Boxed(_))
}

pub fn is_primitive_or_boxed(ty: &TypeDescriptor) -> bool {
    primitive_kind(ty).is_some()
}

/// The numeric/boolean/character kind of a primitive or boxed type.
pub fn primitive_kind(ty: &TypeDescriptor) -> Option<PrimitiveKind> {
    match ty.kind() {
        TypeKind::Primitive(kind) | TypeKind::Boxed(kind) => Some(*kind),
        _ => None,
    }
}

pub fn is_text(ty: &TypeDescriptor) -> bool {
    matches!(ty.kind(), TypeKind::Text)
}

pub fn is_enumeration(ty: &TypeDescriptor) -> bool {
    matches!(ty.kind(), TypeKind::Enumeration { .. })
}

/// Declared constants, in declaration order.
pub fn enum_constants(ty: &TypeDescriptor) -> Option<&[String]> {
    match ty.kind() {
        TypeKind::Enumeration { constants } => Some(constants),
        _ => None,
    }
}

pub fn is_array(ty: &TypeDescriptor) -> bool {
    matches!(ty.kind(), TypeKind::Array { .. })
}

/// Interface, annotation or abstract: cannot be instantiated directly.
pub fn is_abstract_like(ty: &TypeDescriptor) -> bool {
    matches!(
        ty.kind(),
        TypeKind::Interface | TypeKind::Annotation | TypeKind::Abstract
    )
}

pub fn container_kind(ty: &TypeDescriptor) -> Option<ContainerKind> {
    match ty.kind() {
        TypeKind::Array { .. } => Some(ContainerKind::Array),
        TypeKind::Sequence { .. } => Some(ContainerKind::Sequence),
        TypeKind::Set { .. } => Some(ContainerKind::Set),
        TypeKind::Mapping { .. } => Some(ContainerKind::Mapping),
        _ => None,
    }
}

pub fn is_container(ty: &TypeDescriptor) -> bool {
    container_kind(ty).is_some()
}

/// Element type of an array, sequence or set; key type of a mapping.
pub fn element_type(ty: &TypeDescriptor) -> Option<&TypeDescriptor> {
    match ty.kind() {
        TypeKind::Array { element } | TypeKind::Sequence { element } | TypeKind::Set { element } => {
            Some(element)
        }
        TypeKind::Mapping { key, .. } => Some(key),
        _ => None,
    }
}

/// Value type of a mapping.
pub fn mapping_value_type(ty: &TypeDescriptor) -> Option<&TypeDescriptor> {
    match ty.kind() {
        TypeKind::Mapping { value, .. } => Some(value),
        _ => None,
    }
}

/// Does the type expose a public constructor taking no arguments?
///
/// Standard sequence/set/mapping containers always do (they start empty).
pub fn has_public_zero_arg_constructor(ty: &TypeDescriptor) -> bool {
    match ty.kind() {
        TypeKind::Sequence { .. } | TypeKind::Set { .. } | TypeKind::Mapping { .. } => true,
        TypeKind::Class | TypeKind::Abstract => ty
            .constructors()
            .iter()
            .any(|c| c.is_public() && c.arity() == 0),
        _ => false,
    }
}

/// Eligible for the zero-argument-constructor strategy.
pub fn qualifies_for_zero_arg_constructor(ty: &TypeDescriptor) -> bool {
    !is_abstract_like(ty) && has_public_zero_arg_constructor(ty)
}

/// Public constructors ranked by ascending argument count.
///
/// Ties keep declaration order so the ranking is deterministic.
pub fn public_constructors_by_arity(ty: &TypeDescriptor) -> Vec<&ConstructorDescriptor> {
    let mut ctors: Vec<&ConstructorDescriptor> =
        ty.constructors().iter().filter(|c| c.is_public()).collect();
    ctors.sort_by_key(|c| c.arity());
    ctors
}
