//! Construction strategies.
//!
//! Each variant carries only what it was selected with (the type, and for the
//! user-supplied path the registered spec). Strategies are created per request
//! by the dispatcher and never cached.

use valuecheck_core::classify;
use valuecheck_core::{
    ConstructorDescriptor, ConstructorSpec, ContainerKind, EnumConstant, PrimitiveKind, Stub,
    TypeDescriptor, Value,
};

use crate::dispatcher::Instantiator;
use crate::error::{ConstructorAttempt, InstantiationCause, InstantiationError, InstantiationResult};

/// Placeholder produced for textual types.
pub const TEXT_PLACEHOLDER: &str = "valuecheck";

/// One algorithm for producing an instance of a type.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstructionStrategy {
    UserSuppliedArguments {
        ty: TypeDescriptor,
        spec: ConstructorSpec,
    },
    Textual,
    ZeroArgConstructor { ty: TypeDescriptor },
    PrimitiveDefault { kind: PrimitiveKind },
    Enumeration { ty: TypeDescriptor },
    /// Always produces a zero-length array.
    Array { ty: TypeDescriptor },
    /// Identity-only stand-in for interface/annotation/abstract types.
    Stub { ty: TypeDescriptor },
    BestMatchingConstructor { ty: TypeDescriptor },
}

impl ConstructionStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            ConstructionStrategy::UserSuppliedArguments { .. } => "user_supplied_arguments",
            ConstructionStrategy::Textual => "textual",
            ConstructionStrategy::ZeroArgConstructor { .. } => "zero_arg_constructor",
            ConstructionStrategy::PrimitiveDefault { .. } => "primitive_default",
            ConstructionStrategy::Enumeration { .. } => "enumeration",
            ConstructionStrategy::Array { .. } => "array",
            ConstructionStrategy::Stub { .. } => "stub",
            ConstructionStrategy::BestMatchingConstructor { .. } => "best_matching_constructor",
        }
    }

    /// Produce one instance, or fail with the offending type and root cause.
    pub fn construct(&self, ctx: &Instantiator<'_>) -> InstantiationResult<Value> {
        match self {
            ConstructionStrategy::UserSuppliedArguments { ty, spec } => ctx
                .introspector()
                .construct(ty, &spec.parameter_types(), spec.values())
                .map_err(|e| InstantiationError::object(ty.name(), e)),
            ConstructionStrategy::Textual => Ok(Value::text(TEXT_PLACEHOLDER)),
            ConstructionStrategy::ZeroArgConstructor { ty } => zero_arg(ty, ctx),
            ConstructionStrategy::PrimitiveDefault { kind } => Ok(Value::default_for(*kind)),
            ConstructionStrategy::Enumeration { ty } => {
                let first = classify::enum_constants(ty).and_then(|c| c.first());
                match first {
                    Some(name) => Ok(Value::Enum(EnumConstant::new(ty.name().clone(), name.clone()))),
                    None => Err(InstantiationError::object(
                        ty.name(),
                        InstantiationCause::NoEnumConstants,
                    )),
                }
            }
            ConstructionStrategy::Array { .. } => Ok(Value::Array(Vec::new())),
            ConstructionStrategy::Stub { ty } => Ok(Value::Stub(Stub::new(ty.name().clone()))),
            ConstructionStrategy::BestMatchingConstructor { ty } => best_matching(ty, ctx),
        }
    }
}

fn zero_arg(ty: &TypeDescriptor, ctx: &Instantiator<'_>) -> InstantiationResult<Value> {
    match classify::container_kind(ty) {
        Some(ContainerKind::Sequence) => Ok(Value::Sequence(Vec::new())),
        Some(ContainerKind::Set) => Ok(Value::Set(Vec::new())),
        Some(ContainerKind::Mapping) => Ok(Value::Mapping(Vec::new())),
        _ => ctx
            .introspector()
            .construct(ty, &[], Vec::new())
            .map_err(|e| InstantiationError::object(ty.name(), e)),
    }
}

fn best_matching(ty: &TypeDescriptor, ctx: &Instantiator<'_>) -> InstantiationResult<Value> {
    let candidates = classify::public_constructors_by_arity(ty);
    if candidates.is_empty() {
        return Err(InstantiationError::object(
            ty.name(),
            InstantiationCause::NoPublicConstructor,
        ));
    }

    let nested = ctx.nested();
    let mut attempts = Vec::with_capacity(candidates.len());
    for ctor in candidates {
        let signature = ctor.signature(ty.name());
        match try_constructor(ty, ctor, &nested) {
            Ok(value) => {
                tracing::debug!(%signature, "constructor succeeded");
                return Ok(value);
            }
            Err(failure) => {
                tracing::warn!(%signature, %failure, "constructor attempt failed");
                attempts.push(ConstructorAttempt { signature, failure });
            }
        }
    }

    Err(InstantiationError::object(
        ty.name(),
        InstantiationCause::AllConstructorsFailed(attempts),
    ))
}

fn try_constructor(
    ty: &TypeDescriptor,
    ctor: &ConstructorDescriptor,
    nested: &Instantiator<'_>,
) -> InstantiationResult<Value> {
    let args = ctor
        .parameters
        .iter()
        .map(|param| nested.instantiate(param))
        .collect::<InstantiationResult<Vec<_>>>()?;
    nested
        .introspector()
        .construct(ty, &ctor.parameters, args)
        .map_err(|e| InstantiationError::object(ty.name(), e))
}
