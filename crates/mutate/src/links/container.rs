use valuecheck_core::classify;
use valuecheck_core::{ContainerKind, TypeDescriptor, Value};
use valuecheck_instantiate::Instantiator;

use crate::chain::FieldMutator;
use crate::error::{MutationError, MutationResult};

/// Arrays, sequences, sets and mappings.
///
/// Always changes the size: a non-empty container loses its last element, an
/// empty (or absent) one gains an element synthesised from the declared
/// element type. Size changes are unequal under structural equality even when
/// every remaining element is equal.
#[derive(Debug, Default, Clone, Copy)]
pub struct ContainerMutator;

impl ContainerMutator {
    fn synthesize(
        ty: &TypeDescriptor,
        element: Option<&TypeDescriptor>,
        ctx: &Instantiator<'_>,
    ) -> MutationResult<Value> {
        let element = element.ok_or_else(|| MutationError::NoMutatorAvailable {
            ty: ty.name().clone(),
        })?;
        ctx.instantiate(element)
            .map_err(|source| MutationError::ElementSynthesis {
                ty: ty.name().clone(),
                source,
            })
    }
}

impl FieldMutator for ContainerMutator {
    fn name(&self) -> &'static str {
        "container"
    }

    fn can_handle(&self, ty: &TypeDescriptor) -> bool {
        classify::is_container(ty)
    }

    fn mutate(
        &self,
        current: &Value,
        ty: &TypeDescriptor,
        ctx: &Instantiator<'_>,
    ) -> MutationResult<Value> {
        let Some(kind) = classify::container_kind(ty) else {
            return Err(MutationError::mismatch(ty.name(), current));
        };
        let element_type = classify::element_type(ty);

        let next = match (kind, current) {
            (ContainerKind::Array, Value::Array(items)) => {
                Value::Array(shrink_or_grow(items, || Self::synthesize(ty, element_type, ctx))?)
            }
            (ContainerKind::Sequence, Value::Sequence(items)) => {
                Value::Sequence(shrink_or_grow(items, || Self::synthesize(ty, element_type, ctx))?)
            }
            (ContainerKind::Set, Value::Set(items)) => {
                Value::Set(shrink_or_grow(items, || Self::synthesize(ty, element_type, ctx))?)
            }
            (ContainerKind::Mapping, Value::Mapping(entries)) => {
                Value::Mapping(shrink_or_grow(entries, || {
                    let key = Self::synthesize(ty, element_type, ctx)?;
                    let value = Self::synthesize(ty, classify::mapping_value_type(ty), ctx)?;
                    Ok((key, value))
                })?)
            }
            (kind, Value::Null) => {
                let empty = match kind {
                    ContainerKind::Array => Value::Array(Vec::new()),
                    ContainerKind::Sequence => Value::Sequence(Vec::new()),
                    ContainerKind::Set => Value::Set(Vec::new()),
                    ContainerKind::Mapping => Value::Mapping(Vec::new()),
                };
                return self.mutate(&empty, ty, ctx);
            }
            (_, other) => return Err(MutationError::mismatch(ty.name(), other)),
        };

        tracing::trace!(
            ty = %ty.name(),
            from = current.len().unwrap_or(0),
            to = next.len().unwrap_or(0),
            "resized container"
        );
        Ok(next)
    }
}

fn shrink_or_grow<T: Clone>(
    items: &[T],
    synthesize: impl FnOnce() -> MutationResult<T>,
) -> MutationResult<Vec<T>> {
    match items.split_last() {
        Some((_, rest)) => Ok(rest.to_vec()),
        None => Ok(vec![synthesize()?]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use valuecheck_core::{ConstructorRegistry, InMemoryIntrospector, PrimitiveKind};

    fn int() -> TypeDescriptor {
        TypeDescriptor::primitive(PrimitiveKind::Integer)
    }

    fn mutate(current: &Value, ty: &TypeDescriptor) -> MutationResult<Value> {
        let introspector = InMemoryIntrospector::new();
        let registry = ConstructorRegistry::new();
        let ctx = Instantiator::new(&introspector, &registry);
        ContainerMutator.mutate(current, ty, &ctx)
    }

    #[test]
    fn empty_sequence_gains_a_synthesised_element() {
        let ty = TypeDescriptor::sequence_of(TypeDescriptor::text());
        let next = mutate(&Value::Sequence(vec![]), &ty).unwrap();
        assert_eq!(next, Value::Sequence(vec![Value::text(valuecheck_instantiate::TEXT_PLACEHOLDER)]));
    }

    #[test]
    fn single_element_set_becomes_empty() {
        let ty = TypeDescriptor::set_of(int());
        let next = mutate(&Value::set_from([Value::Integer(4)]), &ty).unwrap();
        assert_eq!(next, Value::Set(vec![]));
    }

    #[test]
    fn empty_mapping_gains_an_entry() {
        let ty = TypeDescriptor::mapping_of(TypeDescriptor::text(), TypeDescriptor::boxed(PrimitiveKind::Long));
        let next = mutate(&Value::Mapping(vec![]), &ty).unwrap();
        assert_eq!(
            next,
            Value::Mapping(vec![(Value::text(valuecheck_instantiate::TEXT_PLACEHOLDER), Value::Long(0))])
        );
    }

    #[test]
    fn empty_array_gains_an_element() {
        let ty = TypeDescriptor::array_of(int());
        assert_eq!(mutate(&Value::Array(vec![]), &ty).unwrap(), Value::Array(vec![Value::Integer(0)]));
    }

    #[test]
    fn absent_container_is_treated_as_empty() {
        let ty = TypeDescriptor::sequence_of(int());
        assert_eq!(mutate(&Value::Null, &ty).unwrap(), Value::Sequence(vec![Value::Integer(0)]));
    }

    #[test]
    fn element_synthesis_failure_is_propagated() {
        let ty = TypeDescriptor::sequence_of(TypeDescriptor::enumeration("Empty", Vec::<String>::new()));
        assert!(matches!(
            mutate(&Value::Sequence(vec![]), &ty),
            Err(MutationError::ElementSynthesis { .. })
        ));
    }

    #[test]
    fn shape_must_match_declared_kind() {
        let ty = TypeDescriptor::set_of(int());
        assert!(matches!(
            mutate(&Value::Sequence(vec![]), &ty),
            Err(MutationError::ValueMismatch { found: "sequence", .. })
        ));
    }

    proptest! {
        /// Property: non-empty containers shrink by one, empty ones grow by one.
        #[test]
        fn size_always_changes_by_one(items in prop::collection::vec(any::<i32>(), 0..16)) {
            let ty = TypeDescriptor::sequence_of(int());
            let current = Value::Sequence(items.iter().copied().map(Value::Integer).collect());
            let next = mutate(&current, &ty).unwrap();
            let (before, after) = (items.len(), next.len().unwrap());
            if before == 0 {
                prop_assert_eq!(after, 1);
            } else {
                prop_assert_eq!(after, before - 1);
            }
            prop_assert_ne!(next, current);
        }

        #[test]
        fn sets_shrink_when_non_empty(items in prop::collection::hash_set(any::<i64>(), 1..16)) {
            let ty = TypeDescriptor::set_of(TypeDescriptor::primitive(PrimitiveKind::Long));
            let current = Value::set_from(items.iter().copied().map(Value::Long));
            let next = mutate(&current, &ty).unwrap();
            prop_assert_eq!(next.len(), Some(items.len() - 1));
        }
    }
}
