//! Chain-of-responsibility over field types.
//!
//! The chain is an explicitly constructed, immutable value: build it once per
//! session and pass it in. Links are queried strictly in order and only the
//! first link whose `can_handle` answers `true` produces the value.

use valuecheck_core::{TypeDescriptor, Value};
use valuecheck_instantiate::Instantiator;

use crate::error::{MutationError, MutationResult};
use crate::links::{ContainerMutator, EnumerationMutator, PrimitiveMutator, TextMutator};

/// One link of the mutation chain.
///
/// A link that claims a type must return a value unequal to `current` for
/// every input of that type, or not claim it at all.
pub trait FieldMutator: Send + Sync {
    fn name(&self) -> &'static str;

    fn can_handle(&self, ty: &TypeDescriptor) -> bool;

    fn mutate(
        &self,
        current: &Value,
        ty: &TypeDescriptor,
        ctx: &Instantiator<'_>,
    ) -> MutationResult<Value>;
}

pub struct MutationChain {
    links: Vec<Box<dyn FieldMutator>>,
}

impl MutationChain {
    /// enumeration → primitive/boxed → container → textual.
    pub fn standard() -> Self {
        Self::builder()
            .then(EnumerationMutator)
            .then(PrimitiveMutator)
            .then(ContainerMutator)
            .then(TextMutator)
            .build()
    }

    pub fn builder() -> MutationChainBuilder {
        MutationChainBuilder { links: Vec::new() }
    }

    /// The link that would handle `ty`, if any.
    pub fn link_for(&self, ty: &TypeDescriptor) -> Option<&dyn FieldMutator> {
        self.links
            .iter()
            .find(|link| link.can_handle(ty))
            .map(Box::as_ref)
    }

    pub fn can_mutate(&self, ty: &TypeDescriptor) -> bool {
        self.link_for(ty).is_some()
    }

    pub fn link_names(&self) -> Vec<&'static str> {
        self.links.iter().map(|link| link.name()).collect()
    }

    /// Produce a value of `ty` that differs from `current`.
    pub fn mutate(
        &self,
        current: &Value,
        ty: &TypeDescriptor,
        ctx: &Instantiator<'_>,
    ) -> MutationResult<Value> {
        let Some(link) = self.link_for(ty) else {
            tracing::debug!(ty = %ty.name(), "no mutation link claims type");
            return Err(MutationError::NoMutatorAvailable {
                ty: ty.name().clone(),
            });
        };

        tracing::debug!(ty = %ty.name(), link = link.name(), "selected mutation link");
        let next = link.mutate(current, ty, ctx)?;
        if &next == current {
            return Err(MutationError::Unchanged {
                ty: ty.name().clone(),
                link: link.name(),
            });
        }
        Ok(next)
    }
}

impl Default for MutationChain {
    fn default() -> Self {
        Self::standard()
    }
}

impl core::fmt::Debug for MutationChain {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MutationChain")
            .field("links", &self.link_names())
            .finish()
    }
}

/// Assembles a chain in an explicit order.
pub struct MutationChainBuilder {
    links: Vec<Box<dyn FieldMutator>>,
}

impl MutationChainBuilder {
    pub fn then(mut self, link: impl FieldMutator + 'static) -> Self {
        self.links.push(Box::new(link));
        self
    }

    pub fn build(self) -> MutationChain {
        MutationChain { links: self.links }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use valuecheck_core::{ConstructorRegistry, EnumConstant, InMemoryIntrospector, PrimitiveKind};

    struct Frozen;

    impl FieldMutator for Frozen {
        fn name(&self) -> &'static str {
            "frozen"
        }

        fn can_handle(&self, _ty: &TypeDescriptor) -> bool {
            true
        }

        fn mutate(
            &self,
            current: &Value,
            _ty: &TypeDescriptor,
            _ctx: &Instantiator<'_>,
        ) -> MutationResult<Value> {
            Ok(current.clone())
        }
    }

    struct Doubling;

    impl FieldMutator for Doubling {
        fn name(&self) -> &'static str {
            "doubling"
        }

        fn can_handle(&self, ty: &TypeDescriptor) -> bool {
            ty.name().as_str() == "int"
        }

        fn mutate(
            &self,
            current: &Value,
            ty: &TypeDescriptor,
            _ctx: &Instantiator<'_>,
        ) -> MutationResult<Value> {
            match current {
                Value::Integer(0) => Ok(Value::Integer(1)),
                Value::Integer(v) => Ok(Value::Integer(v.wrapping_mul(2))),
                other => Err(MutationError::mismatch(ty.name(), other)),
            }
        }
    }

    #[test]
    fn standard_chain_has_fixed_order() {
        assert_eq!(
            MutationChain::standard().link_names(),
            vec!["enumeration", "primitive", "container", "text"]
        );
    }

    #[test]
    fn each_kind_is_claimed_by_exactly_the_expected_link() {
        let chain = MutationChain::standard();
        let int = TypeDescriptor::primitive(PrimitiveKind::Integer);
        let cases = [
            (TypeDescriptor::enumeration("Color", ["RED", "GREEN"]), Some("enumeration")),
            (int.clone(), Some("primitive")),
            (TypeDescriptor::boxed(PrimitiveKind::Boolean), Some("primitive")),
            (TypeDescriptor::sequence_of(int.clone()), Some("container")),
            (TypeDescriptor::array_of(int), Some("container")),
            (TypeDescriptor::text(), Some("text")),
            (TypeDescriptor::class("Person"), None),
            (TypeDescriptor::interface("Shape"), None),
            (TypeDescriptor::enumeration("Single", ["ONLY"]), None),
        ];
        for (ty, expected) in cases {
            assert_eq!(chain.link_for(&ty).map(|l| l.name()), expected, "for {ty}");
        }
    }

    #[test]
    fn unclaimed_type_fails_closed() {
        let introspector = InMemoryIntrospector::new();
        let registry = ConstructorRegistry::new();
        let ctx = Instantiator::new(&introspector, &registry);
        let single = TypeDescriptor::enumeration("Single", ["ONLY"]);

        let err = MutationChain::standard()
            .mutate(&Value::Enum(EnumConstant::new("Single", "ONLY")), &single, &ctx)
            .unwrap_err();
        assert_eq!(
            err,
            MutationError::NoMutatorAvailable {
                ty: single.name().clone()
            }
        );
    }

    #[test]
    fn first_claiming_link_wins() {
        let introspector = InMemoryIntrospector::new();
        let registry = ConstructorRegistry::new();
        let ctx = Instantiator::new(&introspector, &registry);
        let int = TypeDescriptor::primitive(PrimitiveKind::Integer);

        let chain = MutationChain::builder().then(Doubling).then(PrimitiveMutator).build();
        assert_eq!(chain.mutate(&Value::Integer(5), &int, &ctx).unwrap(), Value::Integer(10));

        let chain = MutationChain::builder().then(PrimitiveMutator).then(Doubling).build();
        assert_eq!(chain.mutate(&Value::Integer(5), &int, &ctx).unwrap(), Value::Integer(6));
    }

    #[test]
    fn link_returning_same_value_is_reported() {
        let introspector = InMemoryIntrospector::new();
        let registry = ConstructorRegistry::new();
        let ctx = Instantiator::new(&introspector, &registry);
        let chain = MutationChain::builder().then(Frozen).build();

        let err = chain
            .mutate(&Value::text("a"), &TypeDescriptor::text(), &ctx)
            .unwrap_err();
        assert!(matches!(err, MutationError::Unchanged { link: "frozen", .. }));
    }
}
