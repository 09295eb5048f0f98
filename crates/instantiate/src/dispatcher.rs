//! Instantiation strategy dispatcher.
//!
//! Strategy selection is a total, deterministic function of the type's
//! classification and of whether the caller registered constructor arguments
//! for it. Selection itself never fails; failures surface when the selected
//! strategy runs, and no other strategy is tried afterwards.
//!
//! Priority order (first match wins):
//!
//! ```text
//! 1. registered ConstructorSpec      -> UserSuppliedArguments
//! 2. text                            -> Textual
//! 3. concrete + public zero-arg ctor -> ZeroArgConstructor
//! 4. primitive / boxed primitive     -> PrimitiveDefault
//! 5. enumeration                     -> Enumeration
//! 6. array                           -> Array
//! 7. interface / annotation/abstract -> Stub
//! 8. anything else                   -> BestMatchingConstructor
//! ```

use valuecheck_core::classify;
use valuecheck_core::{ConstructorRegistry, Introspector, TypeDescriptor, TypeKind, Value};

use crate::error::{InstantiationCause, InstantiationError, InstantiationResult};
use crate::strategy::ConstructionStrategy;

/// Select the construction strategy for `ty`.
pub fn select_strategy(ty: &TypeDescriptor, registry: &ConstructorRegistry) -> ConstructionStrategy {
    if let Some(spec) = registry.get(ty) {
        return ConstructionStrategy::UserSuppliedArguments {
            ty: ty.clone(),
            spec: spec.clone(),
        };
    }
    if classify::is_text(ty) {
        return ConstructionStrategy::Textual;
    }
    if classify::qualifies_for_zero_arg_constructor(ty) {
        return ConstructionStrategy::ZeroArgConstructor { ty: ty.clone() };
    }
    if let Some(kind) = classify::primitive_kind(ty) {
        return ConstructionStrategy::PrimitiveDefault { kind };
    }
    if classify::is_enumeration(ty) {
        return ConstructionStrategy::Enumeration { ty: ty.clone() };
    }
    if classify::is_array(ty) {
        return ConstructionStrategy::Array { ty: ty.clone() };
    }
    if classify::is_abstract_like(ty) {
        return ConstructionStrategy::Stub { ty: ty.clone() };
    }
    ConstructionStrategy::BestMatchingConstructor { ty: ty.clone() }
}

/// Runs construction strategies against an introspector and a registry.
///
/// Cheap to copy; nested instantiation (constructor parameters) uses a copy
/// one level deeper so self-referential types terminate at `max_depth`.
#[derive(Clone, Copy)]
pub struct Instantiator<'a> {
    introspector: &'a dyn Introspector,
    registry: &'a ConstructorRegistry,
    max_depth: usize,
    depth: usize,
}

impl<'a> Instantiator<'a> {
    pub const DEFAULT_MAX_DEPTH: usize = 8;

    pub fn new(introspector: &'a dyn Introspector, registry: &'a ConstructorRegistry) -> Self {
        Self {
            introspector,
            registry,
            max_depth: Self::DEFAULT_MAX_DEPTH,
            depth: 0,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn introspector(&self) -> &'a dyn Introspector {
        self.introspector
    }

    pub fn registry(&self) -> &'a ConstructorRegistry {
        self.registry
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn select_strategy(&self, ty: &TypeDescriptor) -> ConstructionStrategy {
        select_strategy(ty, self.registry)
    }

    /// Produce one instance of `ty`.
    pub fn instantiate(&self, ty: &TypeDescriptor) -> InstantiationResult<Value> {
        if self.depth > self.max_depth {
            return Err(InstantiationError::object(
                ty.name(),
                InstantiationCause::RecursionLimit {
                    limit: self.max_depth,
                },
            ));
        }
        // Descriptors nested in other descriptors may be shallow (name + kind
        // only); ask the introspector for the full one. A name it cannot
        // resolve is reported as such, not as a missing constructor.
        let full;
        let ty = if matches!(ty.kind(), TypeKind::Class) && ty.constructors().is_empty() {
            full = self.introspector.resolve(ty.name().as_str())?;
            &full
        } else {
            ty
        };

        let strategy = self.select_strategy(ty);
        tracing::debug!(
            ty = %ty.name(),
            strategy = strategy.name(),
            depth = self.depth,
            "selected construction strategy"
        );
        strategy.construct(self)
    }

    /// Resolve `name` through the introspector, then instantiate it.
    pub fn instantiate_named(&self, name: &str) -> InstantiationResult<Value> {
        let ty = self.introspector.resolve(name)?;
        self.instantiate(&ty)
    }

    pub(crate) fn nested(&self) -> Self {
        Self {
            depth: self.depth + 1,
            ..*self
        }
    }
}

impl core::fmt::Debug for Instantiator<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Instantiator")
            .field("registry", self.registry)
            .field("max_depth", &self.max_depth)
            .field("depth", &self.depth)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use valuecheck_core::in_memory::TypeDefinition;
    use valuecheck_core::{
        ConstructorDescriptor, ConstructorSpec, CoreError, InMemoryIntrospector, PrimitiveKind,
    };

    fn int() -> TypeDescriptor {
        TypeDescriptor::primitive(PrimitiveKind::Integer)
    }

    fn empty_registry() -> ConstructorRegistry {
        ConstructorRegistry::new()
    }

    #[test]
    fn registry_entry_wins_over_everything() {
        let text = TypeDescriptor::text();
        let registry = ConstructorRegistry::new().with(&text, ConstructorSpec::new());
        assert_eq!(select_strategy(&text, &registry).name(), "user_supplied_arguments");

        let shape = TypeDescriptor::interface("Shape");
        let registry = ConstructorRegistry::new().with(&shape, ConstructorSpec::new());
        assert_eq!(select_strategy(&shape, &registry).name(), "user_supplied_arguments");
    }

    #[test]
    fn selection_follows_priority_order() {
        let registry = empty_registry();
        let cases = [
            (TypeDescriptor::text(), "textual"),
            (
                TypeDescriptor::class("Plain").with_constructor(ConstructorDescriptor::public(vec![])),
                "zero_arg_constructor",
            ),
            (TypeDescriptor::sequence_of(int()), "zero_arg_constructor"),
            (int(), "primitive_default"),
            (TypeDescriptor::boxed(PrimitiveKind::Character), "primitive_default"),
            (TypeDescriptor::enumeration("Color", ["RED"]), "enumeration"),
            (TypeDescriptor::array_of(int()), "array"),
            (TypeDescriptor::interface("Shape"), "stub"),
            (TypeDescriptor::annotation("Marker"), "stub"),
            (
                TypeDescriptor::abstract_class("Base").with_constructor(ConstructorDescriptor::public(vec![])),
                "stub",
            ),
            (
                TypeDescriptor::class("Point").with_constructor(ConstructorDescriptor::public(vec![int()])),
                "best_matching_constructor",
            ),
            (TypeDescriptor::class("Bare"), "best_matching_constructor"),
        ];
        for (ty, expected) in cases {
            assert_eq!(select_strategy(&ty, &registry).name(), expected, "for {ty}");
        }
    }

    #[test]
    fn interface_without_spec_instantiates_as_stub() {
        let introspector = InMemoryIntrospector::new();
        let registry = empty_registry();
        let ctx = Instantiator::new(&introspector, &registry);
        let shape = TypeDescriptor::interface("Shape");

        assert!(matches!(ctx.select_strategy(&shape), ConstructionStrategy::Stub { .. }));
        match ctx.instantiate(&shape).unwrap() {
            Value::Stub(stub) => assert_eq!(stub.ty(), shape.name()),
            other => panic!("expected stub, got {other:?}"),
        }
    }

    #[test]
    fn nested_parameters_are_instantiated_recursively() {
        let mut introspector = InMemoryIntrospector::new();
        let address = introspector
            .register(
                TypeDefinition::class("Address")
                    .field("street", TypeDescriptor::text())
                    .constructor(&["street"]),
            )
            .unwrap();
        let person = introspector
            .register(TypeDefinition::class("Person").field("address", address).constructor(&["address"]))
            .unwrap();
        let registry = empty_registry();
        let ctx = Instantiator::new(&introspector, &registry);

        let value = ctx.instantiate(&person).unwrap();
        let address = value.as_instance().unwrap().get("address").unwrap();
        assert_eq!(
            address.as_instance().unwrap().get("street"),
            Some(&Value::text(crate::TEXT_PLACEHOLDER))
        );
    }

    #[test]
    fn self_referential_type_stops_at_max_depth() {
        let mut introspector = InMemoryIntrospector::new();
        let node = TypeDescriptor::class("Node")
            .with_constructor(ConstructorDescriptor::public(vec![TypeDescriptor::class("Node")]));
        introspector
            .register(TypeDefinition::class("Node").field("next", node.clone()).constructor(&["next"]))
            .unwrap();
        let registry = empty_registry();
        let ctx = Instantiator::new(&introspector, &registry).with_max_depth(2);

        let err = ctx.instantiate(&node).unwrap_err();
        assert!(err.to_string().contains("nested instantiation exceeded depth 2"));
    }

    #[test]
    fn unknown_name_surfaces_type_resolution() {
        let introspector = InMemoryIntrospector::new();
        let registry = empty_registry();
        let ctx = Instantiator::new(&introspector, &registry);

        let err = ctx.instantiate_named("com.example.Missing").unwrap_err();
        assert!(matches!(
            err,
            InstantiationError::Resolution(CoreError::TypeResolution { .. })
        ));
    }

    #[test]
    fn unresolvable_shallow_class_surfaces_type_resolution() {
        let introspector = InMemoryIntrospector::new();
        let registry = empty_registry();
        let ctx = Instantiator::new(&introspector, &registry);

        let err = ctx.instantiate(&TypeDescriptor::class("Ghost")).unwrap_err();
        assert!(matches!(
            err,
            InstantiationError::Resolution(CoreError::TypeResolution { .. })
        ));
    }

    #[test]
    fn unregistered_parameter_type_keeps_its_resolution_cause() {
        let person = TypeDescriptor::class("Person")
            .with_constructor(ConstructorDescriptor::public(vec![TypeDescriptor::class("Ghost")]));
        let introspector = InMemoryIntrospector::new();
        let registry = empty_registry();
        let ctx = Instantiator::new(&introspector, &registry);

        let err = ctx.instantiate(&person).unwrap_err();
        match err {
            InstantiationError::ObjectInstantiation {
                cause: InstantiationCause::AllConstructorsFailed(attempts),
                ..
            } => {
                assert_eq!(attempts.len(), 1);
                assert!(matches!(
                    attempts[0].failure,
                    InstantiationError::Resolution(CoreError::TypeResolution { .. })
                ));
            }
            other => panic!("expected every constructor to fail, got {other}"),
        }
    }

    #[test]
    fn registered_class_without_constructors_still_falls_through() {
        let mut introspector = InMemoryIntrospector::new();
        let bare = introspector.register(TypeDefinition::class("Bare")).unwrap();
        let registry = empty_registry();
        let ctx = Instantiator::new(&introspector, &registry);

        let err = ctx.instantiate(&bare).unwrap_err();
        assert!(matches!(
            err,
            InstantiationError::ObjectInstantiation {
                cause: InstantiationCause::NoPublicConstructor,
                ..
            }
        ));
    }

    #[test]
    fn named_builtin_types_instantiate() {
        let introspector = InMemoryIntrospector::new();
        let registry = empty_registry();
        let ctx = Instantiator::new(&introspector, &registry);
        assert_eq!(ctx.instantiate_named("Double").unwrap(), Value::Double(0.0));
        assert_eq!(ctx.instantiate_named("char").unwrap(), Value::Character('\0'));
    }

    fn arb_constructor() -> impl Strategy<Value = ConstructorDescriptor> {
        (prop::collection::vec(Just(int()), 0..3), any::<bool>()).prop_map(|(params, public)| {
            if public {
                ConstructorDescriptor::public(params)
            } else {
                ConstructorDescriptor::non_public(params)
            }
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: a concrete class with a public zero-arg constructor always
        /// selects the zero-arg strategy, whatever other constructors it has.
        #[test]
        fn concrete_zero_arg_types_never_fall_through(
            others in prop::collection::vec(arb_constructor(), 0..5),
            position in 0usize..5,
        ) {
            let mut ctors = others;
            let at = position.min(ctors.len());
            ctors.insert(at, ConstructorDescriptor::public(vec![]));
            let ty = ctors
                .into_iter()
                .fold(TypeDescriptor::class("Generated"), |ty, c| ty.with_constructor(c));

            let strategy = select_strategy(&ty, &empty_registry());
            prop_assert_eq!(strategy.name(), "zero_arg_constructor");
        }

        /// Property: selection is deterministic for the same inputs.
        #[test]
        fn selection_is_deterministic(ctors in prop::collection::vec(arb_constructor(), 0..5)) {
            let ty = ctors
                .into_iter()
                .fold(TypeDescriptor::class("Generated"), |ty, c| ty.with_constructor(c));
            let registry = empty_registry();
            prop_assert_eq!(select_strategy(&ty, &registry), select_strategy(&ty, &registry));
        }
    }
}
