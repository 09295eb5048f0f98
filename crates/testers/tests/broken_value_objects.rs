use valuecheck_core::{
    BehaviorProfile, ConstructorRegistry, ConstructorSpec, FieldDescriptor, FieldSelection,
    InMemoryIntrospector, InvocationError, ObjectContract, PrimitiveKind, TypeDefinition,
    TypeDescriptor, Value,
};
use valuecheck_instantiate::{InstantiationCause, InstantiationError};
use valuecheck_mutate::MutationChain;
use valuecheck_testers::{Method, SessionError, TestSession, TesterConfig};

fn person(profile: BehaviorProfile) -> (InMemoryIntrospector, TypeDescriptor) {
    let mut introspector = InMemoryIntrospector::new();
    let ty = introspector
        .register(
            TypeDefinition::class("Person")
                .field("name", TypeDescriptor::text())
                .field("age", TypeDescriptor::primitive(PrimitiveKind::Integer))
                .zero_arg_constructor()
                .profile(profile),
        )
        .unwrap();
    (introspector, ty)
}

fn failing_descriptions(err: SessionError) -> Vec<String> {
    match err {
        SessionError::Comparison(failure) => failure
            .failures()
            .iter()
            .map(|f| f.description().to_string())
            .collect(),
        other => panic!("expected comparison failure, got {other}"),
    }
}

#[test]
fn equals_ignoring_a_field_is_caught() {
    valuecheck_observability::init_for_tests();
    let (introspector, ty) = person(BehaviorProfile::default().with_equality(FieldSelection::except(["age"])));
    let registry = ConstructorRegistry::new();
    let chain = MutationChain::standard();
    let session = TestSession::new(&introspector, &introspector, &registry, &chain)
        .with_config(TesterConfig::default().with_methods([Method::Equals]));

    let failures = failing_descriptions(session.check(&ty).unwrap_err());
    assert_eq!(failures, vec!["Person.age participates in equals"]);
}

#[test]
fn equals_ignoring_every_field_is_caught_in_order() {
    valuecheck_observability::init_for_tests();
    let (introspector, ty) = person(BehaviorProfile::default().with_equality(FieldSelection::Nothing));
    let registry = ConstructorRegistry::new();
    let chain = MutationChain::standard();
    let session = TestSession::new(&introspector, &introspector, &registry, &chain)
        .with_config(TesterConfig::default().with_methods([Method::Equals]));

    let failures = failing_descriptions(session.check(&ty).unwrap_err());
    assert_eq!(
        failures,
        vec![
            "Person.name participates in equals",
            "Person.age participates in equals",
        ]
    );
}

#[test]
fn to_string_omitting_a_field_is_caught() {
    valuecheck_observability::init_for_tests();
    let (introspector, ty) = person(BehaviorProfile::default().with_rendering(FieldSelection::only(["age"])));
    let registry = ConstructorRegistry::new();
    let chain = MutationChain::standard();
    let session = TestSession::new(&introspector, &introspector, &registry, &chain)
        .with_config(TesterConfig::from_json_str(r#"{"methods": ["to_string"]}"#).unwrap());

    let err = session.check(&ty).unwrap_err();
    assert!(err.to_string().contains("Person.name appears in toString: expected \"Person{age=0}\" to contain \"name=null\""));
    assert_eq!(failing_descriptions(err), vec!["Person.name appears in toString"]);
}

#[test]
fn failures_across_types_are_reported_together() {
    valuecheck_observability::init_for_tests();
    let mut introspector = InMemoryIntrospector::new();
    let broken_hash = introspector
        .register(
            TypeDefinition::class("Money")
                .field("amount", TypeDescriptor::primitive(PrimitiveKind::Long))
                .field("currency", TypeDescriptor::text())
                .zero_arg_constructor()
                .profile(BehaviorProfile::default().with_hashing(FieldSelection::only(["amount"]))),
        )
        .unwrap();
    let fine = introspector
        .register(
            TypeDefinition::class("Flag")
                .field("on", TypeDescriptor::primitive(PrimitiveKind::Boolean))
                .zero_arg_constructor(),
        )
        .unwrap();
    let broken_rendering = introspector
        .register(
            TypeDefinition::class("Label")
                .field("text", TypeDescriptor::text())
                .zero_arg_constructor()
                .profile(BehaviorProfile::default().with_rendering(FieldSelection::Nothing)),
        )
        .unwrap();
    let registry = ConstructorRegistry::new();
    let chain = MutationChain::standard();
    let session = TestSession::new(&introspector, &introspector, &registry, &chain);

    let failures = failing_descriptions(
        session
            .check_all([&broken_hash, &fine, &broken_rendering])
            .unwrap_err(),
    );
    assert_eq!(
        failures,
        vec![
            "Money.currency participates in hashCode",
            "Label.text appears in toString",
        ]
    );
}

/// Delegates to the in-memory contract, except for deliberately broken
/// accessors.
struct BrokenAccessors<'a> {
    inner: &'a InMemoryIntrospector,
}

impl ObjectContract for BrokenAccessors<'_> {
    fn equals(&self, left: &Value, right: &Value) -> bool {
        self.inner.equals(left, right)
    }

    fn hash_code(&self, value: &Value) -> u64 {
        self.inner.hash_code(value)
    }

    fn render(&self, value: &Value) -> String {
        self.inner.render(value)
    }

    fn call_getter(
        &self,
        instance: &Value,
        field: &FieldDescriptor,
    ) -> Option<Result<Value, InvocationError>> {
        if field.name == "age" {
            return Some(Ok(Value::Integer(0)));
        }
        self.inner.call_getter(instance, field)
    }

    fn call_setter(
        &self,
        instance: &mut Value,
        field: &FieldDescriptor,
        value: Value,
    ) -> Option<Result<(), InvocationError>> {
        if field.name == "name" {
            return Some(Ok(()));
        }
        self.inner.call_setter(instance, field, value)
    }
}

#[test]
fn broken_accessors_are_caught() {
    valuecheck_observability::init_for_tests();
    let (introspector, ty) = person(BehaviorProfile::default());
    let contract = BrokenAccessors { inner: &introspector };
    let registry = ConstructorRegistry::new();
    let chain = MutationChain::standard();
    let session = TestSession::new(&introspector, &contract, &registry, &chain)
        .with_config(TesterConfig::default().with_methods([Method::Getter, Method::Setter]));

    let failures = failing_descriptions(session.check(&ty).unwrap_err());
    assert_eq!(failures, vec!["getter of Person.age", "setter of Person.name"]);
}

#[test]
fn fields_without_accessors_are_skipped() {
    valuecheck_observability::init_for_tests();
    let (introspector, ty) = person(
        BehaviorProfile::default()
            .with_getters(FieldSelection::Nothing)
            .with_setters(FieldSelection::only(["age"])),
    );
    let registry = ConstructorRegistry::new();
    let chain = MutationChain::standard();
    let session = TestSession::new(&introspector, &introspector, &registry, &chain)
        .with_config(TesterConfig::default().with_methods([Method::Getter, Method::Setter]));

    session.check(&ty).unwrap();
}

fn positive() -> (InMemoryIntrospector, TypeDescriptor) {
    let mut introspector = InMemoryIntrospector::new();
    let ty = introspector
        .register(
            TypeDefinition::class("Positive")
                .field("n", TypeDescriptor::primitive(PrimitiveKind::Integer))
                .guarded_constructor(&["n"], |args| match args {
                    [Value::Integer(n)] if *n > 0 => Ok(()),
                    _ => Err("n must be positive".to_string()),
                }),
        )
        .unwrap();
    (introspector, ty)
}

#[test]
fn rejected_constructors_surface_every_attempt() {
    valuecheck_observability::init_for_tests();
    let (introspector, ty) = positive();
    let registry = ConstructorRegistry::new();
    let chain = MutationChain::standard();
    let session = TestSession::new(&introspector, &introspector, &registry, &chain);

    match session.check(&ty).unwrap_err() {
        SessionError::Instantiation(InstantiationError::ObjectInstantiation { ty, cause }) => {
            assert_eq!(ty.as_str(), "Positive");
            match cause {
                InstantiationCause::AllConstructorsFailed(attempts) => {
                    assert_eq!(attempts.len(), 1);
                    assert_eq!(attempts[0].signature, "Positive(int)");
                    assert!(attempts[0].failure.to_string().contains("n must be positive"));
                }
                other => panic!("expected every constructor to fail, got {other}"),
            }
        }
        other => panic!("expected instantiation failure, got {other}"),
    }
}

#[test]
fn registered_arguments_unlock_guarded_constructors() {
    valuecheck_observability::init_for_tests();
    let (introspector, ty) = positive();
    let registry = ConstructorRegistry::new().with(
        &ty,
        ConstructorSpec::new().with_argument(TypeDescriptor::primitive(PrimitiveKind::Integer), Value::Integer(5)),
    );
    let chain = MutationChain::standard();
    let session = TestSession::new(&introspector, &introspector, &registry, &chain);

    session.check(&ty).unwrap();
}
