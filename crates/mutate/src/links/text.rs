use valuecheck_core::classify;
use valuecheck_core::{TypeDescriptor, Value};
use valuecheck_instantiate::Instantiator;

use crate::chain::FieldMutator;
use crate::error::{MutationError, MutationResult};

/// Appended to non-empty text.
pub const TEXT_SUFFIX: &str = "_changed";
/// Replaces empty or absent text.
pub const TEXT_LITERAL: &str = "changed";

/// Textual fields: append a suffix, or use a literal when empty/absent.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextMutator;

impl FieldMutator for TextMutator {
    fn name(&self) -> &'static str {
        "text"
    }

    fn can_handle(&self, ty: &TypeDescriptor) -> bool {
        classify::is_text(ty)
    }

    fn mutate(
        &self,
        current: &Value,
        ty: &TypeDescriptor,
        _ctx: &Instantiator<'_>,
    ) -> MutationResult<Value> {
        match current {
            Value::Null => Ok(Value::text(TEXT_LITERAL)),
            Value::Text(s) if s.is_empty() => Ok(Value::text(TEXT_LITERAL)),
            Value::Text(s) => Ok(Value::text(format!("{s}{TEXT_SUFFIX}"))),
            other => Err(MutationError::mismatch(ty.name(), other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use valuecheck_core::{ConstructorRegistry, InMemoryIntrospector};

    fn mutate(current: &Value) -> MutationResult<Value> {
        let introspector = InMemoryIntrospector::new();
        let registry = ConstructorRegistry::new();
        let ctx = Instantiator::new(&introspector, &registry);
        TextMutator.mutate(current, &TypeDescriptor::text(), &ctx)
    }

    #[test]
    fn appends_suffix_to_existing_text() {
        assert_eq!(mutate(&Value::text("abc")).unwrap(), Value::text("abc_changed"));
    }

    #[test]
    fn empty_and_absent_text_become_the_literal() {
        assert_eq!(mutate(&Value::text("")).unwrap(), Value::text(TEXT_LITERAL));
        assert_eq!(mutate(&Value::Null).unwrap(), Value::text(TEXT_LITERAL));
    }

    #[test]
    fn rejects_non_text_values() {
        assert!(matches!(
            mutate(&Value::Integer(1)),
            Err(MutationError::ValueMismatch { found: "int", .. })
        ));
    }
}
