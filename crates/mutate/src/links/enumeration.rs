use valuecheck_core::classify;
use valuecheck_core::{EnumConstant, TypeDescriptor, Value};
use valuecheck_instantiate::Instantiator;

use crate::chain::FieldMutator;
use crate::error::{MutationError, MutationResult};

/// Enumerations with at least two constants: the next constant in declaration
/// order, wrapping from the last to the first. An absent value becomes the
/// first constant.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnumerationMutator;

impl FieldMutator for EnumerationMutator {
    fn name(&self) -> &'static str {
        "enumeration"
    }

    fn can_handle(&self, ty: &TypeDescriptor) -> bool {
        classify::enum_constants(ty).is_some_and(|constants| constants.len() >= 2)
    }

    fn mutate(
        &self,
        current: &Value,
        ty: &TypeDescriptor,
        _ctx: &Instantiator<'_>,
    ) -> MutationResult<Value> {
        let constants = classify::enum_constants(ty).unwrap_or_default();
        if constants.len() < 2 {
            return Err(MutationError::NoMutatorAvailable {
                ty: ty.name().clone(),
            });
        }

        let next = match current {
            Value::Null => 0,
            Value::Enum(constant) => {
                let position = constants
                    .iter()
                    .position(|c| *c == constant.name)
                    .ok_or_else(|| MutationError::UnknownConstant {
                        ty: ty.name().clone(),
                        constant: constant.name.clone(),
                    })?;
                (position + 1) % constants.len()
            }
            other => return Err(MutationError::mismatch(ty.name(), other)),
        };
        Ok(Value::Enum(EnumConstant::new(
            ty.name().clone(),
            constants[next].clone(),
        )))
    }
}
