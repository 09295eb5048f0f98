//! Method testers.
//!
//! Each tester checks one kind of object behaviour for one type, recording
//! every comparison into the session's [`Assertions`] log.

mod equals;
mod getter;
mod hash_code;
mod setter;
mod to_string;

pub use equals::EqualsTester;
pub use getter::GetterTester;
pub use hash_code::HashCodeTester;
pub use setter::SetterTester;
pub use to_string::ToStringTester;

use valuecheck_assertions::Assertions;
use valuecheck_core::{FieldDescriptor, Introspector, ObjectContract, TypeDescriptor, Value};
use valuecheck_instantiate::Instantiator;
use valuecheck_mutate::MutationChain;

use crate::config::Method;
use crate::error::{SessionError, SessionResult};

pub trait MethodTester {
    fn method(&self) -> Method;

    /// Check `ty`, starting from `base`, a freshly instantiated value.
    fn test(
        &self,
        ty: &TypeDescriptor,
        base: &Value,
        ctx: &TesterContext<'_>,
        assertions: &mut Assertions,
    ) -> SessionResult<()>;
}

/// The built-in tester for `method`.
pub fn tester_for(method: Method) -> &'static dyn MethodTester {
    match method {
        Method::Getter => &GetterTester,
        Method::Setter => &SetterTester,
        Method::Equals => &EqualsTester,
        Method::HashCode => &HashCodeTester,
        Method::ToString => &ToStringTester,
    }
}

/// Collaborators shared by the testers of one session.
#[derive(Clone, Copy)]
pub struct TesterContext<'s> {
    introspector: &'s dyn Introspector,
    contract: &'s dyn ObjectContract,
    chain: &'s MutationChain,
    instantiator: Instantiator<'s>,
}

impl<'s> TesterContext<'s> {
    pub fn new(
        contract: &'s dyn ObjectContract,
        chain: &'s MutationChain,
        instantiator: Instantiator<'s>,
    ) -> Self {
        Self {
            introspector: instantiator.introspector(),
            contract,
            chain,
            instantiator,
        }
    }

    pub fn contract(&self) -> &'s dyn ObjectContract {
        self.contract
    }

    pub fn fields(&self, ty: &TypeDescriptor) -> Vec<FieldDescriptor> {
        self.introspector.fields(ty)
    }

    pub fn instantiate(&self, ty: &TypeDescriptor) -> SessionResult<Value> {
        Ok(self.instantiator.instantiate(ty)?)
    }

    pub fn read(&self, instance: &Value, field: &FieldDescriptor) -> SessionResult<Value> {
        self.introspector
            .read(instance, field)
            .map_err(|e| SessionError::invocation("read", field, e))
    }

    /// A value for `field` that differs from the one `instance` holds.
    pub fn mutated_value(&self, instance: &Value, field: &FieldDescriptor) -> SessionResult<Value> {
        let current = self.read(instance, field)?;
        let next = self
            .chain
            .mutate(&current, &field.field_type, &self.instantiator)
            .map_err(|e| SessionError::mutation(field, e))?;
        tracing::trace!(field = %field, from = %current, to = %next, "mutated field");
        Ok(next)
    }

    /// A copy of `instance` whose `field` holds a different value.
    pub fn with_mutated_field(&self, instance: &Value, field: &FieldDescriptor) -> SessionResult<Value> {
        let next = self.mutated_value(instance, field)?;
        let mut copy = instance.clone();
        self.introspector
            .write(&mut copy, field, next)
            .map_err(|e| SessionError::invocation("write", field, e))?;
        Ok(copy)
    }
}

impl core::fmt::Debug for TesterContext<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TesterContext")
            .field("chain", self.chain)
            .field("instantiator", &self.instantiator)
            .finish_non_exhaustive()
    }
}
