use valuecheck_assertions::Assertions;
use valuecheck_core::{TypeDescriptor, Value};

use crate::config::Method;
use crate::error::{SessionError, SessionResult};
use crate::methods::{MethodTester, TesterContext};

/// A setter must store exactly the value it is given.
#[derive(Debug, Default, Clone, Copy)]
pub struct SetterTester;

impl MethodTester for SetterTester {
    fn method(&self) -> Method {
        Method::Setter
    }

    fn test(
        &self,
        ty: &TypeDescriptor,
        base: &Value,
        ctx: &TesterContext<'_>,
        assertions: &mut Assertions,
    ) -> SessionResult<()> {
        for field in ctx.fields(ty) {
            let next = ctx.mutated_value(base, &field)?;
            let mut target = base.clone();
            let Some(result) = ctx.contract().call_setter(&mut target, &field, next.clone()) else {
                tracing::trace!(field = %field, "no setter");
                continue;
            };
            result.map_err(|e| SessionError::invocation("setter", &field, e))?;
            let stored = ctx.read(&target, &field)?;
            assertions
                .assert_that(format!("setter of {field}"), stored)
                .is_equal_to(next);
        }
        Ok(())
    }
}
