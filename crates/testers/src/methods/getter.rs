use valuecheck_assertions::Assertions;
use valuecheck_core::{TypeDescriptor, Value};

use crate::config::Method;
use crate::error::{SessionError, SessionResult};
use crate::methods::{MethodTester, TesterContext};

/// A getter must return the field's current value. Checked on a mutated copy
/// so default values cannot mask a getter that returns a constant.
#[derive(Debug, Default, Clone, Copy)]
pub struct GetterTester;

impl MethodTester for GetterTester {
    fn method(&self) -> Method {
        Method::Getter
    }

    fn test(
        &self,
        ty: &TypeDescriptor,
        base: &Value,
        ctx: &TesterContext<'_>,
        assertions: &mut Assertions,
    ) -> SessionResult<()> {
        for field in ctx.fields(ty) {
            let changed = ctx.with_mutated_field(base, &field)?;
            let Some(result) = ctx.contract().call_getter(&changed, &field) else {
                tracing::trace!(field = %field, "no getter");
                continue;
            };
            let returned = result.map_err(|e| SessionError::invocation("getter", &field, e))?;
            let expected = ctx.read(&changed, &field)?;
            assertions
                .assert_that(format!("getter of {field}"), returned)
                .is_equal_to(expected);
        }
        Ok(())
    }
}
