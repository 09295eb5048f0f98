use valuecheck_assertions::Assertions;
use valuecheck_core::{TypeDescriptor, Value};

use crate::config::Method;
use crate::error::SessionResult;
use crate::methods::{MethodTester, TesterContext};

/// `toString` must show every field as `name=value`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ToStringTester;

impl MethodTester for ToStringTester {
    fn method(&self) -> Method {
        Method::ToString
    }

    fn test(
        &self,
        ty: &TypeDescriptor,
        base: &Value,
        ctx: &TesterContext<'_>,
        assertions: &mut Assertions,
    ) -> SessionResult<()> {
        let rendered = ctx.contract().render(base);
        for field in ctx.fields(ty) {
            let value = ctx.read(base, &field)?;
            assertions
                .assert_that(format!("{field} appears in toString"), rendered.as_str())
                .contains(&format!("{}={}", field.name, value));
        }
        Ok(())
    }
}
