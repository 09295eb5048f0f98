use valuecheck_assertions::Assertions;
use valuecheck_core::{Instance, TypeDescriptor, Value};

use crate::config::Method;
use crate::error::SessionResult;
use crate::methods::{MethodTester, TesterContext};

/// `equals` must be an equivalence relation, reject null and foreign types,
/// and notice a change in any field.
#[derive(Debug, Default, Clone, Copy)]
pub struct EqualsTester;

impl MethodTester for EqualsTester {
    fn method(&self) -> Method {
        Method::Equals
    }

    fn test(
        &self,
        ty: &TypeDescriptor,
        base: &Value,
        ctx: &TesterContext<'_>,
        assertions: &mut Assertions,
    ) -> SessionResult<()> {
        let contract = ctx.contract();
        let same = base.clone();
        let third = base.clone();
        let shown = base.to_string();

        assertions
            .assert_that(format!("{ty} equals is reflexive"), shown.clone())
            .satisfies("to equal itself", |_| contract.equals(base, base));
        assertions
            .assert_that(format!("{ty} equals is consistent"), shown.clone())
            .satisfies("to equal itself on every call", |_| {
                (0..3).all(|_| contract.equals(base, base))
            });
        assertions
            .assert_that(format!("{ty} equals is symmetric"), shown.clone())
            .satisfies("and an equal copy to equal each other both ways", |_| {
                contract.equals(base, &same) && contract.equals(&same, base)
            });
        assertions
            .assert_that(format!("{ty} equals is transitive"), shown.clone())
            .satisfies("to equal a third copy when both copies equal each other", |_| {
                contract.equals(base, &same) && contract.equals(&same, &third) && contract.equals(base, &third)
            });
        assertions
            .assert_that(format!("{ty} equals rejects null"), shown.clone())
            .satisfies("not to equal null", |_| !contract.equals(base, &Value::Null));

        let foreign = Value::Object(Instance::new(format!("{}$Other", ty.name())));
        assertions
            .assert_that(format!("{ty} equals rejects other types"), shown.clone())
            .satisfies(&format!("not to equal {foreign}"), |_| !contract.equals(base, &foreign));

        for field in ctx.fields(ty) {
            let changed = ctx.with_mutated_field(base, &field)?;
            assertions
                .assert_that(format!("{field} participates in equals"), shown.clone())
                .satisfies(&format!("not to equal {changed}"), |_| !contract.equals(base, &changed));
        }
        Ok(())
    }
}
