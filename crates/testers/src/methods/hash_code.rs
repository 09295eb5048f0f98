use valuecheck_assertions::Assertions;
use valuecheck_core::{TypeDescriptor, Value};

use crate::config::Method;
use crate::error::SessionResult;
use crate::methods::{MethodTester, TesterContext};

/// `hashCode` must be stable, agree with `equals` on equal copies and change
/// when any field changes.
#[derive(Debug, Default, Clone, Copy)]
pub struct HashCodeTester;

impl MethodTester for HashCodeTester {
    fn method(&self) -> Method {
        Method::HashCode
    }

    fn test(
        &self,
        ty: &TypeDescriptor,
        base: &Value,
        ctx: &TesterContext<'_>,
        assertions: &mut Assertions,
    ) -> SessionResult<()> {
        let contract = ctx.contract();
        let hash = contract.hash_code(base);

        assertions
            .assert_that(format!("{ty} hashCode is consistent"), hash)
            .is_equal_to(contract.hash_code(base));
        assertions
            .assert_that(format!("{ty} hashCode matches for equal copies"), hash)
            .is_equal_to(contract.hash_code(&base.clone()));

        for field in ctx.fields(ty) {
            let changed = ctx.with_mutated_field(base, &field)?;
            assertions
                .assert_that(format!("{field} participates in hashCode"), hash)
                .is_not_equal_to(contract.hash_code(&changed));
        }
        Ok(())
    }
}
