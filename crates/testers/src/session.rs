//! Test session orchestration.
//!
//! A session composes the collaborators the engine needs and runs the
//! configured method testers for one or more types.
//!
//! ## Flow
//!
//! ```text
//! TypeDescriptor
//!   ↓
//! 1. Instantiate a base value (strategy dispatcher)
//!   ↓
//! 2. For each configured method tester:
//!      mutate fields on copies (mutation chain), compare behaviour
//!      through the object contract, record every comparison
//!   ↓
//! 3. Finalize the aggregator: one failure listing every failed comparison
//! ```
//!
//! ## Error Semantics
//!
//! - **Structural failures** (type resolution, instantiation, mutation, accessor
//!   invocation) stop the session at once and are returned as they occur.
//! - **Comparison failures** are deferred and returned together as
//!   [`SessionError::Comparison`] after every check has run.
//!
//! The session holds no mutable state of its own; the aggregator is created
//! per call (or supplied by the caller via [`TestSession::record`]).

use valuecheck_assertions::Assertions;
use valuecheck_core::{ConstructorRegistry, Introspector, ObjectContract, TypeDescriptor};
use valuecheck_instantiate::Instantiator;
use valuecheck_mutate::MutationChain;

use crate::config::TesterConfig;
use crate::error::SessionResult;
use crate::methods::{TesterContext, tester_for};

pub struct TestSession<'a> {
    introspector: &'a dyn Introspector,
    contract: &'a dyn ObjectContract,
    registry: &'a ConstructorRegistry,
    chain: &'a MutationChain,
    config: TesterConfig,
}

impl<'a> TestSession<'a> {
    pub fn new(
        introspector: &'a dyn Introspector,
        contract: &'a dyn ObjectContract,
        registry: &'a ConstructorRegistry,
        chain: &'a MutationChain,
    ) -> Self {
        Self {
            introspector,
            contract,
            registry,
            chain,
            config: TesterConfig::default(),
        }
    }

    pub fn with_config(mut self, config: TesterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &TesterConfig {
        &self.config
    }

    /// Install the process-wide subscriber in the configured format.
    pub fn init_logging(&self) {
        valuecheck_observability::init_with(self.config.log_format);
    }

    fn instantiator(&self) -> Instantiator<'a> {
        Instantiator::new(self.introspector, self.registry).with_max_depth(self.config.max_depth)
    }

    /// Run every configured tester against `ty`.
    pub fn check(&self, ty: &TypeDescriptor) -> SessionResult<()> {
        self.check_all(std::iter::once(ty))
    }

    /// Resolve `name` through the introspector, then [`check`](Self::check) it.
    pub fn check_named(&self, name: &str) -> SessionResult<()> {
        let ty = self.introspector.resolve(name)?;
        self.check(&ty)
    }

    /// Check several types into a single aggregated outcome.
    pub fn check_all<'t>(&self, types: impl IntoIterator<Item = &'t TypeDescriptor>) -> SessionResult<()> {
        let mut assertions = Assertions::new();
        for ty in types {
            self.record(ty, &mut assertions)?;
        }

        let outcome = assertions.outcome();
        tracing::info!(
            passed = outcome.passed,
            failed = outcome.failed,
            "session finished"
        );
        assertions.finalize()?;
        Ok(())
    }

    /// Run the configured testers for `ty`, recording into `assertions`
    /// without finalizing it.
    pub fn record(&self, ty: &TypeDescriptor, assertions: &mut Assertions) -> SessionResult<()> {
        tracing::info!(ty = %ty.name(), methods = ?self.config.methods, "checking type");

        let ctx = TesterContext::new(self.contract, self.chain, self.instantiator());
        let base = ctx.instantiate(ty)?;

        for method in &self.config.methods {
            let tester = tester_for(*method);
            let before = assertions.len();
            tester.test(ty, &base, &ctx, assertions)?;
            tracing::debug!(
                ty = %ty.name(),
                method = %tester.method(),
                comparisons = assertions.len() - before,
                "method tester finished"
            );
        }
        Ok(())
    }
}

impl core::fmt::Debug for TestSession<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TestSession")
            .field("registry", self.registry)
            .field("chain", self.chain)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
