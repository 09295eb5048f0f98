//! Append-only comparison log.
//!
//! ## Lifecycle
//!
//! An [`Assertions`] value is OPEN while comparisons are recorded through
//! [`Assertions::assert_that`] handles. [`Assertions::finalize`] consumes it,
//! so nothing can be recorded after the outcome has been reported.

use core::fmt::Debug;

use crate::error::AggregatedComparisonFailure;

/// One completed comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonResult {
    description: String,
    passed: bool,
    message: String,
}

impl ComparisonResult {
    pub fn passed(description: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            passed: true,
            message: message.into(),
        }
    }

    pub fn failed(description: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            passed: false,
            message: message.into(),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_passed(&self) -> bool {
        self.passed
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn line(&self) -> String {
        format!("{}: {}", self.description, self.message)
    }
}

/// Pass/fail counts of the comparisons recorded so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateOutcome {
    pub passed: usize,
    pub failed: usize,
}

impl AggregateOutcome {
    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Session-scoped collector of comparison results.
#[derive(Debug, Default)]
pub struct Assertions {
    results: Vec<ComparisonResult>,
}

impl Assertions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a comparison scope for `subject`.
    ///
    /// Every verb called on the returned handle appends exactly one result.
    pub fn assert_that<T: Debug>(
        &mut self,
        description: impl Into<String>,
        subject: T,
    ) -> ComparisonHandle<'_, T> {
        ComparisonHandle {
            log: self,
            description: description.into(),
            subject,
        }
    }

    /// Append a result computed elsewhere.
    pub fn record(&mut self, result: ComparisonResult) {
        if !result.passed {
            tracing::debug!(
                description = %result.description,
                message = %result.message,
                "comparison failed"
            );
        }
        self.results.push(result);
    }

    pub fn results(&self) -> &[ComparisonResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn outcome(&self) -> AggregateOutcome {
        self.results
            .iter()
            .fold(AggregateOutcome::default(), |mut outcome, r| {
                if r.passed {
                    outcome.passed += 1;
                } else {
                    outcome.failed += 1;
                }
                outcome
            })
    }

    /// Close the log: `Ok(())` if every comparison passed, otherwise one
    /// failure listing each failing comparison in recording order.
    pub fn finalize(self) -> Result<(), AggregatedComparisonFailure> {
        let failures: Vec<ComparisonResult> =
            self.results.into_iter().filter(|r| !r.passed).collect();
        if failures.is_empty() {
            Ok(())
        } else {
            Err(AggregatedComparisonFailure::from_failures(failures))
        }
    }

    /// Like [`finalize`](Self::finalize), but panics with the aggregated
    /// message. For use inside `#[test]` functions.
    pub fn assert_all(self) {
        if let Err(failure) = self.finalize() {
            panic!("{failure}");
        }
    }
}

/// Comparison verbs over one subject.
///
/// Verbs consume and return the handle so several comparisons on the same
/// subject can be chained; each records its own result.
pub struct ComparisonHandle<'a, T> {
    log: &'a mut Assertions,
    description: String,
    subject: T,
}

impl<T: Debug> ComparisonHandle<'_, T> {
    pub fn subject(&self) -> &T {
        &self.subject
    }

    pub fn is_equal_to<U>(self, expected: U) -> Self
    where
        T: PartialEq<U>,
        U: Debug,
    {
        let passed = self.subject == expected;
        let message = format!("expected {:?} to be equal to {:?}", self.subject, expected);
        self.push(passed, message)
    }

    pub fn is_not_equal_to<U>(self, other: U) -> Self
    where
        T: PartialEq<U>,
        U: Debug,
    {
        let passed = self.subject != other;
        let message = format!("expected {:?} not to be equal to {:?}", self.subject, other);
        self.push(passed, message)
    }

    /// Record whether `predicate` holds for the subject. `expectation`
    /// describes what was expected, e.g. "to equal itself".
    pub fn satisfies(self, expectation: &str, predicate: impl FnOnce(&T) -> bool) -> Self {
        let passed = predicate(&self.subject);
        let message = format!("expected {:?} {}", self.subject, expectation);
        self.push(passed, message)
    }

    fn push(self, passed: bool, message: String) -> Self {
        let result = ComparisonResult {
            description: self.description.clone(),
            passed,
            message,
        };
        self.log.record(result);
        self
    }
}

impl<T: Debug + AsRef<str>> ComparisonHandle<'_, T> {
    pub fn contains(self, needle: &str) -> Self {
        let passed = self.subject.as_ref().contains(needle);
        let message = format!("expected {:?} to contain {:?}", self.subject, needle);
        self.push(passed, message)
    }
}
