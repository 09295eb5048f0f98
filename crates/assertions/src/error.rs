use thiserror::Error;

use crate::aggregator::ComparisonResult;

/// Every failed comparison of a session, reported once.
///
/// The message holds one line per failure, in recording order, each prefixed
/// with the description it was recorded under.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct AggregatedComparisonFailure {
    message: String,
    failures: Vec<ComparisonResult>,
}

impl AggregatedComparisonFailure {
    pub(crate) fn from_failures(failures: Vec<ComparisonResult>) -> Self {
        let message = failures
            .iter()
            .map(ComparisonResult::line)
            .collect::<Vec<_>>()
            .join("\n");
        Self { message, failures }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn failures(&self) -> &[ComparisonResult] {
        &self.failures
    }

    pub fn count(&self) -> usize {
        self.failures.len()
    }
}
