//! `valuecheck-assertions` — deferred assertion aggregation.
//!
//! Comparisons never fail on the spot. Each one appends a
//! [`ComparisonResult`] to an [`Assertions`] log; [`Assertions::finalize`]
//! then reports every failure at once, in recording order.

pub mod aggregator;
pub mod error;

pub use aggregator::{AggregateOutcome, Assertions, ComparisonHandle, ComparisonResult};
pub use error::AggregatedComparisonFailure;
