//! `valuecheck-testers` — run equals/hashCode/toString/accessor checks
//! against value objects.
//!
//! A [`TestSession`] wires the instantiation dispatcher, the mutation chain
//! and the assertion aggregator together. Structural problems (a type that
//! cannot be built, a field that cannot be mutated) fail the session at once;
//! comparison failures are collected and reported together at the end.

pub mod config;
pub mod error;
pub mod methods;
pub mod session;

pub use config::{ConfigError, Method, TesterConfig};
pub use error::{SessionError, SessionResult};
pub use methods::{
    EqualsTester, GetterTester, HashCodeTester, MethodTester, SetterTester, TesterContext,
    ToStringTester,
};
pub use session::TestSession;
