use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Result of running a single test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestOutcome {
    /// test pass
    Passed,
    /// the test threw or asserted
    Failed(FailureCause),
}

/// Opaque payload describing why a test failed.
///
/// Typically a panic message or assertion summary; an optional detail
/// carries whatever trace the framework was able to capture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureCause {
    message: String,
    detail: Option<String>,
}

impl FailureCause {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            detail: Some(detail.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }
}

impl fmt::Display for FailureCause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{}\n{}", self.message, detail),
            None => write!(f, "{}", self.message),
        }
    }
}

/// The per-run result table produced by executing all tests under one runner.
///
/// Keyed by identity strings (see `comm::identity_string`). Built exactly
/// once per adapter, immutable afterwards. A key that is absent reads as a
/// pass, so a lookup for a test the run never matched does not fail.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutcomeMap {
    outcomes: HashMap<String, TestOutcome>,
}

impl OutcomeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a clean finish. A failure already recorded for the same
    /// identity wins, since frameworks report a finish event after the
    /// failure event for the same test.
    pub fn record_pass(&mut self, identity: impl Into<String>) {
        self.outcomes
            .entry(identity.into())
            .or_insert(TestOutcome::Passed);
    }

    pub fn record_failure(&mut self, identity: impl Into<String>, cause: FailureCause) {
        self.outcomes
            .insert(identity.into(), TestOutcome::Failed(cause));
    }

    pub fn outcome(&self, identity: &str) -> Option<&TestOutcome> {
        self.outcomes.get(identity)
    }

    /// The failure cause for the given identity, if the test failed.
    pub fn failure(&self, identity: &str) -> Option<&FailureCause> {
        match self.outcomes.get(identity) {
            Some(TestOutcome::Failed(cause)) => Some(cause),
            _ => None,
        }
    }

    pub fn identities(&self) -> impl Iterator<Item = &str> {
        self.outcomes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_pass_and_failure() {
        let mut map = OutcomeMap::new();
        map.record_pass("Sample::a");
        map.record_failure("Sample::b", FailureCause::new("boom"));

        assert_eq!(map.outcome("Sample::a"), Some(&TestOutcome::Passed));
        assert_eq!(map.failure("Sample::b").unwrap().message(), "boom");
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn pass_does_not_overwrite_failure() {
        let mut map = OutcomeMap::new();
        map.record_failure("Sample::b", FailureCause::new("boom"));
        map.record_pass("Sample::b");

        assert_eq!(map.failure("Sample::b").unwrap().message(), "boom");
    }

    #[test]
    fn absent_identity_has_no_outcome() {
        let map = OutcomeMap::new();

        assert_eq!(map.outcome("Sample::missing"), None);
        assert_eq!(map.failure("Sample::missing"), None);
    }

    #[test]
    fn survives_a_serialization_boundary() {
        let mut map = OutcomeMap::new();
        map.record_pass("Sample::a");
        map.record_failure("Sample::b", FailureCause::with_detail("boom", "at sample.rs:3"));

        let bytes = serde_json::to_vec(&map).unwrap();
        let back: OutcomeMap = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(back.outcome("Sample::a"), Some(&TestOutcome::Passed));
        assert_eq!(back.failure("Sample::b").unwrap().detail(), Some("at sample.rs:3"));
    }
}
