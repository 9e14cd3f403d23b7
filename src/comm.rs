//! Types and functions for communication across isolation boundaries
//!
//! The bridge moves two kinds of values between execution contexts:
//!
//! * The executor travels into the context that should run the tests (as its wire form, see `executor`)
//! * The outcome map travels back, keyed by identity strings since object identity does not survive the crossing
//!
//! Everything in this module is serde-serializable so that a boundary can be a thread, a process or a pipe.

mod outcome;

pub use outcome::{FailureCause, OutcomeMap, TestOutcome};

/// Derives the identity key of a test from its suite and method name.
///
/// The same derivation is used when building the outcome map and when
/// correlating outcomes back to enumerated test units, so the key must be
/// deterministic and independent of the context that produced it.
pub fn identity_string(class_name: &str, method_name: &str) -> String {
    format!("{}::{}", class_name, method_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_string_is_deterministic() {
        assert_eq!(identity_string("Sample", "a"), identity_string("Sample", "a"));
    }

    #[test]
    fn identity_string_separates_class_and_method() {
        assert_eq!(identity_string("Sample", "a"), "Sample::a");
    }
}
