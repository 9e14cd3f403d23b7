use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use crate::comm;

/// Identity of a single test as the host engine sees it.
///
/// Immutable after creation. Two descriptions are equal when they denote
/// the same logical test (same suite and method), regardless of the
/// display text the framework chose for them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Description {
    display_name: String,
    class_name: Option<String>,
    method: Option<TestMethod>,
}

/// A test method binding resolved against the declaring suite.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TestMethod {
    name: String,
}

impl TestMethod {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Description {
    pub fn new(
        display_name: impl Into<String>,
        class_name: Option<String>,
        method: Option<TestMethod>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            class_name,
            method,
        }
    }

    /// A description for a leaf whose declaring suite could not be
    /// resolved; only the display name identifies it.
    pub fn degraded(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            class_name: None,
            method: None,
        }
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    pub fn method(&self) -> Option<&TestMethod> {
        self.method.as_ref()
    }

    /// The identity key used to correlate this description with execution
    /// outcomes. Falls back to the display name when no suite and method
    /// binding exists.
    pub fn identity(&self) -> String {
        match (&self.class_name, &self.method) {
            (Some(class), Some(method)) => comm::identity_string(class, method.name()),
            _ => self.display_name.clone(),
        }
    }
}

impl PartialEq for Description {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for Description {}

impl Hash for Description {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_display_name() {
        let a = Description::new(
            "a(Sample)",
            Some("Sample".to_owned()),
            Some(TestMethod::new("a")),
        );
        let b = Description::new(
            "Sample#a",
            Some("Sample".to_owned()),
            Some(TestMethod::new("a")),
        );

        assert_eq!(a, b);
        assert_eq!(a.identity(), b.identity());
    }

    #[test]
    fn different_methods_are_not_equal() {
        let a = Description::new(
            "a(Sample)",
            Some("Sample".to_owned()),
            Some(TestMethod::new("a")),
        );
        let b = Description::new(
            "b(Sample)",
            Some("Sample".to_owned()),
            Some(TestMethod::new("b")),
        );

        assert_ne!(a, b);
    }

    #[test]
    fn degraded_identity_is_the_display_name() {
        let d = Description::degraded("weird[0](Generated)");

        assert_eq!(d.identity(), "weird[0](Generated)");
        assert_eq!(d.class_name(), None);
        assert!(d.method().is_none());
    }
}
