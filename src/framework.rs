//! Contracts consumed from the third-party test framework
//!
//! The bridge never executes test code itself. It drives an opaque
//! framework-native runner through the traits in this module and observes
//! the per-test events the framework reports back.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::comm;

/// Framework-native description of a single executable test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestLeaf {
    pub display_name: String,
    pub class_name: String,
    pub method_name: String,
}

impl TestLeaf {
    pub fn new(
        display_name: impl Into<String>,
        class_name: impl Into<String>,
        method_name: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            class_name: class_name.into(),
            method_name: method_name.into(),
        }
    }

    /// The identity key outcomes for this leaf are recorded under.
    pub fn identity(&self) -> String {
        comm::identity_string(&self.class_name, &self.method_name)
    }
}

/// Hierarchical description tree exposed by a framework runner.
///
/// Composite nodes group children, leaves are individual tests.
#[derive(Debug, Clone)]
pub enum TestDescription {
    Suite {
        name: String,
        children: Vec<TestDescription>,
    },
    Test(TestLeaf),
}

impl TestDescription {
    pub fn is_test(&self) -> bool {
        matches!(self, TestDescription::Test(_))
    }
}

/// Receives per-test events while a runner executes its suite.
///
/// A failure is reported through `test_failed`; frameworks usually report
/// a `test_finished` for the same leaf afterwards as well.
pub trait RunListener {
    fn test_finished(&mut self, leaf: &TestLeaf);
    fn test_failed(&mut self, leaf: &TestLeaf, cause: crate::comm::FailureCause);
}

/// A framework-native runner: can describe the tests it contains and run
/// all of them in the current execution context.
///
/// `run` reports per-test results through the listener and returns `Err`
/// only for defects in the execution infrastructure itself. It blocks for
/// however long the suite takes; the bridge adds no timeout on top.
pub trait FrameworkRunner: Send + std::fmt::Debug {
    fn description(&self) -> TestDescription;
    fn run(&mut self, listener: &mut dyn RunListener) -> Result<()>;
}

/// A suite as registered in an isolation context: how to build a fresh
/// runner for it, and which test methods it declares.
///
/// The method list is the reflection surface enumeration uses to resolve
/// method bindings; a leaf whose method is not declared here still
/// enumerates, with a degraded description.
pub trait TestSuite: Send + Sync {
    fn runner(&self) -> Box<dyn FrameworkRunner>;
    fn test_methods(&self) -> Vec<String>;
}
