//! Drives third-party test frameworks for a mutation-testing engine
//!
//! A host engine schedules individual test methods, but a framework only
//! knows how to describe and run whole suites, possibly inside a
//! different execution context than the caller's. This crate bridges the
//! two: it enumerates a framework-native runner into addressable test
//! units, executes the suite at most once per adapter under an explicit
//! isolation boundary, and correlates the per-test outcomes back to the
//! caller through identity strings that survive serialization.

mod adapter;
mod collector;
mod description;
mod executor;
mod framework;
mod isolation;

pub mod comm;
pub mod report;

pub use adapter::{RunnerAdapter, TestUnit};
pub use collector::ResultCollector;
pub use description::{Description, TestMethod};
pub use executor::{Executable, SuiteExecutor};
pub use framework::{FrameworkRunner, RunListener, TestDescription, TestLeaf, TestSuite};
pub use isolation::IsolationContext;
