//! Executing a suite inside an execution context
//!
//! The executor wraps a framework-native runner, drives it to completion
//! and collects every per-test result into an outcome map. It is the part
//! of the bridge that may cross an isolation boundary: its wire form is
//! the durable suite name, and receiving it in another context rebuilds a
//! fully independent executor from that context's own registry.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::comm::{FailureCause, OutcomeMap};
use crate::framework::{FrameworkRunner, RunListener, TestLeaf};
use crate::isolation::IsolationContext;

/// Capability to run a suite of tests and produce the outcome map.
///
/// Callers that received an executor across a boundary hold it only
/// through this trait, without static linkage to the concrete type.
pub trait Executable: Send {
    fn run(&mut self) -> Result<OutcomeMap>;
}

/// Runs all tests of one framework-native runner in the current context.
pub struct SuiteExecutor {
    suite: String,
    runner: Box<dyn FrameworkRunner>,
}

/// What actually crosses the boundary: everything transferable about an
/// executor is its durable suite name.
#[derive(Serialize, Deserialize)]
struct ExecutorWire {
    suite: String,
}

impl SuiteExecutor {
    pub fn new(suite: impl Into<String>, runner: Box<dyn FrameworkRunner>) -> Self {
        Self {
            suite: suite.into(),
            runner,
        }
    }

    pub fn suite(&self) -> &str {
        &self.suite
    }

    /// Produces an independent copy of this executor inside `target`.
    ///
    /// The copy is built from bytes and the target context's registry
    /// alone; nothing of the local runner is shared with it. Fails when
    /// the target context cannot resolve the suite.
    pub fn transfer_to(&self, target: &IsolationContext) -> Result<Box<dyn Executable>> {
        let wire = serde_json::to_vec(&ExecutorWire {
            suite: self.suite.clone(),
        })?;
        let received = Self::receive(&wire, target)?;
        Ok(Box::new(received))
    }

    /// Rebuilds an executor from its wire form in the receiving context.
    pub fn receive(bytes: &[u8], context: &IsolationContext) -> Result<SuiteExecutor> {
        let wire: ExecutorWire = serde_json::from_slice(bytes)?;
        let runner = context.runner_for(&wire.suite).with_context(|| {
            format!(
                "cannot rebuild executor for suite `{}` in context `{}`",
                wire.suite,
                context.name()
            )
        })?;
        Ok(SuiteExecutor::new(wire.suite, runner))
    }
}

impl Executable for SuiteExecutor {
    fn run(&mut self) -> Result<OutcomeMap> {
        let mut collector = OutcomeCollector {
            outcomes: OutcomeMap::new(),
        };
        self.runner.run(&mut collector)?;
        Ok(collector.outcomes)
    }
}

/// Turns the framework's per-test events into outcome map entries.
struct OutcomeCollector {
    outcomes: OutcomeMap,
}

impl RunListener for OutcomeCollector {
    fn test_finished(&mut self, leaf: &TestLeaf) {
        self.outcomes.record_pass(leaf.identity());
    }

    fn test_failed(&mut self, leaf: &TestLeaf, cause: FailureCause) {
        self.outcomes.record_failure(leaf.identity(), cause);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comm::TestOutcome;
    use crate::framework::test_tools::{ScriptedSuite, ScriptedTest};
    use crate::framework::TestSuite;
    use std::sync::Arc;

    fn sample_suite() -> ScriptedSuite {
        ScriptedSuite::new(
            "Sample",
            vec![ScriptedTest::passing("a"), ScriptedTest::failing("b", "boom")],
        )
    }

    #[test]
    fn collects_one_outcome_per_test() {
        let suite = sample_suite();
        let mut executor = SuiteExecutor::new("Sample", suite.runner());

        let outcomes = executor.run().unwrap();

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes.outcome("Sample::a"), Some(&TestOutcome::Passed));
        assert_eq!(outcomes.failure("Sample::b").unwrap().message(), "boom");
    }

    #[test]
    fn transfer_runs_in_the_target_registry() {
        let local = IsolationContext::new("local");
        let target = IsolationContext::new("worker");
        let local_suite = sample_suite();
        let target_suite = sample_suite();
        let target_runs = target_suite.run_counter();
        local.register("Sample", Arc::new(local_suite));
        target.register("Sample", Arc::new(target_suite));

        let executor = SuiteExecutor::new("Sample", local.runner_for("Sample").unwrap());
        let mut transferred = executor.transfer_to(&target).unwrap();
        let outcomes = transferred.run().unwrap();

        assert_eq!(target_runs.load(std::sync::atomic::Ordering::SeqCst), 1);
        assert_eq!(outcomes.len(), 2);
    }

    #[test]
    fn transfer_into_unaware_context_fails() {
        let local = IsolationContext::new("local");
        local.register("Sample", Arc::new(sample_suite()));
        let target = IsolationContext::new("worker");

        let executor = SuiteExecutor::new("Sample", local.runner_for("Sample").unwrap());

        assert!(executor.transfer_to(&target).is_err());
    }
}
