//! Bridging a framework-native runner into addressable test units
//!
//! The adapter owns one framework runner, enumerates its leaf tests into
//! units the host engine can schedule individually, and answers every
//! unit execution from a single memoized run of the whole suite. Only the
//! durable suite name survives a serialization boundary; everything else
//! is rebuilt from it on arrival.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

use crate::collector::ResultCollector;
use crate::comm::OutcomeMap;
use crate::description::{Description, TestMethod};
use crate::executor::{Executable, SuiteExecutor};
use crate::framework::{FrameworkRunner, TestDescription, TestLeaf};
use crate::isolation::IsolationContext;

/// Adapts one framework-native runner for the host engine.
///
/// The suite name is the durable part; the runner, the enumerated unit
/// list and the outcome map are transient and never assumed present after
/// the adapter crosses a boundary.
#[derive(Serialize, Deserialize)]
pub struct RunnerAdapter {
    suite: String,
    #[serde(skip)]
    state: Mutex<AdapterState>,
}

#[derive(Default)]
struct AdapterState {
    origin: Option<String>,
    runner: Option<Box<dyn FrameworkRunner>>,
    units: Vec<EnumeratedTest>,
    outcomes: Option<OutcomeMap>,
}

/// One enumerated leaf: the host-side description plus the
/// framework-native description it was derived from.
struct EnumeratedTest {
    leaf: TestLeaf,
    description: Description,
}

/// An individually schedulable test, paired with the adapter that can
/// execute it.
pub struct TestUnit {
    adapter: Arc<RunnerAdapter>,
    description: Description,
    leaf: TestLeaf,
}

impl TestUnit {
    pub fn description(&self) -> &Description {
        &self.description
    }

    /// The framework-native description this unit was enumerated from.
    pub fn leaf(&self) -> &TestLeaf {
        &self.leaf
    }

    /// The identity key outcomes for this unit are correlated under.
    pub fn identity(&self) -> String {
        self.leaf.identity()
    }

    /// Delegates entirely to the owning adapter.
    pub fn execute(
        &self,
        target: &IsolationContext,
        collector: &mut dyn ResultCollector,
    ) -> Result<()> {
        self.adapter.execute(target, self, collector)
    }
}

impl RunnerAdapter {
    /// Builds an adapter for the named suite, letting `context` construct
    /// the runner. Fails when no runner can be built; there is no partial
    /// adapter without one.
    pub fn for_suite(suite: impl Into<String>, context: &IsolationContext) -> Result<Arc<Self>> {
        let suite: String = suite.into();
        let runner = context.runner_for(&suite)?;
        Ok(Self::with_runner(suite, runner, context))
    }

    /// Builds an adapter around an already constructed runner.
    pub fn with_runner(
        suite: impl Into<String>,
        runner: Box<dyn FrameworkRunner>,
        context: &IsolationContext,
    ) -> Arc<Self> {
        let units = Self::enumerate(&*runner, context);
        Arc::new(Self {
            suite: suite.into(),
            state: Mutex::new(AdapterState {
                origin: Some(context.name().to_owned()),
                runner: Some(runner),
                units,
                outcomes: None,
            }),
        })
    }

    pub fn suite(&self) -> &str {
        &self.suite
    }

    /// The units this adapter currently knows, each holding a reference
    /// back to it.
    pub fn test_units(self: &Arc<Self>) -> Vec<TestUnit> {
        let state = self.state.lock().unwrap();
        state
            .units
            .iter()
            .map(|t| TestUnit {
                adapter: Arc::clone(self),
                description: t.description.clone(),
                leaf: t.leaf.clone(),
            })
            .collect()
    }

    /// Serializes the durable state for a transfer into another context.
    pub fn to_wire(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Deserializes an adapter and makes it usable in `context`.
    pub fn rehydrate(bytes: &[u8], context: &IsolationContext) -> Result<Arc<Self>> {
        let adapter: RunnerAdapter = serde_json::from_slice(bytes)?;
        adapter.ensure_ready(context)?;
        Ok(Arc::new(adapter))
    }

    /// Rebuilds the transient runner and unit list from the durable suite
    /// name. Must run before first use after a transfer; a no-op on an
    /// adapter that is already live. Fatal when the suite is no longer
    /// resolvable.
    pub fn ensure_ready(&self, context: &IsolationContext) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.runner.is_some() || state.outcomes.is_some() {
            return Ok(());
        }
        let runner = context
            .runner_for(&self.suite)
            .with_context(|| format!("cannot rebuild adapter for suite `{}`", self.suite))?;
        state.units = Self::enumerate(&*runner, context);
        state.origin = Some(context.name().to_owned());
        state.runner = Some(runner);
        Ok(())
    }

    /// Executes one unit: runs the whole suite on the first call, then
    /// answers this unit from the memoized outcome map.
    pub fn execute(
        &self,
        target: &IsolationContext,
        unit: &TestUnit,
        collector: &mut dyn ResultCollector,
    ) -> Result<()> {
        collector.notify_start(unit.description());
        let failure = {
            let mut state = self.state.lock().unwrap();
            self.run_if_required(&mut state, target)?;
            state
                .outcomes
                .as_ref()
                .and_then(|outcomes| outcomes.failure(&unit.identity()).cloned())
        };
        match failure {
            Some(cause) => collector.notify_end_with_cause(unit.description(), &cause),
            None => collector.notify_end(unit.description()),
        }
        Ok(())
    }

    /// Finds the enumerated description matching an identity key.
    pub fn description_for_identity(&self, identity: &str) -> Option<Description> {
        let state = self.state.lock().unwrap();
        state
            .units
            .iter()
            .find(|t| t.leaf.identity() == identity)
            .map(|t| t.description.clone())
    }

    fn run_if_required(&self, state: &mut AdapterState, target: &IsolationContext) -> Result<()> {
        if state.outcomes.is_some() {
            return Ok(());
        }
        // the runner is surrendered to the executor here and never used
        // again, whatever the outcome of the run
        let runner = state
            .runner
            .take()
            .context("adapter has no runner; ensure_ready must run after a transfer")?;
        let mut executor = SuiteExecutor::new(self.suite.clone(), runner);
        let outcomes = if state.origin.as_deref() != Some(target.name()) {
            executor.transfer_to(target)?.run()?
        } else {
            executor.run()?
        };
        state.outcomes = Some(outcomes);
        Ok(())
    }

    fn enumerate(runner: &dyn FrameworkRunner, context: &IsolationContext) -> Vec<EnumeratedTest> {
        let mut units = Vec::new();
        Self::gather_test_units(&mut units, &runner.description(), context);
        units
    }

    fn gather_test_units(
        units: &mut Vec<EnumeratedTest>,
        description: &TestDescription,
        context: &IsolationContext,
    ) {
        match description {
            TestDescription::Test(leaf) => units.push(Self::leaf_to_test_unit(leaf, context)),
            TestDescription::Suite { children, .. } => {
                for child in children {
                    Self::gather_test_units(units, child, context);
                }
            }
        }
    }

    fn leaf_to_test_unit(leaf: &TestLeaf, context: &IsolationContext) -> EnumeratedTest {
        let description = match context.resolve(&leaf.class_name) {
            Some(suite) => {
                let method = suite
                    .test_methods()
                    .iter()
                    .any(|m| m == &leaf.method_name)
                    .then(|| TestMethod::new(leaf.method_name.clone()));
                Description::new(
                    leaf.display_name.clone(),
                    Some(leaf.class_name.clone()),
                    method,
                )
            }
            // dynamically generated leaves may not resolve here; keep the
            // unit with its display name rather than failing enumeration
            None => Description::degraded(leaf.display_name.clone()),
        };
        EnumeratedTest {
            leaf: leaf.clone(),
            description,
        }
    }
}
