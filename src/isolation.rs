//! Execution contexts and the suite registry
//!
//! An isolation context stands in for a separate classloader or sandboxed
//! process: an environment with its own registry of loaded suite
//! definitions. A durable suite name resolves independently in every
//! context, which is what makes executors and adapters transferable.

use anyhow::{bail, Result};
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::framework::{FrameworkRunner, TestSuite};

lazy_static! {
    static ref SYSTEM: IsolationContext = IsolationContext::new("system");
}

/// A named execution context resolving durable suite names to suites.
///
/// Contexts are cheap handles; clones share the same registry. Whether
/// two values live on different sides of an isolation boundary is decided
/// by comparing context names, never object identity.
#[derive(Clone)]
pub struct IsolationContext {
    inner: Arc<ContextInner>,
}

struct ContextInner {
    name: String,
    suites: RwLock<HashMap<String, Arc<dyn TestSuite>>>,
}

impl IsolationContext {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(ContextInner {
                name: name.into(),
                suites: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// The root context every process starts with.
    pub fn system() -> IsolationContext {
        SYSTEM.clone()
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Makes a suite resolvable in this context under the given name.
    pub fn register(&self, name: impl Into<String>, suite: Arc<dyn TestSuite>) {
        self.inner
            .suites
            .write()
            .unwrap()
            .insert(name.into(), suite);
    }

    pub fn resolve(&self, name: &str) -> Option<Arc<dyn TestSuite>> {
        self.inner.suites.read().unwrap().get(name).cloned()
    }

    /// Builds a fresh framework runner for the named suite.
    ///
    /// Failing to produce a runner is fatal for the caller; there is no
    /// degraded mode without one.
    pub fn runner_for(&self, suite: &str) -> Result<Box<dyn FrameworkRunner>> {
        match self.resolve(suite) {
            Some(source) => Ok(source.runner()),
            None => bail!(
                "no runner available for suite `{}` in context `{}`",
                suite,
                self.name()
            ),
        }
    }
}
