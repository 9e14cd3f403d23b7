use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, Instant};

/// Named stages of a mutation run, in report order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Stage {
    ScanTests,
    CoverageAnalysis,
    BuildMutations,
    TestMutations,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Stage::ScanTests => "scan tests",
            Stage::CoverageAnalysis => "coverage analysis",
            Stage::BuildMutations => "build mutations",
            Stage::TestMutations => "test mutations",
        };
        write!(f, "{}", name)
    }
}

/// Wall-clock span of one stage.
#[derive(Debug, Clone, Copy)]
pub struct TimeSpan {
    start: Instant,
    end: Option<Instant>,
}

impl TimeSpan {
    fn started_at(start: Instant) -> Self {
        Self { start, end: None }
    }

    fn finish(&mut self, end: Instant) {
        self.end = Some(end);
    }

    /// Elapsed time; a span that never finished reads as empty.
    pub fn duration(&self) -> Duration {
        match self.end {
            Some(end) => end - self.start,
            None => Duration::from_secs(0),
        }
    }

    pub fn millis(&self) -> u128 {
        self.duration().as_millis()
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rounded = Duration::from_secs(self.duration().as_secs());
        write!(f, "{}", humantime::format_duration(rounded))
    }
}

/// Records how long each stage of a run took.
///
/// Keyed by stage, so iteration is already in report order.
#[derive(Debug, Default)]
pub struct Timings {
    timings: BTreeMap<Stage, TimeSpan>,
}

impl Timings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts timing a stage. Starting the same stage again restarts it.
    pub fn start(&mut self, stage: Stage) {
        self.timings.insert(stage, TimeSpan::started_at(Instant::now()));
    }

    /// Finishes a stage; a finish without a start is ignored.
    pub fn finish(&mut self, stage: Stage) {
        if let Some(span) = self.timings.get_mut(&stage) {
            span.finish(Instant::now());
        }
    }

    pub fn timings(&self) -> &BTreeMap<Stage, TimeSpan> {
        &self.timings
    }
}
