use std::time::SystemTime;

use super::output::ResultOutputStrategy;
use super::timings::Timings;

/// Data passed to report-listener factories when constructing listeners.
pub struct ListenerArguments {
    output_strategy: Box<dyn ResultOutputStrategy>,
    start_time: SystemTime,
    timings: Timings,
}

impl ListenerArguments {
    pub fn new(output_strategy: Box<dyn ResultOutputStrategy>, start_time: SystemTime) -> Self {
        Self {
            output_strategy,
            start_time,
            timings: Timings::new(),
        }
    }

    pub fn output_strategy(&self) -> &dyn ResultOutputStrategy {
        &*self.output_strategy
    }

    pub fn start_time(&self) -> SystemTime {
        self.start_time
    }

    pub fn timings(&self) -> &Timings {
        &self.timings
    }

    pub fn timings_mut(&mut self) -> &mut Timings {
        &mut self.timings
    }
}
