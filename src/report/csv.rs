use anyhow::Result;
use std::io::Write;

use super::output::ResultOutputStrategy;
use super::timings::Timings;

const TIMINGS_FILE: &str = "mutation-timings.csv";

/// Writes the per-stage timings of a run as a two-column CSV table.
pub struct CsvTimingsListener {
    out: Box<dyn Write>,
}

impl CsvTimingsListener {
    pub fn new(out: Box<dyn Write>) -> Self {
        Self { out }
    }

    pub fn from_strategy(strategy: &dyn ResultOutputStrategy) -> Result<Self> {
        Ok(Self::new(strategy.create_writer_for_file(TIMINGS_FILE)?))
    }

    /// Writes the header row.
    pub fn run_start(&mut self) -> Result<()> {
        writeln!(self.out, "{}", make_csv(&["stage", "timing"]))?;
        Ok(())
    }

    /// Writes one row per recorded stage, in stage order, then closes the
    /// output by consuming the listener.
    pub fn run_end(mut self, timings: &Timings) -> Result<()> {
        for (stage, span) in timings.timings() {
            let stage = stage.to_string().replace(' ', "");
            let millis = span.millis().to_string();
            writeln!(self.out, "{}", make_csv(&[stage.as_str(), millis.as_str()]))?;
        }
        self.out.flush()?;
        Ok(())
    }
}

fn make_csv(fields: &[&str]) -> String {
    fields.join(",")
}

#[cfg(test)]
mod tests {
    use super::super::output::test_tools::BufferOutput;
    use super::super::timings::Stage;
    use super::*;

    #[test]
    fn writes_header_then_stage_ordered_rows() {
        let output = BufferOutput::new();
        let mut timings = Timings::new();
        timings.start(Stage::TestMutations);
        timings.finish(Stage::TestMutations);
        timings.start(Stage::ScanTests);
        timings.finish(Stage::ScanTests);

        let mut listener = CsvTimingsListener::from_strategy(&output).unwrap();
        listener.run_start().unwrap();
        listener.run_end(&timings).unwrap();

        let lines: Vec<String> = output.contents().lines().map(str::to_owned).collect();
        assert_eq!(lines[0], "stage,timing");
        assert!(lines[1].starts_with("scantests,"));
        assert!(lines[2].starts_with("testmutations,"));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn empty_timings_write_only_the_header() {
        let output = BufferOutput::new();

        let mut listener = CsvTimingsListener::from_strategy(&output).unwrap();
        listener.run_start().unwrap();
        listener.run_end(&Timings::new()).unwrap();

        assert_eq!(output.contents(), "stage,timing\n");
    }
}
