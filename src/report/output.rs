use anyhow::Result;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Where report files end up.
///
/// Listeners only ever ask for a writer by file name; the strategy
/// decides what that name maps to.
pub trait ResultOutputStrategy {
    fn create_writer_for_file(&self, file: &str) -> Result<Box<dyn Write>>;
}

/// Writes report files into a directory, creating it on first use.
pub struct DirectoryResultOutput {
    dir: PathBuf,
}

impl DirectoryResultOutput {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ResultOutputStrategy for DirectoryResultOutput {
    fn create_writer_for_file(&self, file: &str) -> Result<Box<dyn Write>> {
        fs::create_dir_all(&self.dir)?;
        let out = File::create(self.dir.join(file))?;
        Ok(Box::new(BufWriter::new(out)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn creates_the_directory_and_the_file() {
        let dir = std::env::temp_dir().join(format!(
            "mutant-bridge-output-test-{}",
            std::process::id()
        ));
        let strategy = DirectoryResultOutput::new(&dir);

        {
            let mut writer = strategy.create_writer_for_file("report.csv").unwrap();
            writer.write_all(b"stage,timing\n").unwrap();
        }

        let mut written = String::new();
        File::open(dir.join("report.csv"))
            .unwrap()
            .read_to_string(&mut written)
            .unwrap();
        assert_eq!(written, "stage,timing\n");

        fs::remove_dir_all(&dir).unwrap();
    }
}
