//! Output writer for simulation results.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::metrics::GameMetrics;
use crate::types::OutputFormat;

pub struct OutputWriter {
    writer: Box<dyn Write>,
    format: OutputFormat,
}

impl OutputWriter {
    /// Write to `path`, or stdout when no path is given.
    pub fn new(path: Option<&Path>, format: OutputFormat) -> io::Result<Self> {
        let writer: Box<dyn Write> = match path {
            Some(path) => {
                if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                    std::fs::create_dir_all(dir)?;
                }
                Box::new(BufWriter::new(File::create(path)?))
            }
            None => Box::new(BufWriter::new(io::stdout())),
        };
        Ok(Self { writer, format })
    }

    pub fn write_game(&mut self, metrics: &GameMetrics) -> Result<(), Box<dyn std::error::Error>> {
        match self.format {
            OutputFormat::Jsonl => {
                let json = serde_json::to_string(metrics)?;
                writeln!(self.writer, "{json}")?;
            }
            OutputFormat::Text => writeln!(self.writer, "{}", metrics.summary_line())?,
        }
        Ok(())
    }

    pub fn finish(mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
