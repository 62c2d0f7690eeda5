//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use scriptprops_core::AnalysisResult;
use std::io::Write;

/// JSON formatter - writes the whole result as one pretty-printed object
pub struct JsonFormatter<W: Write> {
    writer: W,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputFormatter for JsonFormatter<W> {
    fn write_result(&mut self, result: &AnalysisResult) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, result)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
