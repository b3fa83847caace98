//! JSON output for run summaries

use std::io::Write;

use crate::error::Result;
use crate::pipeline::RunSummary;

/// JSON summary formatter
pub struct JsonOutput {
    pretty: bool,
}

impl JsonOutput {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }

    /// Serialize the summary followed by a newline
    pub fn render(&self, summary: &RunSummary, writer: &mut dyn Write) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, summary)?;
        } else {
            serde_json::to_writer(&mut *writer, summary)?;
        }
        writeln!(writer)?;

        Ok(())
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}
