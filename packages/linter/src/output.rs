//! CSV output of issues.

use std::io::Write;

use csv::Writer;

use crate::config::CSV_COLUMNS;
use crate::error::{LintError, Result};
use crate::segment::{Issue, IssueSink};

/// Writes issues as CSV rows, flushing after each one.
///
/// The header row is written on construction, so a run without any
/// issue still produces a parseable file.
pub struct CsvIssueWriter<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> CsvIssueWriter<W> {
    /// Wrap `output` and write the header row.
    pub fn new(output: W) -> Result<Self> {
        let mut writer = Writer::from_writer(output);
        writer.write_record(CSV_COLUMNS)?;
        writer.flush()?;
        Ok(Self { writer })
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| LintError::Io(e.into_error()))
    }
}

impl<W: Write> IssueSink for CsvIssueWriter<W> {
    fn emit(&mut self, issue: Issue) -> Result<()> {
        self.writer.write_record(issue.as_record())?;
        self.writer.flush()?;
        Ok(())
    }
}
