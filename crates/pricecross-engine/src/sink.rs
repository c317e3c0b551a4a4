//! Output boundary: the engine hands assembled tables to a sink and never
//! touches persistence or styling itself.

use thiserror::Error;

use crate::report::ReportTable;

/// Failure reported by a sink; carried back as engine error context.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct SinkError {
    message: String,
}

impl SinkError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Consumes assembled report tables. Implementations own persistence and
/// presentation (spreadsheet writing, styling, highlight rendering).
pub trait ReportSink {
    /// Accept one table together with its optional highlight policy.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] when the table cannot be accepted; the
    /// pipeline records the failure for the category and moves on.
    fn write_table(&mut self, table: &ReportTable) -> Result<(), SinkError>;
}

/// In-memory sink that records every table it receives, in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub tables: Vec<ReportTable>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportSink for MemorySink {
    fn write_table(&mut self, table: &ReportTable) -> Result<(), SinkError> {
        self.tables.push(table.clone());
        Ok(())
    }
}
