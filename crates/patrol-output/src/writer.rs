//! The `OutputWriter` trait implemented by backend writers.

use crate::{AgentTraceRow, OutputResult, TickSummaryRow};

/// Sink for trace rows.
///
/// All methods are infallible from the observer's perspective; errors are
/// stored internally and retrieved with
/// [`TraceObserver::take_error`][crate::TraceObserver::take_error].
pub trait OutputWriter {
    /// Write a batch of per-agent rows.
    fn write_agents(&mut self, rows: &[AgentTraceRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
