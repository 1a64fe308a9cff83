//! The `OutputWriter` trait implemented by all backend writers.

use crate::{MoverSnapshotRow, OutputResult, PhaseCountRow, SummaryRow};

/// Sink for everything a run reports.
///
/// All methods are infallible from the observer's perspective: errors are
/// stored internally and retrieved with
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write one row of the per-tick phase-count time series.
    fn write_counts(&mut self, row: &PhaseCountRow) -> OutputResult<()>;

    /// Write a batch of mover snapshots.
    fn write_snapshots(&mut self, rows: &[MoverSnapshotRow]) -> OutputResult<()>;

    /// Write the final evacuation summary.
    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
