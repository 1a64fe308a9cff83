//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use ev_agent::MoverStore;
use ev_core::{EvacClock, NodeId};
use ev_sim::{EvacReport, PhaseCounts, SimObserver, TickStats};

use crate::row::{MoverSnapshotRow, PhaseCountRow, SummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes the count time series, mover snapshots and
/// the final summary to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Write the initial counts as tick 0.  Call before `sim.run()` to
    /// include the starting state in the time series.
    pub fn record_initial(&mut self, counts: &PhaseCounts) {
        let row = PhaseCountRow {
            tick:   0,
            minute: 0,
            second: 0,
            counts: *counts,
            stats:  TickStats::default(),
        };
        let result = self.writer.write_counts(&row);
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, clock: &EvacClock, counts: &PhaseCounts, stats: &TickStats) {
        let row = PhaseCountRow {
            tick:   clock.tick.0,
            minute: clock.minute,
            second: clock.second,
            counts: *counts,
            stats:  *stats,
        };
        let result = self.writer.write_counts(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, clock: &EvacClock, movers: &MoverStore) {
        let rows: Vec<MoverSnapshotRow> = movers
            .agent_ids()
            .map(|agent| {
                let i = agent.index();
                MoverSnapshotRow {
                    agent_id: agent.0,
                    tick:     clock.tick.0,
                    class:    movers.class[i],
                    phase:    movers.phase[i],
                    x:        movers.position[i].x,
                    y:        movers.position[i].y,
                    speed:    movers.speed[i],
                    target:   movers.target[i].unwrap_or(NodeId::INVALID).0,
                }
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, report: &EvacReport) {
        let result = self.writer.write_summary(&SummaryRow::from(report));
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
