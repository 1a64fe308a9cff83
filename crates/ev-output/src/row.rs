//! Plain data row types written by output backends.

use ev_core::{MoverClass, Phase};
use ev_sim::{EvacReport, PhaseCounts, TickStats};

/// Phase counts and movement diagnostics after one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseCountRow {
    pub tick:   u64,
    pub minute: u32,
    pub second: u32,
    pub counts: PhaseCounts,
    pub stats:  TickStats,
}

/// One mover's state at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoverSnapshotRow {
    pub agent_id: u32,
    pub tick:     u64,
    pub class:    MoverClass,
    pub phase:    Phase,
    pub x:        f64,
    pub y:        f64,
    pub speed:    f64,
    /// Target waypoint; `u32::MAX` when the mover has none.
    pub target:   u32,
}

/// The final record of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryRow {
    pub counts: PhaseCounts,
    pub minute: u32,
    pub second: u32,
}

impl SummaryRow {
    /// `m:ss`.
    pub fn time(&self) -> String {
        format!("{}:{:02}", self.minute, self.second)
    }
}

impl From<&EvacReport> for SummaryRow {
    fn from(report: &EvacReport) -> Self {
        Self { counts: report.counts, minute: report.minute, second: report.second }
    }
}
