//! Simulation observer trait for progress reporting and data collection.

use ev_agent::MoverStore;
use ev_core::EvacClock;

use crate::{EvacReport, PhaseCounts, TickStats};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, clock: &EvacClock, counts: &PhaseCounts, _: &TickStats) {
///         if clock.second == 0 {
///             println!("{}: {} safe", clock.label(), counts.safe);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the start of each tick, after the clock has advanced.
    fn on_tick_start(&mut self, _clock: &EvacClock) {}

    /// Called at the end of each tick with that tick's phase counts.
    fn on_tick_end(&mut self, _clock: &EvacClock, _counts: &PhaseCounts, _stats: &TickStats) {}

    /// Called every `config.snapshot_interval_ticks` ticks with read-only
    /// access to every mover.
    fn on_snapshot(&mut self, _clock: &EvacClock, _movers: &MoverStore) {}

    /// Called once when the run terminates.
    fn on_sim_end(&mut self, _report: &EvacReport) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
