//! The `Sim` struct and its tick loop.

use std::fmt;

use tracing::{debug, info};

use ev_agent::MoverStore;
use ev_core::{AgentId, EvacClock, SimConfig, SimRng};
use ev_mobility::{MovementEngine, RoutingSummary};
use ev_spatial::{RegionSet, SpatialIndex, SpatialQuery, WaypointGraph};

use crate::{PhaseCounts, SimObserver, TickStats};

// ── World ─────────────────────────────────────────────────────────────────────

/// Everything the movers interact with, owned in one place and lent to the
/// engine each tick.
pub struct World {
    pub movers:  MoverStore,
    pub regions: RegionSet,
    pub graph:   WaypointGraph,
    /// Mover positions as of the end of the previous tick.
    pub index:   SpatialIndex,
}

// ── Termination / EvacReport ──────────────────────────────────────────────────

/// Why a run stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Termination {
    /// Every mover reached safety.
    Evacuated,
    /// The clock reached `max_minutes` first.
    TimeCap,
}

impl Termination {
    pub fn as_str(self) -> &'static str {
        match self {
            Termination::Evacuated => "evacuated",
            Termination::TimeCap => "time_cap",
        }
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final record handed to [`SimObserver::on_sim_end`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EvacReport {
    pub counts:      PhaseCounts,
    pub minute:      u32,
    pub second:      u32,
    /// Ticks executed.
    pub ticks:       u64,
    pub termination: Termination,
}

impl EvacReport {
    /// Elapsed simulated time as `m:ss`.
    pub fn time_label(&self) -> String {
        format!("{}:{:02}", self.minute, self.second)
    }
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    pub config: SimConfig,

    /// Tick counter with the derived minute/second clock.
    pub clock: EvacClock,

    pub world: World,

    /// Drives the per-tick activation order.
    pub rng: SimRng,

    /// Phase counts after every tick, starting with the counts before the
    /// first one.
    pub history: Vec<(EvacClock, PhaseCounts)>,

    /// Outcome of initial target assignment.
    pub routing: RoutingSummary,

    /// Set once a termination condition has been met.
    pub termination: Option<Termination>,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until a termination condition is met and return the final
    /// report.  At least one tick is always executed.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> EvacReport {
        let termination = loop {
            if let Some(reason) = self.termination {
                break reason;
            }
            self.step_tick(observer);
        };
        let report = self.report(termination);
        info!(
            reason = %termination,
            time = %report.time_label(),
            ticks = report.ticks,
            safe = report.counts.safe,
            remaining = report.counts.remaining(),
            "evacuation finished"
        );
        observer.on_sim_end(&report);
        report
    }

    /// Run at most `n` ticks, stopping early on termination.  Does not call
    /// `on_sim_end`.
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> Option<Termination> {
        for _ in 0..n {
            if self.termination.is_some() {
                break;
            }
            self.step_tick(observer);
        }
        self.termination
    }

    /// Execute exactly one tick and return the termination condition it
    /// triggered, if any.
    pub fn step_tick<O: SimObserver>(&mut self, observer: &mut O) -> Option<Termination> {
        self.clock.advance();
        observer.on_tick_start(&self.clock);

        let (counts, stats) = self.process_tick();
        self.history.push((self.clock, counts));
        observer.on_tick_end(&self.clock, &counts, &stats);

        let interval = self.config.snapshot_interval_ticks;
        if interval > 0 && self.clock.tick.0 % interval == 0 {
            observer.on_snapshot(&self.clock, &self.world.movers);
        }
        if self.clock.second == 0 {
            debug!(
                minute = self.clock.minute,
                safe = counts.safe,
                remaining = counts.remaining(),
                stuck = stats.stuck,
                "minute elapsed"
            );
        }

        self.termination = if counts.remaining() == 0 {
            Some(Termination::Evacuated)
        } else if self.clock.reached(self.config.max_minutes) {
            Some(Termination::TimeCap)
        } else {
            None
        };
        self.termination
    }

    /// Counts after the most recent tick (or the initial counts).
    pub fn counts(&self) -> PhaseCounts {
        self.history.last().map(|&(_, c)| c).unwrap_or_default()
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick(&mut self) -> (PhaseCounts, TickStats) {
        let mut order: Vec<AgentId> = self.world.movers.agent_ids().collect();
        self.rng.shuffle(&mut order);

        let World { movers, regions, graph, index } = &mut self.world;
        let engine = MovementEngine::new(&self.config.params, &*graph, &*regions, &*index);

        let mut counts = PhaseCounts::default();
        let mut stats = TickStats::default();
        for agent in order {
            let report = engine.step(agent, movers);
            stats.record(&report);
            counts.record(movers.phase[agent.index()]);
        }

        index.reindex(&movers.position);
        (counts, stats)
    }

    fn report(&self, termination: Termination) -> EvacReport {
        EvacReport {
            counts:      self.counts(),
            minute:      self.clock.minute,
            second:      self.clock.second,
            ticks:       self.clock.tick.0,
            termination,
        }
    }
}
