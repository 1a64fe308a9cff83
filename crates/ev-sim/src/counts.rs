//! Per-tick aggregates: phase counts and movement diagnostics.

use ev_agent::MoverStore;
use ev_core::Phase;
use ev_mobility::{Motion, StepReport};

/// Number of movers in each phase.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PhaseCounts {
    pub susceptible:       usize,
    pub off_beach:         usize,
    pub child_susceptible: usize,
    pub child_off_beach:   usize,
    pub safe:              usize,
}

impl PhaseCounts {
    /// Count every mover in `store`.
    pub fn tally(store: &MoverStore) -> Self {
        let mut counts = Self::default();
        for &phase in &store.phase {
            counts.record(phase);
        }
        counts
    }

    #[inline]
    pub fn record(&mut self, phase: Phase) {
        *self.slot(phase) += 1;
    }

    #[inline]
    pub fn get(&self, phase: Phase) -> usize {
        match phase {
            Phase::Susceptible => self.susceptible,
            Phase::OffBeach => self.off_beach,
            Phase::ChildSusceptible => self.child_susceptible,
            Phase::ChildOffBeach => self.child_off_beach,
            Phase::Safe => self.safe,
        }
    }

    /// Movers not yet safe.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.susceptible + self.off_beach + self.child_susceptible + self.child_off_beach
    }

    #[inline]
    pub fn total(&self) -> usize {
        self.remaining() + self.safe
    }

    fn slot(&mut self, phase: Phase) -> &mut usize {
        match phase {
            Phase::Susceptible => &mut self.susceptible,
            Phase::OffBeach => &mut self.off_beach,
            Phase::ChildSusceptible => &mut self.child_susceptible,
            Phase::ChildOffBeach => &mut self.child_off_beach,
            Phase::Safe => &mut self.safe,
        }
    }
}

/// What the movers did during one tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    pub moved:          usize,
    pub rerouted:       usize,
    pub blocked:        usize,
    /// Movable movers without a target.
    pub stuck:          usize,
    pub stationary:     usize,
    pub arrivals:       usize,
    pub left_beach:     usize,
    pub reached_safety: usize,
}

impl TickStats {
    pub fn record(&mut self, report: &StepReport) {
        match report.motion {
            Motion::Inactive => {}
            Motion::Stuck => self.stuck += 1,
            Motion::Blocked => self.blocked += 1,
            Motion::Stationary => self.stationary += 1,
            Motion::Moved => self.moved += 1,
            Motion::Rerouted => self.rerouted += 1,
        }
        self.arrivals += report.arrived as usize;
        self.left_beach += report.left_beach as usize;
        self.reached_safety += report.reached_safety as usize;
    }
}
