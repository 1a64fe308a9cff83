//! Run configuration.
//!
//! Typically built in code or loaded from a JSON file by the application
//! crate (with the `serde` feature) and handed to `ev_sim::SimBuilder`.
//! Every field has a default matching the calibrated beach model, so a
//! config file only needs to name what it changes.

use crate::{EvacError, EvacResult, MoverClass};

// ── SpeedProfile ──────────────────────────────────────────────────────────────

/// Normal distribution a class's nominal walking speed is drawn from
/// (map units per tick).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpeedProfile {
    pub mean: f64,
    pub std_dev: f64,
}

impl SpeedProfile {
    pub const ADULT: SpeedProfile = SpeedProfile { mean: 1.12, std_dev: 0.17 };
    pub const CHILD: SpeedProfile = SpeedProfile { mean: 1.0, std_dev: 0.17 };
}

// ── EvacParams ────────────────────────────────────────────────────────────────

/// Radii and thresholds used by the graph builder, router, and movement
/// engine.  All distances are in map units.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EvacParams {
    /// Nominal speed is divided by this on open terrain.
    pub terrain_penalty: f64,
    /// Lower bound applied to drawn nominal speeds.
    pub min_speed: f64,
    /// Radius within which open terrain slows a mover down.
    pub terrain_radius: f64,
    /// Radius of the conflict/yield neighbourhood.
    pub conflict_radius: f64,
    /// A mover closer than this to its target has arrived.
    pub arrival_threshold: f64,
    /// Radius searched for the first road waypoint after leaving the beach.
    pub off_beach_search_radius: f64,
    /// Starting radius of the expanding beach-successor search.
    pub beach_search_start: f64,
    /// Increment of the expanding beach-successor search.
    pub beach_search_step: f64,
    /// Fixed radius of the road-successor search.
    pub road_search_radius: f64,
    /// Radius searched for a mover's first beach waypoint.
    pub initial_search_radius: f64,
}

impl Default for EvacParams {
    fn default() -> Self {
        Self {
            terrain_penalty:         1.3,
            min_speed:               0.05,
            terrain_radius:          5.0,
            conflict_radius:         3.0,
            arrival_threshold:       1.0,
            off_beach_search_radius: 15.0,
            beach_search_start:      10.0,
            beach_search_step:       5.0,
            road_search_radius:      20.0,
            initial_search_radius:   1_500.0,
        }
    }
}

impl EvacParams {
    /// Reject non-positive radii and divisors.
    pub fn validate(&self) -> EvacResult<()> {
        let positive = [
            ("terrain_penalty", self.terrain_penalty),
            ("min_speed", self.min_speed),
            ("terrain_radius", self.terrain_radius),
            ("conflict_radius", self.conflict_radius),
            ("arrival_threshold", self.arrival_threshold),
            ("off_beach_search_radius", self.off_beach_search_radius),
            ("beach_search_start", self.beach_search_start),
            ("beach_search_step", self.beach_search_step),
            ("road_search_radius", self.road_search_radius),
            ("initial_search_radius", self.initial_search_radius),
        ];
        for (name, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(EvacError::Config(format!("{name} must be positive, got {value}")));
            }
        }
        Ok(())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Adult population size.
    pub adults: usize,
    /// Child population size.
    pub children: usize,
    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
    /// Hard cap on simulated minutes.
    pub max_minutes: u32,
    /// Emit a mover snapshot every N ticks.  0 disables snapshots.
    pub snapshot_interval_ticks: u64,
    /// Movers whose compliance percentile (1..=100) is strictly greater
    /// than this take the shortcut to the off-beach transition.
    pub compliance_threshold: u8,
    pub adult_speed: SpeedProfile,
    pub child_speed: SpeedProfile,
    pub params: EvacParams,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            adults:                  100,
            children:                0,
            seed:                    42,
            max_minutes:             35,
            snapshot_interval_ticks: 0,
            compliance_threshold:    0,
            adult_speed:             SpeedProfile::ADULT,
            child_speed:             SpeedProfile::CHILD,
            params:                  EvacParams::default(),
        }
    }
}

impl SimConfig {
    /// Total number of movers.
    #[inline]
    pub fn population(&self) -> usize {
        self.adults + self.children
    }

    /// Speed distribution for `class`.
    #[inline]
    pub fn speed_profile(&self, class: MoverClass) -> SpeedProfile {
        match class {
            MoverClass::Adult => self.adult_speed,
            MoverClass::Child => self.child_speed,
        }
    }

    /// Check every constraint the builder relies on, including a non-empty
    /// population.
    pub fn validate(&self) -> EvacResult<()> {
        if self.population() == 0 {
            return Err(EvacError::Config("population must contain at least one mover".into()));
        }
        self.validate_model()
    }

    /// [`validate`](Self::validate) without the population check, for
    /// callers that add movers of their own.
    pub fn validate_model(&self) -> EvacResult<()> {
        if self.max_minutes == 0 {
            return Err(EvacError::Config("max_minutes must be at least 1".into()));
        }
        for (name, profile) in [("adult_speed", self.adult_speed), ("child_speed", self.child_speed)] {
            if !(profile.mean > 0.0) || !(profile.std_dev >= 0.0) || !profile.std_dev.is_finite() {
                return Err(EvacError::Config(format!(
                    "{name} needs a positive mean and a finite non-negative std_dev, got {profile:?}"
                )));
            }
        }
        self.params.validate()
    }
}
