//! Simulation time model.
//!
//! One tick is one simulated second.  `EvacClock` carries the tick counter
//! and the derived minute/second pair the reports are expressed in; the run
//! cap is checked against the minute component.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── EvacClock ─────────────────────────────────────────────────────────────────

/// Seconds per simulated minute.
pub const SECONDS_PER_MINUTE: u32 = 60;

/// Tick counter plus the derived minute/second display clock.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvacClock {
    /// Ticks processed so far.
    pub tick: Tick,
    pub minute: u32,
    /// Always in `0..60`.
    pub second: u32,
}

impl EvacClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one simulated second, rolling the minute at 60 seconds.
    #[inline]
    pub fn advance(&mut self) {
        self.tick = self.tick + 1;
        self.second += 1;
        if self.second == SECONDS_PER_MINUTE {
            self.minute += 1;
            self.second = 0;
        }
    }

    /// Total simulated seconds since the warning.
    #[inline]
    pub fn elapsed_secs(&self) -> u64 {
        self.minute as u64 * SECONDS_PER_MINUTE as u64 + self.second as u64
    }

    /// `true` once the minute component has reached `max_minutes`.
    #[inline]
    pub fn reached(&self, max_minutes: u32) -> bool {
        self.minute >= max_minutes
    }

    /// `m:ss` label used in reports.
    pub fn label(&self) -> String {
        format!("{}:{:02}", self.minute, self.second)
    }
}

impl fmt::Display for EvacClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}:{:02})", self.tick, self.minute, self.second)
    }
}
