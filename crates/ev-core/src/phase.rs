//! Mover classification enums shared across the simulator crates.
//!
//! [`Phase`] is the evacuation state machine:
//!
//! ```text
//! Susceptible      ─┐                 ┌─> OffBeach      ─┐
//!                   ├─ off-beach ─────┤                  ├─ safe ─> Safe
//! ChildSusceptible ─┘                 └─> ChildOffBeach ─┘
//! ```
//!
//! `Safe` is absorbing and reachable from any phase.  No transition ever
//! lowers [`Phase::rank`].

use std::fmt;

/// Population class of a mover.  Fixed at creation.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoverClass {
    #[default]
    Adult,
    Child,
}

impl MoverClass {
    pub fn as_str(self) -> &'static str {
        match self {
            MoverClass::Adult => "adult",
            MoverClass::Child => "child",
        }
    }
}

/// Which waypoint graph a node (or a mover's current leg) belongs to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Network {
    /// Leads from the start areas to an off-beach transition.
    Beach,
    /// Leads from the transitions to a safe region.
    Road,
}

impl Network {
    pub fn as_str(self) -> &'static str {
        match self {
            Network::Beach => "beach",
            Network::Road => "road",
        }
    }
}

/// Evacuation phase of a mover.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Susceptible,
    ChildSusceptible,
    OffBeach,
    ChildOffBeach,
    Safe,
}

impl Phase {
    /// All phases in report column order.
    pub const ALL: [Phase; 5] = [
        Phase::Susceptible,
        Phase::OffBeach,
        Phase::ChildSusceptible,
        Phase::ChildOffBeach,
        Phase::Safe,
    ];

    /// Starting phase for a freshly spawned mover of `class`.
    #[inline]
    pub fn initial(class: MoverClass) -> Phase {
        match class {
            MoverClass::Adult => Phase::Susceptible,
            MoverClass::Child => Phase::ChildSusceptible,
        }
    }

    /// Phase entered when a mover of `class` leaves the beach.
    #[inline]
    pub fn off_beach(class: MoverClass) -> Phase {
        match class {
            MoverClass::Adult => Phase::OffBeach,
            MoverClass::Child => Phase::ChildOffBeach,
        }
    }

    /// Progress index: 0 on the beach, 1 off the beach, 2 safe.
    #[inline]
    pub fn rank(self) -> u8 {
        match self {
            Phase::Susceptible | Phase::ChildSusceptible => 0,
            Phase::OffBeach | Phase::ChildOffBeach => 1,
            Phase::Safe => 2,
        }
    }

    /// `true` for every phase that still moves and takes part in conflicts.
    #[inline]
    pub fn is_movable(self) -> bool {
        !matches!(self, Phase::Safe)
    }

    /// Label used for CSV columns and log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Susceptible => "susceptible",
            Phase::ChildSusceptible => "child_susceptible",
            Phase::OffBeach => "off_beach",
            Phase::ChildOffBeach => "child_off_beach",
            Phase::Safe => "safe",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
