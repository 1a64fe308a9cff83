//! Static map regions.
//!
//! Regions are loaded once at setup and never change.  Their [`RegionKind`]
//! decides what they mean to a mover: where the population spawns, where
//! the beach ends, where safety begins, and which terrain is paved.

use std::fmt;
use std::str::FromStr;

use ev_core::{EvacError, Point2, Polygon, RegionId};

/// Surface of a plain terrain region.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Surface {
    /// Open ground (sand, dunes, rocks).
    Sand,
    /// Boardwalk or footpath.
    Trail,
    Parking,
    Street,
}

/// What a region means to a mover.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegionKind {
    /// Where the population is spawned.
    Start,
    /// Crossing one ends the beach leg (stairs, ramps).
    Transition,
    /// Reaching one ends the evacuation.
    Safe,
    /// Any other mapped ground.
    Terrain(Surface),
}

impl RegionKind {
    /// `true` if the region slows movers down.
    ///
    /// Only trail, parking and street terrain is paved; every other region
    /// (including start, transition and safe areas) counts as open ground.
    #[inline]
    pub fn is_open(self) -> bool {
        !matches!(
            self,
            RegionKind::Terrain(Surface::Trail | Surface::Parking | Surface::Street)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RegionKind::Start => "start",
            RegionKind::Transition => "transition",
            RegionKind::Safe => "safe",
            RegionKind::Terrain(Surface::Sand) => "sand",
            RegionKind::Terrain(Surface::Trail) => "trail",
            RegionKind::Terrain(Surface::Parking) => "parking",
            RegionKind::Terrain(Surface::Street) => "street",
        }
    }
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegionKind {
    type Err = EvacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "start" => RegionKind::Start,
            "transition" | "off_beach" => RegionKind::Transition,
            "safe" => RegionKind::Safe,
            "sand" | "open" => RegionKind::Terrain(Surface::Sand),
            "trail" => RegionKind::Terrain(Surface::Trail),
            "parking" => RegionKind::Terrain(Surface::Parking),
            "street" => RegionKind::Terrain(Surface::Street),
            other => return Err(EvacError::Config(format!("unknown region kind `{other}`"))),
        })
    }
}

/// A named, categorised polygon.
#[derive(Clone, Debug)]
pub struct Region {
    pub id:      RegionId,
    pub name:    String,
    pub kind:    RegionKind,
    pub polygon: Polygon,
}

// ── RegionSet ─────────────────────────────────────────────────────────────────

/// All regions of a map, indexed by [`RegionId`].
#[derive(Clone, Debug, Default)]
pub struct RegionSet {
    regions: Vec<Region>,
}

impl RegionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a region and return its id (sequential from 0).
    pub fn add(&mut self, name: impl Into<String>, kind: RegionKind, polygon: Polygon) -> RegionId {
        let id = RegionId(self.regions.len() as u32);
        self.regions.push(Region { id, name: name.into(), kind, polygon });
        id
    }

    #[inline]
    pub fn get(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> + '_ {
        self.regions.iter()
    }

    pub fn of_kind(&self, kind: RegionKind) -> impl Iterator<Item = &Region> + '_ {
        self.regions.iter().filter(move |r| r.kind == kind)
    }

    /// Distance from `p` to the closest region of `kind`, or `None` if the
    /// map has no such region.
    pub fn nearest_distance(&self, kind: RegionKind, p: Point2) -> Option<f64> {
        self.of_kind(kind)
            .map(|r| r.polygon.distance(p))
            .min_by(f64::total_cmp)
    }
}
