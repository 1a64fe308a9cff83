//! Terrain sensing.
//!
//! A mover walks at its penalised speed whenever anything open lies within
//! the sensing radius, and at its nominal speed otherwise.  Paved terrain
//! (trail, parking, street) and waypoint markers are the only things that
//! are not open: an open-ground region or any other mover in range slows
//! the mover down.  Mover neighbours count whatever their phase, safe
//! movers included.

use ev_core::{AgentId, Point2};
use ev_spatial::{EntityRef, RegionSet, SpatialQuery};

/// `true` if open ground or another mover lies within `radius` of `at`.
///
/// `agent` is the mover doing the sensing and never counts itself.
/// Stateless: the answer depends only on `at` and the current index.
pub fn on_open_ground<Q: SpatialQuery + ?Sized>(
    index:   &Q,
    regions: &RegionSet,
    agent:   AgentId,
    at:      Point2,
    radius:  f64,
) -> bool {
    index.neighbors_within(at, radius).into_iter().any(|entity| match entity {
        EntityRef::Region(id) => regions.get(id).is_some_and(|r| r.kind.is_open()),
        EntityRef::Mover(other) => other != agent,
        EntityRef::Waypoint(_) => false,
    })
}
