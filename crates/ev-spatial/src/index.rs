//! The spatial query service.
//!
//! # Contract
//!
//! [`SpatialQuery`] is what the movement engine and the router see:
//!
//! - `neighbors_within(p, r)`: every entity whose geometry lies within `r`
//!   of `p` (regions count when any part of the polygon is in range).
//! - `intersecting(p)`: every entity whose geometry touches `p`.
//! - `reindex(positions)`: refresh mover positions.  Called exactly once
//!   per tick after all movers have been updated, never mid-tick, so every
//!   query inside a tick sees the movers where they stood when it began.
//!
//! Results are sorted by [`EntityRef`] (regions, then waypoints, then
//! movers, each in ascending id order).  That ordering is the "discovery
//! order" every tie-break downstream relies on.
//!
//! # Layout
//!
//! [`SpatialIndex`] keeps three R-trees.  Regions and waypoints are static
//! and bulk-loaded once; the mover tree is bulk-loaded again on every
//! `reindex`.

use rstar::primitives::GeomWithData;
use rstar::{AABB, PointDistance, RTree, RTreeObject};

use ev_core::{AgentId, NodeId, Point2, Polygon, RegionId};

use crate::network::WaypointGraph;
use crate::region::RegionSet;

// ── EntityRef ─────────────────────────────────────────────────────────────────

/// Handle to anything stored in the index.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum EntityRef {
    Region(RegionId),
    Waypoint(NodeId),
    Mover(AgentId),
}

// ── SpatialQuery ──────────────────────────────────────────────────────────────

/// Neighbourhood queries over regions, waypoints and movers.
pub trait SpatialQuery {
    /// Entities within `radius` of `at`, in discovery order.
    fn neighbors_within(&self, at: Point2, radius: f64) -> Vec<EntityRef>;

    /// Entities whose geometry contains or touches `at`, in discovery order.
    fn intersecting(&self, at: Point2) -> Vec<EntityRef>;

    /// Replace the indexed mover positions.  `positions[i]` belongs to
    /// `AgentId(i)`.
    fn reindex(&mut self, positions: &[Point2]);
}

// ── R-tree entries ────────────────────────────────────────────────────────────

type WaypointEntry = GeomWithData<[f64; 2], NodeId>;
type MoverEntry = GeomWithData<[f64; 2], AgentId>;

/// A region polygon with its bounding box cached for the R-tree.
struct RegionEntry {
    id:       RegionId,
    polygon:  Polygon,
    envelope: AABB<[f64; 2]>,
}

impl RegionEntry {
    fn new(id: RegionId, polygon: Polygon) -> Self {
        let (min, max) = polygon.bounds();
        let envelope = AABB::from_corners(min.to_array(), max.to_array());
        Self { id, polygon, envelope }
    }
}

impl RTreeObject for RegionEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

impl PointDistance for RegionEntry {
    /// Squared distance to the polygon; zero anywhere inside it.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        self.polygon.distance_2(Point2::from(*point))
    }

    fn contains_point(&self, point: &[f64; 2]) -> bool {
        self.polygon.contains(Point2::from(*point))
    }
}

// ── SpatialIndex ──────────────────────────────────────────────────────────────

/// R-tree backed [`SpatialQuery`] implementation.
pub struct SpatialIndex {
    regions:   RTree<RegionEntry>,
    waypoints: RTree<WaypointEntry>,
    movers:    RTree<MoverEntry>,
    reindexed: u64,
}

impl SpatialIndex {
    /// Index the static map and the movers' initial positions.
    ///
    /// Time complexity: O(N log N) bulk loads for each of the three trees.
    pub fn new(regions: &RegionSet, graph: &WaypointGraph, movers: &[Point2]) -> Self {
        let region_entries = regions
            .iter()
            .map(|r| RegionEntry::new(r.id, r.polygon.clone()))
            .collect();
        let waypoint_entries = graph
            .nodes
            .iter()
            .map(|n| WaypointEntry::new(n.pos.to_array(), n.id))
            .collect();
        Self {
            regions:   RTree::bulk_load(region_entries),
            waypoints: RTree::bulk_load(waypoint_entries),
            movers:    RTree::bulk_load(mover_entries(movers)),
            reindexed: 0,
        }
    }

    /// How many times [`SpatialQuery::reindex`] has run.
    pub fn reindex_count(&self) -> u64 {
        self.reindexed
    }

    pub fn mover_count(&self) -> usize {
        self.movers.size()
    }
}

impl SpatialQuery for SpatialIndex {
    fn neighbors_within(&self, at: Point2, radius: f64) -> Vec<EntityRef> {
        let (p, r2) = (at.to_array(), radius * radius);
        let mut found: Vec<EntityRef> = self
            .regions
            .locate_within_distance(p, r2)
            .map(|e| EntityRef::Region(e.id))
            .chain(self.waypoints.locate_within_distance(p, r2).map(|e| EntityRef::Waypoint(e.data)))
            .chain(self.movers.locate_within_distance(p, r2).map(|e| EntityRef::Mover(e.data)))
            .collect();
        found.sort_unstable();
        found
    }

    fn intersecting(&self, at: Point2) -> Vec<EntityRef> {
        let p = at.to_array();
        let mut found: Vec<EntityRef> = self
            .regions
            .locate_all_at_point(&p)
            .map(|e| EntityRef::Region(e.id))
            .chain(self.waypoints.locate_all_at_point(&p).map(|e| EntityRef::Waypoint(e.data)))
            .chain(self.movers.locate_all_at_point(&p).map(|e| EntityRef::Mover(e.data)))
            .collect();
        found.sort_unstable();
        found
    }

    fn reindex(&mut self, positions: &[Point2]) {
        self.movers = RTree::bulk_load(mover_entries(positions));
        self.reindexed += 1;
    }
}

fn mover_entries(positions: &[Point2]) -> Vec<MoverEntry> {
    positions
        .iter()
        .enumerate()
        .map(|(i, p)| MoverEntry::new(p.to_array(), AgentId(i as u32)))
        .collect()
}
