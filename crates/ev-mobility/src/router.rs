//! Initial target assignment.
//!
//! Run once at setup, after the index has been built.  Every mover gets the
//! nearest beach waypoint within `initial_search_radius` as its target and
//! the runner-up as its alternate.  Movers whose compliance percentile is
//! above the threshold then take the shortcut: the nearest beach waypoint
//! lying inside any transition region, at any distance.
//!
//! A mover with nothing in range keeps no target.  That is reported in the
//! [`RoutingSummary`], never as an error.

use tracing::{debug, warn};

use ev_agent::MoverStore;
use ev_core::{EvacParams, Network, NodeId, Point2};
use ev_spatial::{EntityRef, RegionKind, RegionSet, SpatialQuery, WaypointGraph};

/// Counts from one [`Router::route_all`] pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RoutingSummary {
    /// Movers that received a target.
    pub routed: usize,
    /// Movers redirected to a waypoint inside a transition region.
    pub shortcut: usize,
    /// Movers left without a target.
    pub unrouted: usize,
}

pub struct Router<'w, Q: SpatialQuery + ?Sized> {
    params:  &'w EvacParams,
    graph:   &'w WaypointGraph,
    regions: &'w RegionSet,
    index:   &'w Q,
}

impl<'w, Q: SpatialQuery + ?Sized> Router<'w, Q> {
    pub fn new(
        params:  &'w EvacParams,
        graph:   &'w WaypointGraph,
        regions: &'w RegionSet,
        index:   &'w Q,
    ) -> Self {
        Self { params, graph, regions, index }
    }

    /// Assign a target and alternate to every mover in `store`.
    pub fn route_all(&self, store: &mut MoverStore, compliance_threshold: u8) -> RoutingSummary {
        let shortcuts = self.shortcut_nodes();
        let mut summary = RoutingSummary::default();

        for agent in store.agent_ids().collect::<Vec<_>>() {
            let i = agent.index();
            let here = store.position[i];
            let (mut target, alternate) = self.nearest_two(here);

            if store.compliance[i] > compliance_threshold {
                if let Some(shortcut) = nearest_of(self.graph, here, &shortcuts) {
                    target = Some(shortcut);
                    summary.shortcut += 1;
                }
            }

            store.target[i] = target;
            store.alternate[i] = alternate;
            if target.is_some() {
                summary.routed += 1;
            } else {
                summary.unrouted += 1;
                warn!(%agent, position = %here, "no beach waypoint in range; mover will not move");
            }
        }

        debug!(
            routed = summary.routed,
            shortcut = summary.shortcut,
            unrouted = summary.unrouted,
            "initial targets assigned"
        );
        summary
    }

    /// Nearest and second-nearest beach waypoints within the initial
    /// search radius.  Ties keep discovery order.
    fn nearest_two(&self, at: Point2) -> (Option<NodeId>, Option<NodeId>) {
        let mut ranked: Vec<(NodeId, f64)> = self
            .index
            .neighbors_within(at, self.params.initial_search_radius)
            .into_iter()
            .filter_map(|entity| match entity {
                EntityRef::Waypoint(id) => self.graph.get(id),
                _ => None,
            })
            .filter(|node| node.network == Network::Beach)
            .map(|node| (node.id, at.distance(node.pos)))
            .collect();
        // Stable sort keeps discovery order among equal distances.
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
        let mut ids = ranked.into_iter().map(|(id, _)| id);
        (ids.next(), ids.next())
    }

    /// Beach waypoints lying inside any transition region, ascending id.
    fn shortcut_nodes(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self
            .regions
            .of_kind(RegionKind::Transition)
            .flat_map(|r| self.graph.nodes_in(Network::Beach, &r.polygon))
            .map(|node| node.id)
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

/// Closest of `candidates` to `at`; the first wins ties.
fn nearest_of(graph: &WaypointGraph, at: Point2, candidates: &[NodeId]) -> Option<NodeId> {
    candidates
        .iter()
        .copied()
        .map(|id| (id, at.distance(graph.pos(id))))
        .reduce(|best, c| if c.1 < best.1 { c } else { best })
        .map(|(id, _)| id)
}
