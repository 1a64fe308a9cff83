//! Waypoint graphs and their builder.
//!
//! # Two networks, one id space
//!
//! Beach markers lead from the start areas to the nearest off-beach
//! transition; road markers lead from there to the nearest safe region.
//! Both live in a single [`WaypointGraph`] so a mover's target is just a
//! [`NodeId`], tagged with its [`Network`].
//!
//! # Successor rules
//!
//! Every node stores its *distance to destination*: the distance to the
//! closest transition region (beach) or safe region (road).  A node's
//! primary successor is the neighbour with the smallest such distance,
//! restricted to neighbours that are no farther from the destination than
//! the node itself, so following successors never moves away from the goal.
//! Ties go to the lowest `NodeId`.  A node without an eligible neighbour is
//! a frontier and keeps no successor.
//!
//! - **Beach**: the search radius starts at `beach_search_start` and grows
//!   by `beach_search_step` until another beach node is in range; the
//!   candidates are then collected one increment further out.
//! - **Road**: candidates are all road nodes within `road_search_radius`.
//!   After the primary is chosen, the best remaining candidate becomes the
//!   alternate successor used when a road mover has to yield.

use rstar::RTree;
use rstar::primitives::GeomWithData;
use tracing::debug;

use ev_core::{EvacParams, Network, NodeId, Point2, Polygon};

use crate::region::{RegionKind, RegionSet};
use crate::{SpatialError, SpatialResult};

type NodePoint = GeomWithData<[f64; 2], NodeId>;

// ── WaypointNode ──────────────────────────────────────────────────────────────

/// A routing checkpoint.  Immutable once the graph is built.
#[derive(Clone, Debug, PartialEq)]
pub struct WaypointNode {
    pub id:       NodeId,
    pub network:  Network,
    pub pos:      Point2,
    /// Distance to the closest destination region of this node's network.
    pub distance_to_goal: f64,
    pub successor: Option<NodeId>,
    /// Second-best successor.  Only ever set on road nodes.
    pub alternate: Option<NodeId>,
}

// ── WaypointGraph ─────────────────────────────────────────────────────────────

/// Both waypoint networks.  Do not construct directly; use
/// [`WaypointGraphBuilder`].
#[derive(Clone, Debug, Default)]
pub struct WaypointGraph {
    /// Indexed by `NodeId`.
    pub nodes: Vec<WaypointNode>,
}

impl WaypointGraph {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &WaypointNode {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&WaypointNode> {
        self.nodes.get(id.index())
    }

    #[inline]
    pub fn pos(&self, id: NodeId) -> Point2 {
        self.nodes[id.index()].pos
    }

    #[inline]
    pub fn network_of(&self, id: NodeId) -> Network {
        self.nodes[id.index()].network
    }

    /// Nodes of one network in ascending id order.
    pub fn iter(&self, network: Network) -> impl Iterator<Item = &WaypointNode> + '_ {
        self.nodes.iter().filter(move |n| n.network == network)
    }

    /// Nodes of `network` lying inside (or on) `polygon`.
    pub fn nodes_in<'a>(
        &'a self,
        network: Network,
        polygon: &'a Polygon,
    ) -> impl Iterator<Item = &'a WaypointNode> + 'a {
        self.iter(network).filter(move |n| polygon.contains(n.pos))
    }

    /// Number of nodes of `network` that have no successor.
    pub fn frontier_count(&self, network: Network) -> usize {
        self.iter(network).filter(|n| n.successor.is_none()).count()
    }
}

// ── WaypointGraphBuilder ──────────────────────────────────────────────────────

/// Collect raw marker positions, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use ev_core::{EvacParams, Network, Point2, Polygon};
/// use ev_spatial::{RegionKind, RegionSet, WaypointGraphBuilder};
///
/// let mut regions = RegionSet::new();
/// regions.add(
///     "stairs",
///     RegionKind::Transition,
///     Polygon::rect(Point2::new(0.0, 100.0), Point2::new(20.0, 110.0)).unwrap(),
/// );
///
/// let params = EvacParams::default();
/// let mut b = WaypointGraphBuilder::new(&params);
/// let far  = b.add_marker(Network::Beach, Point2::new(10.0, 80.0));
/// let near = b.add_marker(Network::Beach, Point2::new(10.0, 92.0));
/// let graph = b.build(&regions).unwrap();
///
/// assert_eq!(graph.node(far).successor, Some(near));
/// assert_eq!(graph.node(near).successor, None); // frontier
/// ```
pub struct WaypointGraphBuilder<'a> {
    params:  &'a EvacParams,
    markers: Vec<(Network, Point2)>,
}

impl<'a> WaypointGraphBuilder<'a> {
    pub fn new(params: &'a EvacParams) -> Self {
        Self { params, markers: Vec::new() }
    }

    /// Add a marker and return its `NodeId` (sequential from 0).
    pub fn add_marker(&mut self, network: Network, pos: Point2) -> NodeId {
        let id = NodeId(self.markers.len() as u32);
        self.markers.push((network, pos));
        id
    }

    /// Add many markers of one network.
    pub fn markers(mut self, network: Network, positions: impl IntoIterator<Item = Point2>) -> Self {
        for pos in positions {
            self.add_marker(network, pos);
        }
        self
    }

    /// Consume the builder and produce the [`WaypointGraph`].
    ///
    /// # Errors
    /// [`SpatialError::MissingDestination`] if a network has markers but the
    /// map has no region of the kind that network leads to.
    pub fn build(self, regions: &RegionSet) -> SpatialResult<WaypointGraph> {
        let mut nodes: Vec<WaypointNode> = self
            .markers
            .iter()
            .enumerate()
            .map(|(i, &(network, pos))| WaypointNode {
                id: NodeId(i as u32),
                network,
                pos,
                distance_to_goal: 0.0,
                successor: None,
                alternate: None,
            })
            .collect();

        for network in [Network::Beach, Network::Road] {
            let members: Vec<usize> = nodes
                .iter()
                .filter(|n| n.network == network)
                .map(|n| n.id.index())
                .collect();
            if members.is_empty() {
                continue;
            }

            let goal = destination(network);
            let positions: Vec<Point2> = members.iter().map(|&i| nodes[i].pos).collect();
            let metrics = goal_distances(regions, goal, &positions)
                .ok_or(SpatialError::MissingDestination { network, kind: goal })?;
            for (&i, d) in members.iter().zip(metrics) {
                nodes[i].distance_to_goal = d;
            }

            let tree = RTree::bulk_load(
                members
                    .iter()
                    .map(|&i| NodePoint::new(nodes[i].pos.to_array(), nodes[i].id))
                    .collect(),
            );

            let links: Vec<(usize, Option<NodeId>, Option<NodeId>)> = members
                .iter()
                .map(|&i| {
                    let (successor, alternate) = match network {
                        Network::Beach => (self.beach_successor(&nodes, &tree, &nodes[i]), None),
                        Network::Road => self.road_successors(&nodes, &tree, &nodes[i]),
                    };
                    (i, successor, alternate)
                })
                .collect();
            for (i, successor, alternate) in links {
                nodes[i].successor = successor;
                nodes[i].alternate = alternate;
            }
        }

        let graph = WaypointGraph { nodes };
        debug!(
            beach = graph.iter(Network::Beach).count(),
            road = graph.iter(Network::Road).count(),
            beach_frontier = graph.frontier_count(Network::Beach),
            road_frontier = graph.frontier_count(Network::Road),
            "waypoint graph built"
        );
        Ok(graph)
    }

    fn beach_successor(
        &self,
        nodes: &[WaypointNode],
        tree:  &RTree<NodePoint>,
        node:  &WaypointNode,
    ) -> Option<NodeId> {
        let nearest_other = tree
            .nearest_neighbor_iter(&node.pos.to_array())
            .find(|e| e.data != node.id)?;
        let gap = node.pos.distance(Point2::from(*nearest_other.geom()));

        let (start, step) = (self.params.beach_search_start, self.params.beach_search_step);
        let mut radius = start;
        if gap > start {
            radius += ((gap - start) / step).ceil() * step;
        }
        // Candidates are gathered one increment past the radius that first
        // found a neighbour.
        radius += step;

        let candidates = within(tree, node, radius);
        best_eligible(nodes, node, &candidates)
    }

    fn road_successors(
        &self,
        nodes: &[WaypointNode],
        tree:  &RTree<NodePoint>,
        node:  &WaypointNode,
    ) -> (Option<NodeId>, Option<NodeId>) {
        let mut candidates = within(tree, node, self.params.road_search_radius);
        let Some(primary) = best_eligible(nodes, node, &candidates) else {
            return (None, None);
        };
        // Removing the primary is a no-op when it is not a candidate.
        candidates.retain(|&c| c != primary);
        let alternate = candidates
            .iter()
            .copied()
            .reduce(|best, c| if metric(nodes, c) < metric(nodes, best) { c } else { best });
        (Some(primary), alternate)
    }
}

/// Region kind each network leads to.
fn destination(network: Network) -> RegionKind {
    match network {
        Network::Beach => RegionKind::Transition,
        Network::Road => RegionKind::Safe,
    }
}

#[cfg(not(feature = "parallel"))]
fn goal_distances(regions: &RegionSet, goal: RegionKind, positions: &[Point2]) -> Option<Vec<f64>> {
    positions.iter().map(|&p| regions.nearest_distance(goal, p)).collect()
}

#[cfg(feature = "parallel")]
fn goal_distances(regions: &RegionSet, goal: RegionKind, positions: &[Point2]) -> Option<Vec<f64>> {
    use rayon::prelude::*;
    positions.par_iter().map(|&p| regions.nearest_distance(goal, p)).collect()
}

/// Other nodes of the same network within `radius` of `node`, ascending id.
fn within(tree: &RTree<NodePoint>, node: &WaypointNode, radius: f64) -> Vec<NodeId> {
    let mut found: Vec<NodeId> = tree
        .locate_within_distance(node.pos.to_array(), radius * radius)
        .map(|e| e.data)
        .filter(|&id| id != node.id)
        .collect();
    found.sort_unstable();
    found
}

#[inline]
fn metric(nodes: &[WaypointNode], id: NodeId) -> f64 {
    nodes[id.index()].distance_to_goal
}

/// Candidate with the smallest metric that does not exceed `node`'s own.
/// `candidates` must be in ascending id order; the first minimum wins.
fn best_eligible(nodes: &[WaypointNode], node: &WaypointNode, candidates: &[NodeId]) -> Option<NodeId> {
    candidates
        .iter()
        .copied()
        .filter(|&c| metric(nodes, c) <= node.distance_to_goal)
        .reduce(|best, c| if metric(nodes, c) < metric(nodes, best) { c } else { best })
}
