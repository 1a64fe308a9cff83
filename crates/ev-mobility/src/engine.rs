//! The per-tick mover update.

use tracing::{trace, warn};

use ev_agent::MoverStore;
use ev_core::{AgentId, EvacParams, Network, NodeId, Phase, Point2};
use ev_spatial::{EntityRef, RegionKind, RegionSet, SpatialQuery, WaypointGraph};

use crate::conflict::{self, Resolution};
use crate::terrain;

// ── Motion / StepReport ───────────────────────────────────────────────────────

/// What a mover did with its kinematic step.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Motion {
    /// Already safe; not stepped.
    Inactive,
    /// No target waypoint.
    Stuck,
    /// Yielded to a closer mover.
    Blocked,
    /// Standing exactly on its heading waypoint; no direction to move in.
    Stationary,
    /// Stepped towards its own target.
    Moved,
    /// Stepped towards its alternate after yielding on the road.
    Rerouted,
}

/// Result of [`MovementEngine::step`] for one mover.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct StepReport {
    pub motion: Motion,
    /// Came within the arrival threshold of its heading waypoint.
    pub arrived: bool,
    /// Crossed an off-beach transition this tick.
    pub left_beach: bool,
    /// Entered a safe region this tick.
    pub reached_safety: bool,
}

impl StepReport {
    fn new(motion: Motion) -> Self {
        Self { motion, arrived: false, left_beach: false, reached_safety: false }
    }
}

// ── MovementEngine ────────────────────────────────────────────────────────────

/// Borrowed view of the static world plus the spatial index, used to step
/// movers one at a time.
///
/// The engine never re-indexes; the caller does that once all movers of a
/// tick have been stepped.
pub struct MovementEngine<'w, Q: SpatialQuery + ?Sized> {
    pub params:  &'w EvacParams,
    pub graph:   &'w WaypointGraph,
    pub regions: &'w RegionSet,
    pub index:   &'w Q,
}

impl<'w, Q: SpatialQuery + ?Sized> MovementEngine<'w, Q> {
    pub fn new(
        params:  &'w EvacParams,
        graph:   &'w WaypointGraph,
        regions: &'w RegionSet,
        index:   &'w Q,
    ) -> Self {
        Self { params, graph, regions, index }
    }

    /// Advance `agent` by one tick.
    ///
    /// Safe movers are left untouched.  A blocked mover skips the
    /// kinematic step, arrival and the off-beach check, but is still
    /// tested against safe regions.
    pub fn step(&self, agent: AgentId, store: &mut MoverStore) -> StepReport {
        let i = agent.index();
        if !store.is_movable(agent) {
            return StepReport::new(Motion::Inactive);
        }
        let was_targeted = store.target[i].is_some();

        let penalized = terrain::on_open_ground(
            self.index,
            self.regions,
            agent,
            store.position[i],
            self.params.terrain_radius,
        );
        store.speed[i] = store.terrain_speed(agent, penalized);

        let resolution =
            conflict::resolve(agent, store, self.graph, self.index, self.params.conflict_radius);
        let mut report = match resolution {
            Resolution::NoTarget => StepReport::new(Motion::Stuck),
            Resolution::Blocked => StepReport::new(Motion::Blocked),
            Resolution::Clear(heading) => self.advance(agent, store, heading, Motion::Moved),
            Resolution::Rerouted(heading) => self.advance(agent, store, heading, Motion::Rerouted),
        };

        if resolution != Resolution::Blocked && !store.moving_to_safety[i] {
            report.left_beach = self.leave_beach(agent, store);
        }

        if self.touches(store.position[i], RegionKind::Safe) {
            store.phase[i] = Phase::Safe;
            report.reached_safety = true;
        }

        if was_targeted && store.is_stuck(agent) {
            warn!(%agent, position = %store.position[i], phase = %store.phase[i], "mover has no waypoint left to follow");
        }
        trace!(
            %agent,
            motion = ?report.motion,
            speed = store.speed[i],
            target = ?store.target[i],
            "mover stepped"
        );
        report
    }

    /// Kinematic step towards `heading` plus arrival handling.
    fn advance(&self, agent: AgentId, store: &mut MoverStore, heading: NodeId, moved: Motion) -> StepReport {
        let i = agent.index();
        let goal = self.graph.pos(heading);
        let delta = goal - store.position[i];
        let len = delta.length();

        let mut report = if len > 0.0 {
            store.position[i] = store.position[i] + delta.scale(store.speed[i] / len);
            StepReport::new(moved)
        } else {
            StepReport::new(Motion::Stationary)
        };

        if store.position[i].distance(goal) < self.params.arrival_threshold {
            report.arrived = true;
            self.adopt_successor(agent, store);
        }
        report
    }

    /// Take over the successor of the nearest same-network waypoint within
    /// one step.  Leaves the target unchanged if there is none.
    fn adopt_successor(&self, agent: AgentId, store: &mut MoverStore) {
        let i = agent.index();
        let network = store.network(agent);
        let Some(node) = self.nearest_waypoint(store.position[i], network, store.speed[i]) else {
            return;
        };
        let node = self.graph.node(node);
        store.target[i] = node.successor;
        if network == Network::Road {
            store.alternate[i] = node.alternate;
        }
        trace!(%agent, reached = %node.id, next = ?node.successor, "waypoint reached");
    }

    /// Switch to the road network on first contact with a transition
    /// region.  Returns `true` if the switch happened.
    fn leave_beach(&self, agent: AgentId, store: &mut MoverStore) -> bool {
        let i = agent.index();
        let here = store.position[i];
        if !self.touches(here, RegionKind::Transition) {
            return false;
        }
        store.phase[i] = Phase::off_beach(store.class[i]);
        let entry = self.nearest_waypoint(here, Network::Road, self.params.off_beach_search_radius);
        store.target[i] = entry;
        store.alternate[i] = entry.and_then(|n| self.graph.node(n).alternate);
        store.moving_to_safety[i] = true;
        trace!(%agent, entry = ?entry, "left the beach");
        true
    }

    /// Closest waypoint of `network` within `radius` of `at`; the first in
    /// discovery order wins ties.
    fn nearest_waypoint(&self, at: Point2, network: Network, radius: f64) -> Option<NodeId> {
        let mut best: Option<(NodeId, f64)> = None;
        for entity in self.index.neighbors_within(at, radius) {
            let EntityRef::Waypoint(id) = entity else { continue };
            let Some(node) = self.graph.get(id) else { continue };
            if node.network != network {
                continue;
            }
            let d = at.distance(node.pos);
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((id, d));
            }
        }
        best.map(|(id, _)| id)
    }

    fn touches(&self, at: Point2, kind: RegionKind) -> bool {
        self.index.intersecting(at).into_iter().any(|entity| match entity {
            EntityRef::Region(id) => self.regions.get(id).is_some_and(|r| r.kind == kind),
            EntityRef::Waypoint(_) | EntityRef::Mover(_) => false,
        })
    }
}
