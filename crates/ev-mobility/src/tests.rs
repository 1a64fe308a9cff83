//! Unit tests for ev-mobility.

use ev_agent::{MoverStore, MoverStoreBuilder};
use ev_core::{
    AgentId, EvacParams, MoverClass, Network, NodeId, Phase, Point2, Polygon, SimConfig, SimRng,
};
use ev_spatial::{RegionKind, RegionSet, SpatialIndex, Surface, WaypointGraph, WaypointGraphBuilder};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon {
    Polygon::rect(Point2::new(x0, y0), Point2::new(x1, y1)).unwrap()
}

/// Beach `y ∈ [0, 80]`, stairs `y ∈ [100, 110]`, street `y ∈ [110, 200]`,
/// safe area `y ∈ [200, 260]`, all 100 units wide.
///
/// Beach chain `B0 → B1 → B2` (B2 sits on the stairs), road nodes
/// `R3 → R4 → R6` with `R5` as the alternate off `R3` and `R4`.
struct Fixture {
    params:  EvacParams,
    regions: RegionSet,
    graph:   WaypointGraph,
}

const B0: NodeId = NodeId(0);
const B1: NodeId = NodeId(1);
const B2: NodeId = NodeId(2);
const R3: NodeId = NodeId(3);
const R4: NodeId = NodeId(4);
const R5: NodeId = NodeId(5);
const R6: NodeId = NodeId(6);

fn fixture() -> Fixture {
    let params = EvacParams::default();
    let mut regions = RegionSet::new();
    regions.add("beach", RegionKind::Start, rect(0.0, 0.0, 100.0, 80.0));
    regions.add("stairs", RegionKind::Transition, rect(0.0, 100.0, 100.0, 110.0));
    regions.add("avenue", RegionKind::Terrain(Surface::Street), rect(0.0, 110.0, 100.0, 200.0));
    regions.add("hill", RegionKind::Safe, rect(0.0, 200.0, 100.0, 260.0));

    let graph = WaypointGraphBuilder::new(&params)
        .markers(Network::Beach, [
            Point2::new(50.0, 60.0),
            Point2::new(50.0, 85.0),
            Point2::new(50.0, 105.0),
        ])
        .markers(Network::Road, [
            Point2::new(50.0, 115.0),
            Point2::new(50.0, 130.0),
            Point2::new(60.0, 128.0),
            Point2::new(50.0, 145.0),
        ])
        .build(&regions)
        .unwrap();
    Fixture { params, regions, graph }
}

/// Movers at exact positions, all walking at `speed` on any terrain.
fn movers(at: &[Point2], speed: f64) -> MoverStore {
    let cfg = SimConfig { adults: 0, children: 0, ..SimConfig::default() };
    let mut builder = MoverStoreBuilder::new(&cfg);
    for &p in at {
        builder = builder.place(MoverClass::Adult, p);
    }
    let mut store = builder.build(&mut SimRng::new(1)).unwrap();
    store.nominal_speed.fill(speed);
    store.penalty_speed.fill(speed);
    store
}

fn on_road(store: &mut MoverStore, agent: AgentId) {
    store.moving_to_safety[agent.index()] = true;
    store.phase[agent.index()] = Phase::OffBeach;
}

// ── Fixture sanity ────────────────────────────────────────────────────────────

#[cfg(test)]
mod fixture_graph {
    use super::*;

    #[test]
    fn chains_as_documented() {
        let fx = fixture();
        assert_eq!(fx.graph.node(B0).successor, Some(B1));
        assert_eq!(fx.graph.node(B1).successor, Some(B2));
        assert_eq!(fx.graph.node(B2).successor, None);
        assert_eq!(fx.graph.node(R3).successor, Some(R4));
        assert_eq!(fx.graph.node(R3).alternate, Some(R5));
        assert_eq!(fx.graph.node(R4).successor, Some(R6));
        assert_eq!(fx.graph.node(R4).alternate, Some(R5));
    }
}

// ── Terrain ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod terrain {
    use super::*;
    use crate::terrain::on_open_ground;

    #[test]
    fn beach_is_open_street_is_not() {
        let fx = fixture();
        let idx = SpatialIndex::new(&fx.regions, &fx.graph, &[]);
        let nobody = AgentId::INVALID;
        assert!(on_open_ground(&idx, &fx.regions, nobody, Point2::new(50.0, 40.0), 5.0));
        assert!(!on_open_ground(&idx, &fx.regions, nobody, Point2::new(50.0, 150.0), 5.0));
        // On the street but within reach of the stairs.
        assert!(on_open_ground(&idx, &fx.regions, nobody, Point2::new(50.0, 112.0), 5.0));
    }

    #[test]
    fn markers_are_not_open() {
        let fx = fixture();
        // R6 sits 1 unit away; the street around it is paved.
        let idx = SpatialIndex::new(&fx.regions, &fx.graph, &[]);
        assert!(!on_open_ground(&idx, &fx.regions, AgentId::INVALID, Point2::new(50.0, 146.0), 5.0));
    }

    #[test]
    fn other_movers_count_as_open() {
        let fx = fixture();
        let crowd = [Point2::new(50.0, 150.0), Point2::new(51.0, 150.0)];
        let idx = SpatialIndex::new(&fx.regions, &fx.graph, &crowd);
        assert!(on_open_ground(&idx, &fx.regions, AgentId::INVALID, Point2::new(50.0, 154.0), 5.0));
        assert!(!on_open_ground(&idx, &fx.regions, AgentId::INVALID, Point2::new(50.0, 170.0), 5.0));
    }

    #[test]
    fn self_is_not_open() {
        let fx = fixture();
        let idx = SpatialIndex::new(&fx.regions, &fx.graph, &[Point2::new(50.0, 160.0)]);
        assert!(!on_open_ground(&idx, &fx.regions, AgentId(0), Point2::new(50.0, 160.0), 5.0));
        assert!(on_open_ground(&idx, &fx.regions, AgentId(1), Point2::new(50.0, 160.0), 5.0));
    }

    #[test]
    fn safe_movers_still_count() {
        let fx = fixture();
        let mut store = movers(&[Point2::new(50.0, 160.0), Point2::new(52.0, 160.0)], 1.0);
        store.phase[1] = Phase::Safe;
        let idx = SpatialIndex::new(&fx.regions, &fx.graph, &store.position);
        assert!(on_open_ground(&idx, &fx.regions, AgentId(0), store.position[0], 5.0));
    }

    #[test]
    fn repeated_sensing_is_idempotent() {
        let fx = fixture();
        let mut store = movers(&[Point2::new(50.0, 40.0)], 1.0);
        store.penalty_speed[0] = 0.5;
        store.target[0] = Some(B0);
        let idx = SpatialIndex::new(&fx.regions, &fx.graph, &store.position);

        let first = on_open_ground(&idx, &fx.regions, AgentId(0), store.position[0], fx.params.terrain_radius);
        let second = on_open_ground(&idx, &fx.regions, AgentId(0), store.position[0], fx.params.terrain_radius);
        assert_eq!(first, second);
        assert_eq!(store.terrain_speed(AgentId(0), first), 0.5);
    }
}

// ── Conflict ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod conflict {
    use super::*;
    use crate::conflict::resolve;
    use crate::{Motion, MovementEngine, Resolution};

    #[test]
    fn farther_beach_mover_yields() {
        let fx = fixture();
        // 5 and 3 units from B1, 2 apart.
        let mut store = movers(&[Point2::new(50.0, 80.0), Point2::new(50.0, 82.0)], 1.0);
        store.target.fill(Some(B1));
        let idx = SpatialIndex::new(&fx.regions, &fx.graph, &store.position);

        assert_eq!(resolve(AgentId(0), &store, &fx.graph, &idx, 3.0), Resolution::Blocked);
        assert_eq!(resolve(AgentId(1), &store, &fx.graph, &idx, 3.0), Resolution::Clear(B1));

        let engine = MovementEngine::new(&fx.params, &fx.graph, &fx.regions, &idx);
        let report = engine.step(AgentId(0), &mut store);
        assert_eq!(report.motion, Motion::Blocked);
        assert_eq!(store.position[0], Point2::new(50.0, 80.0));
        let report = engine.step(AgentId(1), &mut store);
        assert_eq!(report.motion, Motion::Moved);
        assert!(store.position[1].distance(Point2::new(50.0, 83.0)) < 1e-9);
    }

    #[test]
    fn farther_road_mover_takes_alternate() {
        let fx = fixture();
        let mut store = movers(&[Point2::new(50.0, 125.0), Point2::new(50.0, 127.0)], 1.0);
        for a in [AgentId(0), AgentId(1)] {
            on_road(&mut store, a);
        }
        store.target.fill(Some(R4));
        store.alternate[0] = Some(R5);
        let idx = SpatialIndex::new(&fx.regions, &fx.graph, &store.position);

        assert_eq!(resolve(AgentId(0), &store, &fx.graph, &idx, 3.0), Resolution::Rerouted(R5));

        let engine = MovementEngine::new(&fx.params, &fx.graph, &fx.regions, &idx);
        let before = store.position[0];
        let report = engine.step(AgentId(0), &mut store);
        assert_eq!(report.motion, Motion::Rerouted);
        // Stepped one unit towards R5, and R4 remains the target.
        let r5 = fx.graph.pos(R5);
        assert!((store.position[0].distance(r5) - (before.distance(r5) - 1.0)).abs() < 1e-9);
        assert_eq!(store.target[0], Some(R4));
    }

    #[test]
    fn road_mover_without_alternate_stays_blocked() {
        let fx = fixture();
        let mut store = movers(&[Point2::new(50.0, 125.0), Point2::new(50.0, 127.0)], 1.0);
        for a in [AgentId(0), AgentId(1)] {
            on_road(&mut store, a);
        }
        store.target.fill(Some(R4));
        let idx = SpatialIndex::new(&fx.regions, &fx.graph, &store.position);
        assert_eq!(resolve(AgentId(0), &store, &fx.graph, &idx, 3.0), Resolution::Blocked);
    }

    #[test]
    fn equal_distances_never_block() {
        let fx = fixture();
        let mut store = movers(&[Point2::new(49.0, 82.0), Point2::new(51.0, 82.0)], 1.0);
        store.target.fill(Some(B1));
        let idx = SpatialIndex::new(&fx.regions, &fx.graph, &store.position);
        assert_eq!(resolve(AgentId(0), &store, &fx.graph, &idx, 3.0), Resolution::Clear(B1));
        assert_eq!(resolve(AgentId(1), &store, &fx.graph, &idx, 3.0), Resolution::Clear(B1));
    }

    #[test]
    fn different_targets_never_block() {
        let fx = fixture();
        let mut store = movers(&[Point2::new(50.0, 80.0), Point2::new(50.0, 82.0)], 1.0);
        store.target[0] = Some(B1);
        store.target[1] = Some(B2);
        let idx = SpatialIndex::new(&fx.regions, &fx.graph, &store.position);
        assert_eq!(resolve(AgentId(0), &store, &fx.graph, &idx, 3.0), Resolution::Clear(B1));
    }

    #[test]
    fn safe_neighbours_are_ignored() {
        let fx = fixture();
        let mut store = movers(&[Point2::new(50.0, 80.0), Point2::new(50.0, 82.0)], 1.0);
        store.target.fill(Some(B1));
        store.phase[1] = Phase::Safe;
        let idx = SpatialIndex::new(&fx.regions, &fx.graph, &store.position);
        assert_eq!(resolve(AgentId(0), &store, &fx.graph, &idx, 3.0), Resolution::Clear(B1));
    }

    #[test]
    fn untargeted_mover_is_stuck() {
        let fx = fixture();
        let store = movers(&[Point2::new(50.0, 40.0)], 1.0);
        let idx = SpatialIndex::new(&fx.regions, &fx.graph, &store.position);
        assert_eq!(resolve(AgentId(0), &store, &fx.graph, &idx, 3.0), Resolution::NoTarget);
    }

    #[test]
    fn membership_is_start_of_tick_attributes_are_live() {
        let fx = fixture();
        let mut store = movers(&[Point2::new(50.0, 80.0), Point2::new(50.0, 82.0)], 1.0);
        store.target.fill(Some(B1));
        let idx = SpatialIndex::new(&fx.regions, &fx.graph, &store.position);

        // Mover 1 already stepped this tick: still a neighbour per the index,
        // and its live distance to B1 is what counts.
        store.position[1] = Point2::new(50.0, 84.0);
        assert_eq!(resolve(AgentId(0), &store, &fx.graph, &idx, 3.0), Resolution::Blocked);

        // Live position now farther from B1 than mover 0.
        store.position[1] = Point2::new(90.0, 85.0);
        assert_eq!(resolve(AgentId(0), &store, &fx.graph, &idx, 3.0), Resolution::Clear(B1));
    }

    #[test]
    fn movers_outside_the_index_window_are_invisible() {
        let fx = fixture();
        let mut store = movers(&[Point2::new(50.0, 80.0), Point2::new(10.0, 10.0)], 1.0);
        store.target.fill(Some(B1));
        let idx = SpatialIndex::new(&fx.regions, &fx.graph, &store.position);

        // Walked next to mover 0 since the last reindex.
        store.position[1] = Point2::new(50.0, 82.0);
        assert_eq!(resolve(AgentId(0), &store, &fx.graph, &idx, 3.0), Resolution::Clear(B1));
    }
}

// ── Engine ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod engine {
    use super::*;
    use crate::{Motion, MovementEngine};

    #[test]
    fn inside_safe_region_becomes_safe() {
        let fx = fixture();
        let mut store = movers(&[Point2::new(50.0, 230.0)], 1.0);
        let idx = SpatialIndex::new(&fx.regions, &fx.graph, &store.position);
        let engine = MovementEngine::new(&fx.params, &fx.graph, &fx.regions, &idx);

        let report = engine.step(AgentId(0), &mut store);
        assert_eq!(store.phase[0], Phase::Safe);
        assert!(report.reached_safety);
        assert_eq!(report.motion, Motion::Stuck);

        let report = engine.step(AgentId(0), &mut store);
        assert_eq!(report.motion, Motion::Inactive);
        assert!(!report.reached_safety);
    }

    #[test]
    fn blocked_mover_still_reaches_safety() {
        let fx = fixture();
        let mut store = movers(&[Point2::new(50.0, 201.0), Point2::new(50.0, 202.0)], 1.0);
        store.target.fill(Some(R6));
        let idx = SpatialIndex::new(&fx.regions, &fx.graph, &store.position);
        let engine = MovementEngine::new(&fx.params, &fx.graph, &fx.regions, &idx);

        let report = engine.step(AgentId(1), &mut store);
        assert_eq!(report.motion, Motion::Blocked);
        assert_eq!(store.phase[1], Phase::Safe);
    }

    #[test]
    fn step_uses_terrain_speed() {
        let fx = fixture();
        let mut store = movers(&[Point2::new(50.0, 40.0), Point2::new(50.0, 150.0)], 1.0);
        store.penalty_speed.fill(0.5);
        store.target[0] = Some(B0);
        store.target[1] = Some(R6);
        on_road(&mut store, AgentId(1));
        let idx = SpatialIndex::new(&fx.regions, &fx.graph, &store.position);
        let engine = MovementEngine::new(&fx.params, &fx.graph, &fx.regions, &idx);

        engine.step(AgentId(0), &mut store);
        engine.step(AgentId(1), &mut store);
        assert_eq!(store.speed[0], 0.5);
        assert!(store.position[0].distance(Point2::new(50.0, 40.5)) < 1e-9);
        assert_eq!(store.speed[1], 1.0);
        assert!(store.position[1].distance(Point2::new(50.0, 149.0)) < 1e-9);
    }

    #[test]
    fn crowded_street_walk_is_penalised() {
        let fx = fixture();
        let mut store = movers(&[Point2::new(50.0, 170.0), Point2::new(52.0, 170.0)], 1.0);
        store.penalty_speed.fill(0.5);
        store.target.fill(Some(R6));
        on_road(&mut store, AgentId(0));
        on_road(&mut store, AgentId(1));
        let idx = SpatialIndex::new(&fx.regions, &fx.graph, &store.position);
        let engine = MovementEngine::new(&fx.params, &fx.graph, &fx.regions, &idx);

        engine.step(AgentId(0), &mut store);
        assert_eq!(store.speed[0], 0.5);
        assert!(store.position[0].distance(Point2::new(50.0, 169.5)) < 1e-9);
    }

    #[test]
    fn arrival_adopts_successor() {
        let fx = fixture();
        let mut store = movers(&[Point2::new(50.0, 84.5)], 1.0);
        store.target[0] = Some(B1);
        let idx = SpatialIndex::new(&fx.regions, &fx.graph, &store.position);
        let engine = MovementEngine::new(&fx.params, &fx.graph, &fx.regions, &idx);

        let report = engine.step(AgentId(0), &mut store);
        assert!(report.arrived);
        assert_eq!(store.target[0], Some(B2));
    }

    #[test]
    fn arrival_on_road_also_takes_alternate() {
        let fx = fixture();
        let mut store = movers(&[Point2::new(50.0, 114.5)], 1.0);
        on_road(&mut store, AgentId(0));
        store.target[0] = Some(R3);
        let idx = SpatialIndex::new(&fx.regions, &fx.graph, &store.position);
        let engine = MovementEngine::new(&fx.params, &fx.graph, &fx.regions, &idx);

        engine.step(AgentId(0), &mut store);
        assert_eq!(store.target[0], Some(R4));
        assert_eq!(store.alternate[0], Some(R5));
    }

    #[test]
    fn standing_on_target_is_stationary_but_arrives() {
        let fx = fixture();
        let mut store = movers(&[Point2::new(50.0, 85.0)], 1.0);
        store.target[0] = Some(B1);
        let idx = SpatialIndex::new(&fx.regions, &fx.graph, &store.position);
        let engine = MovementEngine::new(&fx.params, &fx.graph, &fx.regions, &idx);

        let report = engine.step(AgentId(0), &mut store);
        assert_eq!(report.motion, Motion::Stationary);
        assert_eq!(store.position[0], Point2::new(50.0, 85.0));
        assert!(report.arrived);
        assert_eq!(store.target[0], Some(B2));
    }

    #[test]
    fn arrival_without_waypoint_in_reach_keeps_target() {
        let fx = fixture();
        // Ends 0.9 from B1 but can only see 0.1 around itself.
        let mut store = movers(&[Point2::new(50.0, 84.0)], 0.1);
        store.target[0] = Some(B1);
        let idx = SpatialIndex::new(&fx.regions, &fx.graph, &store.position);
        let engine = MovementEngine::new(&fx.params, &fx.graph, &fx.regions, &idx);

        let report = engine.step(AgentId(0), &mut store);
        assert!(report.arrived);
        assert_eq!(store.target[0], Some(B1));
    }

    #[test]
    fn frontier_arrival_leaves_mover_stuck() {
        let fx = fixture();
        let mut store = movers(&[Point2::new(50.0, 144.5)], 1.0);
        on_road(&mut store, AgentId(0));
        store.target[0] = Some(R6);
        let idx = SpatialIndex::new(&fx.regions, &fx.graph, &store.position);
        let engine = MovementEngine::new(&fx.params, &fx.graph, &fx.regions, &idx);

        engine.step(AgentId(0), &mut store);
        assert!(store.is_stuck(AgentId(0)));
        assert_eq!(engine.step(AgentId(0), &mut store).motion, Motion::Stuck);
    }

    #[test]
    fn crossing_the_stairs_switches_to_road() {
        let fx = fixture();
        let mut store = movers(&[Point2::new(50.0, 101.0)], 1.0);
        store.target[0] = Some(B2);
        let idx = SpatialIndex::new(&fx.regions, &fx.graph, &store.position);
        let engine = MovementEngine::new(&fx.params, &fx.graph, &fx.regions, &idx);

        let report = engine.step(AgentId(0), &mut store);
        assert!(report.left_beach);
        assert_eq!(store.phase[0], Phase::OffBeach);
        assert!(store.moving_to_safety[0]);
        assert_eq!(store.network(AgentId(0)), Network::Road);
        assert_eq!(store.target[0], Some(R3));
        assert_eq!(store.alternate[0], Some(R5));

        let report = engine.step(AgentId(0), &mut store);
        assert!(!report.left_beach);
    }

    #[test]
    fn child_leaves_beach_as_child() {
        let fx = fixture();
        let cfg = SimConfig { adults: 0, children: 0, ..SimConfig::default() };
        let mut store = MoverStoreBuilder::new(&cfg)
            .place(MoverClass::Child, Point2::new(50.0, 101.0))
            .build(&mut SimRng::new(1))
            .unwrap();
        store.target[0] = Some(B2);
        let idx = SpatialIndex::new(&fx.regions, &fx.graph, &store.position);
        let engine = MovementEngine::new(&fx.params, &fx.graph, &fx.regions, &idx);

        engine.step(AgentId(0), &mut store);
        assert_eq!(store.phase[0], Phase::ChildOffBeach);
    }

    #[test]
    fn no_road_waypoint_near_the_stairs() {
        let fx = fixture();
        let mut store = movers(&[Point2::new(5.0, 101.0)], 1.0);
        store.target[0] = Some(B2);
        let idx = SpatialIndex::new(&fx.regions, &fx.graph, &store.position);
        let engine = MovementEngine::new(&fx.params, &fx.graph, &fx.regions, &idx);

        let report = engine.step(AgentId(0), &mut store);
        assert!(report.left_beach);
        assert!(store.moving_to_safety[0]);
        assert!(store.is_stuck(AgentId(0)));
    }

    #[test]
    fn blocked_mover_does_not_leave_the_beach() {
        let fx = fixture();
        let mut store = movers(&[Point2::new(50.0, 101.0), Point2::new(50.0, 103.0)], 1.0);
        store.target.fill(Some(B2));
        let idx = SpatialIndex::new(&fx.regions, &fx.graph, &store.position);
        let engine = MovementEngine::new(&fx.params, &fx.graph, &fx.regions, &idx);

        let report = engine.step(AgentId(0), &mut store);
        assert_eq!(report.motion, Motion::Blocked);
        assert!(!report.left_beach);
        assert_eq!(store.phase[0], Phase::Susceptible);
    }
}

// ── Router ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod router {
    use super::*;
    use crate::{Router, RoutingSummary};

    #[test]
    fn nearest_then_runner_up() {
        let fx = fixture();
        let mut store = movers(&[Point2::new(50.0, 40.0)], 1.0);
        let idx = SpatialIndex::new(&fx.regions, &fx.graph, &store.position);
        let summary = Router::new(&fx.params, &fx.graph, &fx.regions, &idx).route_all(&mut store, 100);

        assert_eq!(summary, RoutingSummary { routed: 1, shortcut: 0, unrouted: 0 });
        assert_eq!(store.target[0], Some(B0));
        assert_eq!(store.alternate[0], Some(B1));
    }

    #[test]
    fn compliant_movers_take_the_shortcut() {
        let fx = fixture();
        let mut store = movers(&[Point2::new(50.0, 40.0), Point2::new(20.0, 10.0)], 1.0);
        store.compliance[0] = 80;
        store.compliance[1] = 20;
        let idx = SpatialIndex::new(&fx.regions, &fx.graph, &store.position);
        let summary = Router::new(&fx.params, &fx.graph, &fx.regions, &idx).route_all(&mut store, 50);

        assert_eq!(summary.shortcut, 1);
        assert_eq!(store.target[0], Some(B2));
        assert_eq!(store.target[1], Some(B0));
    }

    #[test]
    fn default_threshold_sends_everyone_to_the_stairs() {
        let fx = fixture();
        let mut store = movers(&[Point2::new(50.0, 40.0), Point2::new(20.0, 10.0)], 1.0);
        let idx = SpatialIndex::new(&fx.regions, &fx.graph, &store.position);
        let summary = Router::new(&fx.params, &fx.graph, &fx.regions, &idx)
            .route_all(&mut store, SimConfig::default().compliance_threshold);
        assert_eq!(summary.shortcut, 2);
        assert_eq!(store.target, vec![Some(B2), Some(B2)]);
    }

    #[test]
    fn out_of_range_leaves_mover_unrouted() {
        let mut fx = fixture();
        fx.params.initial_search_radius = 10.0;
        let mut store = movers(&[Point2::new(50.0, 40.0)], 1.0);
        let idx = SpatialIndex::new(&fx.regions, &fx.graph, &store.position);
        let summary = Router::new(&fx.params, &fx.graph, &fx.regions, &idx).route_all(&mut store, 100);

        assert_eq!(summary.unrouted, 1);
        assert!(store.is_stuck(AgentId(0)));
    }

    #[test]
    fn road_nodes_are_never_initial_targets() {
        let fx = fixture();
        // Closer to R3 than to any beach node.
        let mut store = movers(&[Point2::new(50.0, 117.0)], 1.0);
        let idx = SpatialIndex::new(&fx.regions, &fx.graph, &store.position);
        Router::new(&fx.params, &fx.graph, &fx.regions, &idx).route_all(&mut store, 100);
        assert_eq!(store.target[0], Some(B2));
    }
}
