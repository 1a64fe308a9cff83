//! Right-of-way between movers heading for the same waypoint.
//!
//! A mover yields when a movable neighbour within the conflict radius is
//! heading for the same waypoint and is strictly closer to it.  Equal
//! distances never block.  A yielding road mover takes its alternate
//! waypoint for this tick instead; without one it stays blocked.
//!
//! Neighbours are whoever the index placed within range at the start of
//! the tick.  Their phase, target and position are read live.

use ev_agent::MoverStore;
use ev_core::{AgentId, Network, NodeId};
use ev_spatial::{EntityRef, SpatialQuery, WaypointGraph};

/// Outcome of the conflict check for one mover.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Resolution {
    /// Free to head for its own target.
    Clear(NodeId),
    /// Yielded on the road network; heads for this alternate this tick.
    Rerouted(NodeId),
    /// Must wait this tick.
    Blocked,
    /// Has no target to head for.
    NoTarget,
}

/// Decide whether `agent` may move this tick and towards which waypoint.
pub fn resolve<Q: SpatialQuery + ?Sized>(
    agent:  AgentId,
    store:  &MoverStore,
    graph:  &WaypointGraph,
    index:  &Q,
    radius: f64,
) -> Resolution {
    let i = agent.index();
    let Some(target) = store.target[i] else {
        return Resolution::NoTarget;
    };
    let goal = graph.pos(target);
    let here = store.position[i];
    let own = here.distance(goal);

    // Any same-target neighbour is itself a movable neighbour in range, so
    // the crowding condition holds whenever one is found.
    let must_yield = index
        .neighbors_within(here, radius)
        .into_iter()
        .filter_map(|entity| match entity {
            EntityRef::Mover(other) if other != agent && store.is_movable(other) => Some(other),
            _ => None,
        })
        .any(|other| {
            store.target[other.index()] == Some(target)
                && own > store.position[other.index()].distance(goal)
        });

    if !must_yield {
        return Resolution::Clear(target);
    }
    match (store.network(agent), store.alternate[i]) {
        (Network::Road, Some(alternate)) => Resolution::Rerouted(alternate),
        _ => Resolution::Blocked,
    }
}
