//! Core mover storage.
//!
//! Every `Vec` field of [`MoverStore`] has exactly `count` elements and the
//! `AgentId` value is the index into all of them:
//!
//! ```ignore
//! let pos = store.position[agent.index()];  // O(1), cache-friendly
//! ```
//!
//! The movement engine mutates these arrays in place one mover at a time;
//! the spatial index keeps its own copy of the positions, refreshed once per
//! tick from [`MoverStore::position`].

use ev_core::{AgentId, MoverClass, Network, NodeId, Phase, Point2};

/// Structure-of-Arrays storage for all mover state.
#[derive(Clone, Debug, Default)]
pub struct MoverStore {
    /// Number of movers.  Equals the length of every SoA `Vec`.
    pub count: usize,

    // ── Static attributes (drawn once) ────────────────────────────────────
    pub class: Vec<MoverClass>,

    /// Speed on paved terrain, drawn from the class's normal distribution.
    pub nominal_speed: Vec<f64>,

    /// `nominal_speed / terrain_penalty`, used on open terrain.
    pub penalty_speed: Vec<f64>,

    /// Rule-compliance percentile in `1..=100`.
    pub compliance: Vec<u8>,

    // ── Dynamic state ─────────────────────────────────────────────────────
    pub phase: Vec<Phase>,

    pub position: Vec<Point2>,

    /// Effective speed for the current tick (recomputed every tick).
    pub speed: Vec<f64>,

    /// Waypoint currently steered towards.  `None` means the mover is stuck.
    pub target: Vec<Option<NodeId>>,

    /// Fallback waypoint used when a road mover has to yield.
    pub alternate: Vec<Option<NodeId>>,

    /// Set once the mover has crossed an off-beach transition.
    pub moving_to_safety: Vec<bool>,
}

impl MoverStore {
    /// `true` if there are no movers.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    /// Waypoint network the mover is currently following.
    #[inline]
    pub fn network(&self, agent: AgentId) -> Network {
        if self.moving_to_safety[agent.index()] {
            Network::Road
        } else {
            Network::Beach
        }
    }

    #[inline]
    pub fn is_movable(&self, agent: AgentId) -> bool {
        self.phase[agent.index()].is_movable()
    }

    /// A movable mover without a target can never move again on its own.
    #[inline]
    pub fn is_stuck(&self, agent: AgentId) -> bool {
        self.is_movable(agent) && self.target[agent.index()].is_none()
    }

    /// Speed the mover would use on open (`penalized = true`) or paved terrain.
    #[inline]
    pub fn terrain_speed(&self, agent: AgentId, penalized: bool) -> f64 {
        if penalized {
            self.penalty_speed[agent.index()]
        } else {
            self.nominal_speed[agent.index()]
        }
    }

    /// Append one mover in its class's initial phase.  Returns its id.
    pub(crate) fn push(
        &mut self,
        class:         MoverClass,
        position:      Point2,
        nominal_speed: f64,
        penalty_speed: f64,
        compliance:    u8,
    ) -> AgentId {
        let id = AgentId(self.count as u32);
        self.class.push(class);
        self.nominal_speed.push(nominal_speed);
        self.penalty_speed.push(penalty_speed);
        self.compliance.push(compliance);
        self.phase.push(Phase::initial(class));
        self.position.push(position);
        self.speed.push(nominal_speed);
        self.target.push(None);
        self.alternate.push(None);
        self.moving_to_safety.push(false);
        self.count += 1;
        id
    }
}
