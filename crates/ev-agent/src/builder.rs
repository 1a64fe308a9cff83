//! Fluent builder that spawns the population into a [`MoverStore`].
//!
//! # Usage
//!
//! ```rust
//! use ev_agent::{MoverStoreBuilder, SpawnArea};
//! use ev_core::{Point2, SimConfig, SimRng};
//!
//! let config = SimConfig { adults: 20, children: 5, ..SimConfig::default() };
//! let area = SpawnArea { center: Point2::new(50.0, 20.0), spread_x: 80, spread_y: 30 };
//!
//! let mut rng = SimRng::new(config.seed);
//! let store = MoverStoreBuilder::new(&config)
//!     .spawn_areas(vec![area])
//!     .build(&mut rng)
//!     .unwrap();
//!
//! assert_eq!(store.count, 25);
//! ```

use rand_distr::{Distribution, Normal};
use tracing::debug;

use ev_core::{
    AgentId, AgentRng, EvacError, EvacResult, MoverClass, Point2, Polygon, SimConfig, SimRng,
};

use crate::MoverStore;

// ── SpawnArea ─────────────────────────────────────────────────────────────────

/// Where movers may appear: a centre plus an integer spread per axis.
///
/// A spawned mover lands at `center + U{0..=spread} - spread / 2` on each
/// axis, so the spread is the full width of the spawn window.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpawnArea {
    pub center:   Point2,
    pub spread_x: u32,
    pub spread_y: u32,
}

impl SpawnArea {
    /// Spawn window centred on the polygon's centroid, as wide and tall as
    /// its bounding box (truncated to whole units).
    pub fn from_polygon(polygon: &Polygon) -> Self {
        let (min, max) = polygon.bounds();
        Self {
            center:   polygon.centroid(),
            spread_x: (max.x - min.x).max(0.0) as u32,
            spread_y: (max.y - min.y).max(0.0) as u32,
        }
    }

    fn sample(&self, rng: &mut SimRng) -> Point2 {
        let dx = rng.gen_range(0..=self.spread_x) as f64 - self.spread_x as f64 / 2.0;
        let dy = rng.gen_range(0..=self.spread_y) as f64 - self.spread_y as f64 / 2.0;
        Point2::new(self.center.x + dx, self.center.y + dy)
    }
}

// ── MoverStoreBuilder ─────────────────────────────────────────────────────────

/// Fluent builder for [`MoverStore`].
///
/// The configured adults are spawned first, then the children, then any
/// explicitly [`place`](Self::place)d movers, so ids follow that order.
pub struct MoverStoreBuilder<'a> {
    config:      &'a SimConfig,
    spawn_areas: Vec<SpawnArea>,
    placed:      Vec<(MoverClass, Point2)>,
}

impl<'a> MoverStoreBuilder<'a> {
    pub fn new(config: &'a SimConfig) -> Self {
        Self { config, spawn_areas: Vec::new(), placed: Vec::new() }
    }

    /// Areas the configured population is spread over (picked uniformly).
    pub fn spawn_areas(mut self, areas: Vec<SpawnArea>) -> Self {
        self.spawn_areas = areas;
        self
    }

    /// Add one mover at an exact position, on top of the configured
    /// population.
    pub fn place(mut self, class: MoverClass, position: Point2) -> Self {
        self.placed.push((class, position));
        self
    }

    /// Spawn every mover and draw its static attributes.
    ///
    /// Placement draws from `rng`; speeds and compliance come from a
    /// per-mover [`AgentRng`] seeded with `config.seed`.
    ///
    /// # Errors
    /// [`EvacError::Config`] when a population is configured but no spawn
    /// area was supplied, or when a speed profile is not a valid normal
    /// distribution.
    pub fn build(self, rng: &mut SimRng) -> EvacResult<MoverStore> {
        let spawned = self.config.population();
        if spawned > 0 && self.spawn_areas.is_empty() {
            return Err(EvacError::Config(format!(
                "{spawned} movers configured but no spawn area available"
            )));
        }

        let adult = self.normal(MoverClass::Adult)?;
        let child = self.normal(MoverClass::Child)?;

        let mut store = MoverStore::default();
        let classes = std::iter::repeat_n(MoverClass::Adult, self.config.adults)
            .chain(std::iter::repeat_n(MoverClass::Child, self.config.children));

        for class in classes {
            let area = self.spawn_areas[rng.gen_range(0..self.spawn_areas.len())];
            let position = area.sample(rng);
            self.push_mover(&mut store, class, position, &adult, &child);
        }
        for &(class, position) in &self.placed {
            self.push_mover(&mut store, class, position, &adult, &child);
        }

        debug!(
            adults = self.config.adults,
            children = self.config.children,
            placed = self.placed.len(),
            "population spawned"
        );
        Ok(store)
    }

    fn normal(&self, class: MoverClass) -> EvacResult<Normal<f64>> {
        let profile = self.config.speed_profile(class);
        Normal::new(profile.mean, profile.std_dev).map_err(|e| {
            EvacError::Config(format!("invalid {} speed profile: {e}", class.as_str()))
        })
    }

    fn push_mover(
        &self,
        store:    &mut MoverStore,
        class:    MoverClass,
        position: Point2,
        adult:    &Normal<f64>,
        child:    &Normal<f64>,
    ) -> AgentId {
        let params = &self.config.params;
        let mut agent_rng = AgentRng::new(self.config.seed, AgentId(store.count as u32));
        let dist = match class {
            MoverClass::Adult => adult,
            MoverClass::Child => child,
        };
        let nominal = dist.sample(agent_rng.inner()).max(params.min_speed);
        let compliance = agent_rng.gen_range(1..=100u8);
        store.push(class, position, nominal, nominal / params.terrain_penalty, compliance)
    }
}
