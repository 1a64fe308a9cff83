//! Fluent builder for constructing a [`Sim`].

use tracing::debug;

use ev_agent::{MoverStoreBuilder, SpawnArea};
use ev_core::{EvacClock, MoverClass, Network, Point2, SimConfig, SimRng};
use ev_mobility::Router;
use ev_spatial::{RegionKind, RegionSet, SpatialIndex, WaypointGraphBuilder};

use crate::{PhaseCounts, Sim, SimError, SimResult, World};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`]: population, seed, time cap, radii, …
/// - [`RegionSet`]: the static map
///
/// # Optional inputs (have defaults)
///
/// | Method                   | Default                                   |
/// |--------------------------|-------------------------------------------|
/// | `.beach_markers(v)`      | none (movers stay unrouted)               |
/// | `.road_markers(v)`       | none                                      |
/// | `.initial_positions(v)`  | spawned at random inside `Start` regions  |
/// | `.place(class, p)`       | no extra movers                           |
///
/// # Setup order
///
/// 1. validate the config and require at least one mover;
/// 2. build the waypoint graph;
/// 3. spawn the population;
/// 4. index regions, waypoints and movers;
/// 5. assign every mover its initial target.
pub struct SimBuilder {
    config:    SimConfig,
    regions:   RegionSet,
    beach:     Vec<Point2>,
    road:      Vec<Point2>,
    positions: Option<Vec<Point2>>,
    placed:    Vec<(MoverClass, Point2)>,
}

impl SimBuilder {
    pub fn new(config: SimConfig, regions: RegionSet) -> Self {
        Self {
            config,
            regions,
            beach:     Vec::new(),
            road:      Vec::new(),
            positions: None,
            placed:    Vec::new(),
        }
    }

    /// Raw beach-network marker positions.
    pub fn beach_markers(mut self, markers: Vec<Point2>) -> Self {
        self.beach = markers;
        self
    }

    /// Raw road-network marker positions.
    pub fn road_markers(mut self, markers: Vec<Point2>) -> Self {
        self.road = markers;
        self
    }

    /// Exact starting positions for the configured population (adults
    /// first, then children).  Must be length `config.population()`.
    pub fn initial_positions(mut self, positions: Vec<Point2>) -> Self {
        self.positions = Some(positions);
        self
    }

    /// Add one mover at an exact position on top of the configured
    /// population.
    pub fn place(mut self, class: MoverClass, position: Point2) -> Self {
        self.placed.push((class, position));
        self
    }

    /// Validate inputs, build the world, route the population and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate_model()?;
        let population = self.config.population();
        if population + self.placed.len() == 0 {
            return Err(SimError::Config("population must contain at least one mover".into()));
        }

        let graph = WaypointGraphBuilder::new(&self.config.params)
            .markers(Network::Beach, self.beach)
            .markers(Network::Road, self.road)
            .build(&self.regions)?;

        let mut rng = SimRng::new(self.config.seed);
        let mut movers = match self.positions {
            Some(positions) => {
                if positions.len() != population {
                    return Err(SimError::AgentCountMismatch {
                        expected: population,
                        got:      positions.len(),
                        what:     "initial positions",
                    });
                }
                let explicit = SimConfig { adults: 0, children: 0, ..self.config.clone() };
                let classes = std::iter::repeat_n(MoverClass::Adult, self.config.adults)
                    .chain(std::iter::repeat_n(MoverClass::Child, self.config.children));
                let mut builder = MoverStoreBuilder::new(&explicit);
                for (class, position) in classes.zip(positions).chain(self.placed) {
                    builder = builder.place(class, position);
                }
                builder.build(&mut rng)?
            }
            None => {
                let areas: Vec<SpawnArea> = self
                    .regions
                    .of_kind(RegionKind::Start)
                    .map(|r| SpawnArea::from_polygon(&r.polygon))
                    .collect();
                if population > 0 && areas.is_empty() {
                    return Err(SimError::Config(format!(
                        "{population} movers configured but the map has no start region"
                    )));
                }
                let mut builder = MoverStoreBuilder::new(&self.config).spawn_areas(areas);
                for (class, position) in self.placed {
                    builder = builder.place(class, position);
                }
                builder.build(&mut rng)?
            }
        };

        let index = SpatialIndex::new(&self.regions, &graph, &movers.position);
        let routing = Router::new(&self.config.params, &graph, &self.regions, &index)
            .route_all(&mut movers, self.config.compliance_threshold);

        let initial = PhaseCounts::tally(&movers);
        debug!(
            movers = movers.count,
            regions = self.regions.len(),
            waypoints = graph.len(),
            "simulation built"
        );

        Ok(Sim {
            config:      self.config,
            clock:       EvacClock::new(),
            world:       World { movers, regions: self.regions, graph, index },
            rng,
            history:     vec![(EvacClock::new(), initial)],
            routing,
            termination: None,
        })
    }
}
