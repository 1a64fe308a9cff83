//! `ev-sim`: tick orchestrator for the rust_evac simulator.
//!
//! # Tick loop
//!
//! ```text
//! loop:
//!   ① Clock     : advance one second, roll the minute at 60.
//!   ② Order     : shuffle every AgentId with the run's SimRng.
//!   ③ Step      : MovementEngine::step each mover in that order and
//!                  count its resulting phase.
//!   ④ Reindex   : refresh mover positions in the spatial index (once).
//!   ⑤ Record    : push the counts onto the time series.
//!   ⑥ Terminate : stop when no mover is left outside safety, or when
//!                  the clock reaches `max_minutes`.
//! ```
//!
//! The index is never refreshed inside ③, so every neighbour query in a
//! tick sees the movers where they stood when the tick began.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ev_core::SimConfig;
//! use ev_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(config, regions)
//!     .beach_markers(beach)
//!     .road_markers(road)
//!     .build()?;
//! let report = sim.run(&mut NoopObserver);
//! println!("{} safe after {}", report.counts.safe, report.time_label());
//! ```

pub mod builder;
pub mod counts;
pub mod error;
pub mod observer;
pub mod sim;


pub use builder::SimBuilder;
pub use counts::{PhaseCounts, TickStats};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{EvacReport, Sim, Termination, World};
