//! `ev-mobility`: initial routing and the per-tick movement engine.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`router`]   | `Router`: first beach target per mover, compliance shortcut  |
//! | [`terrain`]  | Open-ground sensing for the speed selection                   |
//! | [`conflict`] | `Resolution`: yield / reroute decision for one mover         |
//! | [`engine`]   | `MovementEngine`: the six-step mover update, `StepReport`    |
//!
//! # Movement model (one tick = one second)
//!
//! Each movable mover is stepped once per tick by [`MovementEngine::step`]:
//!
//! 1. pick the effective speed from the surrounding terrain and crowd;
//! 2. yield to a closer mover heading for the same waypoint (road movers
//!    reroute to their alternate instead);
//! 3. move `speed` units straight towards the heading waypoint;
//! 4. on arrival adopt the waypoint's successor;
//! 5. on first contact with a transition region leave the beach and pick
//!    the nearest road waypoint;
//! 6. on contact with a safe region become `Safe`.
//!
//! Neighbour membership comes from the [`SpatialQuery`][ev_spatial::SpatialQuery]
//! index, which is refreshed only between ticks.  Attributes of the
//! neighbours found (phase, target, position) are read from the live
//! [`MoverStore`][ev_agent::MoverStore], so movers stepped earlier in the
//! same tick are seen where they are now.

pub mod conflict;
pub mod engine;
pub mod router;
pub mod terrain;

#[cfg(test)]
mod tests;

pub use conflict::Resolution;
pub use engine::{Motion, MovementEngine, StepReport};
pub use router::{Router, RoutingSummary};
