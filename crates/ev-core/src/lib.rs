//! `ev-core`: foundational types for the `rust_evac` evacuation simulator.
//!
//! This crate is a dependency of every other `ev-*` crate.  It has no `ev-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`ids`]    | `AgentId`, `NodeId`, `RegionId`                            |
//! | [`geo`]    | `Point2`, `Polygon` (planar map units)                     |
//! | [`time`]   | `Tick`, `EvacClock`                                        |
//! | [`rng`]    | `AgentRng` (per-mover), `SimRng` (global)                  |
//! | [`phase`]  | `Phase`, `MoverClass`, `Network`                           |
//! | [`config`] | `SimConfig`, `EvacParams`, `SpeedProfile`                  |
//! | [`error`]  | `EvacError`, `EvacResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod phase;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{EvacParams, SimConfig, SpeedProfile};
pub use error::{EvacError, EvacResult};
pub use geo::{Point2, Polygon};
pub use ids::{AgentId, NodeId, RegionId};
pub use phase::{MoverClass, Network, Phase};
pub use rng::{AgentRng, SimRng};
pub use time::{EvacClock, Tick};
