//! `ev-agent`: Structure-of-Arrays mover storage for the `rust_evac` simulator.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`store`]     | `MoverStore` (SoA arrays indexed by `AgentId`)           |
//! | [`builder`]   | `MoverStoreBuilder`, `SpawnArea` (population spawning)   |
//!
//! Movers are created once at setup and never removed; reaching the `Safe`
//! phase is how a mover leaves the simulation.

pub mod builder;
pub mod store;


pub use builder::{MoverStoreBuilder, SpawnArea};
pub use store::MoverStore;
