//! `ev-spatial`: map regions, waypoint graphs, and spatial indexing.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                      |
//! |-------------|---------------------------------------------------------------|
//! | [`region`]  | `Region`, `RegionKind`, `Surface`, `RegionSet`                |
//! | [`network`] | `WaypointGraph`, `WaypointNode`, `WaypointGraphBuilder`       |
//! | [`index`]   | `SpatialQuery` trait, `EntityRef`, `SpatialIndex` (R-trees)   |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                            |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `parallel` | Computes distance-to-destination metrics with Rayon.       |
//! | `serde`    | Derives `Serialize`/`Deserialize` on region kinds.         |

pub mod error;
pub mod index;
pub mod network;
pub mod region;


pub use error::{SpatialError, SpatialResult};
pub use index::{EntityRef, SpatialIndex, SpatialQuery};
pub use network::{WaypointGraph, WaypointGraphBuilder, WaypointNode};
pub use region::{Region, RegionKind, RegionSet, Surface};
