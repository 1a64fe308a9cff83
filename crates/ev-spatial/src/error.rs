//! Spatial-subsystem error type.

use thiserror::Error;

use ev_core::{EvacError, Network};

use crate::RegionKind;

/// Errors produced by `ev-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("{} network has markers but the map has no {kind} region", network.as_str())]
    MissingDestination { network: Network, kind: RegionKind },

    #[error(transparent)]
    Core(#[from] EvacError),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
