use ev_core::EvacError;
use ev_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match population {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error(transparent)]
    Core(#[from] EvacError),

    #[error(transparent)]
    Spatial(#[from] SpatialError),
}

pub type SimResult<T> = Result<T, SimError>;
