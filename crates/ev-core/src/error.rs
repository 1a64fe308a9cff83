//! Simulator error type.
//!
//! Sub-crates define their own error enums and wrap `EvacError` as one
//! variant via `From`.  Errors only arise during setup (configuration,
//! geometry validation); the per-tick engine reports its recoverable
//! conditions as outcomes instead.

use thiserror::Error;

/// The top-level error type for `ev-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum EvacError {
    #[error("polygon needs at least 3 vertices, got {0}")]
    DegeneratePolygon(usize),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `ev-*` crates.
pub type EvacResult<T> = Result<T, EvacError>;
