//! `ev-output`: simulation output writers for the rust_evac simulator.
//!
//! | Backend | Files created                                                         |
//! |---------|-----------------------------------------------------------------------|
//! | CSV     | `phase_counts.csv`, `mover_snapshots.csv`, `evacuation_summary.csv`   |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `ev_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ev_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! let report = sim.run(&mut obs);
//! if let Some(e) = obs.take_error() {
//!     return Err(e.into());
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{MoverSnapshotRow, PhaseCountRow, SummaryRow};
pub use writer::OutputWriter;
