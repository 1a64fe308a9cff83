//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `phase_counts.csv`: one row per tick
//! - `mover_snapshots.csv`: one row per mover per snapshot tick
//! - `evacuation_summary.csv`: a single row written at the end of the run

use std::fs::File;
use std::path::Path;

use csv::Writer;

use ev_core::Phase;

use crate::writer::OutputWriter;
use crate::{MoverSnapshotRow, OutputResult, PhaseCountRow, SummaryRow};

const COUNT_COLUMNS: [&str; 12] = [
    "tick",
    "time",
    "susceptible",
    "off_beach",
    "child_susceptible",
    "child_off_beach",
    "safe",
    "moved",
    "rerouted",
    "blocked",
    "stuck",
    "arrivals",
];

const SNAPSHOT_COLUMNS: [&str; 8] = ["agent_id", "tick", "class", "phase", "x", "y", "speed", "target"];

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    counts:    Writer<File>,
    snapshots: Writer<File>,
    summary:   Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut counts = Writer::from_path(dir.join("phase_counts.csv"))?;
        counts.write_record(COUNT_COLUMNS)?;

        let mut snapshots = Writer::from_path(dir.join("mover_snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_COLUMNS)?;

        let mut summary = Writer::from_path(dir.join("evacuation_summary.csv"))?;
        summary.write_record(Phase::ALL.iter().map(|p| p.as_str()).chain(["time"]))?;

        Ok(Self { counts, snapshots, summary, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_counts(&mut self, row: &PhaseCountRow) -> OutputResult<()> {
        let c = &row.counts;
        let s = &row.stats;
        self.counts.write_record(&[
            row.tick.to_string(),
            format!("{}:{:02}", row.minute, row.second),
            c.susceptible.to_string(),
            c.off_beach.to_string(),
            c.child_susceptible.to_string(),
            c.child_off_beach.to_string(),
            c.safe.to_string(),
            s.moved.to_string(),
            s.rerouted.to_string(),
            s.blocked.to_string(),
            s.stuck.to_string(),
            s.arrivals.to_string(),
        ])?;
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[MoverSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.agent_id.to_string(),
                row.tick.to_string(),
                row.class.as_str().to_owned(),
                row.phase.as_str().to_owned(),
                format!("{:.3}", row.x),
                format!("{:.3}", row.y),
                format!("{:.4}", row.speed),
                row.target.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()> {
        let mut record: Vec<String> = Phase::ALL.iter().map(|&p| row.counts.get(p).to_string()).collect();
        record.push(row.time());
        self.summary.write_record(&record)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.counts.flush()?;
        self.snapshots.flush()?;
        self.summary.flush()?;
        Ok(())
    }
}
