//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `agent_trace.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;
use patrol_behavior::Phase;

use crate::writer::OutputWriter;
use crate::{AgentTraceRow, OutputResult, TickSummaryRow};

pub const AGENT_TRACE_FILE: &str = "agent_trace.csv";
pub const TICK_SUMMARY_FILE: &str = "tick_summaries.csv";

/// Writes the trace to two CSV files.
pub struct CsvWriter {
    agents:    Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut agents = Writer::from_path(dir.join(AGENT_TRACE_FILE))?;
        agents.write_record([
            "agent_id", "tick", "phase", "elapsed", "duration",
            "x", "y", "z", "current_tile", "last_tile",
        ])?;

        let mut summaries = Writer::from_path(dir.join(TICK_SUMMARY_FILE))?;
        let header = ["tick", "sim_secs", "contacts"]
            .into_iter()
            .chain(Phase::ALL.iter().map(|p| p.as_str()));
        summaries.write_record(header)?;

        Ok(Self { agents, summaries, finished: false })
    }
}

/// Tile ids print as empty cells when unknown.
fn tile_cell(id: u32) -> String {
    if id == crate::NO_TILE { String::new() } else { id.to_string() }
}

impl OutputWriter for CsvWriter {
    fn write_agents(&mut self, rows: &[AgentTraceRow]) -> OutputResult<()> {
        for row in rows {
            self.agents.write_record(&[
                row.agent_id.to_string(),
                row.tick.to_string(),
                row.phase.to_string(),
                row.elapsed.to_string(),
                row.duration.to_string(),
                format!("{:.4}", row.x),
                format!("{:.4}", row.y),
                format!("{:.4}", row.z),
                tile_cell(row.current_tile),
                tile_cell(row.last_tile),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        let mut record = Vec::with_capacity(3 + row.phases.len());
        record.push(row.tick.to_string());
        record.push(format!("{:.3}", row.sim_secs));
        record.push(row.contacts.to_string());
        record.extend(row.phases.iter().map(u64::to_string));
        self.summaries.write_record(&record)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.agents.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
