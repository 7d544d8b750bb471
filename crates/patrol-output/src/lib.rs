//! `patrol-output` — simulation trace writers.
//!
//! | Backend | Files created                               |
//! |---------|---------------------------------------------|
//! | CSV     | `agent_trace.csv`, `tick_summaries.csv`     |
//!
//! Backends implement [`OutputWriter`] and are driven by [`TraceObserver`],
//! which implements `patrol_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use patrol_output::{CsvWriter, TraceObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = TraceObserver::new(writer, &config);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TraceObserver;
pub use row::{AgentTraceRow, NO_TILE, TickSummaryRow};
pub use writer::OutputWriter;
