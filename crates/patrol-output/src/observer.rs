//! `TraceObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use patrol_behavior::{Contact, Phase};
use patrol_core::{AgentId, SimConfig, Tick};
use patrol_sim::{AgentSnapshot, SimObserver};

use crate::row::{AgentTraceRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes agent rows and tick summaries to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct TraceObserver<W: OutputWriter> {
    writer:     W,
    tick_hz:    u32,
    /// Contacts counted since the last summary row.
    contacts:   u64,
    rows:       Vec<AgentTraceRow>,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> TraceObserver<W> {
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            tick_hz:    config.tick_hz.max(1),
            contacts:   0,
            rows:       Vec::new(),
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Flush the writer outside of [`Sim::run`][patrol_sim::Sim::run], for
    /// runs driven with `run_ticks`.
    pub fn finish(&mut self) -> OutputResult<()> {
        self.writer.finish()
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for TraceObserver<W> {
    fn on_contact(&mut self, _tick: Tick, _agent: AgentId, _contact: &Contact) {
        self.contacts += 1;
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &[AgentSnapshot]) {
        self.rows.clear();
        self.rows.extend(agents.iter().map(|s| AgentTraceRow::from_snapshot(tick.0, s)));

        let mut phases = [0u64; Phase::ALL.len()];
        for s in agents {
            phases[s.phase.index()] += 1;
        }
        let summary = TickSummaryRow {
            tick: tick.0,
            sim_secs: tick.0 as f64 / self.tick_hz as f64,
            contacts: std::mem::take(&mut self.contacts),
            phases,
        };

        if !self.rows.is_empty() {
            let result = self.writer.write_agents(&self.rows);
            self.store_err(result);
        }
        let result = self.writer.write_tick_summary(&summary);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
