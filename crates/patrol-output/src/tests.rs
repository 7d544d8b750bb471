//! Unit tests for patrol-output.

use std::fs;

use glam::Vec3;
use patrol_behavior::{ClipTimings, PatrolAgentBuilder, Phase, TimedAnimator};
use patrol_core::{AgentId, CollisionVolume, Pose, SimConfig, TileId};
use patrol_sim::{AgentSnapshot, Sim, SimBuilder};
use patrol_spatial::{CollisionWorld, Layer};

use crate::csv::{AGENT_TRACE_FILE, TICK_SUMMARY_FILE};
use crate::{
    AgentTraceRow, CsvWriter, NO_TILE, OutputError, OutputResult, OutputWriter, TickSummaryRow,
    TraceObserver,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn config(total_ticks: u64, interval: u64) -> SimConfig {
    SimConfig { tick_hz: 50, total_ticks, seed: 1, trace_interval_ticks: interval }
}

/// One charger on a short strip of tiles facing a target.
fn small_sim(cfg: SimConfig) -> Sim<TimedAnimator> {
    let mut w = CollisionWorld::new();
    for k in 0..4 {
        w.add_tile(Vec3::new(0.0, 0.0, 2.0 * k as f32), Vec3::new(1.0, 0.25, 1.0)).unwrap();
    }
    w.add_standing(Layer::Target, Vec3::new(0.0, 0.0, 4.5), Vec3::splat(0.5)).unwrap();

    let agent = PatrolAgentBuilder::new(AgentId(0), Pose::IDENTITY)
        .animator(TimedAnimator::new(ClipTimings { windup: 2, cooldown: 2, pre_wait: 2 }))
        .volume(CollisionVolume::standing(Vec3::new(0.4, 0.5, 0.4)));
    SimBuilder::new(cfg, w).agent(agent).build().unwrap()
}

fn snapshot() -> AgentSnapshot {
    AgentSnapshot {
        agent:        AgentId(3),
        phase:        Phase::Charging,
        elapsed:      7,
        duration:     48,
        position:     Vec3::new(0.0, 0.0, 1.5),
        current_tile: Some(TileId(1)),
        last_tile:    None,
    }
}

/// Writer that fails every call and counts them.
#[derive(Default)]
struct FailingWriter {
    calls: usize,
}

impl OutputWriter for FailingWriter {
    fn write_agents(&mut self, _rows: &[AgentTraceRow]) -> OutputResult<()> {
        self.calls += 1;
        Err(OutputError::Io(std::io::Error::other(format!("write {}", self.calls))))
    }
    fn write_tick_summary(&mut self, _row: &TickSummaryRow) -> OutputResult<()> {
        self.calls += 1;
        Err(OutputError::Io(std::io::Error::other(format!("write {}", self.calls))))
    }
    fn finish(&mut self) -> OutputResult<()> {
        Ok(())
    }
}

// ── Rows ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod rows {
    use super::*;

    #[test]
    fn row_from_snapshot() {
        let row = AgentTraceRow::from_snapshot(12, &snapshot());
        assert_eq!(row.agent_id, 3);
        assert_eq!(row.tick, 12);
        assert_eq!(row.phase, Phase::Charging);
        assert_eq!((row.elapsed, row.duration), (7, 48));
        assert_eq!(row.z, 1.5);
        assert_eq!(row.current_tile, 1);
        assert_eq!(row.last_tile, NO_TILE);
    }

    #[test]
    fn summary_count_by_phase() {
        let mut phases = [0; Phase::ALL.len()];
        phases[Phase::Stunned.index()] = 4;
        let row = TickSummaryRow { tick: 0, sim_secs: 0.0, contacts: 0, phases };
        assert_eq!(row.count(Phase::Stunned), 4);
        assert_eq!(row.count(Phase::Patrolling), 0);
    }
}

// ── CSV ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_writer {
    use super::*;

    #[test]
    fn headers_written_on_create() {
        let dir = tempfile::tempdir().unwrap();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let agents = fs::read_to_string(dir.path().join(AGENT_TRACE_FILE)).unwrap();
        assert_eq!(
            agents.lines().next().unwrap(),
            "agent_id,tick,phase,elapsed,duration,x,y,z,current_tile,last_tile",
        );
        let summaries = fs::read_to_string(dir.path().join(TICK_SUMMARY_FILE)).unwrap();
        assert!(summaries.starts_with("tick,sim_secs,contacts,patrolling,charge_windup,"));
        assert!(summaries.lines().next().unwrap().ends_with(",stunned,reset_wait"));
    }

    #[test]
    fn agent_row_format() {
        let dir = tempfile::tempdir().unwrap();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_agents(&[AgentTraceRow::from_snapshot(12, &snapshot())]).unwrap();
        w.finish().unwrap();
        w.finish().unwrap(); // idempotent

        let agents = fs::read_to_string(dir.path().join(AGENT_TRACE_FILE)).unwrap();
        let line = agents.lines().nth(1).unwrap();
        assert_eq!(line, "3,12,charging,7,48,0.0000,0.0000,1.5000,1,");
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer {
    use super::*;

    #[test]
    fn full_run_writes_every_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(40, 5);
        let mut sim = small_sim(cfg.clone());
        let mut obs = TraceObserver::new(CsvWriter::new(dir.path()).unwrap(), &cfg);
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        let agents = fs::read_to_string(dir.path().join(AGENT_TRACE_FILE)).unwrap();
        assert_eq!(agents.lines().count(), 1 + 8);
        let summaries = fs::read_to_string(dir.path().join(TICK_SUMMARY_FILE)).unwrap();
        assert_eq!(summaries.lines().count(), 1 + 8);

        // First snapshot: tick 0, one agent winding up.
        let first: Vec<&str> = summaries.lines().nth(1).unwrap().split(',').collect();
        assert_eq!(first[0], "0");
        assert_eq!(first[1], "0.000");
        assert_eq!(first[3 + Phase::ChargeWindup.index()], "1");
    }

    #[test]
    fn contacts_counted_into_next_summary() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(101, 100);
        let mut sim = small_sim(cfg.clone());
        let mut obs = TraceObserver::new(CsvWriter::new(dir.path()).unwrap(), &cfg);
        // The charger reaches the target around tick 42 and has backed off
        // again well before tick 100.
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        let summaries = fs::read_to_string(dir.path().join(TICK_SUMMARY_FILE)).unwrap();
        let rows: Vec<Vec<&str>> = summaries.lines().skip(1).map(|l| l.split(',').collect()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][2], "0");
        assert_eq!(rows[1][0], "100");
        assert_eq!(rows[1][1], "2.000");
        assert_eq!(rows[1][2], "1");
        assert_eq!(rows[1][3 + Phase::Returning.index()], "1");
    }

    #[test]
    fn finish_without_run() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(10, 1);
        let mut sim = small_sim(cfg.clone());
        let mut obs = TraceObserver::new(CsvWriter::new(dir.path()).unwrap(), &cfg);
        sim.run_ticks(4, &mut obs).unwrap();
        obs.finish().unwrap();

        let agents = fs::read_to_string(dir.path().join(AGENT_TRACE_FILE)).unwrap();
        assert_eq!(agents.lines().count(), 1 + 4);
    }

    #[test]
    fn keeps_first_error() {
        let cfg = config(3, 1);
        let mut sim = small_sim(cfg.clone());
        let mut obs = TraceObserver::new(FailingWriter::default(), &cfg);
        sim.run(&mut obs).unwrap();
        let err = obs.take_error().unwrap();
        assert_eq!(err.to_string(), "I/O error: write 1");
        assert!(obs.take_error().is_none());
        // Agent rows and summaries for three ticks.
        assert_eq!(obs.into_writer().calls, 6);
    }
}
