//! corridor — smallest runnable scene for the patrol agent workspace.
//!
//! Three agents patrol a two-lane corridor.  The west-lane charger sights the
//! target, charges, and runs into a lookout standing in its lane; the east
//! lane agent stares at a crate for the whole run.  Halfway through, the
//! level is reset and the scene plays out again.
//!
//! Usage: `corridor [config.json]`.  The optional JSON file overrides the
//! run settings and agent tuning (see `DemoConfig`).  Set `RUST_LOG=debug` to
//! follow every phase transition.

mod level;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use glam::{Quat, Vec3};
use log::info;
use serde::Deserialize;

use patrol_behavior::{
    Contact, PatrolAgentBuilder, PatrolConfig, TargetLog, TimedAnimator,
};
use patrol_core::{AgentId, CollisionVolume, Pose, SimConfig, Tick};
use patrol_output::{CsvWriter, OutputWriter, TraceObserver};
use patrol_sim::{AgentSnapshot, SimBuilder, SimObserver};

use level::{EAST_LANE_X, LANE_TILES, WEST_LANE_X, build_level};

// ── Constants ─────────────────────────────────────────────────────────────────

const OUTPUT_DIR: &str = "output/corridor";
const BODY_HALF:  Vec3 = Vec3::new(0.4, 0.5, 0.4);

// ── Config file ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
struct DemoConfig {
    sim:    SimConfig,
    patrol: PatrolConfig,
    /// Tick at which every agent and the level are reset.  0 disables.
    reset_at: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            sim: SimConfig {
                tick_hz:              50,
                total_ticks:          1_500,
                seed:                 42,
                trace_interval_ticks: 5,
            },
            patrol:   PatrolConfig::default(),
            reset_at: 750,
        }
    }
}

fn load_config(path: Option<PathBuf>) -> Result<DemoConfig> {
    let Some(path) = path else {
        return Ok(DemoConfig::default());
    };
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("reading {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

// ── Observer wrapper to count rows ───────────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:         TraceObserver<W>,
    snapshot_rows: usize,
    summary_rows:  usize,
    contacts:      usize,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: TraceObserver<W>) -> Self {
        Self { inner, snapshot_rows: 0, summary_rows: 0, contacts: 0 }
    }
}

impl<W: OutputWriter> SimObserver for CountingObserver<W> {
    fn on_tick_start(&mut self, tick: Tick) {
        self.inner.on_tick_start(tick);
    }

    fn on_contact(&mut self, tick: Tick, agent: AgentId, contact: &Contact) {
        self.contacts += 1;
        info!("tick {}: agent {} touched {:?} ({:?})", tick.0, agent.0, contact.other, contact.kind);
        self.inner.on_contact(tick, agent, contact);
    }

    fn on_tick_end(&mut self, tick: Tick, contacts: usize) {
        self.inner.on_tick_end(tick, contacts);
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &[AgentSnapshot]) {
        self.snapshot_rows += agents.len();
        self.summary_rows += 1;
        self.inner.on_snapshot(tick, agents);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── Agents ────────────────────────────────────────────────────────────────────

fn patroller(id: u32, anchor: Pose, config: PatrolConfig) -> PatrolAgentBuilder<TimedAnimator> {
    PatrolAgentBuilder::new(AgentId(id), anchor)
        .animator(TimedAnimator::default())
        .volume(CollisionVolume::standing(BODY_HALF))
        .config(config)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    let demo = load_config(std::env::args_os().nth(1).map(PathBuf::from))?;
    let config = demo.sim.clone();

    println!("=== corridor — patrol agent demo ===");
    println!(
        "Ticks: {}  |  Hz: {}  |  Seed: {}  |  Reset at: {}",
        config.total_ticks, config.tick_hz, config.seed, demo.reset_at
    );
    println!();

    // 1. Build the level.
    let level = build_level()?;
    println!(
        "Level: {} colliders ({} tiles per lane), target {:?}, crate {:?}",
        level.world.len(),
        LANE_TILES,
        level.target,
        level.crate_,
    );

    // 2. Agents: a west-lane charger, a lookout in its lane facing away, and
    //    an east-lane agent whose view is blocked.
    let west = Quat::from_rotation_y(-std::f32::consts::FRAC_PI_2);
    let agents = [
        patroller(0, Pose::at(Vec3::new(WEST_LANE_X, 0.0, 0.0)), demo.patrol),
        patroller(1, Pose::new(Vec3::new(WEST_LANE_X, 0.0, 8.0), west), demo.patrol),
        patroller(2, Pose::at(Vec3::new(EAST_LANE_X, 0.0, 0.0)), demo.patrol),
    ];
    let agent_count = agents.len();

    // 3. Build sim.
    let mut sim = SimBuilder::new(config.clone(), level.world)
        .agents(agents)
        .handler(TargetLog::default())
        .build()?;
    println!("Sim: {agent_count} agents, snapshot every {} ticks", config.trace_interval_ticks);
    println!();

    // 4. Set up output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = CountingObserver::new(TraceObserver::new(writer, &config));

    // 5. Run, resetting the level partway through.
    let t0 = Instant::now();
    if demo.reset_at > 0 && demo.reset_at < config.total_ticks {
        sim.run_ticks(demo.reset_at, &mut obs)?;
        println!("Reset at tick {}", sim.now().0);
        sim.reset_all();
    }
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 6. Summary.
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  final clock         : {}", sim.clock);
    println!("  agent_trace.csv     : {} rows", obs.snapshot_rows);
    println!("  tick_summaries.csv  : {} rows", obs.summary_rows);
    println!("  contacts            : {}", obs.contacts);
    for caught in &sim.handler.events {
        println!("  target caught by agent {} at tick {}", caught.agent.0, caught.tick.0);
    }
    println!();

    // 7. Final agent table.
    println!("{:<6} {:<18} {:>8} {:>8} {:>8} {:>6}", "Agent", "Phase", "x", "y", "z", "Tile");
    println!("{}", "-".repeat(58));
    for agent in &sim.agents {
        let p = agent.pose().position;
        let tile = agent
            .current_tile()
            .map(|t| t.id.0.to_string())
            .unwrap_or_else(|| "-".into());
        println!(
            "{:<6} {:<18} {:>8.2} {:>8.2} {:>8.2} {:>6}",
            agent.id().0,
            agent.phase(),
            p.x,
            p.y,
            p.z,
            tile,
        );
    }

    Ok(())
}
