//! Plain data row types written by output backends.

use patrol_behavior::Phase;
use patrol_sim::AgentSnapshot;

/// Tile column value for "no tile known".
pub const NO_TILE: u32 = u32::MAX;

/// One agent at one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentTraceRow {
    pub agent_id:     u32,
    pub tick:         u64,
    pub phase:        Phase,
    pub elapsed:      u32,
    pub duration:     u32,
    pub x:            f32,
    pub y:            f32,
    pub z:            f32,
    /// [`NO_TILE`] if the agent has never stood on a tile.
    pub current_tile: u32,
    pub last_tile:    u32,
}

impl AgentTraceRow {
    pub fn from_snapshot(tick: u64, s: &AgentSnapshot) -> Self {
        Self {
            agent_id:     s.agent.0,
            tick,
            phase:        s.phase,
            elapsed:      s.elapsed,
            duration:     s.duration,
            x:            s.position.x,
            y:            s.position.y,
            z:            s.position.z,
            current_tile: s.current_tile.map_or(NO_TILE, |t| t.0),
            last_tile:    s.last_tile.map_or(NO_TILE, |t| t.0),
        }
    }
}

/// Phase histogram for one snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:     u64,
    pub sim_secs: f64,
    /// Contacts that began since the previous summary.
    pub contacts: u64,
    /// Agent count per phase, indexed by [`Phase::index`].
    pub phases:   [u64; Phase::ALL.len()],
}

impl TickSummaryRow {
    pub fn count(&self, phase: Phase) -> u64 {
        self.phases[phase.index()]
    }
}
