//! Simulation observer trait for progress reporting and data collection.

use glam::Vec3;
use patrol_behavior::{Animator, Contact, PatrolAgent, Phase};
use patrol_core::{AgentId, Tick, TileId};

/// Per-agent state handed to [`SimObserver::on_snapshot`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AgentSnapshot {
    pub agent:        AgentId,
    pub phase:        Phase,
    pub elapsed:      u32,
    pub duration:     u32,
    pub position:     Vec3,
    pub current_tile: Option<TileId>,
    pub last_tile:    Option<TileId>,
}

impl AgentSnapshot {
    pub fn of<A: Animator>(agent: &PatrolAgent<A>) -> Self {
        Self {
            agent:        agent.id(),
            phase:        agent.phase(),
            elapsed:      agent.elapsed(),
            duration:     agent.duration(),
            position:     agent.pose().position,
            current_tile: agent.current_tile().map(|t| t.id),
            last_tile:    agent.last_tile().map(|t| t.id),
        }
    }
}

/// Callbacks invoked by [`Sim`][crate::Sim] at key points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
pub trait SimObserver {
    /// Called at the very start of each tick, before any agent steps.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once for every contact that began this tick, after the agent
    /// has reacted to it.
    fn on_contact(&mut self, _tick: Tick, _agent: AgentId, _contact: &Contact) {}

    /// Called at the end of each tick.  `contacts` is the number of contacts
    /// that began this tick.
    fn on_tick_end(&mut self, _tick: Tick, _contacts: usize) {}

    /// Called every `config.trace_interval_ticks` ticks with one entry per
    /// agent in id order.
    fn on_snapshot(&mut self, _tick: Tick, _agents: &[AgentSnapshot]) {}

    /// Called once after the final tick of [`Sim::run`][crate::Sim::run].
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
