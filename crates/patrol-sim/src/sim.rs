//! The `Sim` struct and its tick loop.

use glam::Vec3;
use log::{info, warn};
use patrol_behavior::{
    Animator, Contact, ContactKind, NoopTargetHandler, PatrolAgent, StepContext, TargetHandler,
};
use patrol_core::{AgentId, AgentRng, ColliderId, CoreError, SimClock, SimConfig, Tick};
use patrol_spatial::{CollisionWorld, LayerFilter};

use crate::{AgentSnapshot, SimObserver, SimResult};

/// (agent, collider) pairs whose volumes overlapped at the end of a tick.
#[cfg(feature = "fx-hash")]
pub(crate) type PairSet = rustc_hash::FxHashSet<(AgentId, ColliderId)>;
#[cfg(not(feature = "fx-hash"))]
pub(crate) type PairSet = std::collections::HashSet<(AgentId, ColliderId)>;

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// Owns the collision world, every agent with its RNG and body collider, and
/// the target handler.  Agents are indexed by `AgentId`.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<A: Animator, H: TargetHandler = NoopTargetHandler> {
    pub config: SimConfig,

    /// Simulation clock.  Tracks the current tick.
    pub clock: SimClock,

    /// Level geometry, the target and one body collider per agent.
    pub world: CollisionWorld,

    pub agents: Vec<PatrolAgent<A>>,

    /// Per-agent deterministic RNGs, kept apart from `agents` so both can be
    /// borrowed mutably in the step loop.
    pub rngs: Vec<AgentRng>,

    /// Body collider of each agent.
    pub bodies: Vec<ColliderId>,

    /// Receives target-caught notifications.
    pub handler: H,

    /// Offset of the scene root, applied to patrolling agents.
    pub scene_offset: Vec3,

    pub(crate) touching: PairSet,
    pub(crate) snapshot: Vec<AgentSnapshot>,
}

impl<A: Animator, H: TargetHandler> Sim<A, H> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Run one tick.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let contacts = self.process_tick(now, observer)?;
        observer.on_tick_end(now, contacts);

        let interval = self.config.trace_interval_ticks;
        if interval > 0 && now.0.is_multiple_of(interval) {
            self.snapshot.clear();
            self.snapshot.extend(self.agents.iter().map(AgentSnapshot::of));
            observer.on_snapshot(now, &self.snapshot);
        }

        self.clock.advance();
        Ok(())
    }

    #[inline]
    pub fn now(&self) -> Tick {
        self.clock.current_tick
    }

    #[inline]
    pub fn agent(&self, id: AgentId) -> Option<&PatrolAgent<A>> {
        self.agents.get(id.index())
    }

    #[inline]
    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut PatrolAgent<A>> {
        self.agents.get_mut(id.index())
    }

    pub fn set_scene_offset(&mut self, offset: Vec3) {
        self.scene_offset = offset;
    }

    /// Level reset: re-enable every collider and reset every agent.
    pub fn reset_all(&mut self) {
        let enabled = self.world.enable_all();
        for agent in &mut self.agents {
            agent.reset_state();
        }
        info!(
            "level reset on {}: {} agents, {} colliders re-enabled",
            self.clock.current_tick,
            self.agents.len(),
            enabled,
        );
    }

    pub fn reset_agent(&mut self, id: AgentId) -> SimResult<()> {
        self.agent_mut(id).ok_or(CoreError::AgentNotFound(id))?.reset_state();
        Ok(())
    }

    /// Park an agent in `ResetWait` until its animator signals.
    pub fn begin_reset_wait(&mut self, id: AgentId) -> SimResult<()> {
        self.agent_mut(id).ok_or(CoreError::AgentNotFound(id))?.begin_reset_wait();
        Ok(())
    }

    // ── Core tick processing ──────────────────────────────────────────────

    /// Returns the number of contacts that began this tick.
    fn process_tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<usize> {
        // ── Phase 1: step every agent ─────────────────────────────────────
        {
            let ctx = StepContext::new(now, &self.world).with_scene_offset(self.scene_offset);
            for (agent, rng) in self.agents.iter_mut().zip(self.rngs.iter_mut()) {
                agent.step(&ctx, rng);
            }
        }

        // ── Phase 2: move body colliders ──────────────────────────────────
        for (agent, &body) in self.agents.iter().zip(&self.bodies) {
            self.world.set_origin(body, agent.pose().position)?;
        }

        // ── Phase 3: contacts ─────────────────────────────────────────────
        //
        // Detection reads every body at its post-step position before any
        // agent reacts, so reaction order cannot hide a contact.
        let events = self.detect_contacts();
        for &(index, contact) in &events {
            let agent = &mut self.agents[index];
            agent.on_contact(contact, &mut self.handler, now);
            observer.on_contact(now, agent.id(), &contact);
        }

        Ok(events.len())
    }

    /// Contacts that began this tick, by agent index then collider id.
    fn detect_contacts(&mut self) -> Vec<(usize, Contact)> {
        let mut touching = PairSet::default();
        let mut events = Vec::new();

        for (index, (agent, &body)) in self.agents.iter().zip(&self.bodies).enumerate() {
            let area = agent.volume().bounds_at(agent.pose().position);
            for other in self.world.overlapping(&area, LayerFilter::CONTACT) {
                if other == body {
                    continue;
                }
                let Some(collider) = self.world.get(other) else {
                    warn!("{} touched unknown collider {}", agent.id(), other);
                    continue;
                };
                let pair = (agent.id(), other);
                if !self.touching.contains(&pair) {
                    let kind = ContactKind::from(collider.classification());
                    events.push((index, Contact { other, kind }));
                }
                touching.insert(pair);
            }
        }

        self.touching = touching;
        events
    }
}
