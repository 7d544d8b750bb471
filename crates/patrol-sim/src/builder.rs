//! Fluent builder for constructing a [`Sim`].

use glam::Vec3;
use patrol_behavior::{Animator, NoopTargetHandler, PatrolAgentBuilder, TargetHandler};
use patrol_core::{AgentId, AgentRng, SimConfig};
use patrol_spatial::CollisionWorld;

use crate::sim::PairSet;
use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim<A, H>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: tick rate, total ticks, seed, trace interval
/// - [`CollisionWorld`]: tiles, obstacles and the target, without agents
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                 |
/// |----------------------|-------------------------|
/// | `.agent(b)`          | no agents               |
/// | `.handler(h)`        | `NoopTargetHandler`     |
/// | `.scene_offset(v)`   | `Vec3::ZERO`            |
///
/// Agent builders must be added in id order starting at `AgentId(0)`.
/// `build` registers a body collider for every agent.
pub struct SimBuilder<A: Animator, H: TargetHandler = NoopTargetHandler> {
    config:       SimConfig,
    world:        CollisionWorld,
    agents:       Vec<PatrolAgentBuilder<A>>,
    handler:      H,
    scene_offset: Vec3,
}

impl<A: Animator> SimBuilder<A, NoopTargetHandler> {
    pub fn new(config: SimConfig, world: CollisionWorld) -> Self {
        Self {
            config,
            world,
            agents:       Vec::new(),
            handler:      NoopTargetHandler,
            scene_offset: Vec3::ZERO,
        }
    }
}

impl<A: Animator, H: TargetHandler> SimBuilder<A, H> {
    pub fn agent(mut self, agent: PatrolAgentBuilder<A>) -> Self {
        self.agents.push(agent);
        self
    }

    pub fn agents(mut self, agents: impl IntoIterator<Item = PatrolAgentBuilder<A>>) -> Self {
        self.agents.extend(agents);
        self
    }

    /// Replace the target handler.
    pub fn handler<H2: TargetHandler>(self, handler: H2) -> SimBuilder<A, H2> {
        SimBuilder {
            config:       self.config,
            world:        self.world,
            agents:       self.agents,
            handler,
            scene_offset: self.scene_offset,
        }
    }

    pub fn scene_offset(mut self, offset: Vec3) -> Self {
        self.scene_offset = offset;
        self
    }

    /// Validate inputs, build every agent against the world, register their
    /// bodies and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<A, H>> {
        self.config.validate()?;

        let mut world = self.world;
        let count = self.agents.len();
        let mut agents = Vec::with_capacity(count);
        let mut rngs = Vec::with_capacity(count);
        let mut bodies = Vec::with_capacity(count);

        for (i, builder) in self.agents.into_iter().enumerate() {
            let expected = AgentId(i as u32);
            if builder.id() != expected {
                return Err(SimError::AgentIdOutOfOrder { expected, got: builder.id() });
            }
            let agent = builder.build(&world)?;
            bodies.push(world.add_agent_body(agent.id(), agent.anchor().position, &agent.volume())?);
            rngs.push(AgentRng::new(self.config.seed, agent.id()));
            agents.push(agent);
        }

        Ok(Sim {
            clock:        self.config.make_clock(),
            config:       self.config,
            world,
            agents,
            rngs,
            bodies,
            handler:      self.handler,
            scene_offset: self.scene_offset,
            touching:     PairSet::default(),
            snapshot:     Vec::with_capacity(count),
        })
    }
}
