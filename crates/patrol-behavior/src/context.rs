//! Per-tick inputs shared by every agent.

use glam::Vec3;
use patrol_core::Tick;
use patrol_spatial::RayCaster;

/// What an agent sees of the world during one step.
///
/// Built once per tick by the simulation loop and lent to every agent.
pub struct StepContext<'a> {
    pub tick:         Tick,
    /// Physics queries.
    pub caster:       &'a dyn RayCaster,
    /// Offset of the scene root.  A patrolling agent stands at
    /// `anchor + scene_offset`.
    pub scene_offset: Vec3,
}

impl<'a> StepContext<'a> {
    #[inline]
    pub fn new(tick: Tick, caster: &'a dyn RayCaster) -> Self {
        Self { tick, caster, scene_offset: Vec3::ZERO }
    }

    #[inline]
    pub fn with_scene_offset(mut self, offset: Vec3) -> Self {
        self.scene_offset = offset;
        self
    }
}
