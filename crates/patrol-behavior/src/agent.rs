//! The patrol/charge state machine.
//!
//! # Tick order
//!
//! [`PatrolAgent::step`] runs once per fixed step:
//!
//! 1. the animator advances one tick;
//! 2. the current phase's logic runs (at most one transition);
//! 3. unless the agent is recoiling, the downward cast updates the
//!    current/last tile pair.
//!
//! Contacts arrive separately through
//! [`on_contact`][PatrolAgent::on_contact] and override the phase
//! immediately.

use glam::Vec3;
use log::{debug, info, trace, warn};
use patrol_core::{AgentId, AgentRng, CollisionVolume, Pose, Tick};
use patrol_mobility::MotionSegment;
use patrol_spatial::RayCaster;

use crate::perception::{TileRef, cast_downward, cast_forward};
use crate::{AnimFlag, Animator, BehaviorError, BehaviorResult, ClipTag, PatrolConfig, Phase, StepContext};

/// The target locked in when a charge begins.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ChargeTarget {
    /// Pivot of the sighted target actor.
    pub position: Vec3,
    /// Forward-cast distance at detection.  Both charge and return durations
    /// are derived from it.
    pub distance: f32,
}

// ── PatrolAgent ───────────────────────────────────────────────────────────────

/// One patrol agent.
pub struct PatrolAgent<A> {
    id:           AgentId,
    config:       PatrolConfig,
    animator:     A,
    volume:       CollisionVolume,
    /// Rest pose.  Charges start here and returns end here.
    anchor:       Pose,
    pose:         Pose,
    phase:        Phase,
    elapsed:      u32,
    duration:     u32,
    target:       Option<ChargeTarget>,
    motion:       Option<MotionSegment>,
    current_tile: Option<TileRef>,
    last_tile:    Option<TileRef>,
}

impl<A: Animator> PatrolAgent<A> {
    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> AgentId {
        self.id
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    /// Length of the current (or upcoming) motion phase.
    #[inline]
    pub fn duration(&self) -> u32 {
        self.duration
    }

    #[inline]
    pub fn pose(&self) -> Pose {
        self.pose
    }

    #[inline]
    pub fn anchor(&self) -> Pose {
        self.anchor
    }

    #[inline]
    pub fn volume(&self) -> CollisionVolume {
        self.volume
    }

    #[inline]
    pub fn config(&self) -> &PatrolConfig {
        &self.config
    }

    #[inline]
    pub fn target(&self) -> Option<ChargeTarget> {
        self.target
    }

    #[inline]
    pub fn motion(&self) -> Option<MotionSegment> {
        self.motion
    }

    #[inline]
    pub fn current_tile(&self) -> Option<TileRef> {
        self.current_tile
    }

    #[inline]
    pub fn last_tile(&self) -> Option<TileRef> {
        self.last_tile
    }

    #[inline]
    pub fn animator(&self) -> &A {
        &self.animator
    }

    #[inline]
    pub fn animator_mut(&mut self) -> &mut A {
        &mut self.animator
    }

    // ── Stepping ──────────────────────────────────────────────────────────

    /// Advance the agent by one fixed step.
    pub fn step(&mut self, ctx: &StepContext<'_>, rng: &mut AgentRng) {
        self.animator.advance();

        match self.phase {
            Phase::Patrolling => self.patrol(ctx, rng),

            Phase::ChargeWindup => {
                if self.animator.current_clip() == ClipTag::WindupFinished {
                    self.animator.set_flag(AnimFlag::Windup, false);
                    match self.target {
                        Some(t) => {
                            self.motion = Some(MotionSegment::new(self.anchor.position, t.position, self.duration));
                            self.enter(Phase::Charging, ctx.tick);
                        }
                        None => self.enter(Phase::Patrolling, ctx.tick),
                    }
                }
            }

            Phase::Charging => {
                if self.run_motion() {
                    let distance = self.target.map_or(0.0, |t| t.distance);
                    self.duration = self.config.cooldown_ticks(distance);
                    self.animator.set_flag(AnimFlag::Cooldown, true);
                    self.enter(Phase::ChargeCooldown, ctx.tick);
                }
            }

            Phase::ChargeCooldown => {
                if self.animator.current_clip() == ClipTag::CooldownFinished {
                    self.animator.set_flag(AnimFlag::Cooldown, false);
                    let from = self.target.map_or(self.pose.position, |t| t.position);
                    self.motion = Some(MotionSegment::new(from, self.anchor.position, self.duration));
                    self.enter(Phase::Returning, ctx.tick);
                }
            }

            Phase::Returning => {
                if self.run_motion() {
                    self.target = None;
                    self.enter(Phase::Patrolling, ctx.tick);
                }
            }

            Phase::CollisionRecoil => {
                if self.run_motion() {
                    self.enter(Phase::Stunned, ctx.tick);
                }
            }

            Phase::Stunned => {}

            Phase::ResetWait => {
                if self.animator.flag(AnimFlag::PreWaiting) {
                    self.animator.set_flag(AnimFlag::PreWaiting, false);
                    self.enter(Phase::Patrolling, ctx.tick);
                }
            }
        }

        if self.phase != Phase::CollisionRecoil {
            self.track_surface(ctx);
        }
    }

    /// Re-anchor and look ahead for the target.
    fn patrol(&mut self, ctx: &StepContext<'_>, rng: &mut AgentRng) {
        self.pose = Pose::new(self.anchor.position + ctx.scene_offset, self.anchor.rotation);

        let origin = self.pose.position + self.config.cast_jitter.sample(rng);
        let Some(hit) = cast_forward(ctx.caster, origin, self.anchor.forward(), self.config.filters.sight)
        else {
            return;
        };
        if !hit.is_target() {
            return;
        }

        self.duration = self.config.windup_ticks(hit.distance);
        self.target = Some(ChargeTarget { position: hit.actor_position, distance: hit.distance });
        info!(
            "{} sighted target {} at distance {:.2} on {}; charging over {} ticks",
            self.id, hit.collider, hit.distance, ctx.tick, self.duration,
        );
        self.animator.set_flag(AnimFlag::Windup, true);
        self.enter(Phase::ChargeWindup, ctx.tick);
    }

    /// Place the body for this tick.  Returns `true` when the motion is done.
    fn run_motion(&mut self) -> bool {
        let Some(segment) = self.motion else {
            return true;
        };
        let step = segment.advance(&mut self.elapsed);
        self.pose.position = step.position;
        if step.finished {
            self.motion = None;
        }
        step.finished
    }

    fn track_surface(&mut self, ctx: &StepContext<'_>) {
        let center = self.volume.center_at(self.pose.position);
        let Some(tile) = cast_downward(ctx.caster, center, self.pose.up(), self.config.filters.ground)
        else {
            return;
        };

        if self.current_tile.map(|t| t.id) != Some(tile.id) {
            trace!("{} moved onto {} on {}", self.id, tile.id, ctx.tick);
            self.last_tile = self.current_tile;
            self.current_tile = Some(tile);
        }
        if self.phase == Phase::Patrolling {
            self.current_tile = Some(tile);
            self.last_tile = Some(tile);
        }
    }

    fn enter(&mut self, next: Phase, tick: Tick) {
        debug!("{} {} -> {} on {}", self.id, self.phase, next, tick);
        self.phase = next;
        self.elapsed = 0;
    }

    // ── External control ──────────────────────────────────────────────────

    /// Abandon whatever the agent is doing and resume patrol.
    ///
    /// Fires the reset trigger and lowers the windup, cooldown and collision
    /// flags.  Safe to call from any phase, any number of times.
    pub fn reset_state(&mut self) {
        info!("{} reset from {}", self.id, self.phase);
        self.clear_for_reset();
        self.phase = Phase::Patrolling;
    }

    /// Like [`reset_state`][Self::reset_state], but hold in
    /// [`Phase::ResetWait`] until the animator raises `PreWaiting`.
    pub fn begin_reset_wait(&mut self) {
        info!("{} waiting on reset from {}", self.id, self.phase);
        self.clear_for_reset();
        self.phase = Phase::ResetWait;
    }

    fn clear_for_reset(&mut self) {
        self.animator.fire_reset_trigger();
        self.animator.set_flag(AnimFlag::Windup, false);
        self.animator.set_flag(AnimFlag::Cooldown, false);
        self.animator.set_flag(AnimFlag::Collision, false);
        self.elapsed = 0;
        self.duration = 0;
        self.motion = None;
        self.target = None;
    }

    /// Knock-back after touching another agent: slide from where the body
    /// is now to the last tile over `recoil_ticks`.
    pub(crate) fn begin_recoil(&mut self, tick: Tick) {
        let end = match self.last_tile {
            Some(tile) => tile.position,
            None => {
                warn!("{} recoiling with no last tile; falling back to anchor", self.id);
                self.anchor.position
            }
        };
        self.animator.set_flag(AnimFlag::Collision, true);
        self.duration = self.config.recoil_ticks;
        self.motion = Some(MotionSegment::new(self.pose.position, end, self.duration));
        self.target = None;
        self.enter(Phase::CollisionRecoil, tick);
    }
}

// ── PatrolAgentBuilder ────────────────────────────────────────────────────────

/// Validating constructor for [`PatrolAgent`].
///
/// The animator and collision volume are mandatory.  By default the agent
/// must also be standing over a ground tile when built.
pub struct PatrolAgentBuilder<A> {
    id:              AgentId,
    anchor:          Pose,
    animator:        Option<A>,
    volume:          Option<CollisionVolume>,
    config:          PatrolConfig,
    require_surface: bool,
}

impl<A: Animator> PatrolAgentBuilder<A> {
    pub fn new(id: AgentId, anchor: Pose) -> Self {
        Self {
            id,
            anchor,
            animator:        None,
            volume:          None,
            config:          PatrolConfig::default(),
            require_surface: true,
        }
    }

    #[inline]
    pub fn id(&self) -> AgentId {
        self.id
    }

    #[inline]
    pub fn anchor(&self) -> Pose {
        self.anchor
    }

    pub fn animator(mut self, animator: A) -> Self {
        self.animator = Some(animator);
        self
    }

    pub fn volume(mut self, volume: CollisionVolume) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn config(mut self, config: PatrolConfig) -> Self {
        self.config = config;
        self
    }

    /// Allow building an agent with no tile underneath.  Recoil then falls
    /// back to the anchor until a tile is seen.
    pub fn require_surface(mut self, required: bool) -> Self {
        self.require_surface = required;
        self
    }

    /// Validate and probe the initial tile.
    ///
    /// # Errors
    ///
    /// - [`BehaviorError::Config`] for an invalid [`PatrolConfig`].
    /// - [`BehaviorError::MissingAnimator`] / [`BehaviorError::MissingCollisionVolume`].
    /// - [`BehaviorError::InvalidCollisionVolume`] for a flat or inverted box.
    /// - [`BehaviorError::NoSurfaceBelow`] if no tile is under the anchor and
    ///   a surface is required.
    pub fn build(self, caster: &dyn RayCaster) -> BehaviorResult<PatrolAgent<A>> {
        self.config.validate()?;
        let animator = self.animator.ok_or(BehaviorError::MissingAnimator(self.id))?;
        let volume = self.volume.ok_or(BehaviorError::MissingCollisionVolume(self.id))?;
        if !volume.is_valid() {
            return Err(BehaviorError::InvalidCollisionVolume {
                agent:        self.id,
                half_extents: volume.half_extents,
            });
        }

        let probe = volume.center_at(self.anchor.position);
        let tile = cast_downward(caster, probe, self.anchor.up(), self.config.filters.ground);
        if tile.is_none() && self.require_surface {
            return Err(BehaviorError::NoSurfaceBelow { agent: self.id, probe });
        }

        Ok(PatrolAgent {
            id: self.id,
            config: self.config,
            animator,
            volume,
            anchor: self.anchor,
            pose: self.anchor,
            phase: Phase::Patrolling,
            elapsed: 0,
            duration: 0,
            target: None,
            motion: None,
            current_tile: tile,
            last_tile: tile,
        })
    }
}
