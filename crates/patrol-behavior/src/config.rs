//! Per-agent tuning.

use glam::Vec3;
use patrol_core::AgentRng;
use patrol_spatial::LayerFilter;

use crate::{BehaviorError, BehaviorResult};

/// Layer filters for the two perception casts.  Built once; never mutated.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerceptionFilters {
    /// Forward cast: the target plus everything that blocks sight of it.
    pub sight:  LayerFilter,
    /// Downward cast: ground tiles.
    pub ground: LayerFilter,
}

impl Default for PerceptionFilters {
    fn default() -> Self {
        Self { sight: LayerFilter::SIGHT, ground: LayerFilter::GROUND }
    }
}

/// Offset added to the anchor position to get the forward cast origin.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CastJitter {
    /// Always the same offset.
    Fixed(Vec3),
    /// Each component drawn uniformly from `[min, max]` on every cast.
    Uniform { min: Vec3, max: Vec3 },
}

impl CastJitter {
    /// Eye height used when no jitter is configured.
    pub const DEFAULT_OFFSET: Vec3 = Vec3::new(0.0, 0.3, 0.0);

    pub fn sample(&self, rng: &mut AgentRng) -> Vec3 {
        match *self {
            CastJitter::Fixed(v) => v,
            CastJitter::Uniform { min, max } => Vec3::new(
                rng.uniform_f32(min.x, max.x),
                rng.uniform_f32(min.y, max.y),
                rng.uniform_f32(min.z, max.z),
            ),
        }
    }
}

impl Default for CastJitter {
    fn default() -> Self {
        CastJitter::Fixed(Self::DEFAULT_OFFSET)
    }
}

/// Tuning for one patrol agent.
///
/// Phase durations scale with the distance to the sighted target:
/// `windup = trunc(windup_factor * d)` ticks for the charge and
/// `trunc(cooldown_factor * d)` ticks for the return.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PatrolConfig {
    pub windup_factor:   f32,
    pub cooldown_factor: f32,
    /// Length of the knock-back toward the last tile after a peer collision.
    pub recoil_ticks:    u32,
    pub cast_jitter:     CastJitter,
    pub filters:         PerceptionFilters,
}

impl Default for PatrolConfig {
    fn default() -> Self {
        Self {
            windup_factor:   12.0,
            cooldown_factor: 25.0,
            recoil_ticks:    30,
            cast_jitter:     CastJitter::default(),
            filters:         PerceptionFilters::default(),
        }
    }
}

impl PatrolConfig {
    /// Ticks to charge a target `distance` away.
    #[inline]
    pub fn windup_ticks(&self, distance: f32) -> u32 {
        scaled_ticks(self.windup_factor, distance)
    }

    /// Ticks to walk back from a target `distance` away.
    #[inline]
    pub fn cooldown_ticks(&self, distance: f32) -> u32 {
        scaled_ticks(self.cooldown_factor, distance)
    }

    pub fn validate(&self) -> BehaviorResult<()> {
        for (name, v) in [("windup_factor", self.windup_factor), ("cooldown_factor", self.cooldown_factor)] {
            if !v.is_finite() || v < 0.0 {
                return Err(BehaviorError::Config(format!("{name} must be finite and >= 0, got {v}")));
            }
        }
        if let CastJitter::Uniform { min, max } = self.cast_jitter {
            if !min.is_finite() || !max.is_finite() {
                return Err(BehaviorError::Config("cast jitter bounds must be finite".into()));
            }
            if min.cmpgt(max).any() {
                return Err(BehaviorError::Config(format!("cast jitter min {min} exceeds max {max}")));
            }
        }
        if self.filters.ground.is_empty() {
            return Err(BehaviorError::Config("ground filter is empty".into()));
        }
        Ok(())
    }
}

/// `trunc(factor * distance)`; negative and NaN products give zero.
#[inline]
fn scaled_ticks(factor: f32, distance: f32) -> u32 {
    (factor * distance) as u32
}
