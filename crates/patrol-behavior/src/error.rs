use glam::Vec3;
use thiserror::Error;

use patrol_core::AgentId;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("agent {0} has no animator")]
    MissingAnimator(AgentId),

    #[error("agent {0} has no collision volume")]
    MissingCollisionVolume(AgentId),

    #[error("agent {agent} collision volume has a non-positive extent: {half_extents}")]
    InvalidCollisionVolume { agent: AgentId, half_extents: Vec3 },

    #[error("agent {agent}: no ground tile below {probe}")]
    NoSurfaceBelow { agent: AgentId, probe: Vec3 },

    #[error("behavior configuration error: {0}")]
    Config(String),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
