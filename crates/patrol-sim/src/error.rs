use patrol_behavior::BehaviorError;
use patrol_core::{AgentId, CoreError};
use patrol_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("agent builders must be added in id order: expected {expected}, got {got}")]
    AgentIdOutOfOrder { expected: AgentId, got: AgentId },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("agent setup failed: {0}")]
    Behavior(#[from] BehaviorError),

    #[error("collision world error: {0}")]
    Spatial(#[from] SpatialError),
}

pub type SimResult<T> = Result<T, SimError>;
