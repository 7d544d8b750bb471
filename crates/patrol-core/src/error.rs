//! Workspace error type.
//!
//! Sub-crates define their own error enums and convert `CoreError` into them
//! via `From` impls where they need to surface it.

use thiserror::Error;

use crate::AgentId;

/// The top-level error type for `patrol-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `patrol-core`.
pub type CoreResult<T> = Result<T, CoreError>;
