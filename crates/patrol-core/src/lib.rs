//! `patrol-core` — foundational types for the patrol agent workspace.
//!
//! This crate is a dependency of every other `patrol-*` crate.  It has no
//! `patrol-*` dependencies and minimal external ones (`glam`, `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `ColliderId`, `TileId`                     |
//! | [`pose`]        | `Pose`, `CollisionVolume`, `Aabb`                     |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `AgentRng`, one deterministic stream per agent        |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod pose;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use glam::{Quat, Vec3};

pub use error::{CoreError, CoreResult};
pub use ids::{AgentId, ColliderId, TileId};
pub use pose::{Aabb, CollisionVolume, Pose};
pub use rng::AgentRng;
pub use time::{SimClock, SimConfig, Tick};
