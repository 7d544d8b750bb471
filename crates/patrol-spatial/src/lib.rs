//! `patrol-spatial` — collision layers, colliders, and ray casting.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`layer`]    | `Layer`, `LayerFilter`, `Classification`                    |
//! | [`collider`] | `Collider` — a box on one layer, optionally agent-owned     |
//! | [`ray`]      | `Ray`, `RayHit`, `RayCaster` trait, slab intersection       |
//! | [`world`]    | `CollisionWorld` (collider store + R-tree broad phase)      |
//! | [`error`]    | `SpatialError`, `SpatialResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public value types.     |

pub mod collider;
pub mod error;
pub mod layer;
pub mod ray;
pub mod world;

#[cfg(test)]
mod tests;

pub use collider::Collider;
pub use error::{SpatialError, SpatialResult};
pub use layer::{Classification, Layer, LayerFilter};
pub use ray::{Ray, RayCaster, RayHit, ray_aabb};
pub use world::CollisionWorld;
