//! The two per-tick casts.

use glam::Vec3;
use patrol_core::{ColliderId, TileId};
use patrol_spatial::{Classification, LayerFilter, Ray, RayCaster, RayHit};

/// One forward-cast result.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PerceptionHit {
    pub point:          Vec3,
    pub distance:       f32,
    pub collider:       ColliderId,
    pub classification: Classification,
    /// Pivot of the actor that was hit.  A charge aims here, not at `point`.
    pub actor_position: Vec3,
}

impl PerceptionHit {
    #[inline]
    pub fn is_target(&self) -> bool {
        self.classification == Classification::Target
    }
}

impl From<RayHit> for PerceptionHit {
    fn from(h: RayHit) -> Self {
        Self {
            point:          h.point,
            distance:       h.distance,
            collider:       h.collider,
            classification: h.classification,
            actor_position: h.actor_position,
        }
    }
}

/// Weak reference to a ground tile: identity plus pivot position.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileRef {
    pub id:       TileId,
    pub position: Vec3,
}

/// Unbounded cast from `origin` along `direction`.  Whatever is hit first is
/// returned, obstacle or not; the caller decides whether it is a target.
///
/// A degenerate direction is treated as a miss.
pub fn cast_forward(
    caster:    &dyn RayCaster,
    origin:    Vec3,
    direction: Vec3,
    filter:    LayerFilter,
) -> Option<PerceptionHit> {
    let ray = Ray::new(origin, direction).ok()?;
    caster.cast(&ray, filter).map(PerceptionHit::from)
}

/// Unbounded cast from `center` along `-up`, returning the tile hit.
pub fn cast_downward(
    caster: &dyn RayCaster,
    center: Vec3,
    up:     Vec3,
    filter: LayerFilter,
) -> Option<TileRef> {
    let ray = Ray::new(center, -up).ok()?;
    caster
        .cast(&ray, filter)
        .map(|h| TileRef { id: TileId::from(h.collider), position: h.actor_position })
}
