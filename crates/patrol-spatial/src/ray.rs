//! Rays, hits, and the [`RayCaster`] query trait.
//!
//! Casts follow the host physics engine's rules: the nearest hit along the
//! ray wins, and a collider that already contains the ray origin is never
//! reported.  The second rule is what lets an agent cast from the centre of
//! its own body without hitting itself.

use glam::Vec3;
use patrol_core::{Aabb, ColliderId};

use crate::{Classification, Layer, LayerFilter, SpatialError, SpatialResult};

/// Directions shorter than this are treated as parallel to an axis slab.
const PARALLEL_EPS: f32 = 1e-8;

// ── Ray ───────────────────────────────────────────────────────────────────────

/// A half-line with a unit direction and an optional length limit.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    pub origin:       Vec3,
    /// Always unit length.
    pub direction:    Vec3,
    /// `f32::INFINITY` for an unbounded cast.
    pub max_distance: f32,
}

impl Ray {
    /// Unbounded ray from `origin` along `direction` (normalised here).
    pub fn new(origin: Vec3, direction: Vec3) -> SpatialResult<Self> {
        let direction = direction.try_normalize().ok_or(SpatialError::DegenerateRay)?;
        if !origin.is_finite() {
            return Err(SpatialError::DegenerateRay);
        }
        Ok(Self { origin, direction, max_distance: f32::INFINITY })
    }

    /// Same ray limited to `max_distance`.
    #[inline]
    pub fn with_max_distance(mut self, max_distance: f32) -> Self {
        self.max_distance = max_distance.max(0.0);
        self
    }

    #[inline]
    pub fn point_at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

// ── RayHit ────────────────────────────────────────────────────────────────────

/// The nearest collider a cast struck.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RayHit {
    pub collider:       ColliderId,
    pub layer:          Layer,
    pub classification: Classification,
    /// Where the ray entered the collider.
    pub point:          Vec3,
    /// Distance from the ray origin to `point`.
    pub distance:       f32,
    /// Pivot of the actor owning the collider.
    pub actor_position: Vec3,
}

// ── RayCaster ─────────────────────────────────────────────────────────────────

/// Physics query seam.  The agent state machine only talks to this trait, so
/// a host engine can stand in for [`CollisionWorld`][crate::CollisionWorld].
pub trait RayCaster {
    /// Nearest enabled collider on a layer in `filter` hit by `ray`.
    fn cast(&self, ray: &Ray, filter: LayerFilter) -> Option<RayHit>;
}

// ── Slab test ─────────────────────────────────────────────────────────────────

/// Entry and exit distances of `ray` through `aabb`, or `None` on a miss.
///
/// Distances are along the (unit) ray direction and may be negative when the
/// box lies partly behind the origin; the length limit is not applied.
pub fn ray_aabb(ray: &Ray, aabb: &Aabb) -> Option<(f32, f32)> {
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit  = f32::INFINITY;

    for axis in 0..3 {
        let o  = ray.origin[axis];
        let d  = ray.direction[axis];
        let lo = aabb.min[axis];
        let hi = aabb.max[axis];

        if d.abs() < PARALLEL_EPS {
            if o < lo || o > hi {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let (t1, t2) = {
            let a = (lo - o) * inv;
            let b = (hi - o) * inv;
            if a <= b { (a, b) } else { (b, a) }
        };
        t_enter = t_enter.max(t1);
        t_exit  = t_exit.min(t2);
        if t_enter > t_exit {
            return None;
        }
    }

    Some((t_enter, t_exit))
}

/// Distance at which `ray` strikes `aabb` from outside, honouring the
/// ray's length limit.  Boxes containing the origin report `None`.
pub(crate) fn first_contact(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    let (t_enter, t_exit) = ray_aabb(ray, aabb)?;
    if t_exit < 0.0 || t_enter < 0.0 {
        return None;
    }
    (t_enter <= ray.max_distance).then_some(t_enter)
}
