//! Body transform and axis-aligned volume types.
//!
//! Positions are `glam::Vec3` in world units with +Y up and +Z forward, the
//! same handedness the host scene uses.  Volumes are axis-aligned: agent
//! bodies only ever yaw, so an AABB around the body is exact enough for
//! contact and cast-origin purposes.

use glam::{Quat, Vec3};

// ── Pose ──────────────────────────────────────────────────────────────────────

/// Position + orientation of a body.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    pub const IDENTITY: Pose = Pose { position: Vec3::ZERO, rotation: Quat::IDENTITY };

    #[inline]
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Pose at `position` facing +Z.
    #[inline]
    pub fn at(position: Vec3) -> Self {
        Self { position, rotation: Quat::IDENTITY }
    }

    /// Unit forward axis (+Z rotated by `rotation`).
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Unit up axis (+Y rotated by `rotation`).
    #[inline]
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// ── Aabb ──────────────────────────────────────────────────────────────────────

/// Axis-aligned box given by its min and max corners.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    #[inline]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min: min.min(max), max: min.max(max) }
    }

    #[inline]
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        let h = half_extents.abs();
        Self { min: center - h, max: center + h }
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Closed containment test.
    #[inline]
    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// `true` if the two boxes share any volume or touch on a face.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }

    /// Same box moved by `delta`.
    #[inline]
    pub fn translated(&self, delta: Vec3) -> Aabb {
        Aabb { min: self.min + delta, max: self.max + delta }
    }
}

// ── CollisionVolume ──────────────────────────────────────────────────────────

/// An agent's collision box, expressed relative to its pose position.
///
/// `center_offset` is usually `(0, half_height, 0)` so the pose position sits
/// at the agent's feet and the volume center is where the downward cast
/// starts.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollisionVolume {
    pub center_offset: Vec3,
    pub half_extents:  Vec3,
}

impl CollisionVolume {
    #[inline]
    pub fn new(center_offset: Vec3, half_extents: Vec3) -> Self {
        Self { center_offset, half_extents }
    }

    /// A box of the given half extents standing on the pose position.
    #[inline]
    pub fn standing(half_extents: Vec3) -> Self {
        Self { center_offset: Vec3::new(0.0, half_extents.y, 0.0), half_extents }
    }

    /// World-space center of the volume when the body is at `position`.
    #[inline]
    pub fn center_at(&self, position: Vec3) -> Vec3 {
        position + self.center_offset
    }

    /// World-space bounds of the volume when the body is at `position`.
    #[inline]
    pub fn bounds_at(&self, position: Vec3) -> Aabb {
        Aabb::from_center(self.center_at(position), self.half_extents)
    }

    /// `false` for volumes with a zero or negative extent on any axis.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.half_extents.cmpgt(Vec3::ZERO).all() && self.half_extents.is_finite()
    }
}
