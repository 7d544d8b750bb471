//! A box collider registered in a [`CollisionWorld`][crate::CollisionWorld].

use glam::Vec3;
use patrol_core::{Aabb, AgentId, ColliderId, TileId};

use crate::{Classification, Layer};

/// One axis-aligned box on one layer.
///
/// `origin` is the actor's pivot (what the host scene calls the transform
/// position); `local_bounds` is the box relative to that pivot.  For tiles
/// the pivot is the centre of the top face, for standing actors it is the
/// point between their feet.
#[derive(Clone, Debug, PartialEq)]
pub struct Collider {
    pub id:           ColliderId,
    pub layer:        Layer,
    pub origin:       Vec3,
    pub local_bounds: Aabb,
    /// Disabled colliders stay registered but are skipped by every query.
    pub enabled:      bool,
    /// The agent whose body this is, for colliders on [`Layer::Agent`].
    pub owner:        Option<AgentId>,
}

impl Collider {
    /// World-space bounds.
    #[inline]
    pub fn bounds(&self) -> Aabb {
        self.local_bounds.translated(self.origin)
    }

    #[inline]
    pub fn classification(&self) -> Classification {
        self.layer.classification()
    }

    /// The tile identity of a ground collider.
    #[inline]
    pub fn tile_id(&self) -> Option<TileId> {
        (self.layer == Layer::Ground).then(|| TileId::from(self.id))
    }
}
