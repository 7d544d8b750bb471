//! Collider storage with an R-tree broad phase.
//!
//! # Data layout
//!
//! Colliders live in a dense `Vec<Collider>` indexed by `ColliderId`; ids are
//! handed out sequentially and never reused.  An R-tree (via `rstar`) holds
//! one `BoxEntry` per collider with its current world bounds.  Moving a
//! collider removes and re-inserts its entry.
//!
//! # Queries
//!
//! A cast first clips the ray against the bounds of the whole tree, turns the
//! clipped segment into a box, and asks the R-tree for every entry whose box
//! intersects it.  Only those candidates get the exact slab test.

use glam::Vec3;
use rstar::{AABB, RTree, RTreeObject};

use patrol_core::{Aabb, AgentId, ColliderId, CollisionVolume, TileId};

use crate::ray::first_contact;
use crate::{Collider, Layer, LayerFilter, Ray, RayCaster, RayHit, SpatialError, SpatialResult};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: the collider's world box and its id.
#[derive(Clone, Debug, PartialEq)]
struct BoxEntry {
    id:  ColliderId,
    min: [f32; 3],
    max: [f32; 3],
}

impl BoxEntry {
    fn new(id: ColliderId, bounds: &Aabb) -> Self {
        Self { id, min: bounds.min.to_array(), max: bounds.max.to_array() }
    }
}

impl RTreeObject for BoxEntry {
    type Envelope = AABB<[f32; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min, self.max)
    }
}

fn to_envelope(b: &Aabb) -> AABB<[f32; 3]> {
    AABB::from_corners(b.min.to_array(), b.max.to_array())
}

fn from_envelope(e: &AABB<[f32; 3]>) -> Aabb {
    Aabb::new(Vec3::from_array(e.lower()), Vec3::from_array(e.upper()))
}

// ── CollisionWorld ────────────────────────────────────────────────────────────

/// Every collider in the level plus the spatial index over them.
#[derive(Default)]
pub struct CollisionWorld {
    colliders: Vec<Collider>,
    index:     RTree<BoxEntry>,
}

impl CollisionWorld {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Registration ──────────────────────────────────────────────────────

    /// Register a box on `layer` with pivot `origin` and bounds relative to
    /// that pivot.
    pub fn insert(
        &mut self,
        layer:        Layer,
        origin:       Vec3,
        local_bounds: Aabb,
        owner:        Option<AgentId>,
    ) -> SpatialResult<ColliderId> {
        let extents = local_bounds.half_extents();
        if !extents.cmpgt(Vec3::ZERO).all() || !extents.is_finite() || !origin.is_finite() {
            return Err(SpatialError::DegenerateBounds);
        }
        let id = ColliderId(self.colliders.len() as u32);
        let collider = Collider { id, layer, origin, local_bounds, enabled: true, owner };
        self.index.insert(BoxEntry::new(id, &collider.bounds()));
        self.colliders.push(collider);
        Ok(id)
    }

    /// A ground tile whose top face is centred on `top_center`.  Returns the
    /// tile identity; the agent anchors to `top_center` when it recovers onto
    /// this tile.
    pub fn add_tile(&mut self, top_center: Vec3, half_extents: Vec3) -> SpatialResult<TileId> {
        let h = half_extents.abs();
        let local = Aabb::new(Vec3::new(-h.x, -2.0 * h.y, -h.z), Vec3::new(h.x, 0.0, h.z));
        self.insert(Layer::Ground, top_center, local, None).map(TileId::from)
    }

    /// A standing actor (pivot at its feet) on `layer`.
    pub fn add_standing(
        &mut self,
        layer:        Layer,
        position:     Vec3,
        half_extents: Vec3,
    ) -> SpatialResult<ColliderId> {
        let volume = CollisionVolume::standing(half_extents);
        self.insert(layer, position, volume.bounds_at(Vec3::ZERO), None)
    }

    /// The body of a patrol agent.
    pub fn add_agent_body(
        &mut self,
        owner:    AgentId,
        position: Vec3,
        volume:   &CollisionVolume,
    ) -> SpatialResult<ColliderId> {
        self.insert(Layer::Agent, position, volume.bounds_at(Vec3::ZERO), Some(owner))
    }

    // ── Lookup & mutation ─────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    #[inline]
    pub fn get(&self, id: ColliderId) -> Option<&Collider> {
        self.colliders.get(id.index())
    }

    /// Look up a tile by identity.  `None` if the id is unknown or not a
    /// ground collider.
    pub fn tile(&self, id: TileId) -> Option<&Collider> {
        self.colliders
            .get(id.0 as usize)
            .filter(|c| c.layer == Layer::Ground)
    }

    /// All colliders in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Collider> {
        self.colliders.iter()
    }

    /// Move a collider's pivot to `origin`, updating the spatial index.
    pub fn set_origin(&mut self, id: ColliderId, origin: Vec3) -> SpatialResult<()> {
        let collider = self
            .colliders
            .get_mut(id.index())
            .ok_or(SpatialError::ColliderNotFound(id))?;
        if collider.origin == origin {
            return Ok(());
        }
        let old = BoxEntry::new(id, &collider.bounds());
        collider.origin = origin;
        let new = BoxEntry::new(id, &collider.bounds());
        self.index.remove(&old);
        self.index.insert(new);
        Ok(())
    }

    /// Enable or disable a collider.  Disabled colliders are invisible to
    /// casts and overlap queries.
    pub fn set_enabled(&mut self, id: ColliderId, enabled: bool) -> SpatialResult<()> {
        let collider = self
            .colliders
            .get_mut(id.index())
            .ok_or(SpatialError::ColliderNotFound(id))?;
        collider.enabled = enabled;
        Ok(())
    }

    /// Re-enable every disabled collider.  Returns how many were switched on.
    pub fn enable_all(&mut self) -> usize {
        let mut n = 0;
        for c in self.colliders.iter_mut().filter(|c| !c.enabled) {
            c.enabled = true;
            n += 1;
        }
        n
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Enabled colliders on `filter` layers whose bounds intersect `area`,
    /// sorted by id.
    pub fn overlapping(&self, area: &Aabb, filter: LayerFilter) -> Vec<ColliderId> {
        let mut hits: Vec<ColliderId> = self
            .index
            .locate_in_envelope_intersecting(&to_envelope(area))
            .map(|e| e.id)
            .filter(|&id| self.passes(id, filter))
            .collect();
        hits.sort_unstable();
        hits
    }

    /// Bounds of everything registered, or `None` for an empty world.
    pub fn extent(&self) -> Option<Aabb> {
        if self.index.size() == 0 {
            return None;
        }
        Some(from_envelope(&self.index.root().envelope()))
    }

    #[inline]
    fn passes(&self, id: ColliderId, filter: LayerFilter) -> bool {
        self.get(id)
            .is_some_and(|c| c.enabled && filter.contains(c.layer))
    }
}

impl RayCaster for CollisionWorld {
    fn cast(&self, ray: &Ray, filter: LayerFilter) -> Option<RayHit> {
        if filter.is_empty() {
            return None;
        }

        // Clip the (possibly unbounded) ray to the populated region.
        let extent = self.extent()?;
        let (enter, exit) = crate::ray_aabb(ray, &extent)?;
        let start = enter.max(0.0);
        let end   = exit.min(ray.max_distance);
        if start > end {
            return None;
        }
        let segment = Aabb::new(ray.point_at(start), ray.point_at(end));

        let mut best: Option<(f32, &Collider)> = None;
        for entry in self.index.locate_in_envelope_intersecting(&to_envelope(&segment)) {
            let Some(collider) = self.get(entry.id) else { continue };
            if !collider.enabled || !filter.contains(collider.layer) {
                continue;
            }
            let Some(distance) = first_contact(ray, &collider.bounds()) else { continue };
            let closer = match best {
                None            => true,
                Some((d, prev)) => distance < d || (distance == d && collider.id < prev.id),
            };
            if closer {
                best = Some((distance, collider));
            }
        }

        best.map(|(distance, c)| RayHit {
            collider:       c.id,
            layer:          c.layer,
            classification: c.classification(),
            point:          ray.point_at(distance),
            distance,
            actor_position: c.origin,
        })
    }
}
