//! Unit tests for patrol-spatial.
//!
//! All tests use small hand-built worlds.

#[cfg(test)]
mod helpers {
    use glam::Vec3;

    use crate::{CollisionWorld, Layer};
    use patrol_core::{ColliderId, TileId};

    /// A strip of three 2×2 tiles along +Z (top faces at y = 0), a target
    /// standing on the far tile, and a building wall beyond it.
    ///
    /// ```text
    ///   z:  0      2      4         8
    ///      [t0]   [t1]   [t2] tgt  |wall|
    /// ```
    pub fn corridor() -> (CollisionWorld, [TileId; 3], ColliderId, ColliderId) {
        let mut w = CollisionWorld::new();
        let half = Vec3::new(1.0, 0.25, 1.0);
        let t0 = w.add_tile(Vec3::new(0.0, 0.0, 0.0), half).unwrap();
        let t1 = w.add_tile(Vec3::new(0.0, 0.0, 2.0), half).unwrap();
        let t2 = w.add_tile(Vec3::new(0.0, 0.0, 4.0), half).unwrap();
        let target = w
            .add_standing(Layer::Target, Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.3, 0.5, 0.3))
            .unwrap();
        let wall = w
            .add_standing(Layer::Building, Vec3::new(0.0, 0.0, 8.0), Vec3::new(2.0, 2.0, 0.5))
            .unwrap();
        (w, [t0, t1, t2], target, wall)
    }
}

// ── Layers ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod layers {
    use crate::{Classification, Layer, LayerFilter};

    #[test]
    fn sight_filter_membership() {
        let f = LayerFilter::SIGHT;
        assert!(f.contains(Layer::Target));
        assert!(f.contains(Layer::Building));
        assert!(f.contains(Layer::Scenery));
        assert!(!f.contains(Layer::Agent));
        assert!(!f.contains(Layer::Ground));
    }

    #[test]
    fn of_with_without() {
        let f = LayerFilter::of(&[Layer::Ground, Layer::Agent]);
        assert_eq!(f, LayerFilter::GROUND.with(Layer::Agent));
        assert_eq!(f.without(Layer::Agent), LayerFilter::GROUND);
        assert!(LayerFilter::NONE.is_empty());
        assert_eq!(LayerFilter::ALL.layers().count(), Layer::ALL.len());
    }

    #[test]
    fn classification_by_layer() {
        assert_eq!(Layer::Target.classification(), Classification::Target);
        assert_eq!(Layer::Agent.classification(), Classification::Peer);
        assert_eq!(Layer::Building.classification(), Classification::Obstacle);
        assert_eq!(Layer::Scenery.classification(), Classification::Obstacle);
        assert_eq!(Layer::Ground.classification(), Classification::Other);
    }

    #[test]
    fn debug_lists_layers() {
        assert_eq!(format!("{:?}", LayerFilter::GROUND), "{Ground}");
    }
}

// ── Ray / slab test ───────────────────────────────────────────────────────────

#[cfg(test)]
mod ray {
    use glam::Vec3;
    use patrol_core::Aabb;

    use crate::{Ray, ray_aabb};

    fn unit_box_at(z: f32) -> Aabb {
        Aabb::from_center(Vec3::new(0.0, 0.0, z), Vec3::splat(0.5))
    }

    #[test]
    fn zero_direction_rejected() {
        assert!(Ray::new(Vec3::ZERO, Vec3::ZERO).is_err());
    }

    #[test]
    fn direction_is_normalised() {
        let r = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 5.0)).unwrap();
        assert_eq!(r.direction, Vec3::Z);
        assert_eq!(r.max_distance, f32::INFINITY);
    }

    #[test]
    fn slab_hit_in_front() {
        let r = Ray::new(Vec3::ZERO, Vec3::Z).unwrap();
        let (enter, exit) = ray_aabb(&r, &unit_box_at(3.0)).unwrap();
        assert!((enter - 2.5).abs() < 1e-6);
        assert!((exit - 3.5).abs() < 1e-6);
    }

    #[test]
    fn slab_miss_sideways() {
        let r = Ray::new(Vec3::new(2.0, 0.0, 0.0), Vec3::Z).unwrap();
        assert!(ray_aabb(&r, &unit_box_at(3.0)).is_none());
    }

    #[test]
    fn slab_behind_origin_has_negative_exit() {
        let r = Ray::new(Vec3::ZERO, Vec3::Z).unwrap();
        let (_, exit) = ray_aabb(&r, &unit_box_at(-3.0)).unwrap();
        assert!(exit < 0.0);
    }
}

// ── World registration ───────────────────────────────────────────────────────

#[cfg(test)]
mod world {
    use glam::Vec3;
    use patrol_core::{Aabb, AgentId, ColliderId, CollisionVolume};

    use crate::{CollisionWorld, Layer, LayerFilter};

    #[test]
    fn degenerate_bounds_rejected() {
        let mut w = CollisionWorld::new();
        let flat = Aabb::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0));
        assert!(w.insert(Layer::Building, Vec3::ZERO, flat, None).is_err());
        assert!(w.is_empty());
    }

    #[test]
    fn tile_pivot_is_top_face() {
        let mut w = CollisionWorld::new();
        let t = w.add_tile(Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 0.5, 1.0)).unwrap();
        let c = w.tile(t).unwrap();
        assert_eq!(c.origin, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(c.bounds().max.y, 1.0);
        assert_eq!(c.bounds().min.y, 0.0);
        assert_eq!(c.tile_id(), Some(t));
    }

    #[test]
    fn tile_lookup_rejects_non_ground() {
        let mut w = CollisionWorld::new();
        let b = w.add_standing(Layer::Building, Vec3::ZERO, Vec3::ONE).unwrap();
        assert!(w.tile(patrol_core::TileId::from(b)).is_none());
    }

    #[test]
    fn agent_body_records_owner() {
        let mut w = CollisionWorld::new();
        let vol = CollisionVolume::standing(Vec3::splat(0.5));
        let id = w.add_agent_body(AgentId(3), Vec3::ZERO, &vol).unwrap();
        assert_eq!(w.get(id).unwrap().owner, Some(AgentId(3)));
        assert_eq!(w.get(id).unwrap().layer, Layer::Agent);
    }

    #[test]
    fn set_origin_moves_index_entry() {
        let mut w = CollisionWorld::new();
        let id = w.add_standing(Layer::Target, Vec3::ZERO, Vec3::splat(0.5)).unwrap();
        let probe = Aabb::from_center(Vec3::new(10.0, 0.5, 0.0), Vec3::splat(0.1));
        assert!(w.overlapping(&probe, LayerFilter::ALL).is_empty());

        w.set_origin(id, Vec3::new(10.0, 0.0, 0.0)).unwrap();
        assert_eq!(w.overlapping(&probe, LayerFilter::ALL), vec![id]);
    }

    #[test]
    fn unknown_collider_errors() {
        let mut w = CollisionWorld::new();
        assert!(w.set_origin(ColliderId(4), Vec3::ZERO).is_err());
        assert!(w.set_enabled(ColliderId(4), false).is_err());
    }

    #[test]
    fn overlapping_respects_filter_and_enabled() {
        let (mut w, tiles, target, _) = super::helpers::corridor();
        let probe = Aabb::from_center(Vec3::new(0.0, 0.0, 4.8), Vec3::splat(0.4));

        let all = w.overlapping(&probe, LayerFilter::ALL);
        assert!(all.contains(&target));
        assert!(all.contains(&ColliderId(tiles[2].0)));

        assert_eq!(w.overlapping(&probe, LayerFilter::CONTACT), vec![target]);

        w.set_enabled(target, false).unwrap();
        assert!(w.overlapping(&probe, LayerFilter::CONTACT).is_empty());

        assert_eq!(w.enable_all(), 1);
        assert_eq!(w.overlapping(&probe, LayerFilter::CONTACT), vec![target]);
    }

    #[test]
    fn extent_covers_everything() {
        let (w, ..) = super::helpers::corridor();
        let e = w.extent().unwrap();
        assert!(e.min.z <= -1.0);
        assert!(e.max.z >= 8.5);
        assert!(CollisionWorld::new().extent().is_none());
    }
}

// ── Ray casting ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod casting {
    use glam::Vec3;

    use crate::{Classification, Layer, LayerFilter, Ray, RayCaster};

    #[test]
    fn forward_cast_hits_target_first() {
        let (w, _, target, _) = super::helpers::corridor();
        let ray = Ray::new(Vec3::new(0.0, 0.3, 0.0), Vec3::Z).unwrap();
        let hit = w.cast(&ray, LayerFilter::SIGHT).unwrap();
        assert_eq!(hit.collider, target);
        assert_eq!(hit.classification, Classification::Target);
        assert!((hit.distance - 4.7).abs() < 1e-5, "got {}", hit.distance);
        assert_eq!(hit.actor_position, Vec3::new(0.0, 0.0, 5.0));
        assert!((hit.point.z - 4.7).abs() < 1e-5);
    }

    #[test]
    fn disabled_target_reveals_wall() {
        let (mut w, _, target, wall) = super::helpers::corridor();
        w.set_enabled(target, false).unwrap();
        let ray = Ray::new(Vec3::new(0.0, 0.3, 0.0), Vec3::Z).unwrap();
        let hit = w.cast(&ray, LayerFilter::SIGHT).unwrap();
        assert_eq!(hit.collider, wall);
        assert_eq!(hit.classification, Classification::Obstacle);
        assert!((hit.distance - 7.5).abs() < 1e-5);
    }

    #[test]
    fn max_distance_limits_cast() {
        let (w, ..) = super::helpers::corridor();
        let ray = Ray::new(Vec3::new(0.0, 0.3, 0.0), Vec3::Z).unwrap().with_max_distance(2.0);
        assert!(w.cast(&ray, LayerFilter::SIGHT).is_none());
    }

    #[test]
    fn downward_cast_finds_tile_underfoot() {
        let (w, tiles, _, _) = super::helpers::corridor();
        let ray = Ray::new(Vec3::new(0.0, 0.5, 2.2), Vec3::NEG_Y).unwrap();
        let hit = w.cast(&ray, LayerFilter::GROUND).unwrap();
        assert_eq!(hit.layer, Layer::Ground);
        assert_eq!(hit.collider.0, tiles[1].0);
        assert!((hit.distance - 0.5).abs() < 1e-5);
        assert_eq!(hit.actor_position, Vec3::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn origin_inside_collider_is_ignored() {
        let (w, _, target, _) = super::helpers::corridor();
        // From inside the target, looking back toward the start.
        let ray = Ray::new(Vec3::new(0.0, 0.5, 5.0), Vec3::NEG_Z).unwrap();
        let hit = w.cast(&ray, LayerFilter::ALL);
        assert!(hit.is_none_or(|h| h.collider != target));
    }

    #[test]
    fn empty_filter_or_world_misses() {
        let (w, ..) = super::helpers::corridor();
        let ray = Ray::new(Vec3::ZERO, Vec3::Z).unwrap();
        assert!(w.cast(&ray, crate::LayerFilter::NONE).is_none());
        assert!(crate::CollisionWorld::new().cast(&ray, LayerFilter::ALL).is_none());
    }

    #[test]
    fn cast_outside_world_misses() {
        let (w, ..) = super::helpers::corridor();
        let ray = Ray::new(Vec3::new(50.0, 0.3, 0.0), Vec3::Z).unwrap();
        assert!(w.cast(&ray, LayerFilter::ALL).is_none());
    }
}
