//! The corridor level shared by every run of the demo.
//!
//! Two parallel lanes of ground tiles running along +Z.  The west lane ends
//! in the target; the east lane is blocked by a scenery crate so its agent
//! never gets a clear line of sight.

use anyhow::Result;
use glam::Vec3;
use patrol_core::ColliderId;
use patrol_spatial::{CollisionWorld, Layer};

pub const WEST_LANE_X: f32 = 0.0;
pub const EAST_LANE_X: f32 = 4.0;

/// Tiles per lane, spaced two units apart.
pub const LANE_TILES: usize = 10;

pub const TARGET_AT: Vec3 = Vec3::new(WEST_LANE_X, 0.0, 14.5);
pub const CRATE_AT:  Vec3 = Vec3::new(EAST_LANE_X, 0.0, 7.0);

const TILE_HALF:   Vec3 = Vec3::new(1.0, 0.25, 1.0);
const TARGET_HALF: Vec3 = Vec3::new(0.5, 0.9, 0.5);
const CRATE_HALF:  Vec3 = Vec3::new(0.8, 0.8, 0.8);

/// Handles to the actors of interest in the built level.
pub struct Level {
    pub world:  CollisionWorld,
    pub target: ColliderId,
    pub crate_: ColliderId,
}

/// Build the corridor.
pub fn build_level() -> Result<Level> {
    let mut world = CollisionWorld::new();

    for lane in [WEST_LANE_X, EAST_LANE_X] {
        for k in 0..LANE_TILES {
            world.add_tile(Vec3::new(lane, 0.0, 2.0 * k as f32), TILE_HALF)?;
        }
    }
    let target = world.add_standing(Layer::Target, TARGET_AT, TARGET_HALF)?;
    let crate_ = world.add_standing(Layer::Scenery, CRATE_AT, CRATE_HALF)?;

    Ok(Level { world, target, crate_ })
}
