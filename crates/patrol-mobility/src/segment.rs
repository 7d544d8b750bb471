//! One phase's worth of motion.

use glam::Vec3;

use crate::interpolate;

/// A straight move from `start` to `end` lasting `total` ticks.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotionSegment {
    pub start: Vec3,
    pub end:   Vec3,
    pub total: u32,
}

/// Outcome of [`MotionSegment::advance`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Advance {
    /// Where the body goes this tick.
    pub position: Vec3,
    /// `true` on the tick the segment completes.
    pub finished: bool,
}

impl MotionSegment {
    #[inline]
    pub fn new(start: Vec3, end: Vec3, total: u32) -> Self {
        Self { start, end, total }
    }

    #[inline]
    pub fn position_at(&self, elapsed: u32) -> Vec3 {
        interpolate(self.start, self.end, elapsed, self.total)
    }

    #[inline]
    pub fn is_complete(&self, elapsed: u32) -> bool {
        elapsed >= self.total
    }

    /// Run one tick: compute the position for `*elapsed`, then either bump
    /// the counter or, if the segment is complete, reset it to zero and
    /// report `finished`.
    pub fn advance(&self, elapsed: &mut u32) -> Advance {
        let position = self.position_at(*elapsed);
        if !self.is_complete(*elapsed) {
            *elapsed += 1;
            Advance { position, finished: false }
        } else {
            *elapsed = 0;
            Advance { position, finished: true }
        }
    }
}
