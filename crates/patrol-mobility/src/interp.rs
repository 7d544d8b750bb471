//! Linear interpolation over an integer tick count.

use glam::Vec3;

/// Position `elapsed` ticks into a `total`-tick move from `start` to `end`.
///
/// The fraction `elapsed / total` is clamped to `[0, 1]`.  A zero `total`
/// yields `end`.  The endpoints are returned exactly (not recomputed through
/// float arithmetic) so a completed move lands bit-for-bit on its target.
#[inline]
pub fn interpolate(start: Vec3, end: Vec3, elapsed: u32, total: u32) -> Vec3 {
    if elapsed >= total {
        return end;
    }
    if elapsed == 0 {
        return start;
    }
    let t = elapsed as f32 / total as f32;
    start + (end - start) * t
}
