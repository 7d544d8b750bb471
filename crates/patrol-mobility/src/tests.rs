//! Unit tests for patrol-mobility.

use glam::Vec3;

use crate::{MotionSegment, interpolate};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Distance from `p` to the segment `a`–`b`.
fn distance_to_segment(p: Vec3, a: Vec3, b: Vec3) -> f32 {
    let ab = b - a;
    let len2 = ab.length_squared();
    if len2 == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Tick a segment to completion and return every position it produced.
fn run_to_end(seg: &MotionSegment) -> Vec<Vec3> {
    let mut elapsed = 0;
    let mut out = Vec::new();
    loop {
        let step = seg.advance(&mut elapsed);
        out.push(step.position);
        if step.finished {
            assert_eq!(elapsed, 0);
            return out;
        }
        assert!(out.len() <= seg.total as usize + 1, "segment never finished");
    }
}

// ── interpolate ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod interp {
    use super::*;

    const A: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    const B: Vec3 = Vec3::new(0.0, 0.0, 10.0);

    #[test]
    fn endpoints_exact() {
        assert_eq!(interpolate(A, B, 0, 120), A);
        assert_eq!(interpolate(A, B, 120, 120), B);
    }

    #[test]
    fn midpoint() {
        let p = interpolate(A, B, 60, 120);
        assert!((p.z - 5.0).abs() < 1e-6);
    }

    #[test]
    fn zero_total_is_end() {
        assert_eq!(interpolate(A, B, 0, 0), B);
        assert_eq!(interpolate(A, B, 7, 0), B);
    }

    #[test]
    fn overshoot_clamps_to_end() {
        assert_eq!(interpolate(A, B, 500, 120), B);
    }

    #[test]
    fn awkward_endpoints_land_exactly() {
        let a = Vec3::new(0.1, -3.7, 1e5);
        let b = Vec3::new(0.3, 2.2, -1e-3);
        assert_eq!(interpolate(a, b, 33, 33), b);
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use super::*;

    fn vec3() -> impl Strategy<Value = Vec3> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0, -1000.0f32..1000.0)
            .prop_map(|(x, y, z)| Vec3::new(x, y, z))
    }

    proptest! {
        #[test]
        fn stays_on_segment(a in vec3(), b in vec3(), total in 1u32..2000, frac in 0.0f64..=1.0) {
            let elapsed = (total as f64 * frac) as u32;
            let p = interpolate(a, b, elapsed, total);
            let tol = 1e-3 * (1.0 + a.distance(b));
            prop_assert!(distance_to_segment(p, a, b) <= tol);
        }

        #[test]
        fn starts_at_a_and_ends_at_b(a in vec3(), b in vec3(), total in 1u32..2000) {
            prop_assert_eq!(interpolate(a, b, 0, total), a);
            prop_assert_eq!(interpolate(a, b, total, total), b);
        }

        #[test]
        fn zero_total_any_elapsed(a in vec3(), b in vec3(), elapsed in 0u32..10_000) {
            prop_assert_eq!(interpolate(a, b, elapsed, 0), b);
        }

        #[test]
        fn progress_is_monotone(a in vec3(), b in vec3(), total in 2u32..500, e in 0u32..499) {
            let e = e % total;
            let d0 = interpolate(a, b, e, total).distance(a);
            let d1 = interpolate(a, b, e + 1, total).distance(a);
            prop_assert!(d1 + 1e-4 * (1.0 + a.distance(b)) >= d0);
        }
    }
}

// ── MotionSegment ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod segment {
    use super::*;

    #[test]
    fn advance_runs_total_plus_one_ticks() {
        let seg = MotionSegment::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0), 120);
        let positions = run_to_end(&seg);
        assert_eq!(positions.len(), 121);
        assert_eq!(positions[0], Vec3::ZERO);
        assert_eq!(*positions.last().unwrap(), seg.end);
    }

    #[test]
    fn zero_length_finishes_first_tick_at_end() {
        let seg = MotionSegment::new(Vec3::ZERO, Vec3::X, 0);
        let mut elapsed = 0;
        let step = seg.advance(&mut elapsed);
        assert!(step.finished);
        assert_eq!(step.position, Vec3::X);
        assert_eq!(elapsed, 0);
    }

    #[test]
    fn elapsed_never_exceeds_total() {
        let seg = MotionSegment::new(Vec3::ZERO, Vec3::Y, 5);
        let mut elapsed = 0;
        for _ in 0..20 {
            seg.advance(&mut elapsed);
            assert!(elapsed <= seg.total);
        }
    }

    #[test]
    fn completeness() {
        let seg = MotionSegment::new(Vec3::ZERO, Vec3::new(3.0, 4.0, 0.0), 10);
        assert!(!seg.is_complete(9));
        assert!(seg.is_complete(10));
        assert!(MotionSegment::new(Vec3::ZERO, Vec3::X, 0).is_complete(0));
    }
}
