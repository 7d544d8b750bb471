//! `patrol-mobility` — tick-driven linear motion.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`interp`]    | `interpolate` — the pure position function                |
//! | [`segment`]   | `MotionSegment` — one phase's endpoints + duration        |
//!
//! # Movement model
//!
//! Motion phases are fixed-length in ticks.  Each tick the owner asks the
//! segment for the position at the current elapsed count and then bumps the
//! count by one:
//!
//! 1. `pos = interpolate(start, end, elapsed, total)` is written to the body.
//! 2. If `elapsed < total` the counter increments.
//! 3. Otherwise the phase is over in this same tick and the counter resets.
//!
//! So a 120-tick segment places the body on `end` on the tick it completes,
//! and a zero-length segment completes on its first tick with the body on
//! `end`.  [`MotionSegment::advance`] packages those three steps.

pub mod interp;
pub mod segment;

#[cfg(test)]
mod tests;

pub use interp::interpolate;
pub use segment::{Advance, MotionSegment};
