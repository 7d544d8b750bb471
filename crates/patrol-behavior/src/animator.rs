//! The animation capability an agent drives.
//!
//! The state machine never plays clips itself.  It raises and lowers named
//! flags, fires the level-reset trigger, and polls which clip is showing.
//! [`TimedAnimator`] is a self-contained stand-in that finishes each clip
//! after a fixed number of ticks.

/// Boolean parameters the agent raises and lowers.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnimFlag {
    /// Charge wind-up clip requested.
    Windup,
    /// Charge cool-down clip requested.
    Cooldown,
    /// Peer-collision clip requested.
    Collision,
    /// Raised by the animation side once a level reset has played out.
    PreWaiting,
}

impl AnimFlag {
    pub const ALL: [AnimFlag; 4] =
        [AnimFlag::Windup, AnimFlag::Cooldown, AnimFlag::Collision, AnimFlag::PreWaiting];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// What the currently playing clip is tagged with.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClipTag {
    WindupFinished,
    CooldownFinished,
    #[default]
    Other,
}

/// Animation capability.
pub trait Animator {
    fn set_flag(&mut self, flag: AnimFlag, value: bool);

    fn flag(&self, flag: AnimFlag) -> bool;

    /// Fire the level-reset trigger.
    fn fire_reset_trigger(&mut self);

    fn current_clip(&self) -> ClipTag;

    /// Advance the animation by one tick.  Called by the agent before its
    /// phase logic.  Host-driven animators can leave this as a no-op.
    fn advance(&mut self) {}
}

impl<A: Animator + ?Sized> Animator for Box<A> {
    fn set_flag(&mut self, flag: AnimFlag, value: bool) {
        (**self).set_flag(flag, value)
    }

    fn flag(&self, flag: AnimFlag) -> bool {
        (**self).flag(flag)
    }

    fn fire_reset_trigger(&mut self) {
        (**self).fire_reset_trigger()
    }

    fn current_clip(&self) -> ClipTag {
        (**self).current_clip()
    }

    fn advance(&mut self) {
        (**self).advance()
    }
}

// ── TimedAnimator ─────────────────────────────────────────────────────────────

/// Clip lengths for [`TimedAnimator`], in ticks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClipTimings {
    pub windup:    u32,
    pub cooldown:  u32,
    /// Ticks from a reset trigger until `PreWaiting` is raised.
    pub pre_wait:  u32,
}

impl Default for ClipTimings {
    fn default() -> Self {
        Self { windup: 25, cooldown: 25, pre_wait: 50 }
    }
}

/// An animator that plays each requested clip for a fixed number of ticks.
///
/// While `Windup` is raised the clip counts up and reports
/// `WindupFinished` once `timings.windup` ticks have passed; likewise for
/// `Cooldown`.  A reset trigger raises `PreWaiting` after `timings.pre_wait`
/// ticks.
#[derive(Clone, Debug, Default)]
pub struct TimedAnimator {
    timings:       ClipTimings,
    flags:         [bool; 4],
    /// Ticks the current windup/cooldown clip has been playing.
    clip_ticks:    u32,
    /// Ticks left until `PreWaiting` goes up, if a reset is pending.
    pre_wait_left: Option<u32>,
    resets:        u32,
}

impl TimedAnimator {
    pub fn new(timings: ClipTimings) -> Self {
        Self { timings, ..Self::default() }
    }

    pub fn timings(&self) -> ClipTimings {
        self.timings
    }

    /// How many times the reset trigger has fired.
    pub fn reset_count(&self) -> u32 {
        self.resets
    }
}

impl Animator for TimedAnimator {
    fn set_flag(&mut self, flag: AnimFlag, value: bool) {
        let slot = &mut self.flags[flag.index()];
        if *slot != value && matches!(flag, AnimFlag::Windup | AnimFlag::Cooldown) {
            self.clip_ticks = 0;
        }
        *slot = value;
    }

    fn flag(&self, flag: AnimFlag) -> bool {
        self.flags[flag.index()]
    }

    fn fire_reset_trigger(&mut self) {
        self.resets += 1;
        self.flags[AnimFlag::PreWaiting.index()] = false;
        self.pre_wait_left = Some(self.timings.pre_wait);
    }

    fn current_clip(&self) -> ClipTag {
        if self.flag(AnimFlag::Windup) && self.clip_ticks >= self.timings.windup {
            ClipTag::WindupFinished
        } else if self.flag(AnimFlag::Cooldown) && self.clip_ticks >= self.timings.cooldown {
            ClipTag::CooldownFinished
        } else {
            ClipTag::Other
        }
    }

    fn advance(&mut self) {
        if self.flag(AnimFlag::Windup) || self.flag(AnimFlag::Cooldown) {
            self.clip_ticks = self.clip_ticks.saturating_add(1);
        }
        if let Some(left) = self.pre_wait_left {
            if left == 0 {
                self.flags[AnimFlag::PreWaiting.index()] = true;
                self.pre_wait_left = None;
            } else {
                self.pre_wait_left = Some(left - 1);
            }
        }
    }
}
