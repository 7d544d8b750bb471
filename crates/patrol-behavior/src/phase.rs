//! The patrol agent's phase enum.

use std::fmt;

/// Exactly one phase is active per agent per tick.
///
/// `Patrolling`, `Stunned` and `ResetWait` persist until something external
/// (a sighting, `reset_state`, an animation flag) moves the agent on.  The
/// others end on their own.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    #[default]
    Patrolling,
    ChargeWindup,
    Charging,
    ChargeCooldown,
    Returning,
    CollisionRecoil,
    Stunned,
    ResetWait,
}

impl Phase {
    pub const ALL: [Phase; 8] = [
        Phase::Patrolling,
        Phase::ChargeWindup,
        Phase::Charging,
        Phase::ChargeCooldown,
        Phase::Returning,
        Phase::CollisionRecoil,
        Phase::Stunned,
        Phase::ResetWait,
    ];

    /// Position in [`Phase::ALL`], for histogram indexing.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Patrolling      => "patrolling",
            Phase::ChargeWindup    => "charge_windup",
            Phase::Charging        => "charging",
            Phase::ChargeCooldown  => "charge_cooldown",
            Phase::Returning       => "returning",
            Phase::CollisionRecoil => "collision_recoil",
            Phase::Stunned         => "stunned",
            Phase::ResetWait       => "reset_wait",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
