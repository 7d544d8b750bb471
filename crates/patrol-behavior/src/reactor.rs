//! Contact handling.
//!
//! Overlaps between an agent body and another collider are classified once
//! into a [`ContactKind`].  Touching a peer agent knocks the agent back
//! toward its last tile, whatever it was doing.  Touching the target tells
//! the target it has been caught and leaves the agent's phase alone.

use patrol_core::{AgentId, ColliderId, Tick};
use patrol_spatial::Classification;

use crate::{Animator, PatrolAgent};

/// What an agent body touched.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContactKind {
    Target,
    Peer,
    Obstacle,
    Other,
}

impl From<Classification> for ContactKind {
    fn from(c: Classification) -> Self {
        match c {
            Classification::Target   => ContactKind::Target,
            Classification::Peer     => ContactKind::Peer,
            Classification::Obstacle => ContactKind::Obstacle,
            Classification::Other    => ContactKind::Other,
        }
    }
}

/// A contact that began this tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Contact {
    pub other: ColliderId,
    pub kind:  ContactKind,
}

// ── TargetHandler ─────────────────────────────────────────────────────────────

/// Receives "the target was caught" notifications.
pub trait TargetHandler {
    fn on_target_lost(&mut self, agent: AgentId, target: ColliderId, tick: Tick);
}

/// A [`TargetHandler`] that ignores every notification.
pub struct NoopTargetHandler;

impl TargetHandler for NoopTargetHandler {
    fn on_target_lost(&mut self, _agent: AgentId, _target: ColliderId, _tick: Tick) {}
}

/// One recorded catch.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct TargetLost {
    pub agent:  AgentId,
    pub target: ColliderId,
    pub tick:   Tick,
}

/// A [`TargetHandler`] that keeps every notification in order.
#[derive(Clone, Debug, Default)]
pub struct TargetLog {
    pub events: Vec<TargetLost>,
}

impl TargetHandler for TargetLog {
    fn on_target_lost(&mut self, agent: AgentId, target: ColliderId, tick: Tick) {
        self.events.push(TargetLost { agent, target, tick });
    }
}

// ── Reaction ──────────────────────────────────────────────────────────────────

impl<A: Animator> PatrolAgent<A> {
    /// React to a contact that started on `tick`.
    ///
    /// A peer contact preempts any phase, including a recoil already under
    /// way; in-flight motion is discarded.
    pub fn on_contact(&mut self, contact: Contact, handler: &mut dyn TargetHandler, tick: Tick) {
        match contact.kind {
            ContactKind::Peer => self.begin_recoil(tick),
            ContactKind::Target => handler.on_target_lost(self.id(), contact.other, tick),
            ContactKind::Obstacle | ContactKind::Other => {}
        }
    }
}
