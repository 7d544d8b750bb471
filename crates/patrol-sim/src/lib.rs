//! `patrol-sim` — fixed-step driver for a level full of patrol agents.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Step      — PatrolAgent::step for every agent in AgentId order.
//!   ② Sync      — move each agent's body collider to its new pose.
//!   ③ Contacts  — overlap each body against the CONTACT layers; pairs that
//!                 were not touching last tick become Contact events and
//!                 are handed to PatrolAgent::on_contact.
//!   ④ Snapshot  — every `trace_interval_ticks`, observers get a
//!                 per-agent snapshot.
//! ```
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                 |
//! |-----------|--------------------------------------------------------|
//! | `fx-hash` | FxHash for the touching-pair set instead of SipHash.   |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let mut sim = SimBuilder::new(SimConfig::default(), world)
//!     .agent(PatrolAgentBuilder::new(AgentId(0), anchor).animator(anim).volume(vol))
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{AgentSnapshot, NoopObserver, SimObserver};
pub use sim::Sim;
