//! `patrol-behavior` — the patrol/charge agent.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                      |
//! |-----------------|---------------------------------------------------------------|
//! | [`phase`]       | `Phase` enum                                                  |
//! | [`agent`]       | `PatrolAgent<A>` state machine, `PatrolAgentBuilder`          |
//! | [`perception`]  | forward/downward casts, `PerceptionHit`, `TileRef`            |
//! | [`reactor`]     | `ContactKind`, `Contact`, `TargetHandler` + impls             |
//! | [`animator`]    | `Animator` trait, `AnimFlag`, `ClipTag`, `TimedAnimator`      |
//! | [`config`]      | `PatrolConfig`, `CastJitter`, `PerceptionFilters`             |
//! | [`context`]     | `StepContext<'a>` — per-tick inputs                           |
//! | [`error`]       | `BehaviorError`, `BehaviorResult<T>`                          |
//!
//! # Phases
//!
//! ```text
//!            sighting                 clip done            motion done
//! Patrolling ───────▶ ChargeWindup ───────────▶ Charging ───────────▶ ChargeCooldown
//!     ▲                                                                     │ clip done
//!     └──────────────────────────── Returning ◀─────────────────────────────┘
//!                     motion done
//!
//! any ──peer contact──▶ CollisionRecoil ──motion done──▶ Stunned ──reset_state──▶ Patrolling
//! any ──begin_reset_wait──▶ ResetWait ──PreWaiting──▶ Patrolling
//! ```
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                        |
//! |---------|---------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on config and value types.  |

pub mod agent;
pub mod animator;
pub mod config;
pub mod context;
pub mod error;
pub mod perception;
pub mod phase;
pub mod reactor;


pub use agent::{ChargeTarget, PatrolAgent, PatrolAgentBuilder};
pub use animator::{AnimFlag, Animator, ClipTag, ClipTimings, TimedAnimator};
pub use config::{CastJitter, PatrolConfig, PerceptionFilters};
pub use context::StepContext;
pub use error::{BehaviorError, BehaviorResult};
pub use perception::{PerceptionHit, TileRef, cast_downward, cast_forward};
pub use phase::Phase;
pub use reactor::{Contact, ContactKind, NoopTargetHandler, TargetHandler, TargetLog, TargetLost};
