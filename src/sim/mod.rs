//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `tick`
//! - Seeded RNG only
//! - Stable iteration order (item list order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod hook;
pub mod items;
pub mod particles;
pub mod session;
pub mod state;
pub mod tick;

pub use collision::{caught_count, find_catch};
pub use hook::{Hook, HookState};
pub use items::{Item, ItemKind, ItemTier, generate_items};
pub use particles::Particle;
pub use session::{GamePhase, Session};
pub use state::{GameEvent, GameState, Playfield};
pub use tick::{TickInput, tick};
