//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One logical step per tick, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (spawn order, which is also screen order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod obstacle;
pub mod physics;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, Rect, TerminalCause, evaluate};
pub use obstacle::{DifficultyPolicy, Obstacle, OscillationPolicy, evict_offscreen, spawn_obstacle};
pub use state::{Character, GameEvent, GamePhase, GameState, PlayArea};
pub use tick::{TickInput, TickOutcome, tick};
