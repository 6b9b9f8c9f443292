//! Flappy Rat - A side-scrolling circus arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, game state)
//! - `session`: Owns the simulation, queues input intents, drives the lifecycle
//! - `highscores`: Single persisted best score
//! - `persistence`: Key-value storage port
//! - `platform`: Browser/native platform glue (input mapping, LocalStorage)
//! - `render`: Read-only snapshot consumed by renderers

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod render;
pub mod session;
pub mod sim;

pub use highscores::HighScore;
pub use persistence::{KeyValueStore, MemoryStore, StoreError};
pub use render::{Renderer, Snapshot};
pub use session::{Intent, LoopControl, Session};

/// Game configuration constants
///
/// All lengths are in CSS pixels, all rates are per tick (one rendered frame).
pub mod consts {
    /// Downward acceleration added to the velocity every tick
    pub const GRAVITY: f32 = 0.15;
    /// Velocity the character is set to on jump (negative = up)
    pub const JUMP_STRENGTH: f32 = -6.0;

    /// Horizontal obstacle speed (also drives the scroll offset)
    pub const PIPE_SPEED: f32 = 1.8;
    /// Width of the solid obstacle body (used for collision)
    pub const PIPE_WIDTH: f32 = 60.0;
    /// Width of the decorative cap (wider than the body)
    pub const PIPE_CAP_WIDTH: f32 = 68.0;
    pub const PIPE_CAP_HEIGHT: f32 = 30.0;

    /// Gap size bounds (inclusive, whole pixels)
    pub const MIN_GAP: i32 = 160;
    pub const MAX_GAP: i32 = 240;
    /// Minimum height of a solid obstacle segment (must exceed the cap height)
    pub const MIN_PIPE_HEIGHT: i32 = 80;
    /// Frames between obstacle spawns
    pub const PIPE_SPAWN_RATE: u64 = 200;
    /// Obstacles spawn this far past the right edge
    pub const SPAWN_MARGIN: f32 = 50.0;

    /// Character sprite size (square)
    pub const RAT_SIZE: f32 = 44.0;
    /// Collision box size, centered inside the sprite
    pub const RAT_HITBOX_SIZE: f32 = 28.0;
    /// Fixed horizontal position of the sprite's left edge
    pub const RAT_X_OFFSET: f32 = 60.0;

    /// Frames between animation phase flips
    pub const ANIMATION_FRAME_TICKS: u64 = 8;
    /// Rotation clamp (degrees)
    pub const MIN_ROTATION_DEG: f32 = -30.0;
    pub const MAX_ROTATION_DEG: f32 = 90.0;
    pub const ROTATION_PER_VELOCITY: f32 = 4.0;

    /// Score at which obstacles start oscillating
    pub const ESCALATION_SCORE: u64 = 10;
    pub const OSCILLATION_SPEED: f32 = 0.025;
    pub const OSCILLATION_RANGE: f32 = 40.0;
    pub const OSCILLATION_PHASE_SCALE: f32 = 0.005;

    /// Parallax factors (fraction of the scroll offset)
    pub const PARALLAX_FAR: f32 = 0.2;
    pub const PARALLAX_MID: f32 = 0.5;
    pub const PARALLAX_FLOOR: f32 = 1.0;
}

/// Horizontal inset of the hitbox inside the sprite
#[inline]
pub fn hitbox_inset() -> f32 {
    (consts::RAT_SIZE - consts::RAT_HITBOX_SIZE) / 2.0
}
