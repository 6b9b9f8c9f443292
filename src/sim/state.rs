//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`].

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, TerminalCause};
use super::obstacle::{Obstacle, spawn_obstacle};
use super::physics;
use crate::consts::*;
use crate::hitbox_inset;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start signal
    #[default]
    Start,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for restart
    GameOver,
}

/// Size of the visible play area, measured by the host every frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayArea {
    pub width: f32,
    pub height: f32,
}

impl PlayArea {
    /// Returns `None` while the layout is not ready (zero or negative size)
    pub fn new(width: f32, height: f32) -> Option<Self> {
        (width > 0.0 && height > 0.0).then_some(Self { width, height })
    }
}

/// The player character
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Top edge of the sprite
    pub y: f32,
    /// Vertical velocity (positive = falling)
    pub velocity: f32,
}

impl Default for Character {
    fn default() -> Self {
        // Midpoint of a 600px-tall play area, used before the first run
        Self {
            y: 300.0,
            velocity: 0.0,
        }
    }
}

impl Character {
    /// Character at rest in the vertical middle of the play area
    pub fn centered(area: PlayArea) -> Self {
        Self {
            y: area.height / 2.0,
            velocity: 0.0,
        }
    }

    pub fn step(&mut self) {
        (self.y, self.velocity) = physics::integrate(self.y, self.velocity);
    }

    pub fn jump(&mut self) {
        self.velocity = physics::jump_velocity();
    }

    /// Collision rectangle, smaller than the sprite to forgive grazes
    pub fn hitbox(&self) -> Rect {
        let inset = hitbox_inset();
        Rect::from_edges(
            RAT_X_OFFSET + inset,
            self.y + inset,
            RAT_X_OFFSET + RAT_SIZE - inset,
            self.y + RAT_SIZE - inset,
        )
    }

    pub fn rotation(&self) -> f32 {
        physics::rotation_for_velocity(self.velocity)
    }
}

/// Notable things that happened during a tick (drained by the session)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RunStarted,
    Scored { score: u64 },
    GameOver {
        score: u64,
        cause: TerminalCause,
        new_high_score: bool,
    },
}

/// Complete simulation state (deterministic given seed and inputs)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the spawn RNG was created from
    pub seed: u64,
    /// Spawn geometry RNG
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub score: u64,
    /// Best score seen so far (loaded by the session)
    pub high_score: u64,
    /// Ticks since the current run started
    pub frame_count: u64,
    /// Accumulated horizontal scroll, drives parallax layers
    pub scroll_offset: f32,
    pub character: Character,
    /// Live obstacles in spawn order (leftmost first)
    pub obstacles: VecDeque<Obstacle>,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    /// Next obstacle ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state in the Start phase
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Start,
            score: 0,
            high_score: 0,
            frame_count: 0,
            scroll_offset: 0.0,
            character: Character::default(),
            obstacles: VecDeque::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new obstacle ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn a new obstacle just past the right edge
    pub fn spawn_obstacle(&mut self, area: PlayArea) {
        let id = self.next_entity_id();
        let obstacle = spawn_obstacle(&mut self.rng, area, id);
        log::debug!(
            "Spawned obstacle {} (gap top {}, size {})",
            obstacle.id,
            obstacle.gap_top,
            obstacle.gap_size
        );
        self.obstacles.push_back(obstacle);
    }

    /// Reset protocol shared by start and restart, ends in Playing
    pub fn start_run(&mut self, area: PlayArea) {
        self.score = 0;
        self.frame_count = 0;
        self.scroll_offset = 0.0;
        self.character = Character::centered(area);
        self.obstacles.clear();
        self.spawn_obstacle(area);
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::RunStarted);
        log::info!("Run started (play area {}x{})", area.width, area.height);
    }

    /// Playing -> GameOver, with the high score comparison
    pub fn end_run(&mut self, cause: TerminalCause) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.phase = GamePhase::GameOver;

        let new_high_score = self.score > self.high_score;
        if new_high_score {
            self.high_score = self.score;
        }
        self.events.push(GameEvent::GameOver {
            score: self.score,
            cause,
            new_high_score,
        });
        log::info!("Game over ({:?}) with score {}", cause, self.score);
    }

    /// Derived animation frame for the renderer
    pub fn animation_phase(&self) -> u8 {
        physics::animation_phase(self.frame_count, self.character.velocity)
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
