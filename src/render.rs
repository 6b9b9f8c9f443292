//! Rendering boundary
//!
//! Renderers get a read-only [`Snapshot`] once per frame and never feed back
//! into the simulation.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{GamePhase, GameState, Obstacle};

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Top edge of the character sprite
    pub character_y: f32,
    /// Sprite rotation in degrees
    pub character_rotation: f32,
    pub animation_phase: u8,
    pub obstacles: Vec<Obstacle>,
    pub scroll_offset: f32,
    pub score: u64,
    pub high_score: u64,
    pub phase: GamePhase,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            character_y: state.character.y,
            character_rotation: state.character.rotation(),
            animation_phase: state.animation_phase(),
            obstacles: state.obstacles.iter().copied().collect(),
            scroll_offset: state.scroll_offset,
            score: state.score,
            high_score: state.high_score,
            phase: state.phase,
        }
    }

    /// Horizontal offsets of the far, mid and floor background layers
    pub fn parallax_offsets(&self) -> [f32; 3] {
        [
            -self.scroll_offset * PARALLAX_FAR,
            -self.scroll_offset * PARALLAX_MID,
            -self.scroll_offset * PARALLAX_FLOOR,
        ]
    }

    /// Whether the in-game score counter is visible
    pub fn show_hud(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}

/// Anything that can draw a snapshot
pub trait Renderer {
    fn render(&mut self, snapshot: &Snapshot);
}
