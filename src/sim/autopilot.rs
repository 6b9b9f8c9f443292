//! Attract-mode autopilot
//!
//! Flies the character by synthesizing jump inputs: it lets the character
//! fall until the hitbox nears the bottom of the next gap, then jumps. One
//! jump from rest rises a little under 120px, which fits inside the smallest
//! gap with the margin below.

use super::obstacle::Obstacle;
use super::state::{GameState, PlayArea};
use crate::consts::*;

/// How far above the gap bottom the hitbox bottom may sink before jumping
pub const JUMP_MARGIN: f32 = 12.0;

/// First obstacle the hitbox has not fully cleared yet
pub fn next_obstacle(state: &GameState) -> Option<&Obstacle> {
    let left = state.character.hitbox().left();
    state
        .obstacles
        .iter()
        .find(|o| !o.passed && o.right() >= left)
}

/// Bottom of the gap the autopilot is aiming for
pub fn target_gap_bottom(state: &GameState, area: PlayArea) -> f32 {
    match next_obstacle(state) {
        Some(o) => o.gap_bottom(),
        // No obstacle ahead: pretend there's a minimum gap centered on screen
        None => area.height / 2.0 + MIN_GAP as f32 / 2.0,
    }
}

/// Whether the autopilot jumps this tick
pub fn wants_jump(state: &GameState, area: PlayArea) -> bool {
    if state.character.velocity < 0.0 {
        return false;
    }
    state.character.hitbox().bottom() >= target_gap_bottom(state, area) - JUMP_MARGIN
}
