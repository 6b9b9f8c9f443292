//! Collision detection and scoring
//!
//! Everything is an axis-aligned rectangle in screen space (y grows down).
//! One pass over the live obstacles decides both whether the run ended and
//! how many obstacles were cleared this tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::obstacle::Obstacle;
use super::state::PlayArea;

/// Axis-aligned rectangle, `min` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn from_edges(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            min: Vec2::new(left, top),
            max: Vec2::new(right, bottom),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Open-interval overlap of the horizontal spans (touching edges don't count)
    #[inline]
    pub fn overlaps_x(&self, left: f32, right: f32) -> bool {
        self.right() > left && self.left() < right
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminalCause {
    Floor,
    Ceiling,
    Obstacle,
}

/// Result of a collision/scoring pass
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CollisionResult {
    /// Set when the run must end this tick
    pub terminal: Option<TerminalCause>,
    /// Obstacles newly passed this tick
    pub scored: u32,
}

impl CollisionResult {
    pub fn hit(&self) -> bool {
        self.terminal.is_some()
    }
}

/// Floor/ceiling contact
pub fn bounds_contact(hitbox: &Rect, area: PlayArea) -> Option<TerminalCause> {
    if hitbox.bottom() >= area.height {
        Some(TerminalCause::Floor)
    } else if hitbox.top() <= 0.0 {
        Some(TerminalCause::Ceiling)
    } else {
        None
    }
}

/// Hitbox overlaps one of the obstacle's solid segments
pub fn obstacle_contact(hitbox: &Rect, obstacle: &Obstacle) -> bool {
    if !hitbox.overlaps_x(obstacle.left(), obstacle.right()) {
        return false;
    }
    hitbox.top() < obstacle.gap_top || hitbox.bottom() > obstacle.gap_bottom()
}

/// Run the per-tick collision and scoring pass.
///
/// Bounds contact ends the run before obstacles are looked at. Otherwise every
/// obstacle is visited (no early exit): any overlap marks the result terminal,
/// and every obstacle whose right edge the hitbox has cleared is marked passed
/// exactly once.
pub fn evaluate<'a, I>(hitbox: &Rect, obstacles: I, area: PlayArea) -> CollisionResult
where
    I: IntoIterator<Item = &'a mut Obstacle>,
{
    if let Some(cause) = bounds_contact(hitbox, area) {
        return CollisionResult {
            terminal: Some(cause),
            scored: 0,
        };
    }

    let mut result = CollisionResult::default();
    for obstacle in obstacles {
        if obstacle_contact(hitbox, obstacle) {
            result.terminal = Some(TerminalCause::Obstacle);
        }
        if !obstacle.passed && hitbox.left() > obstacle.right() {
            obstacle.passed = true;
            result.scored += 1;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Character;

    fn area() -> PlayArea {
        PlayArea::new(400.0, 600.0).unwrap()
    }

    fn obstacle_at(x: f32, gap_top: f32, gap_size: f32) -> Obstacle {
        Obstacle {
            id: 1,
            x,
            gap_top,
            initial_gap_top: gap_top,
            gap_size,
            passed: false,
        }
    }

    fn character_at(y: f32) -> Character {
        Character { y, velocity: 0.0 }
    }

    #[test]
    fn test_floor_and_ceiling() {
        // Hitbox bottom = y + 36
        let hb = character_at(564.0).hitbox();
        assert_eq!(bounds_contact(&hb, area()), Some(TerminalCause::Floor));

        let hb = character_at(563.0).hitbox();
        assert_eq!(bounds_contact(&hb, area()), None);

        // Hitbox top = y + 8
        let hb = character_at(-8.0).hitbox();
        assert_eq!(bounds_contact(&hb, area()), Some(TerminalCause::Ceiling));

        let hb = character_at(-7.0).hitbox();
        assert_eq!(bounds_contact(&hb, area()), None);
    }

    #[test]
    fn test_inside_gap_is_safe() {
        let hb = character_at(250.0).hitbox(); // 258..286
        let mut obstacles = vec![obstacle_at(50.0, 200.0, 180.0)];
        let result = evaluate(&hb, obstacles.iter_mut(), area());
        assert!(!result.hit());
        assert_eq!(result.scored, 0);
    }

    #[test]
    fn test_above_and_below_gap_collide() {
        let mut obstacles = vec![obstacle_at(50.0, 300.0, 180.0)];

        let above = character_at(50.0).hitbox();
        let result = evaluate(&above, obstacles.iter_mut(), area());
        assert_eq!(result.terminal, Some(TerminalCause::Obstacle));

        let below = character_at(460.0).hitbox(); // bottom 496 > 480
        let result = evaluate(&below, obstacles.iter_mut(), area());
        assert_eq!(result.terminal, Some(TerminalCause::Obstacle));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let hb = character_at(50.0).hitbox(); // x span 68..96
        let mut obstacles = vec![obstacle_at(96.0, 300.0, 180.0), obstacle_at(8.0, 300.0, 180.0)];
        let result = evaluate(&hb, obstacles.iter_mut(), area());
        assert!(!result.hit());
    }

    #[test]
    fn test_scoring_once_per_obstacle() {
        let hb = character_at(250.0).hitbox();
        let mut obstacles = vec![obstacle_at(0.0, 200.0, 180.0), obstacle_at(5.0, 200.0, 180.0)];

        let result = evaluate(&hb, obstacles.iter_mut(), area());
        assert_eq!(result.scored, 2);
        assert!(obstacles.iter().all(|o| o.passed));

        let result = evaluate(&hb, obstacles.iter_mut(), area());
        assert_eq!(result.scored, 0);
    }

    #[test]
    fn test_bounds_contact_skips_scoring() {
        let hb = character_at(570.0).hitbox();
        let mut obstacles = vec![obstacle_at(0.0, 200.0, 180.0)];
        let result = evaluate(&hb, obstacles.iter_mut(), area());
        assert_eq!(result.terminal, Some(TerminalCause::Floor));
        assert_eq!(result.scored, 0);
        assert!(!obstacles[0].passed);
    }

    #[test]
    fn test_multiple_collisions_single_result() {
        let hb = character_at(50.0).hitbox();
        let mut obstacles = vec![obstacle_at(40.0, 300.0, 180.0), obstacle_at(60.0, 300.0, 180.0)];
        let result = evaluate(&hb, obstacles.iter_mut(), area());
        assert_eq!(result.terminal, Some(TerminalCause::Obstacle));
    }
}
