//! Gap obstacles: spawning, advection, oscillation and eviction

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::state::PlayArea;
use crate::consts::*;

/// A pair of solid columns with a passable gap between them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge of the solid body
    pub x: f32,
    /// Height of the solid region above the gap
    pub gap_top: f32,
    /// Unperturbed spawn value, baseline for oscillation
    pub initial_gap_top: f32,
    pub gap_size: f32,
    /// Already counted toward the score
    pub passed: bool,
}

impl Obstacle {
    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Right edge of the solid body (what the hitbox must clear to score)
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + PIPE_WIDTH
    }

    /// Right edge of the wider cap, the last pixel that can be on screen
    #[inline]
    pub fn trailing_edge(&self) -> f32 {
        self.x + (PIPE_WIDTH + PIPE_CAP_WIDTH) / 2.0
    }

    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + self.gap_size
    }

    /// The upper and lower solid segments
    pub fn solid_rects(&self, area: PlayArea) -> [Rect; 2] {
        [
            Rect::from_edges(self.left(), 0.0, self.right(), self.gap_top),
            Rect::from_edges(self.left(), self.gap_bottom(), self.right(), area.height),
        ]
    }

    pub fn advect(&mut self) {
        self.x -= PIPE_SPEED;
    }
}

/// Inclusive range the gap top may be drawn from for a given gap size.
///
/// Collapses to `MIN_PIPE_HEIGHT` when the play area is too short.
pub fn gap_top_range(play_height: f32, gap_size: i32) -> (i32, i32) {
    let min_top = MIN_PIPE_HEIGHT;
    let max_top = play_height.floor() as i32 - MIN_PIPE_HEIGHT - gap_size;
    (min_top, max_top.max(min_top))
}

/// Build a new obstacle just beyond the right edge of the play area
pub fn spawn_obstacle<R: Rng>(rng: &mut R, area: PlayArea, id: u32) -> Obstacle {
    let gap_size = rng.random_range(MIN_GAP..=MAX_GAP);
    let (min_top, max_top) = gap_top_range(area.height, gap_size);
    let gap_top = rng.random_range(min_top..=max_top) as f32;

    Obstacle {
        id,
        x: area.width + SPAWN_MARGIN,
        gap_top,
        initial_gap_top: gap_top,
        gap_size: gap_size as f32,
        passed: false,
    }
}

/// Drop obstacles from the front once they are fully off the left edge.
///
/// Returns how many were removed.
pub fn evict_offscreen(obstacles: &mut VecDeque<Obstacle>) -> usize {
    let mut evicted = 0;
    while obstacles.front().is_some_and(|o| o.trailing_edge() < 0.0) {
        if let Some(o) = obstacles.pop_front() {
            log::debug!("Evicted obstacle {}", o.id);
        }
        evicted += 1;
    }
    evicted
}

/// Vertical perturbation of an obstacle's gap as the run gets harder
pub trait DifficultyPolicy {
    /// Offset added to `initial_gap_top` this tick
    fn height_delta(&self, score: u64, frame_count: u64, obstacle: &Obstacle) -> f32;
}

/// Traveling-wave oscillation that switches on at a score threshold.
///
/// The phase depends on the obstacle's current position, not its identity,
/// so neighbours drift out of step with each other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OscillationPolicy {
    pub threshold: u64,
    /// Radians per tick
    pub speed: f32,
    /// Peak offset in pixels
    pub range: f32,
    /// Radians per pixel of horizontal position
    pub phase_scale: f32,
}

impl Default for OscillationPolicy {
    fn default() -> Self {
        Self {
            threshold: ESCALATION_SCORE,
            speed: OSCILLATION_SPEED,
            range: OSCILLATION_RANGE,
            phase_scale: OSCILLATION_PHASE_SCALE,
        }
    }
}

impl DifficultyPolicy for OscillationPolicy {
    fn height_delta(&self, score: u64, frame_count: u64, obstacle: &Obstacle) -> f32 {
        if score < self.threshold {
            return 0.0;
        }
        let phase = obstacle.x * self.phase_scale;
        (frame_count as f32 * self.speed + phase).sin() * self.range
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn obstacle_at(x: f32) -> Obstacle {
        Obstacle {
            id: 1,
            x,
            gap_top: 200.0,
            initial_gap_top: 200.0,
            gap_size: 180.0,
            passed: false,
        }
    }

    #[test]
    fn test_spawn_position() {
        let mut rng = Pcg32::seed_from_u64(1);
        let area = PlayArea::new(400.0, 600.0).unwrap();
        let o = spawn_obstacle(&mut rng, area, 42);
        assert_eq!(o.id, 42);
        assert_eq!(o.x, 450.0);
        assert_eq!(o.gap_top, o.initial_gap_top);
        assert!(!o.passed);
    }

    #[test]
    fn test_degenerate_area_collapses_range() {
        assert_eq!(gap_top_range(200.0, 160), (80, 80));

        let mut rng = Pcg32::seed_from_u64(3);
        let area = PlayArea::new(400.0, 100.0).unwrap();
        for id in 0..50 {
            let o = spawn_obstacle(&mut rng, area, id);
            assert_eq!(o.gap_top, MIN_PIPE_HEIGHT as f32);
        }
    }

    #[test]
    fn test_eviction_only_when_fully_offscreen() {
        // Trailing edge is x + 64
        let mut obstacles: VecDeque<Obstacle> =
            [obstacle_at(-64.5), obstacle_at(-64.0), obstacle_at(100.0)].into_iter().collect();

        assert_eq!(evict_offscreen(&mut obstacles), 1);
        assert_eq!(obstacles.len(), 2);
        assert_eq!(obstacles[0].x, -64.0);

        obstacles[0].x = -70.0;
        assert_eq!(evict_offscreen(&mut obstacles), 1);
        assert_eq!(obstacles.len(), 1);
        assert_eq!(evict_offscreen(&mut obstacles), 0);
    }

    #[test]
    fn test_eviction_removes_several_in_one_call() {
        let mut obstacles: VecDeque<Obstacle> =
            [obstacle_at(-300.0), obstacle_at(-100.0), obstacle_at(10.0)].into_iter().collect();
        assert_eq!(evict_offscreen(&mut obstacles), 2);
        assert_eq!(obstacles.len(), 1);
    }

    #[test]
    fn test_oscillation_below_threshold_is_pinned() {
        let policy = OscillationPolicy::default();
        let o = obstacle_at(123.0);
        for frame in [0, 17, 400, 9999] {
            assert_eq!(policy.height_delta(9, frame, &o), 0.0);
        }
    }

    #[test]
    fn test_oscillation_matches_formula() {
        let policy = OscillationPolicy::default();
        let o = obstacle_at(200.0);
        let expected = (100.0f32 * 0.025 + 200.0 * 0.005).sin() * 40.0;
        assert!((policy.height_delta(10, 100, &o) - expected).abs() < 1e-4);
    }

    #[test]
    fn test_oscillation_desynchronizes_by_position() {
        let policy = OscillationPolicy::default();
        let a = policy.height_delta(10, 50, &obstacle_at(100.0));
        let b = policy.height_delta(10, 50, &obstacle_at(300.0));
        assert!((a - b).abs() > 1.0);
    }

    proptest! {
        #[test]
        fn prop_spawned_gaps_are_valid(seed in any::<u64>(), height in 1.0f32..1200.0, width in 1.0f32..1200.0) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let area = PlayArea::new(width, height).unwrap();
            let o = spawn_obstacle(&mut rng, area, 1);

            prop_assert!(o.gap_size >= MIN_GAP as f32 && o.gap_size <= MAX_GAP as f32);
            prop_assert!(o.gap_top >= MIN_PIPE_HEIGHT as f32);
            let feasible = height.floor() - MIN_PIPE_HEIGHT as f32 - o.gap_size >= MIN_PIPE_HEIGHT as f32;
            if feasible {
                prop_assert!(o.gap_bottom() <= height - MIN_PIPE_HEIGHT as f32);
            } else {
                prop_assert_eq!(o.gap_top, MIN_PIPE_HEIGHT as f32);
            }
        }

        #[test]
        fn prop_eviction_keeps_visible(xs in proptest::collection::vec(-400.0f32..600.0, 0..12)) {
            let mut sorted = xs.clone();
            sorted.sort_by(|a, b| a.total_cmp(b));
            let mut obstacles: VecDeque<Obstacle> = sorted.iter().map(|&x| obstacle_at(x)).collect();

            evict_offscreen(&mut obstacles);

            prop_assert!(obstacles.iter().all(|o| o.trailing_edge() >= 0.0));
            let expected = sorted.iter().filter(|&&x| x + 64.0 >= 0.0).count();
            prop_assert_eq!(obstacles.len(), expected);
        }
    }
}
