//! Per-frame simulation tick
//!
//! Core game loop step that advances the simulation deterministically.

use super::autopilot;
use super::collision::{TerminalCause, evaluate};
use super::obstacle::{DifficultyPolicy, evict_offscreen};
use super::state::{GameEvent, GamePhase, GameState, PlayArea};
use crate::consts::*;

/// Input intents for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump (key press, pointer down). Starts a run outside Playing.
    pub jump: bool,
    /// Explicit start/restart (button)
    pub start: bool,
    /// Idle/demo mode - the autopilot plays the game
    pub idle_mode: bool,
}

impl TickInput {
    pub fn is_empty(&self) -> bool {
        !self.jump && !self.start
    }
}

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Play area not measurable yet; nothing was touched
    Skipped,
    /// Not playing and no start signal
    Idle,
    /// A run was (re)started; simulation begins next tick
    Started,
    /// Simulation advanced, run continues
    Running,
    /// Run ended this tick
    Ended(TerminalCause),
}

/// Advance the game state by one tick
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    area: Option<PlayArea>,
    policy: &dyn DifficultyPolicy,
) -> TickOutcome {
    let Some(area) = area else {
        return TickOutcome::Skipped;
    };

    // Idle/demo mode - autopilot supplies the inputs
    let mut input = input.clone();
    if input.idle_mode {
        match state.phase {
            GamePhase::Playing => input.jump |= autopilot::wants_jump(state, area),
            GamePhase::Start | GamePhase::GameOver => input.start = true,
        }
    }
    let input = &input;

    match state.phase {
        GamePhase::Start | GamePhase::GameOver => {
            if input.start || input.jump {
                state.start_run(area);
                return TickOutcome::Started;
            }
            return TickOutcome::Idle;
        }
        GamePhase::Playing => {}
    }

    // 1. Physics
    if input.jump {
        state.character.jump();
    }
    state.character.step();

    // 2. Scroll & frame counter
    state.scroll_offset += PIPE_SPEED;
    state.frame_count += 1;

    // 3. Obstacle field
    if state.frame_count % PIPE_SPAWN_RATE == 0 {
        state.spawn_obstacle(area);
    }

    let score = state.score;
    let frame_count = state.frame_count;
    for obstacle in state.obstacles.iter_mut() {
        obstacle.advect();
        let delta = policy.height_delta(score, frame_count, obstacle);
        obstacle.gap_top = obstacle.initial_gap_top + delta;
    }
    evict_offscreen(&mut state.obstacles);

    // 4. Collision & scoring
    let hitbox = state.character.hitbox();
    let result = evaluate(&hitbox, state.obstacles.iter_mut(), area);

    for _ in 0..result.scored {
        state.score += 1;
        state.events.push(GameEvent::Scored { score: state.score });
    }

    if let Some(cause) = result.terminal {
        state.end_run(cause);
        return TickOutcome::Ended(cause);
    }

    TickOutcome::Running
}
