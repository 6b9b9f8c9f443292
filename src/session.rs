//! Game session
//!
//! Owns the simulation state, the high score record and the queue of input
//! intents. Input handlers only call [`Session::push`]; intents are consumed
//! together at the start of the next frame, so the state is never touched
//! mid-tick.

use crate::highscores::HighScore;
use crate::persistence::KeyValueStore;
use crate::render::Snapshot;
use crate::sim::{
    DifficultyPolicy, GameEvent, GamePhase, GameState, OscillationPolicy, PlayArea, TickInput,
    TickOutcome, tick,
};

/// Abstract user intents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Jump while playing, start/restart otherwise
    Jump,
    /// Start/restart button
    Start,
    /// Toggle attract mode
    ToggleAutopilot,
}

/// Whether the frame driver should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

pub struct Session<S: KeyValueStore> {
    state: GameState,
    high_score: HighScore<S>,
    pending: TickInput,
    policy: Box<dyn DifficultyPolicy>,
}

impl<S: KeyValueStore> Session<S> {
    /// Create a session; the high score is read from `store` once, here
    pub fn new(seed: u64, store: S) -> Self {
        let high_score = HighScore::load(store);
        let mut state = GameState::new(seed);
        state.high_score = high_score.best();
        Self {
            state,
            high_score,
            pending: TickInput::default(),
            policy: Box::new(OscillationPolicy::default()),
        }
    }

    /// Replace the difficulty escalation policy
    pub fn with_policy(mut self, policy: impl DifficultyPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    /// Queue an intent for the next frame
    pub fn push(&mut self, intent: Intent) {
        match intent {
            Intent::Jump => self.pending.jump = true,
            Intent::Start => self.pending.start = true,
            Intent::ToggleAutopilot => {
                self.pending.idle_mode = !self.pending.idle_mode;
                log::info!("Autopilot: {}", self.pending.idle_mode);
            }
        }
    }

    pub fn autopilot(&self) -> bool {
        self.pending.idle_mode
    }

    /// Something is queued that needs a frame to be processed
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Whether a frame driver should be running right now.
    ///
    /// In attract mode the autopilot restarts finished runs by itself.
    pub fn wants_frames(&self) -> bool {
        self.state.phase == GamePhase::Playing || self.has_pending() || self.pending.idle_mode
    }

    /// Run one frame with the measured play area (`None` = layout not ready)
    pub fn frame(&mut self, area: Option<PlayArea>) -> LoopControl {
        let outcome = tick(&mut self.state, &self.pending, area, self.policy.as_ref());

        if outcome != TickOutcome::Skipped {
            // One-shot intents are consumed; autopilot is sticky
            self.pending.jump = false;
            self.pending.start = false;
        }

        for event in self.state.drain_events() {
            self.handle_event(event);
        }

        match outcome {
            TickOutcome::Skipped if self.wants_frames() => LoopControl::Continue,
            TickOutcome::Started | TickOutcome::Running => LoopControl::Continue,
            TickOutcome::Skipped | TickOutcome::Idle | TickOutcome::Ended(_) => LoopControl::Stop,
        }
    }

    fn handle_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::RunStarted => {}
            GameEvent::Scored { score } => log::debug!("Score: {}", score),
            GameEvent::GameOver {
                score,
                new_high_score,
                ..
            } => {
                if new_high_score {
                    self.high_score.submit(score);
                    log::info!("New high score: {}", score);
                }
            }
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn high_score(&self) -> &HighScore<S> {
        &self.high_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::sim::Obstacle;

    fn area() -> Option<PlayArea> {
        PlayArea::new(400.0, 600.0)
    }

    fn session_with_best(best: &str) -> Session<MemoryStore> {
        let store = MemoryStore::with_entry(HighScore::<MemoryStore>::STORAGE_KEY, best);
        Session::new(42, store)
    }

    fn run_until_stop(session: &mut Session<MemoryStore>) -> usize {
        let mut frames = 0;
        while session.frame(area()) == LoopControl::Continue {
            frames += 1;
            assert!(frames < 10_000, "run never ended");
        }
        frames
    }

    #[test]
    fn test_loads_high_score_into_state() {
        let session = session_with_best("17");
        assert_eq!(session.state().high_score, 17);
        assert_eq!(session.snapshot().high_score, 17);
    }

    #[test]
    fn test_idle_until_started() {
        let mut session = session_with_best("0");
        assert!(!session.wants_frames());
        assert_eq!(session.frame(area()), LoopControl::Stop);
        assert_eq!(session.state().phase, GamePhase::Start);

        session.push(Intent::Start);
        assert!(session.wants_frames());
        assert_eq!(session.frame(area()), LoopControl::Continue);
        assert_eq!(session.state().phase, GamePhase::Playing);
        assert!(!session.has_pending());
    }

    #[test]
    fn test_skipped_frame_keeps_intents() {
        let mut session = session_with_best("0");
        session.push(Intent::Jump);
        assert_eq!(session.frame(None), LoopControl::Continue);
        assert!(session.has_pending());
        assert_eq!(session.state().phase, GamePhase::Start);

        assert_eq!(session.frame(area()), LoopControl::Continue);
        assert_eq!(session.state().phase, GamePhase::Playing);
    }

    #[test]
    fn test_stops_on_game_over_and_keeps_record() {
        let mut session = session_with_best("3");
        session.push(Intent::Start);
        run_until_stop(&mut session);

        assert_eq!(session.state().phase, GamePhase::GameOver);
        assert_eq!(session.high_score().best(), 3);
        assert_eq!(
            session
                .high_score()
                .store()
                .get(HighScore::<MemoryStore>::STORAGE_KEY)
                .as_deref(),
            Some("3")
        );

        // Nothing runs after the game is over
        let frozen = session.snapshot();
        assert_eq!(session.frame(area()), LoopControl::Stop);
        assert_eq!(session.snapshot(), frozen);
    }

    #[test]
    fn test_autopilot_sets_new_high_score() {
        let mut session = Session::new(7, MemoryStore::new());
        session.push(Intent::ToggleAutopilot);
        assert!(session.autopilot());

        // Let the autopilot fly for a while, then let go of the controls
        let mut frames = 0;
        while frames < 3000 && session.frame(area()) == LoopControl::Continue {
            frames += 1;
        }
        session.push(Intent::ToggleAutopilot);
        if session.state().phase == GamePhase::Playing {
            run_until_stop(&mut session);
        }

        let state = session.state();
        assert_eq!(state.phase, GamePhase::GameOver);
        if state.score > 0 {
            assert_eq!(session.high_score().best(), state.score);
            assert_eq!(
                session
                    .high_score()
                    .store()
                    .get(HighScore::<MemoryStore>::STORAGE_KEY),
                Some(state.score.to_string())
            );
        }
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut session = session_with_best("0");
        session.push(Intent::Jump);
        run_until_stop(&mut session);
        assert_eq!(session.state().phase, GamePhase::GameOver);

        session.push(Intent::Jump);
        assert_eq!(session.frame(area()), LoopControl::Continue);
        assert_eq!(session.state().phase, GamePhase::Playing);
        assert_eq!(session.state().score, 0);
    }

    struct Raised;

    impl DifficultyPolicy for Raised {
        fn height_delta(&self, _score: u64, _frame_count: u64, _obstacle: &Obstacle) -> f32 {
            5.0
        }
    }

    #[test]
    fn test_custom_policy() {
        let mut session = session_with_best("0").with_policy(Raised);
        session.push(Intent::Start);
        session.frame(area());
        session.frame(area());

        let o = session.snapshot().obstacles[0];
        assert_eq!(o.gap_top, o.initial_gap_top + 5.0);
    }
}
