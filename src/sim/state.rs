//! Block-stack game state and its transitions
//!
//! One `GameState` is one independent session. All mutation goes through the
//! methods here or through `tick`/`apply_input`; nothing is global.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::grid::Grid;
use super::penalty::{PenaltyAnswer, PenaltyQuiz};
use super::piece::{Piece, Tetromino};
use super::rng::{PieceSource, SeededPieces};
use crate::settings::Settings;

/// Current phase of the block stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Nothing started yet
    Idle,
    /// Pieces falling
    Running,
    /// Paused by the player
    Paused,
    /// Penalty question on screen; gravity and movement suspended
    AnsweringPenaltyQuestion,
    /// A new piece could not spawn
    GameOver,
}

/// Things the front-end may want to react to (sounds, HUD flashes, logs)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    Started,
    PieceSpawned(Tetromino),
    PieceLocked(Tetromino),
    LinesCleared { count: usize, score: u64 },
    PenaltyQuestionAsked { index: usize },
    PenaltyAnswered {
        index: usize,
        correct: bool,
        cells_removed: usize,
    },
    PenaltyQuizCompleted,
    ScrollingStarted,
    ScrollingStopped,
    Paused,
    Resumed,
    GameOver { score: u64 },
}

/// Complete block-stack session
#[derive(Debug, Clone)]
pub struct GameState<S = SeededPieces> {
    pub(crate) settings: Settings,
    grid: Grid,
    active: Option<Piece>,
    score: u64,
    level: u32,
    target_score: u64,
    /// Target value whose crossing already asked a question
    crossed_target: Option<u64>,
    phase: GamePhase,
    penalty: PenaltyQuiz,
    scrolling: bool,
    /// Time accumulated toward the next gravity step
    pub(crate) gravity_elapsed: Duration,
    pieces: S,
    events: Vec<GameEvent>,
}

impl GameState<SeededPieces> {
    /// Default settings, seeded piece sequence
    pub fn new(seed: u64) -> Self {
        Self::with_source(Settings::default(), SeededPieces::new(seed))
    }

    pub fn with_settings(settings: Settings, seed: u64) -> Self {
        Self::with_source(settings, SeededPieces::new(seed))
    }
}

impl<S: PieceSource> GameState<S> {
    pub fn with_source(settings: Settings, pieces: S) -> Self {
        Self {
            grid: Grid::new(settings.board_width, settings.board_height),
            active: None,
            score: 0,
            level: 1,
            target_score: settings.target_score,
            crossed_target: None,
            phase: GamePhase::Idle,
            penalty: PenaltyQuiz::builtin(),
            scrolling: false,
            gravity_elapsed: Duration::ZERO,
            pieces,
            events: Vec::new(),
            settings,
        }
    }

    /// Swap the penalty question bank (before starting)
    pub fn with_penalty_quiz(mut self, penalty: PenaltyQuiz) -> Self {
        self.penalty = penalty;
        self
    }

    // === Accessors ===

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Direct grid access for setting up positions
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn active_piece(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn target_score(&self) -> u64 {
        self.target_score
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn penalty(&self) -> &PenaltyQuiz {
        &self.penalty
    }

    pub fn is_scrolling(&self) -> bool {
        self.scrolling
    }

    /// Take the events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Session ===

    /// Fresh grid, zero score, first piece. Also used to start from `Idle`.
    pub fn restart(&mut self) {
        self.gravity_elapsed = Duration::ZERO;
        self.grid = Grid::new(self.settings.board_width, self.settings.board_height);
        self.active = None;
        self.score = 0;
        self.level = 1;
        self.target_score = self.settings.target_score;
        self.crossed_target = None;
        self.penalty.reset();
        self.stop_scrolling();
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::Started);
        log::info!("Block stack started");

        self.spawn_piece();
    }

    /// Running ↔ Paused. Other phases ignore it.
    pub fn toggle_pause(&mut self) -> bool {
        self.phase = match self.phase {
            GamePhase::Running => {
                self.events.push(GameEvent::Paused);
                GamePhase::Paused
            }
            GamePhase::Paused => {
                self.events.push(GameEvent::Resumed);
                GamePhase::Running
            }
            _ => return false,
        };
        self.gravity_elapsed = Duration::ZERO;
        true
    }

    fn spawn_piece(&mut self) {
        let kind = self.pieces.next_piece();
        let piece = Piece::spawn(kind, self.grid.width());
        let blocked = self.grid.collides(&piece);
        self.active = Some(piece);
        self.events.push(GameEvent::PieceSpawned(kind));
        log::debug!("Spawned {:?}", kind);

        if blocked {
            self.game_over();
        }
    }

    fn game_over(&mut self) {
        self.phase = GamePhase::GameOver;
        self.gravity_elapsed = Duration::ZERO;
        self.penalty.dismiss();
        self.events.push(GameEvent::GameOver { score: self.score });
        log::info!("Game over with score {}", self.score);
    }

    // === Piece control ===

    fn accepts_moves(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Shift sideways; a colliding shift is discarded
    pub fn move_piece(&mut self, dx: i32) -> bool {
        if !self.accepts_moves() {
            return false;
        }
        let Some(candidate) = self.active.as_ref().map(|p| p.shifted(dx, 0)) else {
            return false;
        };
        if self.grid.collides(&candidate) {
            return false;
        }
        self.active = Some(candidate);
        true
    }

    /// Quarter turn; a colliding rotation leaves the piece untouched
    pub fn rotate(&mut self) -> bool {
        if !self.accepts_moves() {
            return false;
        }
        let Some(candidate) = self.active.as_ref().map(Piece::rotated) else {
            return false;
        };
        if self.grid.collides(&candidate) {
            return false;
        }
        self.active = Some(candidate);
        true
    }

    /// One row down. When the piece cannot fall it locks, rows clear and the
    /// next piece spawns. Returns true if the piece moved.
    pub fn soft_drop(&mut self) -> bool {
        if !self.accepts_moves() {
            return false;
        }
        let Some(candidate) = self.active.as_ref().map(|p| p.shifted(0, 1)) else {
            return false;
        };
        if !self.grid.collides(&candidate) {
            self.active = Some(candidate);
            return true;
        }
        self.lock_piece();
        false
    }

    fn lock_piece(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };
        self.grid.merge(&piece);
        self.events.push(GameEvent::PieceLocked(piece.kind));
        log::debug!("Locked {:?} at ({}, {})", piece.kind, piece.x, piece.y);

        let cleared = self.grid.clear_full_rows();
        if cleared > 0 {
            self.award_lines(cleared);
        }

        self.spawn_piece();
    }

    fn award_lines(&mut self, cleared: usize) {
        let points = (cleared as u64).saturating_mul(self.settings.line_clear_bonus);
        self.score = self.score.saturating_add(points);
        self.events.push(GameEvent::LinesCleared {
            count: cleared,
            score: self.score,
        });
        log::debug!("Cleared {} rows, score {}", cleared, self.score);

        if self.score >= self.target_score && self.crossed_target != Some(self.target_score) {
            self.cross_threshold();
        }
        self.refresh_scrolling();
    }

    /// Once per target value: level up and put a penalty question on screen
    fn cross_threshold(&mut self) {
        self.crossed_target = Some(self.target_score);
        self.level += 1;
        log::info!(
            "Score {} reached target {}, level {}",
            self.score,
            self.target_score,
            self.level
        );

        if self.penalty.ask().is_none() {
            return;
        }
        let index = self.penalty.pending_index().unwrap_or_default();
        self.phase = GamePhase::AnsweringPenaltyQuestion;
        self.gravity_elapsed = Duration::ZERO;
        self.events.push(GameEvent::PenaltyQuestionAsked { index });
        log::info!("Penalty question {} asked", index + 1);

        if self.settings.target_step > 0 && self.penalty.remaining() > 0 {
            self.target_score = self.target_score.saturating_add(self.settings.target_step);
        }
    }

    // === Penalty quiz ===

    /// Answer the question on screen. A correct answer knocks the lowest
    /// block out of every column; a wrong one is only recorded.
    pub fn answer_penalty(&mut self, option: usize) -> Option<PenaltyAnswer> {
        if self.phase != GamePhase::AnsweringPenaltyQuestion {
            return None;
        }
        let answer = self.penalty.answer(option)?;

        let cells_removed = if answer.correct {
            self.grid.decrease_blocks()
        } else {
            0
        };
        self.events.push(GameEvent::PenaltyAnswered {
            index: answer.index,
            correct: answer.correct,
            cells_removed,
        });
        log::info!(
            "Penalty question {} answered {}",
            answer.index + 1,
            if answer.correct { "correctly" } else { "wrong" }
        );

        if answer.completed {
            self.events.push(GameEvent::PenaltyQuizCompleted);
            log::info!("All penalty questions answered");
        }

        self.phase = GamePhase::Running;
        self.gravity_elapsed = Duration::ZERO;
        self.refresh_scrolling();
        Some(answer)
    }

    // === Scrolling gate ===

    /// Target reached and every penalty question answered
    pub fn scrolling_allowed(&self) -> bool {
        self.score >= self.target_score && self.penalty.all_answered()
    }

    pub fn run_enabled(&self) -> bool {
        self.scrolling_allowed() && !self.scrolling
    }

    pub fn stop_enabled(&self) -> bool {
        self.scrolling_allowed() && self.scrolling
    }

    /// Run affordance: only while the gate is open
    pub fn start_scrolling(&mut self) -> bool {
        if !self.run_enabled() {
            return false;
        }
        self.scrolling = true;
        self.events.push(GameEvent::ScrollingStarted);
        log::info!("Scrolling started");
        true
    }

    pub fn stop_scrolling(&mut self) -> bool {
        if !self.scrolling {
            return false;
        }
        self.scrolling = false;
        self.events.push(GameEvent::ScrollingStopped);
        log::info!("Scrolling stopped");
        true
    }

    fn refresh_scrolling(&mut self) {
        if self.settings.auto_scroll {
            self.start_scrolling();
        }
    }
}
