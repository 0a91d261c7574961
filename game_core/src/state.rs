//! Score, lives, and run status with change observers.

/// Lifecycle status of a game run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Not started, or paused
    Idle,
    Running,
    /// Terminal until reset
    GameOver,
}

type ScoreCallback = Box<dyn FnMut(f64)>;
type LivesCallback = Box<dyn FnMut(u32)>;
type StatusCallback = Box<dyn FnMut(GameStatus)>;

/// Score/lives/status tracker. Each observer slot holds at most one
/// callback; registering again replaces the previous one.
pub struct GameState {
    score: f64,
    lives: u32,
    max_lives: u32,
    status: GameStatus,
    on_score: Option<ScoreCallback>,
    on_lives: Option<LivesCallback>,
    on_status: Option<StatusCallback>,
}

impl GameState {
    pub fn new(max_lives: u32) -> Self {
        Self {
            score: 0.0,
            lives: max_lives,
            max_lives,
            status: GameStatus::Idle,
            on_score: None,
            on_lives: None,
            on_status: None,
        }
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn max_lives(&self) -> u32 {
        self.max_lives
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn set_score_callback(&mut self, callback: impl FnMut(f64) + 'static) {
        self.on_score = Some(Box::new(callback));
    }

    pub fn set_lives_callback(&mut self, callback: impl FnMut(u32) + 'static) {
        self.on_lives = Some(Box::new(callback));
    }

    pub fn set_status_callback(&mut self, callback: impl FnMut(GameStatus) + 'static) {
        self.on_status = Some(Box::new(callback));
    }

    /// Accumulate points. Score only ever grows during a run.
    pub fn add_score(&mut self, points: f64) {
        self.score += points;
        if let Some(cb) = self.on_score.as_mut() {
            cb(self.score);
        }
    }

    /// Drop one life; reaching zero ends the run. The GameOver transition
    /// fires the status observer exactly once.
    pub fn lose_life(&mut self) {
        if self.lives == 0 {
            return;
        }
        self.lives -= 1;
        if let Some(cb) = self.on_lives.as_mut() {
            cb(self.lives);
        }
        if self.lives == 0 {
            self.status = GameStatus::GameOver;
            if let Some(cb) = self.on_status.as_mut() {
                cb(self.status);
            }
        }
    }

    /// Restore one life, capped at the configured maximum
    pub fn add_life(&mut self) {
        if self.lives >= self.max_lives {
            return;
        }
        self.lives += 1;
        if let Some(cb) = self.on_lives.as_mut() {
            cb(self.lives);
        }
    }

    pub fn start(&mut self) {
        if self.status != GameStatus::Idle {
            return;
        }
        self.status = GameStatus::Running;
        if let Some(cb) = self.on_status.as_mut() {
            cb(self.status);
        }
    }

    pub fn pause(&mut self) {
        if self.status != GameStatus::Running {
            return;
        }
        self.status = GameStatus::Idle;
        if let Some(cb) = self.on_status.as_mut() {
            cb(self.status);
        }
    }

    /// Back to a fresh idle run, notifying all observers
    pub fn reset(&mut self) {
        self.score = 0.0;
        self.lives = self.max_lives;
        self.status = GameStatus::Idle;
        if let Some(cb) = self.on_score.as_mut() {
            cb(self.score);
        }
        if let Some(cb) = self.on_lives.as_mut() {
            cb(self.lives);
        }
        if let Some(cb) = self.on_status.as_mut() {
            cb(self.status);
        }
    }
}
