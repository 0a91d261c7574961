use crate::params::Params;

/// Periodically ratchets up the global ball speed multiplier.
///
/// The level counter and multiplier grow without a cap; both return to
/// their initial values only on `reset`. The schedule is an explicit
/// deadline against the caller's clock rather than a timer callback.
#[derive(Debug, Clone, Copy)]
pub struct DifficultySystem {
    level: u32,
    speed_multiplier: f32,
    next_step_ms: Option<u64>,
}

impl DifficultySystem {
    pub fn new() -> Self {
        Self {
            level: 1,
            speed_multiplier: 1.0,
            next_step_ms: None,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    /// Arm the escalation schedule. Idempotent while already running.
    pub fn start(&mut self, now_ms: u64) {
        if self.next_step_ms.is_none() {
            self.next_step_ms = Some(now_ms + Params::DIFFICULTY_INTERVAL_MS);
        }
    }

    /// Apply every interval that elapsed since the last update
    pub fn update(&mut self, now_ms: u64) {
        let Some(mut deadline) = self.next_step_ms else {
            return;
        };
        while now_ms >= deadline {
            self.increment();
            deadline += Params::DIFFICULTY_INTERVAL_MS;
        }
        self.next_step_ms = Some(deadline);
    }

    pub fn increment(&mut self) {
        self.speed_multiplier += Params::DIFFICULTY_SPEED_STEP;
        self.level += 1;
    }

    /// Disarm the schedule, keeping the current level. Idempotent.
    pub fn stop(&mut self) {
        self.next_step_ms = None;
    }

    pub fn reset(&mut self) {
        self.level = 1;
        self.speed_multiplier = 1.0;
        self.next_step_ms = None;
    }
}

impl Default for DifficultySystem {
    fn default() -> Self {
        Self::new()
    }
}
