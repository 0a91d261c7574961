//! Time-boxed score bonuses.
//!
//! Expiry is evaluated lazily against the caller-supplied clock; there is
//! no timer callback. `is_x2_active` is the authority on whether the bonus
//! still applies, `time_left_secs` exists for the countdown display.

/// Tracks the double-score bonus by its absolute expiry time
#[derive(Debug, Clone, Copy, Default)]
pub struct BuffSystem {
    x2_expires_at_ms: Option<u64>,
}

impl BuffSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or re-arm) the double-score bonus for `duration_secs`
    pub fn activate_x2_score(&mut self, duration_secs: f64, now_ms: u64) {
        let duration_ms = (duration_secs * 1000.0).max(0.0) as u64;
        self.x2_expires_at_ms = Some(now_ms + duration_ms);
    }

    /// Whether the bonus applies at `now_ms`. Expired state is dropped on
    /// the spot; the boundary instant itself counts as expired.
    pub fn is_x2_active(&mut self, now_ms: u64) -> bool {
        match self.x2_expires_at_ms {
            Some(expiry) if now_ms >= expiry => {
                self.x2_expires_at_ms = None;
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    /// Score factor contributed by the bonus: 2 while active, else 1
    pub fn multiplier(&mut self, now_ms: u64) -> f64 {
        if self.is_x2_active(now_ms) {
            2.0
        } else {
            1.0
        }
    }

    /// Whole seconds remaining, rounded up. Display only.
    pub fn time_left_secs(&mut self, now_ms: u64) -> u64 {
        let Some(expiry) = self.x2_expires_at_ms else {
            return 0;
        };
        let left_ms = expiry.saturating_sub(now_ms);
        let secs = (left_ms + 999) / 1000;
        if secs == 0 {
            self.x2_expires_at_ms = None;
        }
        secs
    }

    /// Periodic sweep so a stale countdown clears even without queries
    pub fn update(&mut self, now_ms: u64) {
        let _ = self.time_left_secs(now_ms);
    }

    pub fn clear(&mut self) {
        self.x2_expires_at_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_strictly_before_expiry() {
        let mut buff = BuffSystem::new();
        buff.activate_x2_score(10.0, 1_000);
        assert!(buff.is_x2_active(1_000));
        assert!(buff.is_x2_active(10_999));
    }

    #[test]
    fn test_inactive_at_and_after_expiry() {
        let mut buff = BuffSystem::new();
        buff.activate_x2_score(10.0, 1_000);
        assert!(!buff.is_x2_active(11_000), "Expiry boundary counts as expired");

        buff.activate_x2_score(10.0, 1_000);
        assert!(!buff.is_x2_active(50_000));
    }

    #[test]
    fn test_multiplier_doubles_while_active() {
        let mut buff = BuffSystem::new();
        assert_eq!(buff.multiplier(0), 1.0);
        buff.activate_x2_score(5.0, 0);
        assert_eq!(buff.multiplier(4_999), 2.0);
        assert_eq!(buff.multiplier(5_000), 1.0);
    }

    #[test]
    fn test_time_left_rounds_up() {
        let mut buff = BuffSystem::new();
        buff.activate_x2_score(10.0, 0);
        assert_eq!(buff.time_left_secs(0), 10);
        assert_eq!(buff.time_left_secs(9_001), 1);
        assert_eq!(buff.time_left_secs(10_000), 0);
        // Reaching zero clears the buff entirely
        assert!(!buff.is_x2_active(0));
    }

    #[test]
    fn test_reactivation_extends_expiry() {
        let mut buff = BuffSystem::new();
        buff.activate_x2_score(10.0, 0);
        buff.activate_x2_score(10.0, 8_000);
        assert!(buff.is_x2_active(15_000));
        assert!(!buff.is_x2_active(18_000));
    }
}
