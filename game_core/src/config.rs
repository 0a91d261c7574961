use serde::{Deserialize, Serialize};

use crate::components::BallKind;

/// Spawn probability per ball kind. Weighted selection scans these in the
/// order of [`BallKind::ALL`]; the sum over all kinds must be ~1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BallChances {
    pub normal: f32,
    pub bad: f32,
    pub double_points: f32,
    pub bomb: f32,
    pub heal: f32,
}

impl BallChances {
    pub fn chance(&self, kind: BallKind) -> f32 {
        match kind {
            BallKind::Normal => self.normal,
            BallKind::Bad => self.bad,
            BallKind::DoublePoints => self.double_points,
            BallKind::Bomb => self.bomb,
            BallKind::Heal => self.heal,
        }
    }

    /// (kind, chance) pairs in fixed evaluation order
    pub fn weighted(&self) -> [(BallKind, f32); 5] {
        let mut out = [(BallKind::Normal, 0.0); 5];
        for (slot, kind) in out.iter_mut().zip(BallKind::ALL) {
            *slot = (kind, self.chance(kind));
        }
        out
    }

    pub fn sum(&self) -> f32 {
        self.normal + self.bad + self.double_points + self.bomb + self.heal
    }
}

/// How long each bonus lasts, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BonusDurations {
    pub double_points: f64,
}

/// Points awarded per scoring ball kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreTable {
    pub normal: f64,
}

/// Inclusive-exclusive speed range for freshly spawned balls, px/frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeedRange {
    pub min: f32,
    pub max: f32,
}

/// Game configuration, fetched from the backend at startup and immutable
/// for the rest of the session. Deserializes the remote `/config` JSON
/// directly; `Default` is the built-in fallback used when the fetch fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    pub max_balls: usize,
    pub ball_chances: BallChances,
    pub max_lives: u32,
    pub bonus_durations: BonusDurations,
    pub scores: ScoreTable,
    pub ball_speed: SpeedRange,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_balls: 10,
            ball_chances: BallChances {
                normal: 0.5,
                bad: 0.41,
                double_points: 0.03,
                bomb: 0.03,
                heal: 0.03,
            },
            max_lives: 3,
            bonus_durations: BonusDurations { double_points: 10.0 },
            scores: ScoreTable { normal: 1.0 },
            ball_speed: SpeedRange { min: 0.8, max: 1.5 },
        }
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sanity-check a remotely supplied config before using it
    pub fn is_valid(&self) -> bool {
        self.max_balls > 0
            && self.max_lives > 0
            && (self.ball_chances.sum() - 1.0).abs() < 1e-4
            && self.ball_speed.min <= self.ball_speed.max
            && self.ball_speed.min > 0.0
            && self.scores.normal >= 0.0
            && self.bonus_durations.double_points >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.is_valid(), "Built-in fallback config must be valid");
        assert!((config.ball_chances.sum() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_weighted_order_matches_all_kinds() {
        let chances = GameConfig::default().ball_chances;
        let pairs = chances.weighted();
        for (pair, kind) in pairs.iter().zip(BallKind::ALL) {
            assert_eq!(pair.0, kind, "Evaluation order must follow BallKind::ALL");
        }
    }

    #[test]
    fn test_config_rejects_skewed_chances() {
        let mut config = GameConfig::default();
        config.ball_chances.bad = 0.9;
        assert!(!config.is_valid());
    }

    #[test]
    fn test_config_deserializes_remote_shape() {
        let json = r#"{
            "maxBalls": 8,
            "ballChances": {"normal": 0.6, "bad": 0.3, "doublePoints": 0.04, "bomb": 0.03, "heal": 0.03},
            "maxLives": 5,
            "bonusDurations": {"doublePoints": 7},
            "scores": {"normal": 2.5},
            "ballSpeed": {"min": 1.0, "max": 2.0}
        }"#;
        let config: GameConfig = serde_json::from_str(json).expect("config should parse");
        assert_eq!(config.max_balls, 8);
        assert_eq!(config.max_lives, 5);
        assert_eq!(config.bonus_durations.double_points, 7.0);
        assert_eq!(config.scores.normal, 2.5);
        assert!(config.is_valid());
    }
}
