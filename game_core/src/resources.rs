use crate::components::BallKind;

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }

    /// Uniform draw in [min, max); returns `min` for empty ranges
    pub fn gen_range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        use rand::Rng;
        self.0.gen_range(min..max)
    }

    /// Uniform draw in [0, 1)
    pub fn gen_unit(&mut self) -> f32 {
        use rand::Rng;
        self.0.gen_range(0.0..1.0)
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// Gameplay action recorded for telemetry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameEvent {
    pub t_ms: u64,
    pub kind: GameEventKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEventKind {
    /// The player popped a ball
    BallHit(BallKind),
    /// A normal ball escaped off the top of the screen
    BallMissed(BallKind),
    /// A click that landed on nothing
    Miss,
    /// A life was lost, whatever the cause
    LifeLost,
}
