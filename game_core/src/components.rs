use glam::Vec2;

/// The five ball varieties the generator can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BallKind {
    Normal,
    Bad,
    DoublePoints,
    Bomb,
    Heal,
}

impl BallKind {
    /// All kinds, in the order weighted selection evaluates them
    pub const ALL: [BallKind; 5] = [
        BallKind::Normal,
        BallKind::Bad,
        BallKind::DoublePoints,
        BallKind::Bomb,
        BallKind::Heal,
    ];

    /// Name used in telemetry payloads and the remote config
    pub fn wire_name(self) -> &'static str {
        match self {
            BallKind::Normal => "normal",
            BallKind::Bad => "bad",
            BallKind::DoublePoints => "doublePoints",
            BallKind::Bomb => "bomb",
            BallKind::Heal => "heal",
        }
    }

    /// Fill color for the host renderer (0xRRGGBB)
    pub fn color(self) -> u32 {
        match self {
            BallKind::Normal => 0xffffff,
            BallKind::Bad => 0xff0000,
            BallKind::DoublePoints => 0x00ff00,
            BallKind::Bomb => 0xffa500,
            BallKind::Heal => 0x00ffff,
        }
    }

    /// Icon glyph drawn over the circle, if any
    pub fn icon(self) -> Option<&'static str> {
        match self {
            BallKind::DoublePoints => Some("⚡"),
            BallKind::Bomb => Some("💣"),
            BallKind::Heal => Some("💚"),
            BallKind::Normal | BallKind::Bad => None,
        }
    }
}

/// Ball component - one rising ball on the canvas
#[derive(Debug, Clone, Copy)]
pub struct Ball {
    pub pos: Vec2,
    pub speed: f32, // px per frame at difficulty multiplier 1.0
    pub kind: BallKind,
}

impl Ball {
    pub fn new(pos: Vec2, speed: f32, kind: BallKind) -> Self {
        Self { pos, speed, kind }
    }

    /// Whether a click at `point` lands on this ball
    pub fn contains(&self, point: Vec2, radius: f32) -> bool {
        self.pos.distance(point) <= radius
    }
}
