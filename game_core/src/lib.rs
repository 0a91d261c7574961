//! Core simulation for the rising-ball arcade game.
//!
//! Everything here is deterministic and host-agnostic: the engine takes
//! the caller's clock in milliseconds and a seeded RNG, and reports back
//! through observer callbacks. Rendering, input plumbing, and networking
//! live with the host.

pub mod buff;
pub mod combo;
pub mod components;
pub mod config;
pub mod difficulty;
pub mod engine;
pub mod params;
pub mod resources;
pub mod spawn;
pub mod state;
pub mod timer;

pub use buff::BuffSystem;
pub use combo::ComboSystem;
pub use components::{Ball, BallKind};
pub use config::{BallChances, BonusDurations, GameConfig, ScoreTable, SpeedRange};
pub use difficulty::DifficultySystem;
pub use engine::GameEngine;
pub use params::{Params, Viewport};
pub use resources::{GameEvent, GameEventKind, GameRng};
pub use state::{GameState, GameStatus};
pub use timer::GameTimer;
