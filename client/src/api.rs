//! The seam to the backend.
//!
//! The concrete HTTP transport lives with the host shell; this crate only
//! ever talks to the [`ApiClient`] trait, so tests run against a mock and
//! a wasm host can plug in `fetch` without touching the orchestration.

use std::fmt;

use game_core::GameConfig;
use proto::{
    LeaderboardResponse, ScoreRequest, ScoreResponse, SessionStartRequest, SessionStartResponse,
    TelemetryRequest, TelemetryResponse,
};

/// Backend endpoint paths, relative to the host-configured base URL
pub mod endpoints {
    pub const CONFIG: &str = "/config";
    pub const SESSION: &str = "/session";
    pub const EVENTS: &str = "/events";
    pub const SCORE: &str = "/score";
    pub const LEADERBOARD: &str = "/leaderboard";
}

pub const DEFAULT_LEADERBOARD_LIMIT: u32 = 10;

/// Why a backend call failed. Every variant is non-fatal to gameplay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never completed (network down, timeout)
    Transport(String),
    /// The backend answered with a non-success status
    Status(u16),
    /// The body could not be decoded
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "transport error: {msg}"),
            ApiError::Status(code) => write!(f, "unexpected status {code}"),
            ApiError::Decode(msg) => write!(f, "malformed response: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Blocking view of the backend, one method per endpoint
pub trait ApiClient {
    fn fetch_config(&self) -> Result<GameConfig, ApiError>;
    fn create_session(
        &self,
        request: &SessionStartRequest,
    ) -> Result<SessionStartResponse, ApiError>;
    fn send_events(&self, request: &TelemetryRequest) -> Result<TelemetryResponse, ApiError>;
    fn submit_score(&self, request: &ScoreRequest) -> Result<ScoreResponse, ApiError>;
    fn fetch_leaderboard(&self, limit: u32) -> Result<LeaderboardResponse, ApiError>;
}
