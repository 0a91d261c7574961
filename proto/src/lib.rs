//! Wire types for the game backend
//!
//! The backend speaks camelCase JSON over plain HTTP; every request and
//! response body exchanged with it lives here.

use serde::{Deserialize, Serialize};

// ============================================================================
// Sessions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStartRequest {
    pub nickname: String,
    pub client_version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStartResponse {
    pub session_id: String,
    /// Server clock at session creation, Unix milliseconds
    pub server_time: u64,
}

// ============================================================================
// Telemetry
// ============================================================================

/// One recorded gameplay action. `ball_id`/`kind`/`hit` only apply to
/// some event types and are omitted from the JSON when unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryEvent {
    /// Client timestamp, milliseconds
    pub t: u64,
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub ball_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub hit: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryRequest {
    pub session_id: String,
    pub events: Vec<TelemetryEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TelemetryResponse {
    pub ok: bool,
}

// ============================================================================
// Scores & leaderboard
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    pub session_id: String,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreResponse {
    pub rank: u32,
    /// The player's best score on record
    pub best: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub nickname: String,
    pub score: f64,
    /// When the score was set, Unix seconds
    pub when: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub items: Vec<LeaderboardEntry>,
}

// ============================================================================
// Serialization helpers
// ============================================================================

macro_rules! json_helpers {
    ($($ty:ty),+ $(,)?) => {
        $(impl $ty {
            /// Serialize to the JSON body the backend expects
            pub fn to_json(&self) -> Result<String, serde_json::Error> {
                serde_json::to_string(self)
            }

            /// Deserialize from a JSON body
            pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
                serde_json::from_str(body)
            }
        })+
    };
}

json_helpers!(
    SessionStartRequest,
    SessionStartResponse,
    TelemetryEvent,
    TelemetryRequest,
    TelemetryResponse,
    ScoreRequest,
    ScoreResponse,
    LeaderboardEntry,
    LeaderboardResponse,
);
