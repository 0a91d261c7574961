//! Session orchestration around one [`GameEngine`].
//!
//! The manager glues the simulation to the backend: it loads the remote
//! config (falling back to the built-in default), creates a play session
//! per nickname, batches telemetry, submits the final score, and keeps
//! the [`Hud`] view-model current. Every backend failure is logged and
//! non-fatal; the game always keeps running locally.

pub mod api;
pub mod hud;
pub mod telemetry;


use std::cell::{Ref, RefCell};
use std::rc::Rc;

use game_core::{GameConfig, GameEngine, Viewport};
use proto::{ScoreRequest, SessionStartRequest};

use crate::api::ApiClient;
use crate::hud::{Hud, LeaderboardView, StartLabel};
use crate::telemetry::{wire_event, TelemetryBuffer};

pub use crate::api::{ApiError, DEFAULT_LEADERBOARD_LIMIT};
pub use crate::telemetry::DEFAULT_RETRY_TAIL;

/// Host-supplied knobs for one client instance
#[derive(Debug, Clone)]
pub struct ClientParams {
    pub client_version: String,
    /// Wall-clock flush cadence for buffered telemetry
    pub telemetry_interval_ms: u64,
    /// Batch cap; reaching it flushes immediately
    pub max_events_per_request: usize,
    /// How many events of a failed batch are retried
    pub telemetry_retry_tail: usize,
}

impl Default for ClientParams {
    fn default() -> Self {
        Self {
            client_version: "0.1.0".to_string(),
            telemetry_interval_ms: 10_000,
            max_events_per_request: 20,
            telemetry_retry_tail: DEFAULT_RETRY_TAIL,
        }
    }
}

/// What the host should do after a start-button press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartAction {
    Started,
    Paused,
    Restarted,
    /// No session yet: prompt the player and call `provide_nickname`
    NicknameRequired,
}

/// Orchestrates one engine, one (optional) backend session, and the HUD
pub struct GameManager {
    api: Rc<dyn ApiClient>,
    engine: GameEngine,
    config: GameConfig,
    params: ClientParams,
    hud: Rc<RefCell<Hud>>,
    telemetry: Rc<RefCell<TelemetryBuffer>>,
    session_id: Rc<RefCell<Option<String>>>,
    nickname: String,
    next_flush_ms: u64,
}

impl GameManager {
    /// Fetch the remote config (default on failure), build the engine,
    /// and wire every observer.
    pub fn new(
        api: Rc<dyn ApiClient>,
        params: ClientParams,
        view: Viewport,
        seed: u64,
        now_ms: u64,
    ) -> Self {
        let config = match api.fetch_config() {
            Ok(config) if config.is_valid() => config,
            Ok(config) => {
                log::warn!("remote config rejected (chance sum {}), using default", config.ball_chances.sum());
                GameConfig::default()
            }
            Err(err) => {
                log::warn!("config fetch failed, using default: {err}");
                GameConfig::default()
            }
        };

        let engine = GameEngine::new(config.clone(), view, seed);
        let hud = Rc::new(RefCell::new(Hud::new(config.max_lives)));
        let telemetry = Rc::new(RefCell::new(TelemetryBuffer::with_retry_tail(
            params.max_events_per_request,
            params.telemetry_retry_tail,
        )));
        let session_id = Rc::new(RefCell::new(None));

        let mut manager = Self {
            api,
            engine,
            config,
            next_flush_ms: now_ms + params.telemetry_interval_ms,
            params,
            hud,
            telemetry,
            session_id,
            nickname: "Guest".to_string(),
        };
        manager.wire_engine();
        manager
    }

    fn wire_engine(&mut self) {
        let hud = Rc::clone(&self.hud);
        self.engine
            .set_score_callback(move |score| hud.borrow_mut().set_score(score));

        let hud = Rc::clone(&self.hud);
        self.engine
            .set_lives_callback(move |lives| hud.borrow_mut().set_lives(lives));

        // Gameplay events stream into the buffer; hitting the batch cap
        // flushes on the spot.
        let api = Rc::clone(&self.api);
        let telemetry = Rc::clone(&self.telemetry);
        let session_id = Rc::clone(&self.session_id);
        self.engine.set_event_callback(move |event| {
            let mut buffer = telemetry.borrow_mut();
            buffer.push(wire_event(&event));
            if buffer.is_full() {
                telemetry::flush(api.as_ref(), session_id.borrow().as_deref(), &mut buffer);
            }
        });

        let api = Rc::clone(&self.api);
        let hud = Rc::clone(&self.hud);
        let telemetry = Rc::clone(&self.telemetry);
        let session_id = Rc::clone(&self.session_id);
        self.engine.set_game_over_callback(move |score| {
            hud.borrow_mut().show_game_over(score);

            if let Some(sid) = session_id.borrow().as_deref() {
                let request = ScoreRequest {
                    session_id: sid.to_string(),
                    score,
                };
                match api.submit_score(&request) {
                    Ok(response) => hud.borrow_mut().set_game_over_rank(score, response.rank),
                    Err(err) => {
                        log::warn!("score submission failed: {err}");
                        hud.borrow_mut().set_alert("Could not submit your score");
                    }
                }
            }

            telemetry::flush(
                api.as_ref(),
                session_id.borrow().as_deref(),
                &mut telemetry.borrow_mut(),
            );
        });
    }

    // ------------------------------------------------------------------
    // Frame driving
    // ------------------------------------------------------------------

    /// Advance the engine one frame, refresh the HUD, and run the
    /// interval telemetry flush when due.
    pub fn tick(&mut self, now_ms: u64) {
        self.engine.update(now_ms);
        self.refresh_hud(now_ms);

        if now_ms >= self.next_flush_ms {
            self.next_flush_ms = now_ms + self.params.telemetry_interval_ms;
            let mut buffer = self.telemetry.borrow_mut();
            if !buffer.is_empty() {
                telemetry::flush(
                    self.api.as_ref(),
                    self.session_id.borrow().as_deref(),
                    &mut buffer,
                );
            }
        }
    }

    /// Forward a pointer event to the engine
    pub fn click(&mut self, x: f32, y: f32, now_ms: u64) {
        self.engine.click(x, y, now_ms);
    }

    /// Track a container resize; new balls spawn against the new bounds
    pub fn resize(&mut self, width: f32, height: f32) {
        self.engine.set_view(width, height);
    }

    fn refresh_hud(&mut self, now_ms: u64) {
        let mut hud = self.hud.borrow_mut();
        hud.set_timer(self.engine.timer.display(now_ms));
        hud.set_difficulty(self.engine.difficulty.level());
        hud.set_combo(self.engine.combo.multiplier());
        hud.set_buff_seconds(self.engine.buff.time_left_secs(now_ms));
    }

    // ------------------------------------------------------------------
    // Session & lifecycle
    // ------------------------------------------------------------------

    pub fn handle_start_button(&mut self, now_ms: u64) -> StartAction {
        if self.engine.is_game_over() {
            self.restart();
            return StartAction::Restarted;
        }
        if self.engine.is_running() {
            self.engine.pause(now_ms);
            self.hud.borrow_mut().set_start_label(StartLabel::Start);
            return StartAction::Paused;
        }
        if self.session_id.borrow().is_none() {
            return StartAction::NicknameRequired;
        }
        self.begin(now_ms);
        StartAction::Started
    }

    /// Answer a `NicknameRequired` prompt. Rejects blank names; session
    /// creation failure is non-fatal and the run starts anonymously.
    pub fn provide_nickname(&mut self, name: &str, now_ms: u64) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.create_session(name);
        self.begin(now_ms);
        true
    }

    fn begin(&mut self, now_ms: u64) {
        self.engine.start(now_ms);
        self.hud.borrow_mut().set_start_label(StartLabel::Pause);
    }

    fn create_session(&mut self, nickname: &str) {
        let request = SessionStartRequest {
            nickname: nickname.to_string(),
            client_version: self.params.client_version.clone(),
        };
        match self.api.create_session(&request) {
            Ok(response) => {
                log::info!("session {} created for {nickname}", response.session_id);
                *self.session_id.borrow_mut() = Some(response.session_id);
            }
            Err(err) => {
                log::warn!("session creation failed, continuing anonymously: {err}");
                *self.session_id.borrow_mut() = None;
            }
        }
        self.nickname = nickname.to_string();
    }

    /// Fresh run: engine, HUD, and pending telemetry all reset
    pub fn restart(&mut self) {
        self.engine.restart();
        self.hud.borrow_mut().reset();
        self.telemetry.borrow_mut().clear();
    }

    /// Fetch and format the top scores. On failure the session keeps
    /// running and the HUD carries a user-facing alert.
    pub fn show_leaderboard(&mut self, limit: u32) -> Option<LeaderboardView> {
        match self.api.fetch_leaderboard(limit) {
            Ok(response) => Some(LeaderboardView::from_response(&response)),
            Err(err) => {
                log::warn!("leaderboard fetch failed: {err}");
                self.hud
                    .borrow_mut()
                    .set_alert("Could not load the leaderboard");
                None
            }
        }
    }

    /// Teardown: push out whatever telemetry is still buffered
    pub fn shutdown(&mut self) {
        let mut buffer = self.telemetry.borrow_mut();
        if !buffer.is_empty() {
            telemetry::flush(
                self.api.as_ref(),
                self.session_id.borrow().as_deref(),
                &mut buffer,
            );
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut GameEngine {
        &mut self.engine
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn hud(&self) -> Ref<'_, Hud> {
        self.hud.borrow()
    }

    pub fn session_id(&self) -> Option<String> {
        self.session_id.borrow().clone()
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn pending_telemetry(&self) -> usize {
        self.telemetry.borrow().len()
    }
}
