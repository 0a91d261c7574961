//! The per-frame game loop: ball motion, click hit-testing, and the
//! wiring between scoring, combo, buff, difficulty, and the timer.

use glam::Vec2;
use hecs::{Entity, World};

use crate::buff::BuffSystem;
use crate::combo::ComboSystem;
use crate::components::{Ball, BallKind};
use crate::config::GameConfig;
use crate::difficulty::DifficultySystem;
use crate::params::{Params, Viewport};
use crate::resources::{GameEvent, GameEventKind, GameRng};
use crate::spawn;
use crate::state::GameState;
use crate::timer::GameTimer;

type GameOverCallback = Box<dyn FnMut(f64)>;
type EventCallback = Box<dyn FnMut(GameEvent)>;

/// Owns the live ball set and drives one game run.
///
/// The host calls `update` once per animation frame and `click` per
/// pointer event, passing its clock in milliseconds; nothing in here
/// reads wall time or owns a timer.
pub struct GameEngine {
    pub world: World,
    pub config: GameConfig,
    pub view: Viewport,
    pub state: GameState,
    pub combo: ComboSystem,
    pub buff: BuffSystem,
    pub difficulty: DifficultySystem,
    pub timer: GameTimer,
    pub rng: GameRng,
    on_game_over: Option<GameOverCallback>,
    on_event: Option<EventCallback>,
    game_over_fired: bool,
}

impl GameEngine {
    pub fn new(config: GameConfig, view: Viewport, seed: u64) -> Self {
        let mut engine = Self {
            world: World::new(),
            state: GameState::new(config.max_lives),
            combo: ComboSystem::new(),
            buff: BuffSystem::new(),
            difficulty: DifficultySystem::new(),
            timer: GameTimer::new(),
            rng: GameRng::new(seed),
            config,
            view,
            on_game_over: None,
            on_event: None,
            game_over_fired: false,
        };
        engine.refill_balls();
        engine
    }

    // ------------------------------------------------------------------
    // Observer registration
    // ------------------------------------------------------------------

    pub fn set_score_callback(&mut self, callback: impl FnMut(f64) + 'static) {
        self.state.set_score_callback(callback);
    }

    pub fn set_lives_callback(&mut self, callback: impl FnMut(u32) + 'static) {
        self.state.set_lives_callback(callback);
    }

    /// Fires once per run with the final score when lives run out
    pub fn set_game_over_callback(&mut self, callback: impl FnMut(f64) + 'static) {
        self.on_game_over = Some(Box::new(callback));
    }

    /// Telemetry feed: every hit, escaped ball, stray click, and lost life
    pub fn set_event_callback(&mut self, callback: impl FnMut(GameEvent) + 'static) {
        self.on_event = Some(Box::new(callback));
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    pub fn start(&mut self, now_ms: u64) {
        self.state.start();
        self.difficulty.start(now_ms);
        self.timer.start(now_ms);
    }

    pub fn pause(&mut self, now_ms: u64) {
        self.state.pause();
        self.difficulty.stop();
        self.timer.stop(now_ms);
    }

    /// Back to a fresh idle run with a full set of balls
    pub fn restart(&mut self) {
        self.state.reset();
        self.buff.clear();
        self.combo.clear();
        self.difficulty.reset();
        self.timer.reset();
        self.refill_balls();
        self.game_over_fired = false;
    }

    pub fn set_view(&mut self, width: f32, height: f32) {
        self.view = Viewport::new(width, height);
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Snapshot of the live balls in stable order, for rendering
    pub fn balls(&self) -> Vec<Ball> {
        let mut balls: Vec<(Entity, Ball)> = self
            .world
            .query::<&Ball>()
            .iter()
            .map(|(entity, ball)| (entity, *ball))
            .collect();
        balls.sort_by_key(|(entity, _)| entity.id());
        balls.into_iter().map(|(_, ball)| ball).collect()
    }

    pub fn ball_count(&self) -> usize {
        self.world.query::<&Ball>().iter().count()
    }

    // ------------------------------------------------------------------
    // Frame update
    // ------------------------------------------------------------------

    /// Advance one frame. Does nothing unless the run is active.
    pub fn update(&mut self, now_ms: u64) {
        if !self.state.is_running() {
            return;
        }
        self.difficulty.update(now_ms);
        self.sweep_balls(now_ms);
        self.buff.update(now_ms);
    }

    /// Move every ball up by its speed and recycle the ones that left the
    /// screen. A Normal ball escaping costs a life and breaks the combo;
    /// other kinds expire silently.
    fn sweep_balls(&mut self, now_ms: u64) {
        let multiplier = self.difficulty.speed_multiplier();
        let mut expired: Vec<(Entity, BallKind)> = Vec::new();

        for (entity, ball) in self.world.query_mut::<&mut Ball>() {
            ball.pos.y -= ball.speed * multiplier;
            if ball.pos.y < Params::DESPAWN_Y {
                expired.push((entity, ball.kind));
            }
        }
        expired.sort_by_key(|(entity, _)| entity.id());

        for (entity, kind) in expired {
            let _ = self.world.despawn(entity);
            if kind == BallKind::Normal {
                self.state.lose_life();
                self.emit(now_ms, GameEventKind::LifeLost);
                self.combo.reset();
                self.emit(now_ms, GameEventKind::BallMissed(kind));
            }
            spawn::spawn_ball(&mut self.world, self.view, &self.config, &mut self.rng);
        }

        self.check_game_over();
    }

    // ------------------------------------------------------------------
    // Click handling
    // ------------------------------------------------------------------

    /// Hit-test a pointer event against the live balls.
    ///
    /// Balls are tested in spawn order and the first overlap wins; stacked
    /// balls are deliberately not resolved by z-order. A click that lands
    /// on nothing breaks the combo.
    pub fn click(&mut self, x: f32, y: f32, now_ms: u64) {
        if !self.state.is_running() {
            return;
        }

        let point = Vec2::new(x, y);
        let mut balls: Vec<(Entity, Ball)> = self
            .world
            .query::<&Ball>()
            .iter()
            .map(|(entity, ball)| (entity, *ball))
            .collect();
        balls.sort_by_key(|(entity, _)| entity.id());

        let hit = balls
            .into_iter()
            .find(|(_, ball)| ball.contains(point, Params::BALL_RADIUS));

        match hit {
            Some((entity, ball)) => self.handle_hit(entity, ball, now_ms),
            None => {
                self.combo.reset();
                self.emit(now_ms, GameEventKind::Miss);
            }
        }
    }

    fn handle_hit(&mut self, entity: Entity, ball: Ball, now_ms: u64) {
        let _ = self.world.despawn(entity);
        self.emit(now_ms, GameEventKind::BallHit(ball.kind));

        let total_multiplier = self.buff.multiplier(now_ms) * self.combo.multiplier();

        match ball.kind {
            BallKind::DoublePoints => {
                self.buff
                    .activate_x2_score(self.config.bonus_durations.double_points, now_ms);
            }
            BallKind::Bomb => self.explode_bomb(total_multiplier),
            BallKind::Heal => self.state.add_life(),
            BallKind::Normal => {
                self.state.add_score(self.config.scores.normal * total_multiplier);
            }
            BallKind::Bad => {
                self.state.lose_life();
                self.emit(now_ms, GameEventKind::LifeLost);
            }
        }

        if ball.kind == BallKind::Bad {
            self.combo.reset();
        } else {
            self.combo.increment();
        }

        spawn::spawn_ball(&mut self.world, self.view, &self.config, &mut self.rng);
        self.check_game_over();
    }

    /// A bomb clears every live Normal ball at once. The whole burst lands
    /// as a single score delta, which may be zero.
    fn explode_bomb(&mut self, multiplier: f64) {
        let mut normals: Vec<Entity> = self
            .world
            .query::<&Ball>()
            .iter()
            .filter(|(_, ball)| ball.kind == BallKind::Normal)
            .map(|(entity, _)| entity)
            .collect();
        normals.sort_by_key(|entity| entity.id());

        let mut bomb_score = 0.0;
        for entity in normals {
            let _ = self.world.despawn(entity);
            bomb_score += self.config.scores.normal;
            spawn::spawn_ball(&mut self.world, self.view, &self.config, &mut self.rng);
        }
        self.state.add_score(bomb_score * multiplier);
    }

    // ------------------------------------------------------------------
    // Internal plumbing
    // ------------------------------------------------------------------

    fn refill_balls(&mut self) {
        self.world.clear();
        spawn::fill_balls(&mut self.world, self.view, &self.config, &mut self.rng);
    }

    fn emit(&mut self, t_ms: u64, kind: GameEventKind) {
        if let Some(cb) = self.on_event.as_mut() {
            cb(GameEvent { t_ms, kind });
        }
    }

    fn check_game_over(&mut self) {
        if self.game_over_fired || !self.state.is_game_over() {
            return;
        }
        self.game_over_fired = true;
        let score = self.state.score();
        if let Some(cb) = self.on_game_over.as_mut() {
            cb(score);
        }
    }
}
