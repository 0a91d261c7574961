//! Ball generation: weighted kind selection and spawn placement.

use glam::Vec2;
use hecs::{Entity, World};

use crate::components::{Ball, BallKind};
use crate::config::{BallChances, GameConfig};
use crate::params::{Params, Viewport};
use crate::resources::GameRng;

/// Draw a ball kind by cumulative-probability scan over the configured
/// chances. Falls back to Normal if float rounding lets the scan run off
/// the end of the table.
pub fn random_kind(chances: &BallChances, rng: &mut GameRng) -> BallKind {
    let roll = rng.gen_unit();
    let mut accumulated = 0.0f32;
    for (kind, chance) in chances.weighted() {
        accumulated += chance;
        if roll < accumulated {
            return kind;
        }
    }
    BallKind::Normal
}

/// Spawn one freshly generated ball below the visible area.
///
/// `x` is uniform across the width with a radius margin on both sides;
/// `y` starts a random extra offset under the bottom edge so a batch of
/// balls enters over time rather than as one wall.
pub fn spawn_ball(
    world: &mut World,
    view: Viewport,
    config: &GameConfig,
    rng: &mut GameRng,
) -> Entity {
    let kind = random_kind(&config.ball_chances, rng);
    let radius = Params::BALL_RADIUS;

    let x = rng.gen_range(radius, (view.width - radius).max(radius));
    let y = view.height + radius + rng.gen_range(0.0, view.height.max(1.0));
    let speed = rng.gen_range(config.ball_speed.min, config.ball_speed.max);

    world.spawn((Ball::new(Vec2::new(x, y), speed, kind),))
}

/// Top the world up to the configured ball count
pub fn fill_balls(world: &mut World, view: Viewport, config: &GameConfig, rng: &mut GameRng) {
    let alive = world.query::<&Ball>().iter().count();
    for _ in alive..config.max_balls {
        spawn_ball(world, view, config, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_view() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    #[test]
    fn test_spawn_position_and_speed_ranges() {
        let mut world = World::new();
        let config = GameConfig::default();
        let mut rng = GameRng::new(42);
        let view = test_view();

        for _ in 0..200 {
            let entity = spawn_ball(&mut world, view, &config, &mut rng);
            let ball = world.get::<&Ball>(entity).unwrap();
            assert!(ball.pos.x >= Params::BALL_RADIUS);
            assert!(ball.pos.x <= view.width - Params::BALL_RADIUS);
            assert!(
                ball.pos.y >= view.height + Params::BALL_RADIUS,
                "Balls must enter from below the visible area"
            );
            assert!(ball.speed >= config.ball_speed.min);
            assert!(ball.speed <= config.ball_speed.max);
        }
    }

    #[test]
    fn test_exclusive_chance_forces_kind() {
        let mut config = GameConfig::default();
        config.ball_chances = BallChances {
            normal: 0.0,
            bad: 1.0,
            double_points: 0.0,
            bomb: 0.0,
            heal: 0.0,
        };
        let mut rng = GameRng::new(7);
        for _ in 0..100 {
            assert_eq!(random_kind(&config.ball_chances, &mut rng), BallKind::Bad);
        }
    }

    #[test]
    fn test_fill_tops_up_to_max_balls() {
        let mut world = World::new();
        let config = GameConfig::default();
        let mut rng = GameRng::new(1);
        let view = test_view();

        fill_balls(&mut world, view, &config, &mut rng);
        assert_eq!(world.query::<&Ball>().iter().count(), config.max_balls);

        // Already full: no change
        fill_balls(&mut world, view, &config, &mut rng);
        assert_eq!(world.query::<&Ball>().iter().count(), config.max_balls);
    }

    #[test]
    fn test_distribution_roughly_matches_chances() {
        let config = GameConfig::default();
        let mut rng = GameRng::new(2024);
        let mut normals = 0u32;
        let draws = 10_000;
        for _ in 0..draws {
            if random_kind(&config.ball_chances, &mut rng) == BallKind::Normal {
                normals += 1;
            }
        }
        let ratio = normals as f32 / draws as f32;
        assert!(
            (ratio - config.ball_chances.normal).abs() < 0.05,
            "Normal ratio {ratio} too far from configured {}",
            config.ball_chances.normal
        );
    }

    proptest! {
        #[test]
        fn prop_kind_always_in_configured_set(seed in any::<u64>()) {
            let config = GameConfig::default();
            let mut rng = GameRng::new(seed);
            let kind = random_kind(&config.ball_chances, &mut rng);
            prop_assert!(BallKind::ALL.contains(&kind));
        }

        #[test]
        fn prop_zero_weight_kind_never_drawn(seed in any::<u64>()) {
            let mut config = GameConfig::default();
            config.ball_chances.bomb = 0.0;
            config.ball_chances.normal += 0.03;
            let mut rng = GameRng::new(seed);
            prop_assert_ne!(random_kind(&config.ball_chances, &mut rng), BallKind::Bomb);
        }
    }
}
