//! Runner game logic: input application, physics, spawning, collision, scoring.

use super::types::*;
use rand::Rng;

/// Player intent for a single tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Left held this frame.
    pub move_left: bool,
    /// Right held this frame.
    pub move_right: bool,
    /// Jump pressed since the previous tick (edge-triggered).
    pub jump: bool,
}

/// How a tick ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// The player touched an obstacle; the session is over.
    Crashed,
}

/// Everything that happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub outcome: TickOutcome,
    pub coins_collected: u32,
    pub spawned: Option<SpawnKind>,
}

/// Spawn category without its random parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnKind {
    Obstacle,
    Coin,
}

/// Scroll speed for a score: `base + floor(score / step)`.
pub fn game_speed(score: u32, base_speed: u32, score_per_step: u32) -> u32 {
    base_speed + score / score_per_step.max(1)
}

/// Advance the run by one fixed tick.
///
/// Order: input, gravity, spawn, obstacles (crash check), coins (pickup),
/// speed recompute. A crash returns immediately, so coins are not scored and
/// speed is not recomputed on that tick.
pub fn process_tick<R: Rng>(run: &mut RunState, input: TickInput, rng: &mut R) -> TickReport {
    let mut report = TickReport {
        outcome: TickOutcome::Continue,
        coins_collected: 0,
        spawned: None,
    };

    if run.crashed {
        report.outcome = TickOutcome::Crashed;
        return report;
    }

    run.tick_count += 1;

    // 1. Input
    if input.jump {
        run.player.jump(run.config.jump_impulse);
    }
    if input.move_left {
        run.player.move_by(-run.config.move_speed, run.config.field_width);
    }
    if input.move_right {
        run.player.move_by(run.config.move_speed, run.config.field_width);
    }

    // 2. Physics
    run.player
        .apply_gravity(run.config.gravity, run.config.ground_line());

    // 3. Spawn
    if run.spawner.advance() {
        let spawn = Spawn::roll(rng, &run.config);
        report.spawned = Some(match spawn {
            Spawn::Obstacle(_) => SpawnKind::Obstacle,
            Spawn::Coin { .. } => SpawnKind::Coin,
        });
        run.spawn(spawn);
    }

    // 4. Obstacles
    if scroll_obstacles(run) {
        run.crashed = true;
        report.outcome = TickOutcome::Crashed;
        return report;
    }

    // 5. Coins
    report.coins_collected = scroll_coins(run);

    // 6. Difficulty ramp
    run.speed = game_speed(
        run.player.score,
        run.config.base_speed,
        run.config.score_per_speed_step,
    );

    report
}

/// Scroll obstacles left and cull those off-screen. Returns true on the first
/// obstacle overlapping the player; later obstacles are left untouched, but
/// earlier ones that left the field are still culled.
fn scroll_obstacles(run: &mut RunState) -> bool {
    let speed = run.speed as f64;
    let player = run.player.hitbox();
    let mut off_screen = Vec::new();
    let mut crashed = false;

    for (i, obstacle) in run.obstacles.iter_mut().enumerate() {
        obstacle.x -= speed;
        let hitbox = obstacle.hitbox();
        if hitbox.is_off_left() {
            off_screen.push(i);
        } else if player.intersects(&hitbox) {
            log::info!(
                "Crashed into {} at x={:.0}",
                obstacle.variant.name(),
                obstacle.x
            );
            crashed = true;
            break;
        }
    }

    remove_indices(&mut run.obstacles, &off_screen);
    crashed
}

/// Scroll coins left, cull off-screen ones, and collect those the player
/// overlaps. Returns the number collected.
fn scroll_coins(run: &mut RunState) -> u32 {
    let speed = run.speed as f64;
    let player = run.player.hitbox();
    let mut removed = Vec::new();
    let mut collected = 0;

    for (i, coin) in run.coins.iter_mut().enumerate() {
        coin.x -= speed;
        let hitbox = coin.hitbox();
        if hitbox.is_off_left() {
            removed.push(i);
        } else if player.intersects(&hitbox) {
            removed.push(i);
            collected += 1;
        }
    }

    remove_indices(&mut run.coins, &removed);
    run.player.score += collected * run.config.coin_reward;
    collected
}

/// Compact `items`, dropping the (ascending) `indices` in one pass.
fn remove_indices<T>(items: &mut Vec<T>, indices: &[usize]) {
    if indices.is_empty() {
        return;
    }
    let mut next = indices.iter().peekable();
    let mut index = 0;
    items.retain(|_| {
        let drop = next.peek().is_some_and(|&&i| i == index);
        if drop {
            next.next();
        }
        index += 1;
        !drop
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    /// Run with spawning effectively disabled and the player settled on the ground.
    fn quiet_run() -> RunState {
        let config = GameConfig {
            spawn_interval_ticks: u32::MAX,
            ..Default::default()
        };
        let mut run = RunState::new(config, 1);
        run.player.apply_gravity(run.config.gravity, run.config.ground_line());
        run
    }

    fn coin_at(run: &RunState, x: f64, y: f64) -> Coin {
        Coin {
            x,
            y,
            size: run.config.coin_size,
        }
    }

    fn obstacle_at(run: &RunState, x: f64) -> Obstacle {
        let size = run.config.obstacle_size;
        Obstacle {
            x,
            y: run.config.ground_line() - size,
            size,
            variant: ObstacleVariant::Crate,
        }
    }

    // ── Speed ──

    #[test]
    fn test_game_speed_ramp() {
        assert_eq!(game_speed(0, 5, 100), 5);
        assert_eq!(game_speed(99, 5, 100), 5);
        assert_eq!(game_speed(100, 5, 100), 6);
        assert_eq!(game_speed(150, 5, 100), 6);
        assert_eq!(game_speed(999, 5, 100), 14);
    }

    // ── Input & physics ──

    #[test]
    fn test_player_settles_on_first_tick() {
        let mut run = RunState::new(GameConfig::default(), 1);
        assert!(!run.player.on_ground);

        process_tick(&mut run, TickInput::default(), &mut test_rng());

        assert!(run.player.on_ground);
        assert!((run.player.hitbox().bottom() - run.config.ground_line()).abs() < f64::EPSILON);
    }

    #[test]
    fn test_jump_input_lifts_player() {
        let mut run = quiet_run();
        let input = TickInput {
            jump: true,
            ..Default::default()
        };

        process_tick(&mut run, input, &mut test_rng());

        // -15 + 0.8 after one tick of gravity
        assert!((run.player.velocity_y - (-14.2)).abs() < 1e-9);
        assert!(!run.player.on_ground);
    }

    #[test]
    fn test_jump_arc_lands_again() {
        let mut run = quiet_run();
        let mut rng = test_rng();
        process_tick(
            &mut run,
            TickInput {
                jump: true,
                ..Default::default()
            },
            &mut rng,
        );

        let ground_y = run.config.ground_line() - run.player.size;
        let mut peak = run.player.y;
        for _ in 0..100 {
            process_tick(&mut run, TickInput::default(), &mut rng);
            peak = peak.min(run.player.y);
            if run.player.on_ground {
                break;
            }
        }

        assert!(peak < ground_y - 100.0, "jump should clear a 40-unit obstacle");
        assert!(run.player.on_ground);
        assert!((run.player.y - ground_y).abs() < f64::EPSILON);
    }

    #[test]
    fn test_held_direction_moves_player() {
        let mut run = quiet_run();
        let start = run.player.x;

        process_tick(
            &mut run,
            TickInput {
                move_right: true,
                ..Default::default()
            },
            &mut test_rng(),
        );
        assert!((run.player.x - (start + 7.0)).abs() < f64::EPSILON);

        process_tick(
            &mut run,
            TickInput {
                move_left: true,
                move_right: true,
                ..Default::default()
            },
            &mut test_rng(),
        );
        assert!((run.player.x - (start + 7.0)).abs() < f64::EPSILON);
    }

    // ── Spawning ──

    #[test]
    fn test_spawns_exactly_one_entity_after_interval() {
        let mut run = RunState::new(GameConfig::default(), 1);
        let mut rng = test_rng();

        for _ in 0..59 {
            let report = process_tick(&mut run, TickInput::default(), &mut rng);
            assert!(report.spawned.is_none());
        }
        assert_eq!(run.obstacles.len() + run.coins.len(), 0);

        let report = process_tick(&mut run, TickInput::default(), &mut rng);
        assert!(report.spawned.is_some());
        assert_eq!(run.obstacles.len() + run.coins.len(), 1);
        assert_eq!(run.spawner.ticks, 0);
    }

    // ── Scrolling & culling ──

    #[test]
    fn test_entities_scroll_by_speed() {
        let mut run = quiet_run();
        let ground = run.config.ground_line();
        run.obstacles.push(obstacle_at(&run, 700.0));
        run.coins.push(coin_at(&run, 600.0, ground - 300.0));

        process_tick(&mut run, TickInput::default(), &mut test_rng());

        assert!((run.obstacles[0].x - 695.0).abs() < f64::EPSILON);
        assert!((run.coins[0].x - 595.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_off_screen_entities_are_culled() {
        let mut run = quiet_run();
        let ground = run.config.ground_line();
        run.obstacles.push(obstacle_at(&run, -36.0)); // right edge 4 -> -1
        run.obstacles.push(obstacle_at(&run, 500.0));
        run.coins.push(coin_at(&run, -26.0, ground - 300.0)); // right edge 4 -> -1
        run.coins.push(coin_at(&run, -20.0, ground - 300.0)); // still visible

        process_tick(&mut run, TickInput::default(), &mut test_rng());

        assert_eq!(run.obstacles.len(), 1);
        assert!((run.obstacles[0].x - 495.0).abs() < f64::EPSILON);
        assert_eq!(run.coins.len(), 1);
        assert!((run.coins[0].x + 25.0).abs() < f64::EPSILON);
        assert!(run.obstacles.iter().all(|o| !o.hitbox().is_off_left()));
        assert!(run.coins.iter().all(|c| !c.hitbox().is_off_left()));
    }

    // ── Collision ──

    #[test]
    fn test_obstacle_collision_crashes_immediately() {
        let mut run = quiet_run();
        let player_x = run.player.x;
        run.obstacles.push(obstacle_at(&run, player_x + 20.0));
        // A coin overlapping the player too: obstacle wins, coin is not scored
        let coin_y = run.player.y;
        run.coins.push(coin_at(&run, player_x + 5.0, coin_y));

        let report = process_tick(&mut run, TickInput::default(), &mut test_rng());

        assert_eq!(report.outcome, TickOutcome::Crashed);
        assert_eq!(report.coins_collected, 0);
        assert_eq!(run.player.score, 0);
        assert_eq!(run.coins.len(), 1);
        assert!((run.coins[0].x - (player_x + 5.0)).abs() < f64::EPSILON);
        assert!(run.crashed);
    }

    #[test]
    fn test_first_obstacle_collision_stops_scan() {
        let mut run = quiet_run();
        let player_x = run.player.x;
        run.obstacles.push(obstacle_at(&run, player_x));
        run.obstacles.push(obstacle_at(&run, 600.0));

        process_tick(&mut run, TickInput::default(), &mut test_rng());

        // Second obstacle never moved
        assert!((run.obstacles[1].x - 600.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_crash_tick_still_culls_off_screen_obstacles() {
        let mut run = quiet_run();
        let player_x = run.player.x;
        run.obstacles.push(obstacle_at(&run, -36.0)); // right edge 4 -> -1
        run.obstacles.push(obstacle_at(&run, player_x));
        run.obstacles.push(obstacle_at(&run, 600.0));

        let report = process_tick(&mut run, TickInput::default(), &mut test_rng());

        assert_eq!(report.outcome, TickOutcome::Crashed);
        assert_eq!(run.obstacles.len(), 2);
        assert!(run.obstacles.iter().all(|o| !o.hitbox().is_off_left()));
        assert!((run.obstacles[0].x - (player_x - 5.0)).abs() < f64::EPSILON);
        assert!((run.obstacles[1].x - 600.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_crashed_run_does_not_advance() {
        let mut run = quiet_run();
        run.crashed = true;
        let ticks = run.tick_count;

        let report = process_tick(&mut run, TickInput::default(), &mut test_rng());

        assert_eq!(report.outcome, TickOutcome::Crashed);
        assert_eq!(run.tick_count, ticks);
    }

    #[test]
    fn test_jumping_clears_obstacle() {
        let mut run = quiet_run();
        let mut rng = test_rng();
        let player_right = run.player.hitbox().right();
        // Arrives under the player a few ticks into the jump
        run.obstacles.push(obstacle_at(&run, player_right + 20.0));

        let report = process_tick(
            &mut run,
            TickInput {
                jump: true,
                ..Default::default()
            },
            &mut rng,
        );
        assert_eq!(report.outcome, TickOutcome::Continue);

        for _ in 0..40 {
            let report = process_tick(&mut run, TickInput::default(), &mut rng);
            assert_eq!(report.outcome, TickOutcome::Continue);
        }
    }

    #[test]
    fn test_coin_pickup_scores_and_removes_only_that_coin() {
        let mut run = quiet_run();
        let player_x = run.player.x;
        let player_y = run.player.y;
        run.coins.push(coin_at(&run, 600.0, player_y));
        run.coins.push(coin_at(&run, player_x + 10.0, player_y + 5.0));
        run.coins.push(coin_at(&run, player_x, player_y - 200.0));

        let report = process_tick(&mut run, TickInput::default(), &mut test_rng());

        assert_eq!(report.coins_collected, 1);
        assert_eq!(run.player.score, 10);
        assert_eq!(run.coins.len(), 2);
        assert!((run.coins[0].x - 595.0).abs() < f64::EPSILON);
        assert!((run.coins[1].y - (player_y - 200.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_speed_recomputed_after_pickup() {
        let mut run = quiet_run();
        run.player.score = 90;
        let (x, y) = (run.player.x, run.player.y);
        run.coins.push(coin_at(&run, x, y));

        process_tick(&mut run, TickInput::default(), &mut test_rng());

        assert_eq!(run.player.score, 100);
        assert_eq!(run.speed, 6);
    }

    #[test]
    fn test_remove_indices() {
        let mut items = vec![0, 1, 2, 3, 4, 5];
        remove_indices(&mut items, &[0, 2, 5]);
        assert_eq!(items, vec![1, 3, 4]);

        remove_indices(&mut items, &[]);
        assert_eq!(items, vec![1, 3, 4]);
    }
}
