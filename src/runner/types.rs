//! Runner data structures: player, obstacles, coins, spawner, run state.
//!
//! Coordinates are world units with the origin at the top-left of the play
//! field and `y` growing downward. Every entity is an axis-aligned square
//! described by its top-left corner and size.

use crate::config::GameConfig;
use rand::Rng;
use std::time::Duration;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Hitbox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Strict overlap test. Boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &Hitbox) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// True once the box has scrolled entirely past the left edge.
    pub fn is_off_left(&self) -> bool {
        self.right() <= 0.0
    }
}

/// Looping frame sequence driven by wall-clock time, not physics ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animation {
    pub frame: usize,
    pub frame_count: usize,
    pub frame_interval: Duration,
    elapsed: Duration,
}

impl Animation {
    pub fn new(frame_count: usize, frame_interval: Duration) -> Self {
        Self {
            frame: 0,
            frame_count: frame_count.max(1),
            frame_interval,
            elapsed: Duration::ZERO,
        }
    }

    /// Accumulate `dt`; step one frame once more than `frame_interval` has passed.
    pub fn advance(&mut self, dt: Duration) {
        self.elapsed += dt;
        if self.elapsed > self.frame_interval {
            self.elapsed = Duration::ZERO;
            self.frame = (self.frame + 1) % self.frame_count;
        }
    }
}

/// The player-controlled roller.
#[derive(Debug, Clone)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    /// Vertical velocity in units/tick (negative = upward).
    pub velocity_y: f64,
    pub on_ground: bool,
    /// Never decreases within a session.
    pub score: u32,
    pub animation: Animation,
}

impl Player {
    /// Spawn at a quarter of the field width, resting on the ground line.
    pub fn new(config: &GameConfig, frame_count: usize) -> Self {
        Self {
            x: config.field_width / 4.0,
            y: config.ground_line() - config.player_size,
            size: config.player_size,
            velocity_y: 0.0,
            on_ground: false,
            score: 0,
            animation: Animation::new(
                frame_count,
                Duration::from_millis(config.animation_frame_ms),
            ),
        }
    }

    pub fn hitbox(&self) -> Hitbox {
        Hitbox::new(self.x, self.y, self.size, self.size)
    }

    /// Shift horizontally, clamped to `[0, field_width - size]`.
    pub fn move_by(&mut self, dx: f64, field_width: f64) {
        let max_x = (field_width - self.size).max(0.0);
        self.x = (self.x + dx).clamp(0.0, max_x);
    }

    /// Apply the jump impulse. Only works from the ground; returns whether it did.
    pub fn jump(&mut self, impulse: f64) -> bool {
        if !self.on_ground {
            return false;
        }
        self.velocity_y = impulse;
        self.on_ground = false;
        true
    }

    /// One tick of gravity integration with the ground clamp.
    pub fn apply_gravity(&mut self, gravity: f64, ground_line: f64) {
        self.velocity_y += gravity;
        self.y += self.velocity_y;

        if self.y + self.size >= ground_line {
            self.y = ground_line - self.size;
            self.velocity_y = 0.0;
            self.on_ground = true;
        } else {
            self.on_ground = false;
        }
    }
}

/// Visual variants an obstacle can take. Identical hitboxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleVariant {
    Crate,
    Spikes,
    Boulder,
}

impl ObstacleVariant {
    pub const ALL: [ObstacleVariant; 3] = [
        ObstacleVariant::Crate,
        ObstacleVariant::Spikes,
        ObstacleVariant::Boulder,
    ];

    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or(ObstacleVariant::Crate)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Crate => "Crate",
            Self::Spikes => "Spikes",
            Self::Boulder => "Boulder",
        }
    }

    /// Sprite file inside the asset directory.
    pub fn sprite_file(&self) -> &'static str {
        match self {
            Self::Crate => "obstacle1.txt",
            Self::Spikes => "obstacle2.txt",
            Self::Boulder => "obstacle3.txt",
        }
    }
}

/// Ground obstacle. Touching one ends the session.
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub variant: ObstacleVariant,
}

impl Obstacle {
    pub fn hitbox(&self) -> Hitbox {
        Hitbox::new(self.x, self.y, self.size, self.size)
    }
}

/// Floating pickup worth `coin_reward` points.
#[derive(Debug, Clone)]
pub struct Coin {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

impl Coin {
    pub fn hitbox(&self) -> Hitbox {
        Hitbox::new(self.x, self.y, self.size, self.size)
    }
}

/// What a spawn tick produces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Spawn {
    Obstacle(ObstacleVariant),
    /// Coin floating `lift` units above the ground.
    Coin { lift: f64 },
}

impl Spawn {
    /// Bernoulli choice between obstacle and coin, then a uniform variant or lift.
    pub fn roll<R: Rng>(rng: &mut R, config: &GameConfig) -> Self {
        if rng.gen::<f64>() < config.obstacle_chance {
            let index = rng.gen_range(0..ObstacleVariant::ALL.len());
            Spawn::Obstacle(ObstacleVariant::from_index(index))
        } else {
            let lift = if config.coin_max_lift > 0.0 {
                rng.gen_range(0.0..=config.coin_max_lift)
            } else {
                0.0
            };
            Spawn::Coin { lift }
        }
    }
}

/// Fixed-interval spawn timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spawner {
    pub ticks: u32,
    pub interval: u32,
}

impl Spawner {
    pub fn new(interval: u32) -> Self {
        Self {
            ticks: 0,
            interval: interval.max(1),
        }
    }

    /// Count one tick. Returns true (and resets) when the interval is reached.
    pub fn advance(&mut self) -> bool {
        self.ticks += 1;
        if self.ticks >= self.interval {
            self.ticks = 0;
            true
        } else {
            false
        }
    }
}

/// World state of one session.
#[derive(Debug, Clone)]
pub struct RunState {
    pub config: GameConfig,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub coins: Vec<Coin>,
    pub spawner: Spawner,
    /// Current scroll speed in units/tick.
    pub speed: u32,
    /// Physics ticks elapsed this session.
    pub tick_count: u64,
    /// Set on the tick the player hits an obstacle.
    pub crashed: bool,
}

impl RunState {
    /// Fresh session: empty entity lists, score 0, base speed.
    pub fn new(config: GameConfig, player_frames: usize) -> Self {
        let player = Player::new(&config, player_frames);
        let spawner = Spawner::new(config.spawn_interval_ticks);
        let speed = config.base_speed;
        Self {
            config,
            player,
            obstacles: Vec::new(),
            coins: Vec::new(),
            spawner,
            speed,
            tick_count: 0,
            crashed: false,
        }
    }

    pub fn score(&self) -> u32 {
        self.player.score
    }

    /// Add an entity at the right edge of the field.
    pub fn spawn(&mut self, spawn: Spawn) {
        let x = self.config.field_width;
        let ground = self.config.ground_line();
        match spawn {
            Spawn::Obstacle(variant) => {
                let size = self.config.obstacle_size;
                self.obstacles.push(Obstacle {
                    x,
                    y: ground - size,
                    size,
                    variant,
                });
            }
            Spawn::Coin { lift } => {
                let size = self.config.coin_size;
                let lift = lift.clamp(0.0, self.config.coin_max_lift);
                self.coins.push(Coin {
                    x,
                    y: ground - size - lift,
                    size,
                });
            }
        }
    }
}
