// Play field geometry (world units, the renderer scales these to cells)
pub const FIELD_WIDTH: f64 = 800.0;
pub const FIELD_HEIGHT: f64 = 600.0;
pub const GROUND_HEIGHT: f64 = 40.0;

// Entity sizes
pub const PLAYER_SIZE: f64 = 40.0;
pub const OBSTACLE_SIZE: f64 = 40.0;
pub const COIN_SIZE: f64 = 30.0;

// Player physics (per tick)
pub const GRAVITY: f64 = 0.8;
pub const JUMP_IMPULSE: f64 = -15.0;
pub const MOVE_SPEED: f64 = 7.0;

// Scrolling and difficulty ramp
pub const BASE_SPEED: u32 = 5;
pub const SCORE_PER_SPEED_STEP: u32 = 100;
pub const COIN_REWARD: u32 = 10;

// Spawning
pub const SPAWN_INTERVAL_TICKS: u32 = 60; // ~1 second at 60 FPS
pub const OBSTACLE_CHANCE: f64 = 0.5;
pub const COIN_MAX_LIFT: f64 = 200.0;

// Timing
pub const TARGET_FPS: u32 = 60;
pub const ANIMATION_FRAME_MS: u64 = 100;

// Files, relative to the working directory
pub const CONFIG_FILE: &str = "turmac_roll.json";
pub const HIGH_SCORE_FILE: &str = "high_score.json";
pub const LOG_FILE: &str = "turmac_roll.log";
pub const ASSET_DIR: &str = "assets";
