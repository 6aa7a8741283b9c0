//! Game configuration.
//!
//! Every tunable lives here. Defaults come from `constants`; an optional
//! `turmac_roll.json` in the working directory can override any subset of
//! fields.

use crate::constants::*;
use crate::utils::persistence::load_json_or_default;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for a game process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Play field width in world units
    pub field_width: f64,
    /// Play field height in world units
    pub field_height: f64,
    /// Height of the ground strip at the bottom of the field
    pub ground_height: f64,

    pub player_size: f64,
    pub obstacle_size: f64,
    pub coin_size: f64,

    /// Added to the player's vertical velocity every tick
    pub gravity: f64,
    /// Vertical velocity set by a jump (negative = upward)
    pub jump_impulse: f64,
    /// Horizontal distance per tick while a direction key is held
    pub move_speed: f64,

    /// Scroll speed at score 0
    pub base_speed: u32,
    /// Score needed for each +1 of scroll speed
    pub score_per_speed_step: u32,
    /// Score awarded per coin
    pub coin_reward: u32,

    /// Ticks between spawns
    pub spawn_interval_ticks: u32,
    /// Probability that a spawn is an obstacle rather than a coin
    pub obstacle_chance: f64,
    /// Maximum height a coin may float above the ground
    pub coin_max_lift: f64,

    pub target_fps: u32,
    /// Wall-clock time per player animation frame
    pub animation_frame_ms: u64,

    pub asset_dir: PathBuf,
    pub high_score_path: PathBuf,
    pub log_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            ground_height: GROUND_HEIGHT,
            player_size: PLAYER_SIZE,
            obstacle_size: OBSTACLE_SIZE,
            coin_size: COIN_SIZE,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            move_speed: MOVE_SPEED,
            base_speed: BASE_SPEED,
            score_per_speed_step: SCORE_PER_SPEED_STEP,
            coin_reward: COIN_REWARD,
            spawn_interval_ticks: SPAWN_INTERVAL_TICKS,
            obstacle_chance: OBSTACLE_CHANCE,
            coin_max_lift: COIN_MAX_LIFT,
            target_fps: TARGET_FPS,
            animation_frame_ms: ANIMATION_FRAME_MS,
            asset_dir: PathBuf::from(ASSET_DIR),
            high_score_path: PathBuf::from(HIGH_SCORE_FILE),
            log_path: PathBuf::from(LOG_FILE),
        }
    }
}

impl GameConfig {
    /// Load from `path`, falling back to defaults when missing or malformed.
    pub fn load(path: &Path) -> Self {
        load_json_or_default::<Self>(path).sanitized()
    }

    /// Y coordinate of the ground surface; nothing rests below it.
    pub fn ground_line(&self) -> f64 {
        self.field_height - self.ground_height
    }

    /// Clamp values that would break the simulation back into range.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.field_width <= self.player_size || self.field_width <= 0.0 {
            self.field_width = defaults.field_width;
            self.player_size = defaults.player_size;
        }
        if self.ground_line() <= self.player_size {
            self.field_height = defaults.field_height;
            self.ground_height = defaults.ground_height;
        }
        self.obstacle_chance = self.obstacle_chance.clamp(0.0, 1.0);
        self.coin_max_lift = self.coin_max_lift.max(0.0);
        self.spawn_interval_ticks = self.spawn_interval_ticks.max(1);
        self.score_per_speed_step = self.score_per_speed_step.max(1);
        self.target_fps = self.target_fps.clamp(1, 240);
        self
    }
}
