//! Turmac Roll - a terminal side-scrolling runner.
//!
//! The library holds the simulation, persistence and rendering so the
//! binary is a thin frame loop and everything else is testable.

pub mod assets;
pub mod clock;
pub mod config;
pub mod constants;
pub mod high_score;
pub mod input;
pub mod logging;
pub mod runner;
pub mod session;
pub mod ui;
pub mod utils;

pub use config::GameConfig;
pub use high_score::HighScoreStore;
pub use session::{FrameInput, GameOverSummary, Phase, Session};
