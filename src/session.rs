//! Session state machine: `Playing -> GameOver -> (Playing | Terminated)`.
//!
//! The session owns the current run, the high score loaded at startup, and
//! the store used to persist a new record when a run ends.

use crate::config::GameConfig;
use crate::high_score::HighScoreStore;
use crate::runner::{process_tick, RunState, TickInput, TickOutcome};
use rand::Rng;
use std::time::Duration;

/// Input gathered during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Space/Up: jump while playing, restart on the game over screen.
    pub action: bool,
    /// Q/Esc.
    pub quit: bool,
    /// Ctrl+C, the terminal's window-close. Terminates from any phase.
    pub close: bool,
}

/// Result of a finished run, shown on the game over screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOverSummary {
    pub final_score: u32,
    /// The run beat the previous high score.
    pub new_high_score: bool,
    /// The new high score could not be written to disk.
    pub save_failed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    GameOver(GameOverSummary),
    Terminated,
}

/// One game process worth of runs.
pub struct Session {
    pub config: GameConfig,
    pub run: RunState,
    pub phase: Phase,
    pub high_score: u32,
    /// Runs started so far, including the current one.
    pub runs_played: u32,
    store: HighScoreStore,
    player_frames: usize,
}

impl Session {
    /// Start playing immediately. `high_score` is the value loaded at startup.
    pub fn new(
        config: GameConfig,
        store: HighScoreStore,
        high_score: u32,
        player_frames: usize,
    ) -> Self {
        let run = RunState::new(config.clone(), player_frames);
        log::info!("Session started (high score {})", high_score);
        Self {
            config,
            run,
            phase: Phase::Playing,
            high_score,
            runs_played: 1,
            store,
            player_frames,
        }
    }

    pub fn is_terminated(&self) -> bool {
        self.phase == Phase::Terminated
    }

    /// Handle one frame of input and, while playing, one physics tick.
    pub fn update<R: Rng>(&mut self, input: &FrameInput, rng: &mut R) {
        if input.close {
            self.terminate();
            return;
        }

        match self.phase {
            Phase::Playing => {
                if input.quit {
                    self.terminate();
                    return;
                }
                let tick = TickInput {
                    move_left: input.move_left,
                    move_right: input.move_right,
                    jump: input.action,
                };
                let report = process_tick(&mut self.run, tick, rng);
                if report.outcome == TickOutcome::Crashed {
                    self.enter_game_over();
                }
            }
            Phase::GameOver(_) => {
                if input.action {
                    self.restart();
                } else if input.quit {
                    self.phase = Phase::Terminated;
                    log::info!("Quit from game over screen");
                }
            }
            Phase::Terminated => {}
        }
    }

    /// Forward wall-clock time to the player animation.
    pub fn advance_animation(&mut self, elapsed: Duration) {
        if self.phase == Phase::Playing {
            self.run.player.animation.advance(elapsed);
        }
    }

    /// Fresh run: empty entity lists, score 0, base speed.
    pub fn restart(&mut self) {
        self.run = RunState::new(self.config.clone(), self.player_frames);
        self.phase = Phase::Playing;
        self.runs_played += 1;
        log::info!("Run {} started", self.runs_played);
    }

    fn enter_game_over(&mut self) {
        let final_score = self.run.score();
        let (new_high_score, save_failed) = self.record_high_score(final_score);
        log::info!(
            "Game over: score {} (high score {})",
            final_score,
            self.high_score
        );
        self.phase = Phase::GameOver(GameOverSummary {
            final_score,
            new_high_score,
            save_failed,
        });
    }

    /// Quit or close. A record set by the abandoned run is still kept.
    fn terminate(&mut self) {
        if self.phase == Phase::Playing {
            self.record_high_score(self.run.score());
        }
        self.phase = Phase::Terminated;
        log::info!("Session terminated");
    }

    /// Update and persist the high score if `score` beats it.
    /// Returns (new record, save failed).
    fn record_high_score(&mut self, score: u32) -> (bool, bool) {
        if score <= self.high_score {
            return (false, false);
        }
        self.high_score = score;
        match self.store.save(score) {
            Ok(()) => (true, false),
            Err(e) => {
                log::warn!(
                    "Could not save high score to {}: {}",
                    self.store.path().display(),
                    e
                );
                (true, true)
            }
        }
    }
}
