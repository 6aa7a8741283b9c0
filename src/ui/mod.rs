//! Terminal rendering, one scene per session phase.

pub mod game_common;
pub mod game_over_scene;
pub mod runner_scene;

use crate::assets::Assets;
use crate::session::{Phase, Session};
use game_over_scene::render_game_over_scene;
use ratatui::Frame;
use runner_scene::render_runner_scene;

/// Draw the screen for the session's current phase.
pub fn draw(frame: &mut Frame, session: &Session, assets: &Assets) {
    let area = frame.size();

    match &session.phase {
        Phase::Playing => render_runner_scene(frame, area, session, assets),
        Phase::GameOver(summary) => {
            render_game_over_scene(frame, area, summary, session.high_score)
        }
        Phase::Terminated => {}
    }
}
