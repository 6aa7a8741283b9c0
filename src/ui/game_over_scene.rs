//! Game over screen.

use super::game_common::render_game_over_overlay;
use crate::session::GameOverSummary;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

/// Game over screen with the final score and the high score.
pub fn render_game_over_scene(
    frame: &mut Frame,
    area: Rect,
    summary: &GameOverSummary,
    high_score: u32,
) {
    render_game_over_overlay(
        frame,
        area,
        "Game Over!",
        Color::LightRed,
        &summary_lines(summary, high_score),
        &[("[Space]", "Restart"), ("[Q]", "Quit")],
    );
}

fn summary_lines(summary: &GameOverSummary, high_score: u32) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            format!("Final Score: {}", summary.final_score),
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            format!("High Score: {}", high_score),
            Style::default().fg(Color::Yellow),
        )),
    ];

    if summary.new_high_score {
        lines.push(Line::from(Span::styled(
            "New high score!",
            Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        )));
    }
    if summary.save_failed {
        lines.push(Line::from(Span::styled(
            "(could not save high score)",
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines
}
