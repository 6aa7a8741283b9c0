//! Runner play field rendering.
//!
//! The world is drawn into a cell buffer (for per-character colour) scaled
//! from world units to the available terminal area, then stamped row by row
//! as `Paragraph` widgets.

use super::game_common::{create_game_layout, render_info_panel_frame, render_status_bar};
use crate::assets::{Assets, Sprite};
use crate::runner::{Hitbox, ObstacleVariant, RunState};
use crate::session::Session;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const GROUND_CHAR: char = '▓';
const GROUND_SUB: char = '░';
const GROUND_FG: Color = Color::Rgb(40, 150, 60);
const GROUND_BG: Color = Color::Rgb(20, 90, 35);

const PLAYER_COLOR: Color = Color::LightCyan;
const COIN_COLOR: Color = Color::Yellow;

fn obstacle_color(variant: ObstacleVariant) -> Color {
    match variant {
        ObstacleVariant::Crate => Color::Rgb(160, 110, 60),
        ObstacleVariant::Spikes => Color::Rgb(170, 170, 190),
        ObstacleVariant::Boulder => Color::Rgb(130, 120, 110),
    }
}

/// Render the playing screen: play field, status bar, info panel.
pub fn render_runner_scene(frame: &mut Frame, area: Rect, session: &Session, assets: &Assets) {
    let layout = create_game_layout(frame, area, " Turmac Roll ", Color::LightCyan, 10, 22);

    render_play_field(
        frame,
        layout.content,
        &session.run,
        session.high_score,
        assets,
    );
    render_status_bar(
        frame,
        layout.status_bar,
        "Roll!",
        Color::LightCyan,
        &[("[←/→]", "Move"), ("[Space]", "Jump"), ("[Q]", "Quit")],
    );
    render_info_panel(frame, layout.info_panel, session);
}

/// Cell in the render buffer with foreground and background colours.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

/// World-to-cell mapping for one render area.
struct Viewport {
    width: usize,
    height: usize,
    x_scale: f64,
    y_scale: f64,
}

impl Viewport {
    /// Cell rectangle covered by a hitbox as (col, row, cols, rows). The
    /// origin may lie outside the viewport; callers clip per cell.
    fn cells(&self, hitbox: &Hitbox) -> (i64, i64, usize, usize) {
        let col = (hitbox.x * self.x_scale).round() as i64;
        let row = (hitbox.y * self.y_scale).round() as i64;
        let cols = ((hitbox.width * self.x_scale).round() as usize).max(1);
        let rows = ((hitbox.height * self.y_scale).round() as usize).max(1);
        (col, row, cols, rows)
    }
}

/// Stamp a sprite over `hitbox`. Spaces are transparent.
fn draw_sprite(
    buffer: &mut [Vec<Cell>],
    view: &Viewport,
    hitbox: &Hitbox,
    sprite: &Sprite,
    frame: usize,
    color: Color,
) {
    let (col, row, cols, rows) = view.cells(hitbox);
    let fg = sprite.fill.unwrap_or(color);

    for dy in 0..rows {
        let y = row + dy as i64;
        if y < 0 || y >= view.height as i64 {
            continue;
        }
        for dx in 0..cols {
            let x = col + dx as i64;
            if x < 0 || x >= view.width as i64 {
                continue;
            }
            let ch = sprite.sample(frame, dx, dy, cols, rows);
            if ch != ' ' {
                let cell = &mut buffer[y as usize][x as usize];
                cell.ch = ch;
                cell.fg = fg;
            }
        }
    }
}

/// Build the play field cell buffer for `run` at `width` x `height` cells.
pub(crate) fn build_play_field(
    run: &RunState,
    high_score: u32,
    assets: &Assets,
    width: u16,
    height: u16,
) -> Vec<Vec<Cell>> {
    let config = &run.config;
    let view = Viewport {
        width: width as usize,
        height: height as usize,
        x_scale: width as f64 / config.field_width,
        y_scale: height as f64 / config.field_height,
    };
    let mut buffer = vec![vec![Cell::default(); view.width]; view.height];

    // ── Ground ────────────────────────────────────────────────────────
    let ground_row = ((config.ground_line() * view.y_scale).round() as usize).min(view.height);
    for (r, row) in buffer.iter_mut().enumerate().skip(ground_row) {
        for (c, cell) in row.iter_mut().enumerate() {
            let ch = if r == ground_row && c % 4 != 0 {
                GROUND_SUB
            } else {
                GROUND_CHAR
            };
            *cell = Cell {
                ch,
                fg: GROUND_FG,
                bg: GROUND_BG,
            };
        }
    }

    // ── Entities ──────────────────────────────────────────────────────
    for obstacle in &run.obstacles {
        draw_sprite(
            &mut buffer,
            &view,
            &obstacle.hitbox(),
            assets.obstacle(obstacle.variant),
            0,
            obstacle_color(obstacle.variant),
        );
    }
    for coin in &run.coins {
        draw_sprite(&mut buffer, &view, &coin.hitbox(), &assets.coin, 0, COIN_COLOR);
    }
    draw_sprite(
        &mut buffer,
        &view,
        &run.player.hitbox(),
        &assets.player,
        run.player.animation.frame,
        PLAYER_COLOR,
    );

    // ── HUD (top-left) ────────────────────────────────────────────────
    let hud = [
        format!("Score: {}", run.score()),
        format!("High Score: {}", high_score.max(run.score())),
    ];
    for (row, text) in hud.iter().enumerate() {
        if row >= view.height {
            break;
        }
        for (i, ch) in text.chars().enumerate() {
            let col = 1 + i;
            if col < view.width {
                buffer[row][col] = Cell {
                    ch,
                    fg: Color::White,
                    bg: Color::Reset,
                };
            }
        }
    }

    buffer
}

/// Render the play field into `area`.
fn render_play_field(
    frame: &mut Frame,
    area: Rect,
    run: &RunState,
    high_score: u32,
    assets: &Assets,
) {
    if area.height < 2 || area.width < 10 {
        return;
    }

    let buffer = build_play_field(run, high_score, assets, area.width, area.height);

    for (row_idx, row_data) in buffer.iter().enumerate() {
        let mut spans: Vec<Span> = Vec::new();
        let mut current_fg = Color::Reset;
        let mut current_bg = Color::Reset;
        let mut current_text = String::new();

        for &cell in row_data.iter() {
            if (cell.fg != current_fg || cell.bg != current_bg) && !current_text.is_empty() {
                spans.push(Span::styled(
                    std::mem::take(&mut current_text),
                    Style::default().fg(current_fg).bg(current_bg),
                ));
            }
            current_fg = cell.fg;
            current_bg = cell.bg;
            current_text.push(cell.ch);
        }
        if !current_text.is_empty() {
            spans.push(Span::styled(
                current_text,
                Style::default().fg(current_fg).bg(current_bg),
            ));
        }

        let row_area = Rect::new(area.x, area.y + row_idx as u16, area.width, 1);
        frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
    }
}

/// Render the info panel on the right side.
fn render_info_panel(frame: &mut Frame, area: Rect, session: &Session) {
    let inner = render_info_panel_frame(frame, area);
    let run = &session.run;
    let label = Style::default().fg(Color::DarkGray);

    let lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(
                run.score().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Best: ", label),
            Span::styled(
                session.high_score.to_string(),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(vec![
            Span::styled("Speed: ", label),
            Span::styled(run.speed.to_string(), Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            Span::styled("Run: ", label),
            Span::styled(
                session.runs_played.to_string(),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Legend:",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(" ● ", Style::default().fg(PLAYER_COLOR)),
            Span::styled("You", label),
        ]),
        Line::from(vec![
            Span::styled(" $ ", Style::default().fg(COIN_COLOR)),
            Span::styled(format!("Coin +{}", run.config.coin_reward), label),
        ]),
        Line::from(vec![
            Span::styled(
                " # ",
                Style::default().fg(obstacle_color(ObstacleVariant::Crate)),
            ),
            Span::styled("Obstacle", label),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::runner::{Coin, Obstacle};

    fn row_text(row: &[Cell]) -> String {
        row.iter().map(|c| c.ch).collect()
    }

    #[test]
    fn test_play_field_dimensions_and_ground() {
        let run = RunState::new(GameConfig::default(), 1);
        let buffer = build_play_field(&run, 0, &Assets::placeholders(), 80, 30);

        assert_eq!(buffer.len(), 30);
        assert!(buffer.iter().all(|row| row.len() == 80));
        // Ground line 560/600 of 30 rows = row 28
        assert!(buffer[29].iter().all(|c| c.ch == GROUND_CHAR));
        assert!(buffer[28].iter().all(|c| c.fg == GROUND_FG));
        assert_eq!(buffer[27][60].ch, ' ');
    }

    #[test]
    fn test_hud_shows_scores() {
        let mut run = RunState::new(GameConfig::default(), 1);
        run.player.score = 30;
        let buffer = build_play_field(&run, 120, &Assets::placeholders(), 80, 30);

        assert!(row_text(&buffer[0]).contains("Score: 30"));
        assert!(row_text(&buffer[1]).contains("High Score: 120"));
    }

    #[test]
    fn test_entities_are_drawn_with_placeholder_colours() {
        let mut run = RunState::new(GameConfig::default(), 1);
        run.obstacles.push(Obstacle {
            x: 600.0,
            y: 520.0,
            size: 40.0,
            variant: ObstacleVariant::Spikes,
        });
        run.coins.push(Coin {
            x: 400.0,
            y: 300.0,
            size: 30.0,
        });
        let buffer = build_play_field(&run, 0, &Assets::placeholders(), 80, 30);

        // Player at (200, 520) -> col 20, row 26
        assert_eq!(buffer[26][20].fg, Color::Blue);
        // Obstacle at (600, 520) -> col 60, row 26
        assert_eq!(buffer[26][60].fg, Color::Red);
        // Coin at (400, 300) -> col 40, row 15
        assert_eq!(buffer[15][40].fg, Color::Red);
    }

    #[test]
    fn test_partly_off_screen_entities_are_clipped() {
        let mut run = RunState::new(GameConfig::default(), 1);
        run.obstacles.push(Obstacle {
            x: -20.0,
            y: 520.0,
            size: 40.0,
            variant: ObstacleVariant::Crate,
        });
        run.coins.push(Coin {
            x: 790.0,
            y: 300.0,
            size: 30.0,
        });
        let buffer = build_play_field(&run, 0, &Assets::placeholders(), 80, 30);

        assert_eq!(buffer[26][0].fg, Color::Red);
        assert_eq!(buffer[26][2].ch, ' ');
        assert_eq!(buffer[15][79].fg, Color::Red);
    }
}
