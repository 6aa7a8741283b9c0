//! ASCII sprite loading.
//!
//! A sprite file holds one or more frames of character art separated by a
//! line containing only `---`. Spaces are transparent. Frames are padded to a
//! common width and height so every frame of a sprite has the same size.
//! A sprite that fails to load is replaced by a solid placeholder block so a
//! missing asset never stops the game.

use crate::runner::ObstacleVariant;
use ratatui::style::Color;
use std::fs;
use std::io;
use std::path::Path;

const FRAME_SEPARATOR: &str = "---";
const PLACEHOLDER_CHAR: char = '\u{2588}'; // █

/// A fixed-size, possibly animated piece of character art.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    frames: Vec<Vec<Vec<char>>>,
    width: usize,
    height: usize,
    /// Set for placeholders; overrides the renderer's colour for the entity.
    pub fill: Option<Color>,
}

impl Sprite {
    /// Solid one-cell block that scales up to fill any entity.
    pub fn placeholder(color: Color) -> Self {
        Self {
            frames: vec![vec![vec![PLACEHOLDER_CHAR]]],
            width: 1,
            height: 1,
            fill: Some(color),
        }
    }

    /// Parse sprite text into frames.
    pub fn parse(text: &str) -> io::Result<Self> {
        let mut frames: Vec<Vec<Vec<char>>> = Vec::new();
        let mut current: Vec<Vec<char>> = Vec::new();

        for line in text.lines() {
            let line = line.trim_end_matches('\r');
            if line.trim() == FRAME_SEPARATOR {
                push_frame(&mut frames, std::mem::take(&mut current));
            } else {
                current.push(line.chars().collect());
            }
        }
        push_frame(&mut frames, current);

        if frames.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "sprite contains no frames",
            ));
        }

        let width = frames
            .iter()
            .flat_map(|f| f.iter().map(Vec::len))
            .max()
            .unwrap_or(0);
        let height = frames.iter().map(Vec::len).max().unwrap_or(0);

        for frame in &mut frames {
            frame.resize(height, Vec::new());
            for row in frame.iter_mut() {
                row.resize(width, ' ');
            }
        }

        Ok(Self {
            frames,
            width,
            height,
            fill: None,
        })
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_placeholder(&self) -> bool {
        self.fill.is_some()
    }

    /// Character at (`col`, `row`) when the frame is stretched to
    /// `dst_width` x `dst_height` cells (nearest neighbour). Out-of-range
    /// frame indices wrap.
    pub fn sample(
        &self,
        frame: usize,
        col: usize,
        row: usize,
        dst_width: usize,
        dst_height: usize,
    ) -> char {
        if dst_width == 0 || dst_height == 0 {
            return ' ';
        }
        let frame = &self.frames[frame % self.frames.len()];
        let src_row = (row * self.height / dst_height).min(self.height - 1);
        let src_col = (col * self.width / dst_width).min(self.width - 1);
        frame[src_row][src_col]
    }
}

/// Drop trailing blank rows and keep the frame if anything is left.
fn push_frame(frames: &mut Vec<Vec<Vec<char>>>, mut frame: Vec<Vec<char>>) {
    while frame
        .last()
        .is_some_and(|row| row.iter().all(|c| c.is_whitespace()))
    {
        frame.pop();
    }
    if !frame.is_empty() {
        frames.push(frame);
    }
}

/// Load a sprite file.
pub fn load_sprite(path: &Path) -> io::Result<Sprite> {
    let text = fs::read_to_string(path)?;
    Sprite::parse(&text)
}

/// Load a sprite, substituting a `fallback`-coloured placeholder on failure.
/// The failure is logged here, once per load.
pub fn load_sprite_or_placeholder(path: &Path, fallback: Color) -> Sprite {
    match load_sprite(path) {
        Ok(sprite) => {
            log::debug!(
                "Loaded sprite {} ({} frames, {}x{})",
                path.display(),
                sprite.frame_count(),
                sprite.width(),
                sprite.height()
            );
            sprite
        }
        Err(e) => {
            log::warn!("Error loading sprite {}: {}", path.display(), e);
            Sprite::placeholder(fallback)
        }
    }
}

/// Every sprite the game draws, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Assets {
    pub player: Sprite,
    pub obstacles: [Sprite; 3],
    pub coin: Sprite,
}

impl Assets {
    /// Animations fall back to blue blocks, static images to red ones. A
    /// missing directory is reported once rather than per sprite.
    pub fn load(dir: &Path) -> Self {
        if !dir.is_dir() {
            log::warn!(
                "Asset directory {} not found, using placeholders",
                dir.display()
            );
            return Self::placeholders();
        }
        let obstacle = |variant: ObstacleVariant| {
            load_sprite_or_placeholder(&dir.join(variant.sprite_file()), Color::Red)
        };
        Self {
            player: load_sprite_or_placeholder(&dir.join("player.txt"), Color::Blue),
            obstacles: ObstacleVariant::ALL.map(obstacle),
            coin: load_sprite_or_placeholder(&dir.join("coin.txt"), Color::Red),
        }
    }

    /// Placeholder-only set, for when no asset directory is available.
    pub fn placeholders() -> Self {
        Self {
            player: Sprite::placeholder(Color::Blue),
            obstacles: [
                Sprite::placeholder(Color::Red),
                Sprite::placeholder(Color::Red),
                Sprite::placeholder(Color::Red),
            ],
            coin: Sprite::placeholder(Color::Red),
        }
    }

    pub fn obstacle(&self, variant: ObstacleVariant) -> &Sprite {
        match variant {
            ObstacleVariant::Crate => &self.obstacles[0],
            ObstacleVariant::Spikes => &self.obstacles[1],
            ObstacleVariant::Boulder => &self.obstacles[2],
        }
    }
}
