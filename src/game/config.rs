use anyhow::{Context, Result, ensure};
use ratatui::layout::Size;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Largest board edge; the terminal canvas must fit in `u16` cells
pub const MAX_TILES: u16 = 1000;

/// Largest tile in pixels; keeps canvas pixel math inside `i32`
pub const MAX_TILE_WIDTH: u32 = 1024;

/// Configuration for the game board, timing and palette
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Snake updates per second
    pub frames_per_second: u32,
    /// Width of one tile in canvas pixels
    pub tile_width: u32,
    /// Horizontal tiles, not counting the border
    pub x_tiles: u16,
    /// Vertical tiles, not counting the border
    pub y_tiles: u16,

    pub border_color: Color,
    pub background_color: Color,
    pub apple_color: Color,
    pub snake_color: Color,
    /// Color of the head segment that caused the game over
    pub game_over_color: Color,
    pub text_color: Color,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            frames_per_second: 5,
            tile_width: 42,
            x_tiles: 15,
            y_tiles: 15,
            border_color: Color::Black,
            background_color: Color::White,
            apple_color: Color::Green,
            snake_color: Color::Red,
            game_over_color: Color::Rgb(255, 165, 0),
            text_color: Color::Black,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom board size
    pub fn new(x_tiles: u16, y_tiles: u16) -> Self {
        Self {
            x_tiles,
            y_tiles,
            ..Default::default()
        }
    }

    /// Read a JSON configuration file; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.x_tiles >= 2 && self.y_tiles >= 2,
            "board must be at least 2x2 tiles, got {}x{}",
            self.x_tiles,
            self.y_tiles
        );
        ensure!(
            self.x_tiles <= MAX_TILES && self.y_tiles <= MAX_TILES,
            "board must be at most {MAX_TILES}x{MAX_TILES} tiles, got {}x{}",
            self.x_tiles,
            self.y_tiles
        );
        ensure!(
            (1..=MAX_TILE_WIDTH).contains(&self.tile_width),
            "tile width must be between 1 and {MAX_TILE_WIDTH}, got {}",
            self.tile_width
        );
        ensure!(
            (1..=1000).contains(&self.frames_per_second),
            "frames per second must be between 1 and 1000, got {}",
            self.frames_per_second
        );
        Ok(())
    }

    /// Canvas width in pixels, including a one-tile border on each side
    pub fn window_width(&self) -> u32 {
        self.tile_width
            .saturating_mul(u32::from(self.x_tiles).saturating_add(2))
    }

    /// Canvas height in pixels, including a one-tile border on each side
    pub fn window_height(&self) -> u32 {
        self.tile_width
            .saturating_mul(u32::from(self.y_tiles).saturating_add(2))
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.frames_per_second.max(1)))
    }

    /// Terminal cells needed to show the canvas: two columns and one row per tile
    pub fn canvas_size(&self) -> Size {
        Size {
            width: self.x_tiles.saturating_add(2).saturating_mul(2),
            height: self.y_tiles.saturating_add(2),
        }
    }
}
