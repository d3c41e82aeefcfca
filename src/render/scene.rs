//! Keeps a [`Surface`] in step with the game model
//!
//! The model only holds grid cells. After each update the scene works out
//! which shapes should be visible, deletes the ones that no longer are and
//! draws the new ones, so a plain move costs one create and one delete.

use std::collections::HashMap;

use super::surface::{PixelRect, ShapeId, Surface};
use crate::game::{Cell, GameConfig, GameState, Phase};

/// Something visible on the board, keyed by what it shows
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Sprite {
    Segment(Cell),
    /// The head that caused the game over, drawn over whatever it hit
    CrashedHead(Cell),
    Apple(Cell),
    Label { line: u8, text: String },
}

pub struct SceneSync {
    config: GameConfig,
    drawn: HashMap<Sprite, ShapeId>,
}

impl SceneSync {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            drawn: HashMap::new(),
        }
    }

    /// Paint the playing field inside the border
    pub fn draw_board(&self, surface: &mut impl Surface) -> ShapeId {
        let tile = self.tile_px();
        let width = i32::try_from(self.config.window_width()).unwrap_or(i32::MAX);
        let height = i32::try_from(self.config.window_height()).unwrap_or(i32::MAX);
        surface.create_rectangle(
            PixelRect::new(tile, tile, width - tile, height - tile),
            self.config.background_color,
        )
    }

    /// Bring the surface up to date with `state`
    pub fn sync(&mut self, state: &GameState, surface: &mut impl Surface) {
        let wanted = self.sprites(state);

        self.drawn.retain(|sprite, id| {
            let keep = wanted.contains(sprite);
            if !keep {
                surface.delete(*id);
            }
            keep
        });

        for sprite in wanted {
            if !self.drawn.contains_key(&sprite) {
                let id = self.draw(&sprite, surface);
                self.drawn.insert(sprite, id);
            }
        }
    }

    /// Number of shapes this scene currently owns on the surface
    pub fn drawn_count(&self) -> usize {
        self.drawn.len()
    }

    /// Everything that should be visible, in paint order
    fn sprites(&self, state: &GameState) -> Vec<Sprite> {
        let mut sprites: Vec<Sprite> = state
            .snake
            .segments()
            .skip(1)
            .map(Sprite::Segment)
            .collect();
        let head = state.snake.head();

        match state.phase {
            Phase::Active => sprites.push(Sprite::Segment(head)),
            Phase::GameOver(_) => sprites.push(Sprite::CrashedHead(head)),
        }

        if let Some(apple) = state.apple {
            sprites.push(Sprite::Apple(apple));
        }

        if !state.is_active() {
            sprites.push(Sprite::Label {
                line: 0,
                text: format!("Game over! Final length: {}", state.snake.len()),
            });
            sprites.push(Sprite::Label {
                line: 1,
                text: "Press any key to play again!".to_string(),
            });
        }

        sprites
    }

    fn draw(&self, sprite: &Sprite, surface: &mut impl Surface) -> ShapeId {
        match sprite {
            Sprite::Segment(cell) => {
                surface.create_rectangle(self.tile_bounds(*cell), self.config.snake_color)
            }
            Sprite::CrashedHead(cell) => {
                surface.create_rectangle(self.tile_bounds(*cell), self.config.game_over_color)
            }
            Sprite::Apple(cell) => {
                surface.create_oval(self.tile_bounds(*cell), self.config.apple_color)
            }
            Sprite::Label { line, text } => {
                // one tile per line: the terminal cannot place text between rows
                let x = i32::try_from(self.config.window_width() / 2).unwrap_or(i32::MAX);
                let y = i32::try_from(self.config.window_height() / 2).unwrap_or(i32::MAX)
                    + i32::from(*line) * self.tile_px();
                surface.create_text(x, y, text, self.config.text_color)
            }
        }
    }

    fn tile_px(&self) -> i32 {
        i32::try_from(self.config.tile_width).unwrap_or(i32::MAX)
    }

    fn tile_bounds(&self, cell: Cell) -> PixelRect {
        let tile = self.tile_px();
        PixelRect::new(
            cell.x * tile,
            cell.y * tile,
            (cell.x + 1) * tile,
            (cell.y + 1) * tile,
        )
    }
}
