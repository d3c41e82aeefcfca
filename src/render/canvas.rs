use std::collections::BTreeMap;

use ratatui::{
    buffer::{Buffer, Cell as BufferCell},
    layout::{Rect, Size},
    style::{Color, Modifier},
    widgets::Widget,
};

use super::surface::{PixelRect, ShapeId, Surface};
use crate::game::GameConfig;

/// Terminal columns per tile; a tile is two columns by one row so it looks square
const COLUMNS_PER_TILE: i32 = 2;

#[derive(Debug, Clone, PartialEq)]
enum Shape {
    Rectangle { bounds: PixelRect, fill: Color },
    Oval { bounds: PixelRect, fill: Color },
    Text { x: i32, y: i32, text: String, color: Color },
}

/// A [`Surface`] rasterized onto terminal cells
///
/// Pixel coordinates are scaled so one tile of `tile_width` pixels becomes
/// two columns by one row.
#[derive(Debug, Clone)]
pub struct TerminalCanvas {
    width_px: u32,
    height_px: u32,
    tile_px: i32,
    background: Color,
    shapes: BTreeMap<ShapeId, Shape>,
    next_id: u64,
}

impl TerminalCanvas {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            width_px: config.window_width(),
            height_px: config.window_height(),
            tile_px: i32::try_from(config.tile_width).unwrap_or(i32::MAX).max(1),
            background: config.border_color,
            shapes: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// Terminal cells covered by the whole canvas
    pub fn size(&self) -> Size {
        let columns = self.column(i32::try_from(self.width_px).unwrap_or(i32::MAX));
        let rows = self.row(i32::try_from(self.height_px).unwrap_or(i32::MAX));
        Size {
            width: u16::try_from(columns).unwrap_or(u16::MAX),
            height: u16::try_from(rows).unwrap_or(u16::MAX),
        }
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    fn insert(&mut self, shape: Shape) -> ShapeId {
        let id = ShapeId(self.next_id);
        self.next_id += 1;
        self.shapes.insert(id, shape);
        id
    }

    fn column(&self, px: i32) -> i32 {
        let column = i64::from(px) * i64::from(COLUMNS_PER_TILE) / i64::from(self.tile_px);
        i32::try_from(column).unwrap_or(if column < 0 { i32::MIN } else { i32::MAX })
    }

    fn row(&self, py: i32) -> i32 {
        py / self.tile_px
    }
}

impl Surface for TerminalCanvas {
    fn create_rectangle(&mut self, bounds: PixelRect, fill: Color) -> ShapeId {
        self.insert(Shape::Rectangle { bounds, fill })
    }

    fn create_oval(&mut self, bounds: PixelRect, fill: Color) -> ShapeId {
        self.insert(Shape::Oval { bounds, fill })
    }

    fn create_text(&mut self, x: i32, y: i32, text: &str, color: Color) -> ShapeId {
        self.insert(Shape::Text {
            x,
            y,
            text: text.to_string(),
            color,
        })
    }

    fn delete(&mut self, id: ShapeId) {
        self.shapes.remove(&id);
    }
}

/// Clipped view of the buffer region the canvas is drawn into
struct Raster<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Raster<'_> {
    fn cell_mut(&mut self, column: i32, row: i32) -> Option<&mut BufferCell> {
        let column = u16::try_from(column).ok()?;
        let row = u16::try_from(row).ok()?;
        if column >= self.area.width || row >= self.area.height {
            return None;
        }
        self.buf.cell_mut((self.area.x + column, self.area.y + row))
    }
}

impl Widget for &TerminalCanvas {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let size = self.size();
        let area = Rect {
            width: area.width.min(size.width),
            height: area.height.min(size.height),
            ..area
        };
        let mut raster = Raster { area, buf };

        for row in 0..i32::from(area.height) {
            for column in 0..i32::from(area.width) {
                if let Some(cell) = raster.cell_mut(column, row) {
                    cell.set_char(' ').set_bg(self.background);
                }
            }
        }

        for shape in self.shapes.values() {
            match shape {
                Shape::Rectangle { bounds, fill } => {
                    for row in self.row(bounds.y0)..self.row(bounds.y1) {
                        for column in self.column(bounds.x0)..self.column(bounds.x1) {
                            if let Some(cell) = raster.cell_mut(column, row) {
                                cell.set_char(' ').set_bg(*fill);
                            }
                        }
                    }
                }
                Shape::Oval { bounds, fill } => {
                    let (left, right) = (self.column(bounds.x0), self.column(bounds.x1));
                    let middle = left + (right - left) / 2;
                    for row in self.row(bounds.y0)..self.row(bounds.y1) {
                        for column in left..right {
                            let symbol = if column < middle { '◖' } else { '◗' };
                            if let Some(cell) = raster.cell_mut(column, row) {
                                cell.set_char(symbol).set_fg(*fill);
                            }
                        }
                    }
                }
                Shape::Text { x, y, text, color } => {
                    let width = i32::try_from(text.chars().count()).unwrap_or(i32::MAX);
                    let start = self.column(*x) - width / 2;
                    let row = self.row(*y);
                    for (column, symbol) in (start..).zip(text.chars()) {
                        if let Some(cell) = raster.cell_mut(column, row) {
                            cell.set_char(symbol)
                                .set_fg(*color)
                                .modifier
                                .insert(Modifier::BOLD);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> TerminalCanvas {
        TerminalCanvas::new(&GameConfig::new(4, 3))
    }

    fn render(canvas: &TerminalCanvas) -> Buffer {
        let area = Rect::new(0, 0, canvas.size().width, canvas.size().height);
        let mut buffer = Buffer::empty(area);
        canvas.render(area, &mut buffer);
        buffer
    }

    #[test]
    fn test_size_from_tiles() {
        // 6x5 tiles including the border
        assert_eq!(canvas().size(), Size::new(12, 5));
    }

    #[test]
    fn test_oversized_tiles_do_not_overflow() {
        let config = GameConfig {
            tile_width: 100_000_000,
            ..Default::default()
        };
        let canvas = TerminalCanvas::new(&config);
        // 17 tiles of 10^8 px: doubling the width overflows i32 without widening
        assert_eq!(canvas.size(), Size::new(34, 17));
        assert_eq!(canvas.column(i32::MAX), 42);
    }

    #[test]
    fn test_empty_canvas_shows_background() {
        let buffer = render(&canvas());
        assert_eq!(buffer[(0, 0)].bg, Color::Black);
        assert_eq!(buffer[(11, 4)].bg, Color::Black);
    }

    #[test]
    fn test_rectangle_covers_tile() {
        let mut canvas = canvas();
        // tile (2, 1)
        canvas.create_rectangle(PixelRect::new(84, 42, 126, 84), Color::Red);

        let buffer = render(&canvas);
        assert_eq!(buffer[(4, 1)].bg, Color::Red);
        assert_eq!(buffer[(5, 1)].bg, Color::Red);
        assert_eq!(buffer[(3, 1)].bg, Color::Black);
        assert_eq!(buffer[(6, 1)].bg, Color::Black);
        assert_eq!(buffer[(4, 2)].bg, Color::Black);
    }

    #[test]
    fn test_later_shapes_paint_over() {
        let mut canvas = canvas();
        canvas.create_rectangle(PixelRect::new(42, 42, 210, 168), Color::White);
        canvas.create_oval(PixelRect::new(42, 42, 84, 84), Color::Green);

        let buffer = render(&canvas);
        assert_eq!(buffer[(2, 1)].symbol(), "◖");
        assert_eq!(buffer[(3, 1)].symbol(), "◗");
        assert_eq!(buffer[(2, 1)].fg, Color::Green);
        assert_eq!(buffer[(2, 1)].bg, Color::White);
    }

    #[test]
    fn test_delete_removes_shape() {
        let mut canvas = canvas();
        let id = canvas.create_rectangle(PixelRect::new(42, 42, 84, 84), Color::Red);
        assert_eq!(canvas.shape_count(), 1);

        canvas.delete(id);
        canvas.delete(id);

        assert_eq!(canvas.shape_count(), 0);
        assert_eq!(render(&canvas)[(2, 1)].bg, Color::Black);
    }

    #[test]
    fn test_handles_are_unique() {
        let mut canvas = canvas();
        let a = canvas.create_text(0, 0, "a", Color::Black);
        canvas.delete(a);
        let b = canvas.create_text(0, 0, "b", Color::Black);
        assert_ne!(a, b);
    }

    #[test]
    fn test_text_is_centered() {
        let mut canvas = canvas();
        // column 6, row 2
        canvas.create_text(126, 105, "abcd", Color::Black);

        let buffer = render(&canvas);
        assert_eq!(buffer[(4, 2)].symbol(), "a");
        assert_eq!(buffer[(7, 2)].symbol(), "d");
        assert_eq!(buffer[(4, 2)].bg, Color::Black);
    }

    #[test]
    fn test_clipped_to_area() {
        let mut canvas = canvas();
        canvas.create_text(0, 0, "overflowing", Color::Black);
        canvas.create_rectangle(PixelRect::new(-42, -42, 500, 500), Color::Red);

        let area = Rect::new(0, 0, 4, 2);
        let mut buffer = Buffer::empty(Rect::new(0, 0, 6, 3));
        (&canvas).render(area, &mut buffer);

        assert_eq!(buffer[(3, 1)].bg, Color::Red);
        assert_eq!(buffer[(4, 1)].bg, Color::Reset);
        assert_eq!(buffer[(3, 2)].bg, Color::Reset);
    }
}
