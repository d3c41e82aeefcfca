use ratatui::style::Color;

/// Handle of a shape placed on a [`Surface`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub(crate) u64);

/// Axis-aligned box in canvas pixels; `x1`/`y1` are exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl PixelRect {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }
}

/// A retained drawing canvas
///
/// Shapes stay put until deleted. Shapes created later paint over
/// earlier ones.
pub trait Surface {
    fn create_rectangle(&mut self, bounds: PixelRect, fill: Color) -> ShapeId;

    fn create_oval(&mut self, bounds: PixelRect, fill: Color) -> ShapeId;

    /// Text centered on `(x, y)`
    fn create_text(&mut self, x: i32, y: i32, text: &str, color: Color) -> ShapeId;

    /// Remove a shape; unknown handles are ignored
    fn delete(&mut self, id: ShapeId);
}
