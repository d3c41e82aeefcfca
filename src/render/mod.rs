//! Drawing the game into the terminal
//!
//! [`SceneSync`] turns model changes into shape creates and deletes on a
//! [`Surface`]; [`TerminalCanvas`] is the surface used on screen and
//! [`Renderer`] frames it with a status line.

pub mod canvas;
pub mod renderer;
pub mod scene;
pub mod surface;

pub use canvas::TerminalCanvas;
pub use renderer::Renderer;
pub use scene::SceneSync;
pub use surface::{PixelRect, ShapeId, Surface};
