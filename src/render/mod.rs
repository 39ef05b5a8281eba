//! Drawing: the surface abstraction, sprite tables and the terminal front-end

pub mod canvas;
pub mod renderer;
pub mod sprites;
pub mod surface;

pub use canvas::TerminalCanvas;
pub use renderer::Renderer;
pub use sprites::SpriteSet;
pub use surface::{DrawOp, Image, RecordingSurface, Rgb, Surface};
