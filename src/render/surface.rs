//! The drawing surface the render stage paints on.
//!
//! Coordinates are pixels with the origin in the top-left corner, like a 2D
//! canvas. Game code converts world cells with [`crate::game::Layout`].

use std::path::PathBuf;

use crate::game::Rect;

/// An RGB fill colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
}

/// A named image resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub name: String,
    pub source: PathBuf,
}

impl Image {
    pub fn new(name: impl Into<String>, source: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }
}

/// A 2D canvas-like drawing target
pub trait Surface {
    /// Reset a region to the empty background
    fn clear_rect(&mut self, rect: Rect);

    fn fill_rect(&mut self, rect: Rect, color: Rgb);

    /// Draw `source` of `image` (or the whole image) scaled into `dest`
    fn draw_image(&mut self, image: &Image, source: Option<Rect>, dest: Rect);

    /// Write text with its baseline starting at (x, y)
    fn fill_text(&mut self, text: &str, x: i32, y: i32, color: Rgb);
}

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    Clear(Rect),
    Fill(Rect, Rgb),
    Image {
        name: String,
        source: Option<Rect>,
        dest: Rect,
    },
    Text {
        text: String,
        x: i32,
        y: i32,
        color: Rgb,
    },
}

/// Surface that only records what was drawn.
///
/// Used for headless runs and to assert on renderer output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded image draws, as (name, dest) pairs
    pub fn images(&self) -> impl Iterator<Item = (&str, Rect)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Image { name, dest, .. } => Some((name.as_str(), *dest)),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn clear_rect(&mut self, rect: Rect) {
        self.ops.push(DrawOp::Clear(rect));
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.ops.push(DrawOp::Fill(rect, color));
    }

    fn draw_image(&mut self, image: &Image, source: Option<Rect>, dest: Rect) {
        self.ops.push(DrawOp::Image {
            name: image.name.clone(),
            source,
            dest,
        });
    }

    fn fill_text(&mut self, text: &str, x: i32, y: i32, color: Rgb) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            color,
        });
    }
}
