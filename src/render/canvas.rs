//! Cell-resolution [`Surface`] for the terminal.
//!
//! Pixel rectangles are snapped to board cells using the layout's cell size.
//! Each board cell becomes two terminal columns so the board keeps a roughly
//! square aspect. Sprite draws are turned into glyphs: the snake sheet cell
//! picks a box-drawing character, the apple becomes a dot.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::game::{Layout, Rect, SpriteCoord};

use super::sprites;
use super::surface::{Image, Rgb, Surface};

/// Terminal columns per board cell
pub const COLUMNS_PER_CELL: usize = 2;

const APPLE_FG: Rgb = Rgb(200, 30, 30);
const SNAKE_FG: Rgb = Rgb(40, 70, 190);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Glyph {
    symbol: [char; COLUMNS_PER_CELL],
    fg: Option<Rgb>,
    bg: Option<Rgb>,
    bold: bool,
}

impl Glyph {
    const BLANK: Glyph = Glyph {
        symbol: [' '; COLUMNS_PER_CELL],
        fg: None,
        bg: None,
        bold: false,
    };
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb.0, rgb.1, rgb.2)
    }
}

/// Raster of board cells that ratatui can print
#[derive(Debug, Clone)]
pub struct TerminalCanvas {
    cell_size: i32,
    columns: usize,
    rows: usize,
    glyphs: Vec<Glyph>,
}

impl TerminalCanvas {
    pub fn new(layout: Layout) -> Self {
        let columns = layout.grid.width.max(0) as usize;
        let rows = layout.grid.height.max(0) as usize;
        Self {
            cell_size: layout.cell_size.max(1),
            columns,
            rows,
            glyphs: vec![Glyph::BLANK; columns * rows],
        }
    }

    /// Size in terminal columns and rows
    pub fn size(&self) -> (u16, u16) {
        let width = self.columns * COLUMNS_PER_CELL;
        (
            u16::try_from(width).unwrap_or(u16::MAX),
            u16::try_from(self.rows).unwrap_or(u16::MAX),
        )
    }

    /// Whether nothing has been drawn since creation or the last clear
    pub fn is_blank(&self) -> bool {
        self.glyphs.iter().all(|glyph| *glyph == Glyph::BLANK)
    }

    /// Characters of one canvas row, top row first
    pub fn row_text(&self, row: usize) -> String {
        self.row(row)
            .iter()
            .flat_map(|glyph| glyph.symbol)
            .collect()
    }

    /// Background of the cell at a canvas column and row
    pub fn background(&self, column: usize, row: usize) -> Option<Rgb> {
        self.index(column, row).and_then(|i| self.glyphs[i].bg)
    }

    pub fn lines(&self) -> Vec<Line<'static>> {
        (0..self.rows)
            .map(|row| {
                let spans: Vec<Span<'static>> = self
                    .row(row)
                    .iter()
                    .map(|glyph| {
                        let mut style = Style::default();
                        if let Some(fg) = glyph.fg {
                            style = style.fg(fg.into());
                        }
                        if let Some(bg) = glyph.bg {
                            style = style.bg(bg.into());
                        }
                        if glyph.bold {
                            style = style.add_modifier(Modifier::BOLD);
                        }
                        Span::styled(glyph.symbol.iter().collect::<String>(), style)
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }

    fn row(&self, row: usize) -> &[Glyph] {
        if row >= self.rows {
            return &[];
        }
        let start = row * self.columns;
        &self.glyphs[start..start + self.columns]
    }

    fn index(&self, column: usize, row: usize) -> Option<usize> {
        (column < self.columns && row < self.rows).then(|| row * self.columns + column)
    }

    /// Canvas cells covered by a pixel rectangle, clipped to the canvas
    fn covered(&self, rect: Rect) -> Vec<usize> {
        if rect.width <= 0 || rect.height <= 0 {
            return Vec::new();
        }
        let cs = self.cell_size;
        let first_col = rect.x.div_euclid(cs).max(0);
        let last_col = (rect.x + rect.width - 1).div_euclid(cs);
        let first_row = rect.y.div_euclid(cs).max(0);
        let last_row = (rect.y + rect.height - 1).div_euclid(cs);

        let mut cells = Vec::new();
        for row in first_row..=last_row {
            for column in first_col..=last_col {
                if let Some(i) = self.index(column as usize, row as usize) {
                    cells.push(i);
                }
            }
        }
        cells
    }
}

/// Glyph for one cell of the snake sprite sheet
fn snake_symbol(coord: SpriteCoord) -> [char; COLUMNS_PER_CELL] {
    match (coord.col, coord.row) {
        // heads
        (4, 4) => ['▲', ' '],
        (5, 4) => ['▶', ' '],
        (5, 3) => ['▼', ' '],
        (4, 3) => ['◀', ' '],
        // body
        (1, 3) => ['╚', '═'],
        (1, 4) => ['╔', '═'],
        (2, 4) => ['═', '═'],
        (3, 4) => ['╗', ' '],
        (3, 3) => ['║', ' '],
        (3, 2) => ['╝', ' '],
        // tails
        (4, 2) => ['╹', ' '],
        (5, 2) => ['╺', '═'],
        (5, 1) => ['╻', ' '],
        (4, 1) => ['╸', ' '],
        _ => ['█', '█'],
    }
}

impl Surface for TerminalCanvas {
    fn clear_rect(&mut self, rect: Rect) {
        for i in self.covered(rect) {
            self.glyphs[i] = Glyph::BLANK;
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        for i in self.covered(rect) {
            self.glyphs[i] = Glyph {
                bg: Some(color),
                ..Glyph::BLANK
            };
        }
    }

    fn draw_image(&mut self, image: &Image, source: Option<Rect>, dest: Rect) {
        let (symbol, fg) = match image.name.as_str() {
            sprites::APPLE => (['●', ' '], APPLE_FG),
            sprites::SNAKE => {
                let symbol = source
                    .and_then(Layout::sprite_coord)
                    .map_or(['█', '█'], snake_symbol);
                (symbol, SNAKE_FG)
            }
            _ => (['?', ' '], Rgb::BLACK),
        };

        for i in self.covered(dest) {
            let glyph = &mut self.glyphs[i];
            glyph.symbol = symbol;
            glyph.fg = Some(fg);
            glyph.bold = true;
        }
    }

    fn fill_text(&mut self, text: &str, x: i32, y: i32, color: Rgb) {
        // (x, y) is the baseline start, so the text sits in the cell row above y
        let row = (y - 1).div_euclid(self.cell_size);
        let column = x.div_euclid(self.cell_size);
        if row < 0 || column < 0 {
            return;
        }

        let chars: Vec<char> = text.chars().collect();
        for (offset, pair) in chars.chunks(COLUMNS_PER_CELL).enumerate() {
            let Some(i) = self.index(column as usize + offset, row as usize) else {
                break;
            };
            let glyph = &mut self.glyphs[i];
            glyph.symbol = [' '; COLUMNS_PER_CELL];
            for (slot, ch) in glyph.symbol.iter_mut().zip(pair) {
                *slot = *ch;
            }
            glyph.fg = Some(color);
            glyph.bold = true;
        }
    }
}
