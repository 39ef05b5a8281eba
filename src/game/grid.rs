//! Board geometry: cells, bounds, free-cell search and pixel conversion.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::error::GameError;

/// Rows on the sprite sheet; sprite rows are counted from the bottom.
const SPRITE_SHEET_ROWS: i32 = 4;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell shifted by an offset
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Adjacent cell in a direction
    pub fn next(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        self.moved_by(dx, dy)
    }

    /// Offset from self to other
    pub fn offset_to(&self, other: Cell) -> (i32, i32) {
        (other.x - self.x, other.y - self.y)
    }
}

/// Board dimensions in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn cell_count(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }

    /// Check if a cell is within the grid bounds
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height
    }

    /// Every cell of the board, column by column.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let height = self.height;
        (0..self.width).flat_map(move |x| (0..height).map(move |y| Cell::new(x, y)))
    }

    /// All board cells not present in `occupied`, in column-major order.
    pub fn empty_cells(&self, occupied: &[Cell]) -> Vec<Cell> {
        self.cells().filter(|cell| !occupied.contains(cell)).collect()
    }

    /// Pick a free cell uniformly at random
    pub fn random_empty_cell<R: Rng + ?Sized>(
        &self,
        occupied: &[Cell],
        rng: &mut R,
    ) -> Result<Cell, GameError> {
        self.empty_cells(occupied)
            .choose(rng)
            .copied()
            .ok_or(GameError::NoEmptyCell)
    }
}

/// A pixel rectangle on the drawing surface; origin is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Cell of the sprite sheet, 1-based column and row, rows counted from the bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteCoord {
    pub col: i32,
    pub row: i32,
}

impl SpriteCoord {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }
}

/// Maps world cells to pixels on the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub grid: Grid,
    pub cell_size: i32,
}

impl Layout {
    pub fn new(grid: Grid, cell_size: i32) -> Self {
        Self { grid, cell_size }
    }

    /// Surface size in pixels
    pub fn pixel_size(&self) -> (i32, i32) {
        (
            self.grid.width * self.cell_size,
            self.grid.height * self.cell_size,
        )
    }

    /// Pixel rectangle covering the whole surface
    pub fn full_rect(&self) -> Rect {
        let (width, height) = self.pixel_size();
        Rect::new(0, 0, width, height)
    }

    /// Destination rectangle of a world cell.
    ///
    /// World `y` grows upwards while surface `y` grows downwards, so rows are
    /// flipped.
    pub fn cell_rect(&self, cell: Cell) -> Rect {
        Rect::new(
            cell.x * self.cell_size,
            (self.grid.height - 1 - cell.y) * self.cell_size,
            self.cell_size,
            self.cell_size,
        )
    }

    /// Source rectangle of a sprite-sheet cell
    pub fn sprite_source(coord: SpriteCoord, sprite_size: i32) -> Rect {
        Rect::new(
            (coord.col - 1) * sprite_size,
            (SPRITE_SHEET_ROWS - coord.row) * sprite_size,
            sprite_size,
            sprite_size,
        )
    }

    /// Inverse of [`Layout::sprite_source`]
    pub fn sprite_coord(source: Rect) -> Option<SpriteCoord> {
        if source.width <= 0 || source.height <= 0 {
            return None;
        }
        Some(SpriteCoord::new(
            source.x / source.width + 1,
            SPRITE_SHEET_ROWS - source.y / source.height,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn test_next_changes_one_axis() {
        let grid = Grid::new(17, 15);
        for cell in grid.cells() {
            for direction in Direction::ALL {
                let next = cell.next(direction);
                let dx = (next.x - cell.x).abs();
                let dy = (next.y - cell.y).abs();
                assert_eq!(dx + dy, 1, "{cell:?} {direction:?} -> {next:?}");
            }
        }
    }

    #[test]
    fn test_next_follows_world_orientation() {
        let cell = Cell::new(7, 3);
        assert_eq!(cell.next(Direction::Up), Cell::new(7, 4));
        assert_eq!(cell.next(Direction::Down), Cell::new(7, 2));
        assert_eq!(cell.next(Direction::Left), Cell::new(6, 3));
        assert_eq!(cell.next(Direction::Right), Cell::new(8, 3));
    }

    #[test]
    fn test_bounds_checking() {
        let grid = Grid::new(17, 15);

        assert!(grid.contains(Cell::new(0, 0)));
        assert!(grid.contains(Cell::new(16, 14)));
        assert!(!grid.contains(Cell::new(-1, 0)));
        assert!(!grid.contains(Cell::new(17, 0)));
        assert!(!grid.contains(Cell::new(0, 15)));
        assert!(!grid.contains(Cell::new(0, -1)));
    }

    #[test]
    fn test_empty_cells_excludes_occupied() {
        let grid = Grid::new(17, 15);
        let occupied = vec![Cell::new(7, 3), Cell::new(7, 2), Cell::new(40, 40)];

        let empty = grid.empty_cells(&occupied);

        // the off-board cell does not count against the board
        assert_eq!(empty.len(), grid.cell_count() - 2);
        assert!(empty.iter().all(|cell| !occupied.contains(cell)));
        assert!(empty.iter().all(|cell| grid.contains(*cell)));

        let unique: HashSet<_> = empty.iter().collect();
        assert_eq!(unique.len(), empty.len());
    }

    #[test]
    fn test_empty_cells_order_is_column_major() {
        let grid = Grid::new(2, 2);
        assert_eq!(
            grid.empty_cells(&[]),
            vec![
                Cell::new(0, 0),
                Cell::new(0, 1),
                Cell::new(1, 0),
                Cell::new(1, 1)
            ]
        );
    }

    #[test]
    fn test_random_empty_cell() {
        let grid = Grid::new(3, 1);
        let mut rng = StdRng::seed_from_u64(7);
        let occupied = vec![Cell::new(0, 0), Cell::new(2, 0)];

        for _ in 0..20 {
            assert_eq!(
                grid.random_empty_cell(&occupied, &mut rng).unwrap(),
                Cell::new(1, 0)
            );
        }
    }

    #[test]
    fn test_random_empty_cell_full_board() {
        let grid = Grid::new(2, 1);
        let mut rng = StdRng::seed_from_u64(7);
        let occupied = vec![Cell::new(0, 0), Cell::new(1, 0)];

        assert_eq!(
            grid.random_empty_cell(&occupied, &mut rng),
            Err(GameError::NoEmptyCell)
        );
    }

    #[test]
    fn test_cell_rect_flips_rows() {
        let layout = Layout::new(Grid::new(17, 15), 36);

        assert_eq!(layout.cell_rect(Cell::new(0, 0)), Rect::new(0, 14 * 36, 36, 36));
        assert_eq!(layout.cell_rect(Cell::new(2, 14)), Rect::new(72, 0, 36, 36));
        assert_eq!(layout.full_rect(), Rect::new(0, 0, 17 * 36, 15 * 36));
    }

    #[test]
    fn test_sprite_source() {
        assert_eq!(
            Layout::sprite_source(SpriteCoord::new(4, 4), 64),
            Rect::new(192, 0, 64, 64)
        );
        assert_eq!(
            Layout::sprite_source(SpriteCoord::new(1, 1), 64),
            Rect::new(0, 192, 64, 64)
        );

        let coord = SpriteCoord::new(3, 2);
        assert_eq!(
            Layout::sprite_coord(Layout::sprite_source(coord, 64)),
            Some(coord)
        );
        assert_eq!(Layout::sprite_coord(Rect::new(0, 0, 0, 0)), None);
    }
}
