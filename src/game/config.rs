use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail, ensure};
use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::grid::{Cell, Grid, Layout};

/// Board width in cells
pub const WORLD_WIDTH: i32 = 17;
/// Board height in cells
pub const WORLD_HEIGHT: i32 = 15;
/// Edge length of one board cell in pixels
pub const CELL_SIZE: i32 = 36;
/// Edge length of one cell of the snake sprite sheet in pixels
pub const SPRITE_SIZE: i32 = 64;

/// Tick delay presets offered by the difficulty selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    /// 400ms between ticks
    Slow,
    /// 250ms between ticks
    #[default]
    Normal,
    /// 150ms between ticks
    Fast,
    /// 80ms between ticks
    VeryFast,
    /// Any other delay, in milliseconds
    Custom(u64),
}

impl Difficulty {
    /// Delay between the end of one tick and the start of the next
    pub fn tick_delay(&self) -> Duration {
        match self {
            Self::Slow => Duration::from_millis(400),
            Self::Normal => Duration::from_millis(250),
            Self::Fast => Duration::from_millis(150),
            Self::VeryFast => Duration::from_millis(80),
            Self::Custom(ms) => Duration::from_millis(*ms),
        }
    }

    /// Preset matching a delay, falling back to `Custom`
    pub fn from_millis(ms: u64) -> Self {
        [Self::Slow, Self::Normal, Self::Fast, Self::VeryFast]
            .into_iter()
            .find(|preset| preset.tick_delay().as_millis() == u128::from(ms))
            .unwrap_or(Self::Custom(ms))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Slow => "Slow",
            Self::Normal => "Normal",
            Self::Fast => "Fast",
            Self::VeryFast => "Very Fast",
            Self::Custom(_) => "Custom",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}ms)", self.as_str(), self.tick_delay().as_millis())
    }
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub world_width: i32,
    /// Height of the game grid
    pub world_height: i32,
    /// Pixel size of one grid cell on the drawing surface
    pub cell_size: i32,
    /// Pixel size of one cell of the snake sprite sheet
    pub sprite_size: i32,
    /// Snake body at game start, head first
    pub initial_snake: Vec<Cell>,
    /// Direction of the snake at game start
    pub initial_direction: Direction,
    /// Default delay between ticks, in milliseconds
    pub difficulty_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            cell_size: CELL_SIZE,
            sprite_size: SPRITE_SIZE,
            initial_snake: vec![Cell::new(7, 3), Cell::new(7, 2)],
            initial_direction: Direction::Up,
            difficulty_ms: 250,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            world_width: width,
            world_height: height,
            ..Default::default()
        }
    }

    /// Read a JSON configuration file; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig =
            serde_json::from_str(&json).with_context(|| format!("Invalid config in {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.world_width, self.world_height)
    }

    pub fn layout(&self) -> Layout {
        Layout::new(self.grid(), self.cell_size)
    }

    pub fn difficulty(&self) -> Difficulty {
        Difficulty::from_millis(self.difficulty_ms)
    }

    pub fn initial_len(&self) -> usize {
        self.initial_snake.len()
    }

    /// Check the configuration describes a playable board
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.world_width > 0 && self.world_height > 0,
            "grid must be at least 1x1, got {}x{}",
            self.world_width,
            self.world_height
        );
        ensure!(self.cell_size > 0, "cell size must be positive");
        ensure!(self.sprite_size > 0, "sprite size must be positive");
        ensure!(self.difficulty_ms > 0, "tick delay must be positive");
        ensure!(!self.initial_snake.is_empty(), "initial snake is empty");

        let grid = self.grid();
        if let Some(cell) = self.initial_snake.iter().find(|cell| !grid.contains(**cell)) {
            bail!("initial snake cell {:?} is outside the grid", cell);
        }

        let unique: HashSet<_> = self.initial_snake.iter().collect();
        ensure!(
            unique.len() == self.initial_snake.len(),
            "initial snake overlaps itself"
        );

        for pair in self.initial_snake.windows(2) {
            let (dx, dy) = pair[0].offset_to(pair[1]);
            ensure!(
                dx.abs() + dy.abs() == 1,
                "initial snake is not contiguous between {:?} and {:?}",
                pair[0],
                pair[1]
            );
        }

        ensure!(
            self.initial_snake.len() < grid.cell_count(),
            "initial snake leaves no room for the apple"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.world_width, 17);
        assert_eq!(config.world_height, 15);
        assert_eq!(config.initial_len(), 2);
        assert_eq!(config.initial_direction, Direction::Up);
        assert_eq!(config.difficulty(), Difficulty::Normal);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(20, 10);
        assert_eq!(config.grid(), Grid::new(20, 10));
        assert_eq!(config.layout().pixel_size(), (20 * CELL_SIZE, 10 * CELL_SIZE));
    }

    #[test]
    fn test_difficulty_presets() {
        assert_eq!(Difficulty::from_millis(400), Difficulty::Slow);
        assert_eq!(Difficulty::from_millis(80), Difficulty::VeryFast);
        assert_eq!(Difficulty::from_millis(333), Difficulty::Custom(333));
        assert_eq!(
            Difficulty::Custom(333).tick_delay(),
            Duration::from_millis(333)
        );
        assert_eq!(Difficulty::Fast.to_string(), "Fast (150ms)");
    }

    #[test]
    fn test_validate_rejects_bad_snakes() {
        let mut config = GameConfig::default();
        config.initial_snake = vec![Cell::new(7, 3), Cell::new(7, 1)];
        assert!(config.validate().is_err());

        config.initial_snake = vec![Cell::new(0, 0), Cell::new(-1, 0)];
        assert!(config.validate().is_err());

        config.initial_snake = vec![];
        assert!(config.validate().is_err());

        let mut full = GameConfig::new(2, 1);
        full.initial_snake = vec![Cell::new(0, 0), Cell::new(1, 0)];
        assert!(full.validate().is_err());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "world_width": 10, "initial_direction": "ArrowRight",
                 "initial_snake": [{{"x": 3, "y": 3}}, {{"x": 2, "y": 3}}] }}"#
        )
        .unwrap();

        let config = GameConfig::load(file.path()).unwrap();

        assert_eq!(config.world_width, 10);
        assert_eq!(config.world_height, WORLD_HEIGHT);
        assert_eq!(config.initial_direction, Direction::Right);
        assert_eq!(config.initial_snake[0], Cell::new(3, 3));
    }

    #[test]
    fn test_load_rejects_unknown_direction() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "initial_direction": "ArrowNorth" }}"#).unwrap();

        let err = GameConfig::load(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("ArrowNorth"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(GameConfig::load(&dir.path().join("missing.json")).is_err());
    }
}
