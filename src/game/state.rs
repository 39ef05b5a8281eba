use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use super::direction::Direction;
use super::grid::Cell;

/// Sprite metadata carried by drawable entities
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteRef {
    /// Symbolic image name, looked up in the sprite set
    pub name: String,
    /// Edge length in pixels of one sprite-sheet cell
    pub size: i32,
}

impl SpriteRef {
    pub fn new(name: impl Into<String>, size: i32) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

/// Why a game stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// Snake was about to leave the board
    Wall,
    /// Snake was about to run into itself
    SelfCollision,
    /// Snake fills the board; there is nowhere left for the apple
    BoardCleared,
}

/// Game-wide settings, one per game
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Delay between two ticks
    pub difficulty: Duration,
    pub game_on: bool,
    pub score: u32,
    pub end: Option<EndReason>,
}

impl Settings {
    pub fn new(difficulty: Duration) -> Self {
        Self {
            difficulty,
            game_on: true,
            score: 0,
            end: None,
        }
    }

    /// Copy of the settings with the game stopped for `reason`
    pub fn ended(&self, reason: EndReason, score: u32) -> Self {
        Self {
            game_on: false,
            score,
            end: Some(reason),
            ..self.clone()
        }
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body cells, with head at index 0
    pub position: Vec<Cell>,
    /// Current direction of movement
    pub direction: Direction,
    pub sprite: SpriteRef,
}

impl Snake {
    pub fn new(position: Vec<Cell>, direction: Direction, sprite: SpriteRef) -> Self {
        Self {
            position,
            direction,
            sprite,
        }
    }

    /// Get the head cell
    pub fn head(&self) -> Option<Cell> {
        self.position.first().copied()
    }

    /// Get the tail cell (last segment)
    pub fn tail(&self) -> Option<Cell> {
        self.position.last().copied()
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.position.len()
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_empty()
    }

    /// Cells that stay occupied once the tail moves on
    pub fn body_without_tail(&self) -> &[Cell] {
        let end = self.position.len().saturating_sub(1);
        &self.position[..end]
    }
}

/// The apple the snake is chasing
#[derive(Debug, Clone, PartialEq)]
pub struct Apple {
    pub position: Cell,
    pub sprite: SpriteRef,
}

impl Apple {
    pub fn new(position: Cell, sprite: SpriteRef) -> Self {
        Self { position, sprite }
    }
}

/// Identifier of the three entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityId {
    Settings,
    Snake,
    Apple,
}

impl EntityId {
    pub const ALL: [EntityId; 3] = [EntityId::Settings, EntityId::Snake, EntityId::Apple];

    pub fn as_str(self) -> &'static str {
        match self {
            EntityId::Settings => "settings",
            EntityId::Snake => "snake",
            EntityId::Apple => "apple",
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("unknown entity id: {s}"))
    }
}

/// Borrowed view of one entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Entity<'a> {
    Settings(&'a Settings),
    Snake(&'a Snake),
    Apple(&'a Apple),
}

impl<'a> Entity<'a> {
    pub fn id(&self) -> EntityId {
        match self {
            Entity::Settings(_) => EntityId::Settings,
            Entity::Snake(_) => EntityId::Snake,
            Entity::Apple(_) => EntityId::Apple,
        }
    }

    /// Sprite metadata, if the entity is drawable
    pub fn sprite(&self) -> Option<&'a SpriteRef> {
        match *self {
            Entity::Settings(_) => None,
            Entity::Snake(snake) => Some(&snake.sprite),
            Entity::Apple(apple) => Some(&apple.sprite),
        }
    }
}

/// Complete game state: exactly one of each entity
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub settings: Settings,
    pub snake: Snake,
    pub apple: Apple,
}

impl GameState {
    pub fn new(settings: Settings, snake: Snake, apple: Apple) -> Self {
        Self {
            settings,
            snake,
            apple,
        }
    }

    /// Entities in draw order
    pub fn entities(&self) -> impl Iterator<Item = Entity<'_>> {
        EntityId::ALL.into_iter().map(|id| self.get(id))
    }

    pub fn get(&self, id: EntityId) -> Entity<'_> {
        match id {
            EntityId::Settings => Entity::Settings(&self.settings),
            EntityId::Snake => Entity::Snake(&self.snake),
            EntityId::Apple => Entity::Apple(&self.apple),
        }
    }

    /// Check if a cell is occupied by the snake
    pub fn is_occupied_by_snake(&self, cell: Cell) -> bool {
        self.snake.position.contains(&cell)
    }

    /// Head of the snake sits on the apple
    pub fn snake_on_apple(&self) -> bool {
        self.snake.head() == Some(self.apple.position)
    }

    pub fn is_running(&self) -> bool {
        self.settings.game_on
    }
}

/// Score for a snake of `len` cells that started with `initial_len` cells
pub fn score_for(len: usize, initial_len: usize) -> u32 {
    u32::try_from(len.saturating_sub(initial_len)).unwrap_or(u32::MAX)
}
