use thiserror::Error;

use super::grid::Cell;

/// Which part of the snake a sprite lookup was made for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Body,
    Tail,
}

/// Internal invariant breaches.
///
/// These halt the game loop and are never produced by ordinary play: hitting a
/// wall or the snake itself ends the game through `Settings::game_on`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("unknown direction: {0:?}")]
    InvalidDirection(String),

    #[error("no {segment:?} sprite for neighbour offsets {offsets:?} at {cell:?}")]
    UnknownSpriteJunction {
        segment: Segment,
        cell: Cell,
        offsets: Vec<(i32, i32)>,
    },

    #[error("no empty cell left on the board")]
    NoEmptyCell,

    #[error("invalid game configuration: {0}")]
    InvalidConfig(String),
}
