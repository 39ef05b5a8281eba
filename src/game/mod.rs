//! Core game logic for the grid snake game
//!
//! Everything here is independent of the terminal. Drawing goes through the
//! [`crate::render::Surface`] trait, so the whole game can run headless.

pub mod config;
pub mod direction;
pub mod engine;
pub mod error;
pub mod grid;
pub mod queue;
pub mod state;
pub mod systems;

// Re-export commonly used types
pub use config::{Difficulty, GameConfig};
pub use direction::Direction;
pub use engine::{GameEngine, Phase};
pub use error::{GameError, Segment};
pub use grid::{Cell, Grid, Layout, Rect, SpriteCoord};
pub use queue::InputQueue;
pub use state::{Apple, EndReason, Entity, EntityId, GameState, Settings, Snake, SpriteRef};
