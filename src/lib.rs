//! Grid Snake - a grid snake game driven by a per-tick update pipeline
//!
//! This library provides:
//! - Core game logic (game module): entities, the tick pipeline and the game loop
//! - Drawing (render module): the `Surface` seam, sprite tables and the terminal canvas
//! - Keyboard mapping (input module)
//! - Session statistics (metrics module)
//! - The interactive terminal mode (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
