//! Collision and termination system.
//!
//! Runs after the head has moved. It looks one step ahead along the direction
//! that was at the front of the queue when the tick began (or the current
//! one) and stops the game when that step would leave the board or hit the
//! body. It also keeps the score current.

use crate::game::direction::Direction;
use crate::game::grid::Grid;
use crate::game::state::{EndReason, GameState, Settings, Snake, score_for};

/// `queued` is the front of the input queue as it was before the input stage
/// consumed anything.
pub fn collision_system(
    state: GameState,
    queued: Option<Direction>,
    grid: Grid,
    initial_len: usize,
) -> GameState {
    // game_on only ever goes false once
    if !state.settings.game_on {
        return state;
    }

    let score = score_for(state.snake.len(), initial_len);
    let settings = match detect_collision(&state.snake, queued, grid) {
        Some(reason) => state.settings.ended(reason, score),
        None => Settings {
            score,
            ..state.settings
        },
    };

    GameState { settings, ..state }
}

fn detect_collision(snake: &Snake, queued: Option<Direction>, grid: Grid) -> Option<EndReason> {
    let current = snake.direction;
    let intended = queued.unwrap_or(current);
    if intended == current.opposite() {
        return None;
    }

    let candidate = snake.head()?.next(intended);
    if !grid.contains(candidate) {
        Some(EndReason::Wall)
    } else if snake.body_without_tail().contains(&candidate) {
        Some(EndReason::SelfCollision)
    } else {
        None
    }
}
