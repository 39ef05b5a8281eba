//! Apple consumption system.
//!
//! Runs first in the tick, before the head moves. A head resting on the apple
//! means the apple was reached on the previous tick: the snake keeps its tail
//! (grows by one once the head advances) and the apple moves to a free cell.

use log::info;
use rand::RngCore;

use crate::game::grid::Grid;
use crate::game::state::{Apple, EndReason, GameState, Snake, score_for};

pub fn apple_system(
    state: GameState,
    grid: Grid,
    initial_len: usize,
    rng: &mut dyn RngCore,
) -> GameState {
    let eating = state.snake_on_apple();
    let GameState {
        settings,
        snake,
        apple,
    } = state;

    if !eating {
        let mut position = snake.position;
        position.pop();
        let snake = Snake { position, ..snake };
        return GameState::new(settings, snake, apple);
    }

    match grid.random_empty_cell(&snake.position, rng) {
        Ok(cell) => {
            let apple = Apple {
                position: cell,
                ..apple
            };
            GameState::new(settings, snake, apple)
        }
        Err(err) => {
            let score = score_for(snake.len(), initial_len);
            info!("{err}: board cleared with score {score}");
            let settings = settings.ended(EndReason::BoardCleared, score);
            GameState::new(settings, snake, apple)
        }
    }
}
