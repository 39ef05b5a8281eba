//! Input resolution system.
//!
//! Consumes at most one turn from the queue and advances the head.

use crate::game::queue::InputQueue;
use crate::game::state::{GameState, Snake};

pub fn input_system(state: GameState, queue: &mut InputQueue) -> GameState {
    let current = state.snake.direction;

    // Going on straight or reversing are not turns.
    queue.discard_while(|queued| queued == current || queued == current.opposite());
    let direction = queue.pop().unwrap_or(current);

    let Some(head) = state.snake.head() else {
        return state;
    };

    let GameState {
        settings,
        snake,
        apple,
    } = state;

    let mut position = Vec::with_capacity(snake.position.len() + 1);
    position.push(head.next(direction));
    position.extend(snake.position);

    let snake = Snake {
        position,
        direction,
        ..snake
    };
    GameState::new(settings, snake, apple)
}
