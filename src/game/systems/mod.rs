//! Per-tick update pipeline.
//!
//! A tick runs the stages in a fixed order:
//!
//! 1. [`apple_system`] - growth and apple relocation
//! 2. [`input_system`] - turn resolution and head advance
//! 3. [`collision_system`] - end-of-game detection and score
//! 4. [`render_system`] - drawing
//!
//! Each stage takes the state by value and returns the updated state.

pub mod apple;
pub mod collision;
pub mod input;
pub mod render;

pub use apple::apple_system;
pub use collision::collision_system;
pub use input::input_system;
pub use render::{draw_background, draw_game_over, render_system};

use rand::RngCore;

use super::error::GameError;
use super::grid::Layout;
use super::queue::InputQueue;
use super::state::GameState;
use crate::render::{SpriteSet, Surface};

/// Everything a tick reads or writes besides the entities
pub struct TickContext<'a> {
    pub queue: &'a mut InputQueue,
    pub surface: &'a mut dyn Surface,
    pub sprites: &'a SpriteSet,
    pub layout: Layout,
    /// Snake length at game start, the zero point of the score
    pub initial_len: usize,
    pub rng: &'a mut dyn RngCore,
}

/// Run all stages once
pub fn run_tick(state: GameState, ctx: &mut TickContext<'_>) -> Result<GameState, GameError> {
    let grid = ctx.layout.grid;
    // collision looks at the queue as it was before input consumed from it
    let queued = ctx.queue.peek();

    let state = apple_system(state, grid, ctx.initial_len, &mut *ctx.rng);
    let state = input_system(state, ctx.queue);
    let state = collision_system(state, queued, grid, ctx.initial_len);
    render_system(state, &mut *ctx.surface, ctx.sprites, ctx.layout)
}

#[cfg(test)]
pub(crate) fn test_state(
    position: Vec<super::grid::Cell>,
    direction: super::direction::Direction,
    apple: super::grid::Cell,
) -> GameState {
    use super::state::{Apple, Settings, Snake, SpriteRef};
    use crate::render::sprites::{APPLE, SNAKE};

    GameState::new(
        Settings::new(std::time::Duration::from_millis(250)),
        Snake::new(position, direction, SpriteRef::new(SNAKE, 64)),
        Apple::new(apple, SpriteRef::new(APPLE, 64)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;
    use crate::game::grid::{Cell, Grid};
    use crate::game::state::EndReason;
    use crate::render::RecordingSurface;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    struct Harness {
        queue: InputQueue,
        surface: RecordingSurface,
        sprites: SpriteSet,
        rng: StdRng,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                queue: InputQueue::new(),
                surface: RecordingSurface::new(),
                sprites: SpriteSet::with_defaults(),
                rng: StdRng::seed_from_u64(42),
            }
        }

        fn tick(&mut self, state: GameState) -> GameState {
            let mut ctx = TickContext {
                queue: &mut self.queue,
                surface: &mut self.surface,
                sprites: &self.sprites,
                layout: Layout::new(Grid::new(17, 15), 36),
                initial_len: 2,
                rng: &mut self.rng,
            };
            run_tick(state, &mut ctx).unwrap()
        }
    }

    fn start_state(apple: Cell) -> GameState {
        test_state(vec![Cell::new(7, 3), Cell::new(7, 2)], Direction::Up, apple)
    }

    #[test]
    fn test_first_tick_moves_up() {
        let mut harness = Harness::new();

        let state = harness.tick(start_state(Cell::new(0, 0)));

        assert_eq!(state.snake.head(), Some(Cell::new(7, 4)));
        assert_eq!(state.snake.position, vec![Cell::new(7, 4), Cell::new(7, 3)]);
        assert_eq!(state.snake.direction, Direction::Up);
        assert_eq!(state.settings.score, 0);
        assert!(state.settings.game_on);
        assert!(!harness.surface.ops.is_empty());
    }

    #[test]
    fn test_reverse_command_ignored() {
        let mut harness = Harness::new();
        harness.queue.push(Direction::Down);

        let state = harness.tick(start_state(Cell::new(0, 0)));

        assert_eq!(state.snake.direction, Direction::Up);
        assert_eq!(state.snake.head(), Some(Cell::new(7, 4)));
        assert!(harness.queue.is_empty());
    }

    #[test]
    fn test_growth_lags_one_tick() {
        let mut harness = Harness::new();

        // the head reaches the apple on the first tick
        let state = harness.tick(start_state(Cell::new(7, 4)));
        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.apple.position, Cell::new(7, 4));
        assert_eq!(state.settings.score, 0);

        // consumption is noticed on the next one
        let state = harness.tick(state);
        assert_eq!(
            state.snake.position,
            vec![Cell::new(7, 5), Cell::new(7, 4), Cell::new(7, 3)]
        );
        assert_eq!(state.settings.score, 1);
        assert_ne!(state.apple.position, Cell::new(7, 4));
        assert_ne!(state.apple.position, Cell::new(7, 3));
    }

    #[test]
    fn test_game_ends_facing_the_wall() {
        let mut harness = Harness::new();
        let mut state = start_state(Cell::new(0, 0));

        // rows 4..=14 take eleven ticks; the last one looks past the top edge
        for _ in 0..10 {
            state = harness.tick(state);
            assert!(state.settings.game_on);
        }
        state = harness.tick(state);

        assert_eq!(state.snake.head(), Some(Cell::new(7, 14)));
        assert!(!state.settings.game_on);
        assert_eq!(state.settings.end, Some(EndReason::Wall));
        assert_eq!(state.settings.score, 0);
    }

    #[test]
    fn test_no_render_on_final_tick() {
        let mut harness = Harness::new();
        let state = test_state(
            vec![Cell::new(7, 13), Cell::new(7, 12)],
            Direction::Up,
            Cell::new(0, 0),
        );

        let state = harness.tick(state);

        assert!(!state.settings.game_on);
        assert!(harness.surface.ops.is_empty());
    }

    #[test]
    fn test_turn_then_self_collision() {
        let mut harness = Harness::new();
        // heading left above a loop of its own body
        let state = test_state(
            vec![
                Cell::new(6, 6),
                Cell::new(7, 6),
                Cell::new(7, 5),
                Cell::new(7, 4),
                Cell::new(6, 4),
                Cell::new(5, 4),
                Cell::new(4, 4),
            ],
            Direction::Left,
            Cell::new(0, 0),
        );
        harness.queue.push(Direction::Down);

        let state = harness.tick(state);

        // turned down to (6,5); one more step down enters (6,4)
        assert_eq!(state.snake.head(), Some(Cell::new(6, 5)));
        assert!(!state.settings.game_on);
        assert_eq!(state.settings.end, Some(EndReason::SelfCollision));
    }

    #[test]
    fn test_lookahead_uses_front_of_queue_at_tick_start() {
        let mut harness = Harness::new();
        let state = test_state(
            vec![
                Cell::new(6, 5),
                Cell::new(6, 4),
                Cell::new(5, 4),
                Cell::new(4, 4),
                Cell::new(3, 4),
            ],
            Direction::Up,
            Cell::new(0, 0),
        );
        harness.queue.extend([Direction::Left, Direction::Down]);

        let state = harness.tick(state);

        // the check follows Left into the free (4,5), not the still queued Down
        assert_eq!(state.snake.head(), Some(Cell::new(5, 5)));
        assert!(state.settings.game_on);
        assert_eq!(harness.queue.peek(), Some(Direction::Down));
    }

    #[test]
    fn test_queued_reverse_at_the_wall_keeps_playing() {
        let mut harness = Harness::new();
        let state = test_state(
            vec![Cell::new(7, 13), Cell::new(7, 12)],
            Direction::Up,
            Cell::new(0, 0),
        );
        harness.queue.push(Direction::Down);

        let state = harness.tick(state);

        // the reverse is dropped by input, and it also skips the lookahead
        assert_eq!(state.snake.head(), Some(Cell::new(7, 14)));
        assert_eq!(state.snake.direction, Direction::Up);
        assert!(state.settings.game_on);
        assert!(harness.queue.is_empty());
        assert!(!harness.surface.ops.is_empty());
    }
}
