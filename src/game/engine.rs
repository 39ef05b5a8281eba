use std::time::Duration;

use log::{debug, error, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{
    config::{Difficulty, GameConfig},
    direction::Direction,
    error::GameError,
    grid::Layout,
    queue::InputQueue,
    state::{Apple, GameState, Settings, Snake, SpriteRef},
    systems::{TickContext, draw_game_over, run_tick},
};
use crate::render::{SpriteSet, Surface, sprites};

/// Where the game loop stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the first start
    Idle,
    /// Ticking on a fixed delay
    Running,
    /// Stopped; the start trigger is available again
    GameOver,
}

/// Owns the game state and drives the tick pipeline
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
    queue: InputQueue,
    difficulty: Difficulty,
    phase: Phase,
    state: Option<GameState>,
    ticks: u64,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Engine with a reproducible apple sequence
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        let difficulty = config.difficulty();
        Self {
            config,
            rng,
            queue: InputQueue::new(),
            difficulty,
            phase: Phase::Idle,
            state: None,
            ticks: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn layout(&self) -> Layout {
        self.config.layout()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// The start trigger is only enabled outside a running game
    pub fn can_start(&self) -> bool {
        self.phase != Phase::Running
    }

    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.state.as_ref().map_or(0, |state| state.settings.score)
    }

    /// Ticks run since the last start
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Pick the tick delay used by the next start
    pub fn select_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Append a direction command; it is consumed by a later tick
    pub fn queue_direction(&mut self, direction: Direction) {
        self.queue.push(direction);
    }

    pub fn pending_directions(&self) -> usize {
        self.queue.len()
    }

    /// Delay before the next tick, while running
    pub fn tick_delay(&self) -> Option<Duration> {
        match (&self.phase, &self.state) {
            (Phase::Running, Some(state)) => Some(state.settings.difficulty),
            _ => None,
        }
    }

    /// Discard any previous game and begin a new one.
    ///
    /// Returns `Ok(false)` without touching anything when a game is already
    /// running. A configuration that cannot produce a playable board is
    /// rejected with [`GameError::InvalidConfig`].
    pub fn start(&mut self) -> Result<bool, GameError> {
        if !self.can_start() {
            warn!("start ignored: a game is already running");
            return Ok(false);
        }
        self.config
            .validate()
            .map_err(|err| GameError::InvalidConfig(format!("{err:#}")))?;

        let state = self.new_game()?;
        info!(
            "game started: snake {:?} heading {}, apple at {:?}, {}",
            state.snake.position, state.snake.direction, state.apple.position, self.difficulty
        );

        self.queue.clear();
        self.state = Some(state);
        self.ticks = 0;
        self.phase = Phase::Running;
        Ok(true)
    }

    fn new_game(&mut self) -> Result<GameState, GameError> {
        let snake = Snake::new(
            self.config.initial_snake.clone(),
            self.config.initial_direction,
            SpriteRef::new(sprites::SNAKE, self.config.sprite_size),
        );
        let apple_cell = self
            .config
            .grid()
            .random_empty_cell(&snake.position, &mut self.rng)?;
        let apple = Apple::new(
            apple_cell,
            SpriteRef::new(sprites::APPLE, self.config.sprite_size),
        );
        let settings = Settings::new(self.difficulty.tick_delay());

        Ok(GameState::new(settings, snake, apple))
    }

    /// Run one tick of the pipeline.
    ///
    /// Does nothing unless running. Moves to [`Phase::GameOver`] and draws the
    /// end screen once the game stops. Errors are internal faults, not game
    /// overs: the game halts in [`Phase::GameOver`] with the state from before
    /// the failed tick, and no end screen is drawn.
    pub fn tick(
        &mut self,
        surface: &mut dyn Surface,
        sprites: &SpriteSet,
    ) -> Result<Phase, GameError> {
        if self.phase != Phase::Running {
            return Ok(self.phase);
        }
        let Some(state) = self.state.take() else {
            return Ok(self.phase);
        };

        let layout = self.config.layout();
        let mut ctx = TickContext {
            queue: &mut self.queue,
            surface: &mut *surface,
            sprites,
            layout,
            initial_len: self.config.initial_len(),
            rng: &mut self.rng,
        };
        let snapshot = state.clone();
        let state = match run_tick(state, &mut ctx) {
            Ok(state) => state,
            Err(err) => {
                error!("tick {} failed, game halted: {}", self.ticks + 1, err);
                self.state = Some(snapshot);
                self.phase = Phase::GameOver;
                return Err(err);
            }
        };
        self.ticks += 1;

        debug!(
            "tick {}: head {:?} heading {}, length {}, score {}",
            self.ticks,
            state.snake.head(),
            state.snake.direction,
            state.snake.len(),
            state.settings.score
        );

        if !state.settings.game_on {
            info!(
                "game over after {} ticks: {:?}, score {}",
                self.ticks, state.settings.end, state.settings.score
            );
            draw_game_over(surface, layout);
            self.phase = Phase::GameOver;
        }

        self.state = Some(state);
        Ok(self.phase)
    }
}
