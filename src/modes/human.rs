use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{error, info};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, interval, sleep};

use crate::game::{GameConfig, GameEngine, Phase};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Renderer, SpriteSet, TerminalCanvas};

pub struct HumanMode {
    engine: GameEngine,
    canvas: TerminalCanvas,
    sprites: SpriteSet,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        Self::with_engine(GameEngine::new(config))
    }

    pub fn with_engine(engine: GameEngine) -> Self {
        let canvas = TerminalCanvas::new(engine.layout());

        Self {
            engine,
            canvas,
            sprites: SpriteSet::with_defaults(),
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Re-armed after every tick, so the delay runs from the end of the
        // previous tick rather than on a fixed rate
        let tick_timer = sleep(Duration::ZERO);
        tokio::pin!(tick_timer);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        if self.handle_event(event)? {
                            // first tick of a new game runs right away
                            tick_timer.as_mut().reset(Instant::now());
                        }
                    }
                }

                // Game logic tick, only scheduled while a game runs
                _ = &mut tick_timer, if self.engine.is_running() => {
                    self.update_game()?;
                    if let Some(delay) = self.engine.tick_delay() {
                        tick_timer.as_mut().reset(Instant::now() + delay);
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.engine, &self.canvas, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Returns whether a new game was started
    fn handle_event(&mut self, event: Event) -> Result<bool> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(false);
            }

            let action = self.input_handler.handle_key_event(key);
            return self.handle_action(action);
        }

        Ok(false)
    }

    fn handle_action(&mut self, action: KeyAction) -> Result<bool> {
        match action {
            KeyAction::Turn(direction) => {
                if self.engine.is_running() {
                    self.engine.queue_direction(direction);
                }
            }
            KeyAction::Start => return self.start_game(),
            KeyAction::Difficulty(difficulty) => {
                info!("difficulty set to {}", difficulty);
                self.engine.select_difficulty(difficulty);
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }

        Ok(false)
    }

    fn start_game(&mut self) -> Result<bool> {
        let started = self.engine.start().context("Failed to start a new game")?;
        if started {
            self.metrics.on_game_start();
        }
        Ok(started)
    }

    fn update_game(&mut self) -> Result<()> {
        let phase = self
            .engine
            .tick(&mut self.canvas, &self.sprites)
            .inspect_err(|err| error!("tick failed: {}", err))
            .context("Game tick failed")?;

        self.metrics.on_tick(self.engine.score());
        if phase == Phase::GameOver {
            self.metrics.on_game_over(self.engine.score());
        }

        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
