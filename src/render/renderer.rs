use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{GameEngine, Phase};
use crate::metrics::GameMetrics;

use super::canvas::TerminalCanvas;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        engine: &GameEngine,
        canvas: &TerminalCanvas,
        metrics: &GameMetrics,
    ) {
        let [header, board, hint, footer] = Layout::vertical([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Board
            Constraint::Length(1), // Phase hint
            Constraint::Length(3), // Footer
        ])
        .areas(frame.area());

        frame.render_widget(self.render_stats(engine, metrics), header);

        let (width, height) = canvas.size();
        let [board] = Layout::horizontal([Constraint::Length(width.saturating_add(2))])
            .flex(Flex::Center)
            .areas(board);
        let [board] = Layout::vertical([Constraint::Length(height.saturating_add(2))])
            .flex(Flex::Center)
            .areas(board);
        frame.render_widget(self.render_board(engine, canvas), board);

        frame.render_widget(self.render_hint(engine), hint);
        frame.render_widget(self.render_controls(), footer);
    }

    fn render_board(&self, engine: &GameEngine, canvas: &TerminalCanvas) -> Paragraph<'static> {
        let border = match engine.phase() {
            Phase::GameOver => Color::Red,
            _ => Color::White,
        };

        Paragraph::new(canvas.lines()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(border))
                .title(" Snake "),
        )
    }

    fn render_stats(&self, engine: &GameEngine, metrics: &GameMetrics) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(
                engine.score().to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(engine.difficulty().to_string(), value),
            Span::raw("    "),
            Span::styled(phase_label(engine.phase()), phase_style(engine.phase())),
        ])];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM))
    }

    fn render_hint(&self, engine: &GameEngine) -> Paragraph<'static> {
        let key = Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD);
        let text = Style::default().fg(Color::Gray);

        let line = match engine.phase() {
            Phase::Idle => Line::from(vec![
                Span::styled("Press ", text),
                Span::styled("Enter", key),
                Span::styled(" to start", text),
            ]),
            Phase::Running => Line::from(""),
            Phase::GameOver => Line::from(vec![
                Span::styled("Final score ", text),
                Span::styled(engine.score().to_string(), key),
                Span::styled(" - press ", text),
                Span::styled("Enter", key),
                Span::styled(" to play again", text),
            ]),
        };

        Paragraph::new(line).alignment(Alignment::Center)
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Enter", Style::default().fg(Color::Green)),
            Span::raw(" to start | "),
            Span::styled("1-4", Style::default().fg(Color::Cyan)),
            Span::raw(" speed | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::TOP))
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "READY",
        Phase::Running => "PLAYING",
        Phase::GameOver => "GAME OVER",
    }
}

fn phase_style(phase: Phase) -> Style {
    let color = match phase {
        Phase::Idle => Color::Cyan,
        Phase::Running => Color::Green,
        Phase::GameOver => Color::Red,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameConfig;
    use crate::render::SpriteSet;
    use ratatui::{Terminal, backend::TestBackend};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn draw(engine: &GameEngine, canvas: &TerminalCanvas) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let renderer = Renderer::new();
        let metrics = GameMetrics::new();
        terminal
            .draw(|frame| renderer.render(frame, engine, canvas, &metrics))
            .unwrap();
        screen_text(&terminal)
    }

    #[test]
    fn test_idle_screen() {
        let engine = GameEngine::with_seed(GameConfig::default(), 1);
        let canvas = TerminalCanvas::new(engine.layout());

        let text = draw(&engine, &canvas);

        assert!(text.contains("Score: 0"));
        assert!(text.contains("READY"));
        assert!(text.contains("Press Enter to start"));
        assert!(text.contains(" Snake "));
    }

    #[test]
    fn test_running_screen_shows_board() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 1);
        let mut canvas = TerminalCanvas::new(engine.layout());
        engine.start().unwrap();
        engine
            .tick(&mut canvas, &SpriteSet::with_defaults())
            .unwrap();

        let text = draw(&engine, &canvas);

        // the apple spawns off the snake, so the tail and apple glyphs both show
        assert!(text.contains("PLAYING"));
        assert!(text.contains("╹"));
        assert!(text.contains("●"));
    }
}
