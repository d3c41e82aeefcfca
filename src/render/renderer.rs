use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::canvas::TerminalCanvas;
use crate::game::GameState;
use crate::metrics::SessionStats;

/// Lays out one terminal frame: status line, canvas, controls
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        canvas: &TerminalCanvas,
        state: &GameState,
        stats: &SessionStats,
    ) {
        let [header, body, footer] = Layout::vertical([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Canvas
            Constraint::Length(1), // Footer
        ])
        .areas(frame.area());

        frame.render_widget(self.render_stats(state, stats), header);
        frame.render_widget(canvas, Self::canvas_area(body, canvas));
        frame.render_widget(self.render_controls(), footer);
    }

    /// Center the canvas; it is clipped when the terminal is too small
    fn canvas_area(area: Rect, canvas: &TerminalCanvas) -> Rect {
        let size = canvas.size();
        let [column] = Layout::horizontal([Constraint::Length(size.width)])
            .flex(Flex::Center)
            .areas(area);
        let [canvas_area] = Layout::vertical([Constraint::Length(size.height)])
            .flex(Flex::Center)
            .areas(column);
        canvas_area
    }

    fn render_stats(&self, state: &GameState, stats: &SessionStats) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        let text = Line::from(vec![
            Span::styled("Length: ", label),
            Span::styled(state.snake.len().to_string(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(stats.best_length.to_string(), value),
            Span::raw("    "),
            Span::styled("Games: ", label),
            Span::styled(stats.games_played.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(stats.format_time(), value),
        ]);

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Esc", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ]);

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameEngine};
    use crate::render::SceneSync;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn test_frame_shows_status_and_centered_canvas() {
        let config = GameConfig::default();
        let mut engine = GameEngine::with_seed(config.clone(), 5);
        let state = engine.reset();
        let mut canvas = TerminalCanvas::new(&config);
        let mut scene = SceneSync::new(config);
        scene.draw_board(&mut canvas);
        scene.sync(&state, &mut canvas);

        let mut terminal = Terminal::new(TestBackend::new(60, 21)).unwrap();
        terminal
            .draw(|frame| Renderer::new().render(frame, &canvas, &state, &SessionStats::new()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let header: String = (0..60u16).map(|x| buffer[(x, 0)].symbol()).collect();
        assert!(header.contains("Length: 1"));
        // 34x17 canvas centered in 60x19: border starts at column 13, row 2
        assert_eq!(buffer[(13, 2)].bg, Color::Black);
        assert_eq!(buffer[(12, 2)].bg, Color::Reset);
        assert!((15..45u16).any(|x| buffer[(x, 3)].bg == Color::White));
    }
}
