use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::game::{FoodKind, GameState, Position};
use crate::metrics::GameMetrics;

/// TUI renderer: draws the board, a stats header, a controls footer, and
/// the game-over panel. Holds no state of its own; the presentation layer
/// only ever reads the [`GameState`] handed to it.
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(chunks[0], state, metrics);
        frame.render_widget(stats, chunks[0]);

        // Center the board horizontally
        let board_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if state.is_alive {
            let board = self.render_board(board_area, state);
            frame.render_widget(board, board_area);
        } else {
            let game_over = self.render_game_over(board_area, state, metrics);
            frame.render_widget(game_over, board_area);
        }

        let controls = self.render_controls(chunks[2]);
        frame.render_widget(controls, chunks[2]);
    }

    fn render_board(&self, _area: Rect, state: &GameState) -> Paragraph<'_> {
        let cell = state.cell_size;
        let mut lines = Vec::new();

        for gy in 0..state.board_height / cell {
            let mut spans = Vec::new();

            for gx in 0..state.board_width / cell {
                let pos = Position::new(gx * cell, gy * cell);

                let span = if pos == state.snake.head() {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.snake.contains(pos) {
                    Span::styled("□ ", Style::default().fg(Color::Blue))
                } else if let Some(idx) = state.food_at(pos) {
                    match state.food[idx].kind {
                        FoodKind::Snail => {
                            Span::styled("o ", Style::default().fg(Color::Green))
                        }
                        FoodKind::Crab => Span::styled(
                            "@ ",
                            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                        ),
                    }
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(span);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Shore Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, _area: Rect, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Length: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.snake.len().to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("High: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.high_score.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Games: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.games_played.to_string(),
                Style::default().fg(Color::White),
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(
        &self,
        _area: Rect,
        state: &GameState,
        metrics: &GameMetrics,
    ) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("High Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    metrics.high_score.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, _area: Rect) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" / "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to steer | "),
            Span::styled("o", Style::default().fg(Color::Green)),
            Span::raw(" snail +10 | "),
            Span::styled("@", Style::default().fg(Color::Red)),
            Span::raw(" crab +15 | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
