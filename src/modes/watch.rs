//! Watch mode: load a trained agent and watch it play
//!
//! Loads a saved Q-table and drives the game with greedy action selection.
//! Playback can be paused, restarted and speed-adjusted; finished games
//! restart automatically.
//!
//! # Controls
//!
//! - Space: pause/unpause
//! - R: restart the episode
//! - 1-4: playback speed (1=slow, 4=very fast)
//! - Q/Esc: quit

use anyhow::{ensure, Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::path::Path;
use std::time::Duration;
use tokio::time::{interval, Interval};

use crate::agent::{observe, QAgent};
use crate::game::{GameConfig, GameEngine, GameState, TURNS};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Playback speed settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchSpeed {
    Slow,
    Normal,
    Fast,
    VeryFast,
}

impl WatchSpeed {
    fn tick_interval(&self) -> Duration {
        match self {
            Self::Slow => Duration::from_millis(500),
            Self::Normal => Duration::from_millis(125),
            Self::Fast => Duration::from_millis(50),
            Self::VeryFast => Duration::from_millis(16),
        }
    }
}

/// Watch mode: a trained agent plays while the TUI renders
pub struct WatchMode {
    engine: GameEngine,
    state: GameState,
    agent: QAgent,
    renderer: Renderer,
    metrics: GameMetrics,
    should_quit: bool,
    paused: bool,
    speed: WatchSpeed,
}

impl WatchMode {
    /// Load a trained agent and set up the game it will play.
    ///
    /// The saved agent must have been trained on the same board geometry;
    /// a mismatch is rejected up front.
    pub fn new(model_path: &Path, config: GameConfig) -> Result<Self> {
        let (agent, metadata) = crate::agent::load_agent(model_path)
            .with_context(|| format!("Failed to load agent from {:?}", model_path))?;

        ensure!(
            metadata.board_width == config.board_width
                && metadata.board_height == config.board_height
                && metadata.cell_size == config.cell_size,
            "agent was trained on a {}x{} board (cell {}), but the game is {}x{} (cell {})",
            metadata.board_width,
            metadata.board_height,
            metadata.cell_size,
            config.board_width,
            config.board_height,
            config.cell_size,
        );

        println!("Loaded agent from {:?}", model_path);
        println!("  episodes trained: {}", metadata.episodes_trained);
        println!("  training steps:   {}", metadata.training_steps);
        println!("  states visited:   {}", agent.states_visited());
        println!("  version:          {}", metadata.version);
        println!();

        let mut engine = GameEngine::new(config)?;
        let state = engine.reset();

        Ok(Self {
            engine,
            state,
            agent,
            renderer: Renderer::new(),
            metrics: GameMetrics::new(),
            should_quit: false,
            paused: false,
            speed: WatchSpeed::Normal,
        })
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

        let result = self.run_watch_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_watch_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.speed.tick_interval());
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event, &mut tick_timer);
                    }
                }

                _ = tick_timer.tick() => {
                    if !self.paused {
                        if self.state.is_alive {
                            self.step_agent();
                        } else {
                            // Auto-restart after a finished game
                            self.restart_episode();
                        }
                    }
                }

                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

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

    /// One greedy agent step
    fn step_agent(&mut self) {
        let key = observe(&self.state);
        let action = self.agent.act_greedy(key);
        let result = self.engine.step_play(&mut self.state, TURNS[action]);

        if result.terminated && !self.state.is_alive {
            self.metrics
                .on_game_over(self.state.score, self.state.snake.len());
        }
    }

    fn restart_episode(&mut self) {
        self.state = self.engine.reset();
        self.metrics.on_game_start();
    }

    fn handle_event(&mut self, event: Event, tick_timer: &mut Interval) {
        if let Event::Key(key) = event {
            if key.kind != KeyEventKind::Press {
                return;
            }

            match key.code {
                KeyCode::Char(' ') => self.paused = !self.paused,
                KeyCode::Char('r') | KeyCode::Char('R') => self.restart_episode(),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    self.should_quit = true;
                }
                KeyCode::Char(c @ '1'..='4') => {
                    self.speed = match c {
                        '1' => WatchSpeed::Slow,
                        '2' => WatchSpeed::Normal,
                        '3' => WatchSpeed::Fast,
                        _ => WatchSpeed::VeryFast,
                    };
                    *tick_timer = interval(self.speed.tick_interval());
                }
                _ => {}
            }
        }
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
