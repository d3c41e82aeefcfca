use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, Write, stderr};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, error, info};

use crate::game::{Action, ActionOutcome, GameConfig, GameEngine, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::SessionStats;
use crate::render::{Renderer, SceneSync, TerminalCanvas};

/// Interactive play in the terminal
pub struct PlayMode {
    engine: GameEngine,
    state: GameState,
    stats: SessionStats,
    canvas: TerminalCanvas,
    scene: SceneSync,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(config: GameConfig, seed: Option<u64>) -> Self {
        let mut engine = match seed {
            Some(seed) => GameEngine::with_seed(config.clone(), seed),
            None => GameEngine::new(config.clone()),
        };
        let state = engine.reset();

        let mut canvas = TerminalCanvas::new(&config);
        let mut scene = SceneSync::new(config);
        scene.draw_board(&mut canvas);
        scene.sync(&state, &mut canvas);

        Self {
            engine,
            state,
            stats: SessionStats::new(),
            canvas,
            scene,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut terminal = match Self::setup_terminal() {
            Ok(terminal) => terminal,
            Err(err) => {
                // raw mode is already on; turn it off before bailing out
                let mut stderr = stderr();
                let restored = restore_terminal(&mut stderr);
                return keep_first_error(Err(err), restored);
            }
        };

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;
        let cleanup = self.cleanup_terminal(&mut terminal);

        keep_first_error(result, cleanup)
    }

    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stderr>>> {
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;
        Ok(terminal)
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // The timer keeps ticking after a game over so a restart is picked up
        // by the same loop.
        let mut tick_timer = interval(self.engine.config().tick_interval());
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            tick_ms = u64::try_from(self.engine.config().tick_interval().as_millis())
                .unwrap_or(u64::MAX),
            "session started"
        );
        self.draw(terminal)?;

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.update_game();
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }

            self.draw(terminal)?;
        }

        info!(games = self.stats.games_played, best = self.stats.best_length, "session ended");
        Ok(())
    }

    fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        self.stats.update();
        terminal
            .draw(|frame| {
                self.renderer
                    .render(frame, &self.canvas, &self.state, &self.stats);
            })
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            // resizes are picked up by the redraw that follows every event
            return;
        };
        // Only process key press events, not release or repeat
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::GameAction(action) => self.apply_action(action),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    fn apply_action(&mut self, action: Action) {
        let outcome = self.engine.apply_action(&mut self.state, action);
        debug!(?action, ?outcome, "key");

        if outcome == ActionOutcome::Restarted {
            self.stats.on_game_start();
            self.scene.sync(&self.state, &mut self.canvas);
        }
    }

    fn update_game(&mut self) {
        let result = self.engine.step(&mut self.state);
        if !result.moved {
            return;
        }

        if result.game_over {
            self.stats.on_game_over(self.state.snake.len());
        }
        self.scene.sync(&self.state, &mut self.canvas);
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let restored = restore_terminal(terminal.backend_mut());
        let cursor = terminal.show_cursor().context("Failed to show cursor");
        keep_first_error(restored, cursor)
    }
}

/// Leave raw mode and the alternate screen, attempting both even if one fails
fn restore_terminal(out: &mut impl Write) -> Result<()> {
    let raw = disable_raw_mode().context("Failed to disable raw mode");
    let screen = execute!(out, LeaveAlternateScreen).context("Failed to leave alternate screen");
    keep_first_error(raw, screen)
}

/// Combine two outcomes, returning the earlier error and logging a later one
fn keep_first_error(first: Result<()>, second: Result<()>) -> Result<()> {
    match (first, second) {
        (Err(err), Err(later)) => {
            error!(?later, "terminal restore also failed");
            Err(err)
        }
        (Err(err), Ok(())) | (Ok(()), Err(err)) => Err(err),
        (Ok(()), Ok(())) => Ok(()),
    }
}
