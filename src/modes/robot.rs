//! Terminal UI where a robot and a human share control of a game
//!
//! Each tick reads one input. Nothing pressed within the delay lets the robot
//! act while in [`Mode::Autonomous`]; a bound key acts for the human and takes
//! control away from the robot. PageUp/PageDown show and hide the game
//! console, Backspace flips between autonomous and demonstration mode.
//!
//! # Example
//!
//! ```rust,ignore
//! use crossterm::event::KeyCode;
//! use robo_grid::agent::FixedAgent;
//! use robo_grid::game::{ChainAction, ChainWalk, ChainWalkConfig};
//! use robo_grid::input::KeyBindings;
//! use robo_grid::modes::RoboUi;
//! use std::time::Duration;
//!
//! let bindings = KeyBindings::new()
//!     .bind(KeyCode::Left, ChainAction::Left)
//!     .bind(KeyCode::Right, ChainAction::Right);
//! let mut ui = RoboUi::new(bindings)
//!     .with_delay(Duration::from_millis(200))
//!     .with_agent(Box::new(FixedAgent::new(ChainAction::Right)));
//! let mut game = ChainWalk::new(ChainWalkConfig::default())?;
//! ui.play(&mut game).await?;
//! ```

use std::collections::HashMap;
use std::fmt::Debug;
use std::time::Duration;

use anyhow::{Context, Result};
use ratatui::style::Color;
use tracing::{debug, info, warn};

use crate::agent::DecisionSource;
use crate::game::{Game, Observation};
use crate::input::{Input, KeyAction, KeyBindings};
use crate::metrics::EpisodeMetrics;
use crate::modes::{Mode, ModeEvent};
use crate::render::{
    Canvas, ConsoleBuffer, Cropper, ObservationPipeline, Palette, Repainter, Screen,
    TerminalCanvas,
};

pub struct RoboUi<A> {
    bindings: KeyBindings<A>,
    delay: Option<Duration>,
    pipeline: ObservationPipeline,
    palette: Palette,
    agent: Option<Box<dyn DecisionSource<A>>>,
    mode: Mode,
    console: ConsoleBuffer,
    metrics: EpisodeMetrics,
}

impl<A: Clone + Debug> RoboUi<A> {
    pub fn new(bindings: KeyBindings<A>) -> Self {
        Self {
            bindings,
            delay: None,
            pipeline: ObservationPipeline::new(),
            palette: Palette::new(),
            agent: None,
            mode: Mode::Autonomous,
            console: ConsoleBuffer::new(),
            metrics: EpisodeMetrics::new(),
        }
    }

    /// Wait at most `delay` for a key each tick. Without a delay every tick
    /// blocks until a key arrives.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_croppers(mut self, croppers: Vec<Box<dyn Cropper>>) -> Self {
        self.pipeline = self.pipeline.with_croppers(croppers);
        self
    }

    pub fn with_repainter(mut self, repainter: Box<dyn Repainter>) -> Self {
        self.pipeline = self.pipeline.with_repainter(repainter);
        self
    }

    pub fn with_colours(
        mut self,
        foreground: Option<HashMap<char, Color>>,
        background: Option<HashMap<char, Color>>,
    ) -> Self {
        self.palette = Palette::from_overrides(foreground, background);
        self
    }

    pub fn with_agent(mut self, agent: Box<dyn DecisionSource<A>>) -> Self {
        self.agent = Some(agent);
        self
    }

    pub fn with_console_capacity(mut self, capacity: usize) -> Self {
        self.console = ConsoleBuffer::with_capacity(capacity);
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Sum of all rewards since kickoff
    pub fn total_return(&self) -> Option<f64> {
        self.metrics.total_return()
    }

    /// Play `game` on the real terminal until it ends
    pub async fn play<G>(&mut self, game: &mut G) -> Result<()>
    where
        G: Game<Action = A>,
    {
        // Reject bad bindings before touching the terminal
        self.bindings.validate()?;

        let mut canvas = TerminalCanvas::acquire(self.palette.clone())?;

        let result = self.run_game_loop(game, &mut canvas).await;

        // Cleanup terminal
        finish_session(result, canvas.release())
    }

    /// Drive `game` until it ends, reading input from and drawing to `canvas`
    pub async fn run_game_loop<G, C>(&mut self, game: &mut G, canvas: &mut C) -> Result<()>
    where
        G: Game<Action = A>,
        C: Canvas,
    {
        self.bindings.validate()?;

        // Kick off the game and show the first frame before reading input
        let step = game.its_showtime().context("Failed to start game")?;
        let mut observations = self.pipeline.run(&step.observation);
        self.metrics.on_episode_start(step.reward);
        info!(mode = %self.mode, "Episode started");
        self.redraw(canvas, &observations)?;

        while !game.game_over() {
            let input = canvas.next_input(self.delay).await?;

            // Unrecognised inputs still redraw, refreshing the clock and console
            if let Some(action) = self.handle_input(input) {
                let step = game.play(action).context("Failed to play action")?;
                observations = self.pipeline.run(&step.observation);
                self.metrics.on_reward(step.reward);
            }

            self.console.extend(game.drain_log());
            self.metrics.update();
            self.redraw(canvas, &observations)?;
        }

        info!(
            total_return = self.metrics.total_return().unwrap_or(0.0),
            elapsed = %self.metrics.format_time(),
            mode = %self.mode,
            "Episode finished"
        );

        Ok(())
    }

    /// Resolve one input to the action to play, if any, updating the mode
    /// and console visibility on the way.
    fn handle_input(&mut self, input: Input) -> Option<A> {
        match self.bindings.handle_input(input) {
            KeyAction::ShowConsole => {
                debug!("Console shown");
                self.console.show();
                None
            }
            KeyAction::HideConsole => {
                debug!("Console hidden");
                self.console.hide();
                None
            }
            KeyAction::ToggleMode => {
                self.apply_mode_event(ModeEvent::Toggle);
                None
            }
            KeyAction::Idle | KeyAction::GameAction(_)
                if input == Input::NoInput && self.mode == Mode::Autonomous =>
            {
                match self.agent.as_mut() {
                    Some(agent) => Some(agent.decide()),
                    None => self.bound_action(input),
                }
            }
            KeyAction::GameAction(action) => {
                self.apply_mode_event(ModeEvent::BoundKey);
                Some(action)
            }
            KeyAction::Idle | KeyAction::None => None,
        }
    }

    /// Action bound to `input`, treated as a human keypress
    fn bound_action(&mut self, input: Input) -> Option<A> {
        let action = self.bindings.get(&input).cloned()?;
        self.apply_mode_event(ModeEvent::BoundKey);
        Some(action)
    }

    fn apply_mode_event(&mut self, event: ModeEvent) {
        let next = self.mode.transition(event);
        if next != self.mode {
            debug!(from = %self.mode, to = %next, ?event, "Mode changed");
        }
        self.mode = next;
    }

    fn redraw<C: Canvas>(&self, canvas: &mut C, observations: &[Observation]) -> Result<()> {
        canvas.present(&Screen {
            elapsed: self.metrics.elapsed_time,
            score: self.metrics.total_return(),
            mode: self.mode,
            boards: observations,
            console: &self.console,
        })
    }
}

/// Combine the loop outcome with the terminal release outcome. A loop error
/// always wins; a release failure is attached to it rather than replacing it.
fn finish_session(result: Result<()>, released: Result<()>) -> Result<()> {
    match (result, released) {
        (Err(err), Err(release_err)) => {
            warn!("Failed to restore terminal: {release_err:#}");
            Err(err.context(format!("terminal not restored: {release_err:#}")))
        }
        (Err(err), Ok(())) => Err(err),
        (Ok(()), released) => released,
    }
}
