use std::collections::VecDeque;

use super::board::Observation;

/// Errors raised by a game engine
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("its_showtime() called on a game that has already started")]
    AlreadyStarted,
    #[error("play() called before its_showtime()")]
    NotStarted,
    #[error("play() called on a game that is over")]
    GameOver,
    #[error("invalid layout: {0}")]
    InvalidLayout(String),
}

/// Result of kicking off a game or taking a step
#[derive(Debug, Clone, PartialEq)]
pub struct TimeStep {
    pub observation: Observation,
    /// Reward earned by this step, `None` if nothing was awarded
    pub reward: Option<f64>,
    /// Discount for this step, `None` on kickoff
    pub discount: Option<f64>,
}

/// The engine surface the terminal UI drives
pub trait Game {
    type Action;

    /// Start the episode and return the first observation
    fn its_showtime(&mut self) -> Result<TimeStep, EngineError>;

    /// Apply one action and return what happened
    fn play(&mut self, action: Self::Action) -> Result<TimeStep, EngineError>;

    /// Whether the episode has ended
    fn game_over(&self) -> bool;

    /// Messages logged since the previous drain, oldest first
    fn drain_log(&mut self) -> Vec<String>;
}

/// Per-episode bookkeeping shared by game logic: rewards, termination and the
/// message log the UI console reads from.
#[derive(Debug, Clone)]
pub struct Plot {
    reward: Option<f64>,
    discount: f64,
    terminated: bool,
    frame: u64,
    log: VecDeque<String>,
}

impl Plot {
    pub fn new() -> Self {
        Self {
            reward: None,
            discount: 1.0,
            terminated: false,
            frame: 0,
            log: VecDeque::new(),
        }
    }

    /// Add to this frame's reward
    pub fn add_reward(&mut self, reward: f64) {
        self.reward = Some(self.reward.unwrap_or(0.0) + reward);
    }

    /// End the episode after the current frame
    pub fn terminate_episode(&mut self, discount: f64) {
        self.terminated = true;
        self.discount = discount;
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Number of frames completed so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Append a message to the log
    pub fn log(&mut self, message: impl Into<String>) {
        self.log.push_back(message.into());
    }

    /// Remove and return every message logged since the previous drain
    pub fn drain_log(&mut self) -> Vec<String> {
        self.log.drain(..).collect()
    }

    /// Close the current frame, returning its reward and discount
    pub fn finish_frame(&mut self) -> (Option<f64>, f64) {
        self.frame += 1;
        (self.reward.take(), self.discount)
    }
}

impl Default for Plot {
    fn default() -> Self {
        Self::new()
    }
}
