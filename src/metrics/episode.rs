use std::time::{Duration, Instant};

/// Running score and clock for one episode
pub struct EpisodeMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    total_return: Option<f64>,
}

impl EpisodeMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            total_return: None,
        }
    }

    /// Restart the clock and take the kickoff reward as the initial return
    pub fn on_episode_start(&mut self, reward: Option<f64>) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.total_return = reward;
    }

    /// Fold one step's reward into the total
    ///
    /// An absent reward leaves a known total untouched.
    pub fn on_reward(&mut self, reward: Option<f64>) {
        self.total_return = match (self.total_return, reward) {
            (None, reward) => reward,
            (Some(total), Some(reward)) => Some(total + reward),
            (Some(total), None) => Some(total),
        };
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn total_return(&self) -> Option<f64> {
        self.total_return
    }

    pub fn format_time(&self) -> String {
        format_elapsed(self.elapsed_time)
    }
}

impl Default for EpisodeMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a duration as `HH:MM:SS`
pub fn format_elapsed(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs / 60) % 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
