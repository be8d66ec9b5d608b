use serde::{Deserialize, Serialize};

/// Configuration for the chain walk
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainWalkConfig {
    /// Number of cells in the chain
    pub width: usize,
    /// Column the player starts on
    pub start: usize,

    /// Reward for reaching the leftmost cell
    pub left_reward: f64,
    /// Reward for reaching the rightmost cell
    pub right_reward: f64,
    /// Character drawn for the player
    pub player: char,
    /// Character drawn for empty cells
    pub floor: char,
}

impl Default for ChainWalkConfig {
    fn default() -> Self {
        Self {
            width: 23,
            start: 1,
            left_reward: 1.0,
            right_reward: 100.0,
            player: 'P',
            floor: '.',
        }
    }
}

impl ChainWalkConfig {
    /// Create a configuration with a custom chain width and start column
    pub fn new(width: usize, start: usize) -> Self {
        Self {
            width,
            start,
            ..Default::default()
        }
    }

    /// Render the starting layout as a single row of ASCII art
    pub fn art(&self) -> String {
        (0..self.width)
            .map(|col| if col == self.start { self.player } else { self.floor })
            .collect()
    }
}
