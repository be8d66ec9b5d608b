//! Decision sources that pick actions for the robot

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::ConfigError;

/// Something that picks the robot's next action
pub trait DecisionSource<A> {
    fn decide(&mut self) -> A;
}

impl<A, F> DecisionSource<A> for F
where
    F: FnMut() -> A,
{
    fn decide(&mut self) -> A {
        self()
    }
}

/// Always chooses the same action
#[derive(Debug, Clone)]
pub struct FixedAgent<A> {
    action: A,
}

impl<A: Clone> FixedAgent<A> {
    pub fn new(action: A) -> Self {
        Self { action }
    }
}

impl<A: Clone> DecisionSource<A> for FixedAgent<A> {
    fn decide(&mut self) -> A {
        self.action.clone()
    }
}

/// Chooses uniformly among a fixed set of actions
pub struct RandomAgent<A> {
    actions: Vec<A>,
    rng: StdRng,
}

impl<A: Clone> RandomAgent<A> {
    /// Create an agent seeded from system entropy
    pub fn new(actions: Vec<A>) -> Result<Self, ConfigError> {
        Self::with_rng(actions, StdRng::from_entropy())
    }

    /// Create an agent with a reproducible sequence of choices
    pub fn seeded(actions: Vec<A>, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(actions, StdRng::seed_from_u64(seed))
    }

    fn with_rng(actions: Vec<A>, rng: StdRng) -> Result<Self, ConfigError> {
        if actions.is_empty() {
            return Err(ConfigError::EmptyActionSet);
        }
        Ok(Self { actions, rng })
    }
}

impl<A: Clone> DecisionSource<A> for RandomAgent<A> {
    fn decide(&mut self) -> A {
        // Non-empty by construction
        let index = self.rng.gen_range(0..self.actions.len());
        self.actions[index].clone()
    }
}
