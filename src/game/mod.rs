//! Game engine surface and the chain-walk environment
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The terminal UI only talks to it through the [`Game`] trait.

pub mod action;
pub mod board;
pub mod chain_walk;
pub mod config;
pub mod engine;

// Re-export commonly used types
pub use action::ChainAction;
pub use board::{Board, Observation, Position};
pub use chain_walk::ChainWalk;
pub use config::ChainWalkConfig;
pub use engine::{EngineError, Game, Plot, TimeStep};
