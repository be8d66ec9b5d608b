//! Robo Grid - a terminal harness for grid-world games
//!
//! This library provides:
//! - A minimal game engine surface and the chain-walk environment (game module)
//! - Key bindings and input classification (input module)
//! - Decision sources for the robot player (agent module)
//! - Observation croppers, repainters and terminal drawing (render module)
//! - The shared human/robot control loop (modes module)

pub mod agent;
pub mod error;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
