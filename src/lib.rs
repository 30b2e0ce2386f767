//! # Connect Four Environment
//!
//! A Connect Four game core for play, evaluation and reinforcement learning.
//! Gravity board with win, sequence and fork detection, a shaped reward
//! policy, and a turn scheduler with interactive, training and evaluation
//! entry points.
//!
//! ## Modules
//!
//! - [`game`]: Board, detectors, symbols and the game state machine
//! - [`reward`]: Shaped per-move rewards for training
//! - [`ai`]: Agent trait plus human, random, scripted, greedy and policy players
//! - [`session`]: Turn scheduling: play, train and evaluate entry points
//! - [`training`]: Episode loop and training metrics
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod reward;
pub mod session;
pub mod training;
