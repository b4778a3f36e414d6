//! Quizpot - Wagered Multiplayer Quiz Settlement Engine
//!
//! Accepts real-money entry stakes for a skill-quiz game, runs it across
//! three participation topologies (solo, two-player duel, N-player
//! league), grades submissions, and distributes the prize pool exactly
//! once per game. Concurrent submissions for one game are serialized by
//! a per-game lock; the ledger, secrets, question bank and notification
//! collaborators sit behind trait seams with in-memory implementations.

pub mod api;
pub mod config;
pub mod errors;
pub mod games;
pub mod ledger;
pub mod notify;
pub mod questions;
pub mod secrets;
pub mod services;
pub mod stake;

pub use errors::{EngineError, EngineResult};
pub use services::{EngineBuilder, EngineServices};
