//! Running games.
//!
//! A [`Game`] owns the [`GameState`](crate::core::GameState), the registry
//! it deals from and one strategy per seat. [`Game::run`] plays the whole
//! thing; the individual steps are public for callers that want to drive
//! the ages themselves.
//!
//! ## Turn structure
//!
//! 1. [`Game::deal_age`]: seven cards to every seat
//! 2. [`Game::play_turn`]: each seat in ring order chooses and applies one move
//! 3. [`Game::next_turn`]: pass hands on, or end the age once one card is left
//! 4. [`Game::next_age`]: after the third age the game is over
//!
//! Hands pass to the left in ages I and III and to the right in age II.

mod builder;
pub mod flow;
mod runner;

pub use builder::GameBuilder;
pub use flow::{deal_age, next_age, next_turn, TurnOutcome};
pub use runner::Game;
