//! Move-choosing strategies.
//!
//! The engine owns one strategy per seat and asks it for a move each turn.
//! A strategy only ever sees a [`GameView`]: its own hand, the public side
//! of the other seats and the discard pile. Whatever it returns is
//! validated again before anything is applied.
//!
//! ## Reference strategies
//!
//! - [`FirstLegal`]: the first legal move, fully deterministic
//! - [`SimpleStrategy`]: build the wonder, else play, else discard
//! - [`WarriorStrategy`]: the move that adds the most shields
//! - [`RandomStrategy`]: uniform over the legal moves
//!
//! ## Example
//!
//! ```
//! use rust_wonders::strategy::{boxed, SimpleStrategy, Strategy};
//!
//! let strategy = boxed(SimpleStrategy);
//! assert_eq!(strategy.name(), "simple");
//! ```

mod basic;

pub use basic::{FirstLegal, RandomStrategy, SimpleStrategy, WarriorStrategy};

use crate::core::{GameRng, GameView, Move};

/// Chooses one move per turn for one seat.
pub trait Strategy: Send {
    /// Pick a move for `view.seat()`.
    ///
    /// `rng` is the seat's own stream, so random choices never disturb the
    /// deal. Returning `None` while cards remain in hand aborts the game.
    fn choose_move(&mut self, view: &GameView<'_>, rng: &mut GameRng) -> Option<Move>;

    /// Short name used in logs and batch reports.
    fn name(&self) -> &str;
}

/// A boxed strategy as stored in the game's strategy table.
pub type BoxedStrategy = Box<dyn Strategy>;

/// Box a strategy for the strategy table.
#[must_use]
pub fn boxed(strategy: impl Strategy + 'static) -> BoxedStrategy {
    Box::new(strategy)
}
