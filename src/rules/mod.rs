//! The rules: payment and trading, military conflicts, move validation
//! and execution, and game outcomes.
//!
//! The game loop calls into these modules; strategies never do, except
//! through the read-only `GameView::legal_moves`.

pub mod engine;
pub mod military;
pub mod moves;
pub mod trading;

pub use engine::{FinalStandings, GameResult};
pub use moves::{apply_move, legal_moves, validate, Settlement, ValidatedMove};
pub use trading::{can_afford, commit, plan_payment, trade_price, PaymentPlan, Purchase};
