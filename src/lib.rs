//! # rust-wonders
//!
//! Rules engine for a three-age card-drafting civilization game for 3 to 7
//! players seated in a ring.
//!
//! ## Design Principles
//!
//! 1. **Index Ring**: Seats are `PlayerId`s into a fixed ring. Neighbors are
//!    computed, never stored, so there are no back-pointers to keep in sync.
//!
//! 2. **Parse Once**: Card and wonder effects are written in a compact
//!    string encoding and parsed into typed [`Effect`]s when the card is
//!    built. Nothing re-reads the string during play.
//!
//! 3. **Validate, Then Mutate**: Every move is checked against the table
//!    before anything changes. Payment is planned as a value and committed
//!    in one step, so a rejected move leaves the game untouched.
//!
//! 4. **Seeded Everything**: Deals and strategy choices draw from
//!    `GameRng` streams derived from one seed. Same seed, same game.
//!
//! ## Modules
//!
//! - `core`: Seats, configuration, game state, moves, views, errors, RNG
//! - `cards`: Resources, cards, wonders, the registry and the base-game catalog
//! - `effects`: Effect encoding, parser and instantaneous resolution
//! - `rules`: Trading, military, move validation and game outcomes
//! - `scoring`: End-of-game scoring, science optimisation included
//! - `game`: The age/turn state machine and game runner
//! - `strategy`: The move-choosing contract and reference strategies
//! - `simulation`: Parallel batches of seeded games
//!
//! ## Quick start
//!
//! ```
//! use rust_wonders::{GameBuilder, GameConfig, PlayerId};
//! use rust_wonders::strategy::{boxed, SimpleStrategy, WarriorStrategy};
//!
//! let mut game = GameBuilder::new(GameConfig::new(4).with_seed(2024))
//!     .all_strategies(|_| boxed(SimpleStrategy))
//!     .strategy(PlayerId::new(0), boxed(WarriorStrategy))
//!     .build()
//!     .unwrap();
//!
//! let standings = game.run().unwrap();
//! for (seat, total) in standings.ranking() {
//!     println!("{seat}: {total}");
//! }
//! assert!(!standings.result.winners().is_empty());
//! ```

pub mod cards;
pub mod core;
pub mod effects;
pub mod game;
pub mod rules;
pub mod scoring;
pub mod simulation;
pub mod strategy;

// Re-export commonly used types
pub use crate::core::{
    Age, EngineError, GameConfig, GameRng, GameState, GameView, IllegalReason, Move, MoveAction, MoveRecord,
    NeighborView, Phase, Player, PlayerId, PlayerMap, PlayerView, Result, Side,
};

pub use crate::cards::{
    standard_registry, Card, CardRegistry, CardType, Resource, ResourceCounts, ScienceSymbol, Wonder, WonderStage,
};

pub use crate::effects::{parse_effects, Effect, Reach, Scope, ScopeTarget};

pub use crate::rules::{apply_move, legal_moves, FinalStandings, GameResult, PaymentPlan};

pub use crate::scoring::Score;

pub use crate::game::{Game, GameBuilder, TurnOutcome};

pub use crate::strategy::{FirstLegal, RandomStrategy, SimpleStrategy, Strategy, WarriorStrategy};

pub use crate::simulation::{run_batch, BatchConfig, BatchStats};
