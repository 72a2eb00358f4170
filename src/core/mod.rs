//! Core engine types: players, state, moves, RNG, configuration, errors.
//!
//! Everything here is shared by the rules, the game loop and the
//! strategies. Strategies only see the read-only types in `view`.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;
pub mod view;

pub use action::{Move, MoveAction, MoveRecord};
pub use config::{GameConfig, MAX_PLAYERS, MIN_PLAYERS};
pub use error::{EngineError, IllegalReason, Result};
pub use player::{PlayerId, PlayerMap, Side};
pub use rng::GameRng;
pub use state::{Age, GameState, Phase, Player};
pub use view::{GameView, NeighborView, PlayerView};
