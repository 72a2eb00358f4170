//! Game configuration.
//!
//! `GameConfig` carries the table size, the RNG seed and every economic
//! constant of the rules. The defaults are the standard rules; tests and
//! simulations override individual values with the `with_*` builders.

use serde::{Deserialize, Serialize};

/// Fewest seats at a table.
pub const MIN_PLAYERS: usize = 3;

/// Most seats at a table.
pub const MAX_PLAYERS: usize = 7;

/// Number of ages in a game.
pub const AGE_COUNT: u8 = 3;

/// Coins each player starts with.
pub const STARTING_COINS: u32 = 3;

/// Coins received for discarding a card.
pub const DISCARD_VALUE: u32 = 3;

/// Price of one traded unit.
pub const BASE_TRADE_COST: u32 = 2;

/// Price of one traded unit under a trade discount.
pub const DISCOUNTED_TRADE_COST: u32 = 1;

/// Most units bought from neighbors within one payment.
pub const MAX_TRADES: u32 = 2;

/// Hand size at the start of each age.
pub const CARDS_PER_HAND: usize = 7;

/// Complete game configuration.
///
/// ## Example
///
/// ```
/// use rust_wonders::core::GameConfig;
///
/// let config = GameConfig::new(4).with_seed(7).with_starting_coins(5);
///
/// assert_eq!(config.player_count, 4);
/// assert_eq!(config.starting_coins, 5);
/// assert_eq!(config.discard_value, 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of seats (3-7).
    pub player_count: usize,

    /// Seed for the game's RNG.
    pub seed: u64,

    pub starting_coins: u32,
    pub discard_value: u32,
    pub base_trade_cost: u32,
    pub discounted_trade_cost: u32,

    /// Cap on neighbor units bought per payment.
    pub max_trades: u32,

    pub cards_per_hand: usize,

    /// Sample the age III guilds down to `player_count + 2`.
    pub limit_guilds: bool,
}

impl GameConfig {
    /// Create a configuration with the standard rules.
    pub fn new(player_count: usize) -> Self {
        assert!(
            (MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count),
            "Player count must be between {MIN_PLAYERS} and {MAX_PLAYERS}"
        );

        Self {
            player_count,
            seed: 0,
            starting_coins: STARTING_COINS,
            discard_value: DISCARD_VALUE,
            base_trade_cost: BASE_TRADE_COST,
            discounted_trade_cost: DISCOUNTED_TRADE_COST,
            max_trades: MAX_TRADES,
            cards_per_hand: CARDS_PER_HAND,
            limit_guilds: true,
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_starting_coins(mut self, coins: u32) -> Self {
        self.starting_coins = coins;
        self
    }

    #[must_use]
    pub fn with_discard_value(mut self, coins: u32) -> Self {
        self.discard_value = coins;
        self
    }

    /// Set the base and discounted trade prices.
    #[must_use]
    pub fn with_trade_costs(mut self, base: u32, discounted: u32) -> Self {
        self.base_trade_cost = base;
        self.discounted_trade_cost = discounted;
        self
    }

    #[must_use]
    pub fn with_max_trades(mut self, max_trades: u32) -> Self {
        self.max_trades = max_trades;
        self
    }

    #[must_use]
    pub fn with_cards_per_hand(mut self, cards: usize) -> Self {
        assert!(cards > 0, "Hands must hold at least 1 card");
        self.cards_per_hand = cards;
        self
    }

    #[must_use]
    pub fn with_limit_guilds(mut self, limit: bool) -> Self {
        self.limit_guilds = limit;
        self
    }

    /// Cards needed to deal one age.
    #[must_use]
    pub fn cards_per_age(&self) -> usize {
        self.cards_per_hand * self.player_count
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(MIN_PLAYERS)
    }
}
