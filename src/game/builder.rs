use std::sync::Arc;

use super::runner::Game;
use crate::cards::{standard_registry, CardRegistry, Wonder};
use crate::core::{EngineError, GameConfig, GameRng, GameState, Player, PlayerId, PlayerMap, Result};
use crate::strategy::{boxed, BoxedStrategy, FirstLegal};

/// Builder for a [`Game`].
///
/// Anything left unset gets a default: the base-game registry, names
/// `"Player 1"`.. `"Player N"`, wonders drawn at random from the registry
/// and [`FirstLegal`] for every seat without a strategy.
///
/// ## Example
///
/// ```
/// use rust_wonders::core::{GameConfig, PlayerId};
/// use rust_wonders::game::GameBuilder;
/// use rust_wonders::strategy::{boxed, RandomStrategy, WarriorStrategy};
///
/// let game = GameBuilder::new(GameConfig::new(4).with_seed(9))
///     .player_names(["ann", "bo", "cy", "di"])
///     .all_strategies(|_| boxed(RandomStrategy))
///     .strategy(PlayerId::new(2), boxed(WarriorStrategy))
///     .build()
///     .unwrap();
///
/// assert_eq!(game.strategy_names(), ["random", "random", "warrior", "random"]);
/// assert_eq!(game.state().player(PlayerId::new(1)).name(), "bo");
/// ```
pub struct GameBuilder {
    config: GameConfig,
    registry: Option<Arc<CardRegistry>>,
    names: Option<Vec<String>>,
    wonders: Option<Vec<String>>,
    strategies: Vec<Option<BoxedStrategy>>,
}

impl GameBuilder {
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let seats = config.player_count;
        Self {
            config,
            registry: None,
            names: None,
            wonders: None,
            strategies: (0..seats).map(|_| None).collect(),
        }
    }

    /// Deal from this registry instead of the base game.
    #[must_use]
    pub fn registry(mut self, registry: impl Into<Arc<CardRegistry>>) -> Self {
        self.registry = Some(registry.into());
        self
    }

    /// Seat names, in seat order.
    #[must_use]
    pub fn player_names<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Wonder boards by name, in seat order.
    #[must_use]
    pub fn wonders<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.wonders = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Strategy for one seat.
    #[must_use]
    pub fn strategy(mut self, seat: PlayerId, strategy: BoxedStrategy) -> Self {
        assert!(
            seat.index() < self.strategies.len(),
            "{seat} is outside a {}-seat table",
            self.strategies.len()
        );
        self.strategies[seat.index()] = Some(strategy);
        self
    }

    /// Strategy for every seat from a factory.
    #[must_use]
    pub fn all_strategies(mut self, mut factory: impl FnMut(PlayerId) -> BoxedStrategy) -> Self {
        for (i, slot) in self.strategies.iter_mut().enumerate() {
            *slot = Some(factory(PlayerId::new(i as u8)));
        }
        self
    }

    /// Seat the players and set up the first age.
    pub fn build(self) -> Result<Game> {
        let n = self.config.player_count;
        let registry = match self.registry {
            Some(registry) => registry,
            None => Arc::new(standard_registry()?),
        };

        let names = match self.names {
            Some(names) if names.len() != n => {
                return Err(EngineError::InvalidSetup(format!("{} names for {n} seats", names.len())));
            }
            Some(names) => names,
            None => (1..=n).map(|i| format!("Player {i}")).collect(),
        };

        let wonders = assign_wonders(&registry, self.wonders, &self.config)?;

        let players = names
            .into_iter()
            .zip(wonders)
            .enumerate()
            .map(|(i, (name, wonder))| Player::new(name, PlayerId::new(i as u8), wonder, self.config.starting_coins))
            .collect();

        let seed_rng = GameRng::new(self.config.seed);
        let strategy_rngs = PlayerMap::new(n, |seat| seed_rng.for_context(&format!("seat-{}", seat.index())));
        let strategies = PlayerMap::from_vec(
            self.strategies
                .into_iter()
                .map(|s| s.unwrap_or_else(|| boxed(FirstLegal)))
                .collect(),
        );

        let state = GameState::new(self.config, players)?;
        Ok(Game {
            state,
            registry,
            strategies,
            strategy_rngs,
        })
    }
}

/// Look up the requested boards, or draw `N` distinct ones at random.
///
/// The draw uses its own stream so it never shifts the deck shuffle.
fn assign_wonders(
    registry: &CardRegistry,
    requested: Option<Vec<String>>,
    config: &GameConfig,
) -> Result<Vec<Arc<Wonder>>> {
    let n = config.player_count;

    if let Some(names) = requested {
        if names.len() != n {
            return Err(EngineError::InvalidSetup(format!("{} wonders for {n} seats", names.len())));
        }
        return names
            .iter()
            .map(|name| {
                registry
                    .wonder(name)
                    .cloned()
                    .ok_or_else(|| EngineError::InvalidSetup(format!("unknown wonder '{name}'")))
            })
            .collect();
    }

    let mut pool = registry.wonders().to_vec();
    if pool.len() < n {
        return Err(EngineError::InvalidSetup(format!(
            "{} wonders registered for {n} seats",
            pool.len()
        )));
    }
    GameRng::new(config.seed).for_context("wonders").shuffle(&mut pool);
    pool.truncate(n);
    Ok(pool)
}
