//! Batch simulation.
//!
//! Plays many independent games in parallel and aggregates the results per
//! seat. Every game gets its own seed, forked from the batch seed, so a
//! batch is reproducible regardless of how rayon schedules it.
//!
//! ## Example
//!
//! ```
//! use rust_wonders::core::GameConfig;
//! use rust_wonders::simulation::{run_batch, BatchConfig};
//! use rust_wonders::strategy::{boxed, SimpleStrategy};
//!
//! let batch = BatchConfig::new(GameConfig::new(3).with_seed(1)).with_games(4);
//! let stats = run_batch(&batch, |_| boxed(SimpleStrategy)).unwrap();
//!
//! assert_eq!(stats.games, 4);
//! assert!((stats.wins.values().sum::<f64>() - 4.0).abs() < 1e-9);
//! ```

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::cards::{standard_registry, CardRegistry};
use crate::core::{GameConfig, GameRng, PlayerId, PlayerMap, Result};
use crate::game::GameBuilder;
use crate::rules::{FinalStandings, GameResult};
use crate::strategy::BoxedStrategy;

/// What to simulate.
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Template for every game; its seed seeds the batch.
    pub game: GameConfig,

    /// Number of games.
    pub games: usize,

    /// Registry to deal from. `None` means the base game.
    pub registry: Option<Arc<CardRegistry>>,
}

impl BatchConfig {
    #[must_use]
    pub fn new(game: GameConfig) -> Self {
        Self {
            game,
            games: 100,
            registry: None,
        }
    }

    #[must_use]
    pub fn with_games(mut self, games: usize) -> Self {
        self.games = games;
        self
    }

    #[must_use]
    pub fn with_registry(mut self, registry: impl Into<Arc<CardRegistry>>) -> Self {
        self.registry = Some(registry.into());
        self
    }

    /// One seed per game, forked from the batch seed.
    #[must_use]
    pub fn seeds(&self) -> Vec<u64> {
        let mut rng = GameRng::new(self.game.seed);
        (0..self.games).map(|_| rng.fork().seed()).collect()
    }
}

/// Aggregated results of a batch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatchStats {
    pub games: usize,

    /// Wins per seat; a shared win counts `1 / winners` for each winner.
    pub wins: PlayerMap<f64>,

    /// Mean final total per seat.
    pub mean_score: PlayerMap<f64>,

    /// Strategy name per seat.
    pub strategies: Vec<String>,
}

impl BatchStats {
    /// Fraction of games won by `seat`.
    #[must_use]
    pub fn win_rate(&self, seat: PlayerId) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.wins[seat] / self.games as f64
        }
    }

    fn from_standings(standings: &[FinalStandings], n: usize, strategies: Vec<String>) -> Self {
        let mut wins = PlayerMap::with_value(n, 0.0);
        let mut totals = PlayerMap::with_value(n, 0.0);

        for game in standings {
            match &game.result {
                GameResult::Winner(seat) => wins[*seat] += 1.0,
                GameResult::Winners(seats) => {
                    let share = 1.0 / seats.len() as f64;
                    for &seat in seats {
                        wins[seat] += share;
                    }
                }
            }
            for (seat, score) in game.scores.iter() {
                totals[seat] += f64::from(score.total());
            }
        }

        let count = standings.len().max(1) as f64;
        Self {
            games: standings.len(),
            wins,
            mean_score: totals.map(|_, t| t / count),
            strategies,
        }
    }
}

/// Play `batch.games` games in parallel, one strategy per seat from
/// `strategies`.
///
/// The first failing game aborts the batch with its error.
pub fn run_batch<F>(batch: &BatchConfig, strategies: F) -> Result<BatchStats>
where
    F: Fn(PlayerId) -> BoxedStrategy + Sync,
{
    let registry = match &batch.registry {
        Some(registry) => Arc::clone(registry),
        None => Arc::new(standard_registry()?),
    };
    let n = batch.game.player_count;
    let names: Vec<String> = PlayerId::all(n).map(|seat| strategies(seat).name().to_string()).collect();

    info!("Simulating {} games at {n} seats: {}", batch.games, names.join(", "));

    let standings = batch
        .seeds()
        .into_par_iter()
        .map(|seed| {
            GameBuilder::new(batch.game.clone().with_seed(seed))
                .registry(Arc::clone(&registry))
                .all_strategies(&strategies)
                .build()?
                .run()
        })
        .collect::<Result<Vec<_>>>()?;

    let stats = BatchStats::from_standings(&standings, n, names);
    info!("Batch finished: wins {:?}", stats.wins.values().collect::<Vec<_>>());
    Ok(stats)
}
