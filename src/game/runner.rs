use log::{debug, info};
use std::fmt;
use std::sync::Arc;

use super::flow::{self, TurnOutcome};
use crate::cards::CardRegistry;
use crate::core::{EngineError, GameRng, GameState, GameView, Phase, PlayerMap, Result};
use crate::rules::{self, FinalStandings};
use crate::scoring;
use crate::strategy::BoxedStrategy;

/// A game in progress: the table, the deck source and one strategy per seat.
///
/// Built with [`GameBuilder`](super::GameBuilder).
pub struct Game {
    pub(super) state: GameState,
    pub(super) registry: Arc<CardRegistry>,
    pub(super) strategies: PlayerMap<BoxedStrategy>,
    pub(super) strategy_rngs: PlayerMap<GameRng>,
}

impl Game {
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Consume the game and keep its final table.
    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    /// Strategy names in seat order.
    #[must_use]
    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.values().map(|s| s.name()).collect()
    }

    /// Deal the current age.
    pub fn deal_age(&mut self) -> Result<()> {
        flow::deal_age(&mut self.state, &self.registry)
    }

    /// Close the current turn; see [`flow::next_turn`].
    pub fn next_turn(&mut self) -> Result<TurnOutcome> {
        flow::next_turn(&mut self.state)
    }

    /// Advance to the next age. Returns `true` once the game is over.
    pub fn next_age(&mut self) -> bool {
        flow::next_age(&mut self.state)
    }

    /// Every seat, in ring order, chooses and applies one move.
    ///
    /// Each seat sees the moves of the seats before it. A move the engine
    /// rejects is returned as the error and leaves the table untouched.
    pub fn play_turn(&mut self) -> Result<()> {
        let age = self.state.age()?;
        let turn = self.state.turn();
        self.state.set_phase(Phase::PlayerTurn { age, turn });

        for seat in self.state.player_ids().collect::<Vec<_>>() {
            if self.state.player(seat).hand().is_empty() {
                continue;
            }

            let view = GameView::new(&self.state, seat);
            let choice = self.strategies[seat].choose_move(&view, &mut self.strategy_rngs[seat]);
            let mv = choice.ok_or_else(|| {
                EngineError::InvariantViolation(format!(
                    "strategy '{}' offered no move for {seat} on turn {turn}",
                    self.strategies[seat].name()
                ))
            })?;

            if mv.actor != seat {
                return Err(EngineError::InvariantViolation(format!(
                    "strategy for {seat} returned a move for {}",
                    mv.actor
                )));
            }
            rules::apply_move(&mut self.state, &mv)?;
        }
        Ok(())
    }

    /// Play all three ages and score the table.
    ///
    /// ```
    /// use rust_wonders::game::GameBuilder;
    /// use rust_wonders::core::GameConfig;
    ///
    /// let mut game = GameBuilder::new(GameConfig::new(3).with_seed(42)).build().unwrap();
    /// let standings = game.run().unwrap();
    ///
    /// assert!(game.state().is_over());
    /// assert_eq!(standings.scores.player_count(), 3);
    /// ```
    pub fn run(&mut self) -> Result<FinalStandings> {
        info!(
            "Starting a {}-seat game with seed {}",
            self.state.player_count(),
            self.state.config().seed
        );

        while !self.state.is_over() {
            self.deal_age()?;
            loop {
                self.play_turn()?;
                if self.next_turn()? == TurnOutcome::AgeComplete {
                    break;
                }
            }
            self.next_age();
        }

        let standings = FinalStandings::new(scoring::calculate_all(&self.state)?);
        for (seat, total) in standings.ranking() {
            debug!("{seat} ({}) finishes on {total}", self.state.player(seat).name());
        }
        info!("Winners: {:?}", standings.result.winners());
        Ok(standings)
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("state", &self.state)
            .field("strategies", &self.strategy_names())
            .finish_non_exhaustive()
    }
}
