//! Read-only projections of the game handed to strategies.
//!
//! A [`GameView`] borrows the state for one seat. It exposes that seat's
//! hand, the public side of every other seat (never their hands), the
//! discard pile and the age/turn counters. Nothing reachable from a view
//! can mutate the game.

use im::Vector;
use std::sync::Arc;

use super::action::Move;
use super::player::{PlayerId, Side};
use super::state::{GameState, Player};
use crate::cards::{Card, CardType, ResourceCounts, Wonder, WonderStage};
use crate::rules::{self, Settlement};

/// One seat's view of the table.
#[derive(Clone, Copy, Debug)]
pub struct GameView<'a> {
    state: &'a GameState,
    seat: PlayerId,
}

impl<'a> GameView<'a> {
    #[must_use]
    pub fn new(state: &'a GameState, seat: PlayerId) -> Self {
        Self { state, seat }
    }

    #[must_use]
    pub fn seat(&self) -> PlayerId {
        self.seat
    }

    /// Current age number: 1..=3 during play, 4 once the game is over.
    #[must_use]
    pub fn age(&self) -> u8 {
        self.state.age_number()
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.state.turn()
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.state.player_count()
    }

    /// The viewing seat, hand included.
    #[must_use]
    pub fn me(&self) -> PlayerView<'a> {
        PlayerView {
            player: self.state.player(self.seat),
        }
    }

    #[must_use]
    pub fn hand(&self) -> &'a [Arc<Card>] {
        self.state.player(self.seat).hand()
    }

    #[must_use]
    pub fn neighbor(&self, side: Side) -> NeighborView<'a> {
        NeighborView {
            player: self.state.neighbor(self.seat, side),
        }
    }

    #[must_use]
    pub fn left(&self) -> NeighborView<'a> {
        self.neighbor(Side::Left)
    }

    #[must_use]
    pub fn right(&self) -> NeighborView<'a> {
        self.neighbor(Side::Right)
    }

    #[must_use]
    pub fn discard_pile(&self) -> &'a Vector<Arc<Card>> {
        self.state.discard_pile()
    }

    /// Every move the engine would accept from this seat right now.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<Move> {
        rules::legal_moves(self.state, self.seat)
    }

    /// Whether this seat could pay `cost`, trading included.
    #[must_use]
    pub fn can_afford(&self, cost: &ResourceCounts) -> bool {
        rules::can_afford(self.state, self.seat, cost)
    }

    /// Coins a legal move would cost, trades included; `None` if illegal.
    #[must_use]
    pub fn coin_cost(&self, mv: &Move) -> Option<u32> {
        let validated = rules::validate(self.state, mv).ok()?;
        Some(match validated.settlement() {
            Settlement::Pay(plan) => plan.total_coins(),
            Settlement::Chain | Settlement::Sell => 0,
        })
    }
}

/// The viewing seat's own state.
#[derive(Clone, Copy, Debug)]
pub struct PlayerView<'a> {
    player: &'a Player,
}

impl<'a> PlayerView<'a> {
    #[must_use]
    pub fn seat(&self) -> PlayerId {
        self.player.seat()
    }

    #[must_use]
    pub fn name(&self) -> &'a str {
        self.player.name()
    }

    #[must_use]
    pub fn hand(&self) -> &'a [Arc<Card>] {
        self.player.hand()
    }

    #[must_use]
    pub fn cards(&self) -> &'a [Arc<Card>] {
        self.player.cards()
    }

    #[must_use]
    pub fn coins(&self) -> u32 {
        self.player.coins()
    }

    #[must_use]
    pub fn military_tokens(&self) -> i32 {
        self.player.military_tokens()
    }

    #[must_use]
    pub fn shields(&self) -> u32 {
        self.player.shields()
    }

    #[must_use]
    pub fn wonder(&self) -> &'a Wonder {
        self.player.wonder()
    }

    #[must_use]
    pub fn stages_built(&self) -> usize {
        self.player.stages_built()
    }

    #[must_use]
    pub fn next_stage(&self) -> Option<&'a WonderStage> {
        self.player.next_stage()
    }

    #[must_use]
    pub fn owns(&self, name: &str) -> bool {
        self.player.owns(name)
    }

    #[must_use]
    pub fn count_cards_by_type(&self, card_type: CardType) -> u32 {
        self.player.count_cards_by_type(card_type)
    }
}

/// A neighbor's public state. Hands are hidden.
#[derive(Clone, Copy, Debug)]
pub struct NeighborView<'a> {
    player: &'a Player,
}

impl<'a> NeighborView<'a> {
    #[must_use]
    pub fn seat(&self) -> PlayerId {
        self.player.seat()
    }

    #[must_use]
    pub fn cards(&self) -> &'a [Arc<Card>] {
        self.player.cards()
    }

    #[must_use]
    pub fn coins(&self) -> u32 {
        self.player.coins()
    }

    #[must_use]
    pub fn military_tokens(&self) -> i32 {
        self.player.military_tokens()
    }

    #[must_use]
    pub fn shields(&self) -> u32 {
        self.player.shields()
    }

    #[must_use]
    pub fn wonder(&self) -> &'a Wonder {
        self.player.wonder()
    }

    #[must_use]
    pub fn stages_built(&self) -> usize {
        self.player.stages_built()
    }

    /// Number of cards held, without revealing them.
    #[must_use]
    pub fn hand_size(&self) -> usize {
        self.player.hand().len()
    }
}
