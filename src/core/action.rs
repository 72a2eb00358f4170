//! Move representation.
//!
//! A move is one of three verbs applied to one card from the actor's hand:
//! - "Play" puts the card in front of the player
//! - "BuildWonder" tucks the card under the next wonder stage
//! - "Discard" sells the card back to the bank for coins
//!
//! The card is always consumed from hand, whichever verb is chosen.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::player::PlayerId;
use crate::cards::Card;

/// The verb of a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveAction {
    Play,
    BuildWonder,
    Discard,
}

impl MoveAction {
    pub const ALL: [MoveAction; 3] = [MoveAction::Play, MoveAction::BuildWonder, MoveAction::Discard];
}

impl fmt::Display for MoveAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MoveAction::Play => "play",
            MoveAction::BuildWonder => "build wonder with",
            MoveAction::Discard => "discard",
        })
    }
}

/// A complete move: verb, actor and the card from hand.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use rust_wonders::cards::{Card, CardType, ResourceCounts};
/// use rust_wonders::core::{Move, MoveAction, PlayerId};
///
/// let baths = Arc::new(
///     Card::new("baths", CardType::Civilian, 1, 3, ResourceCounts::from_letters("S").unwrap(), "VVV")
///         .unwrap(),
/// );
///
/// let play = Move::play(PlayerId::new(0), Arc::clone(&baths));
/// assert_eq!(play.action, MoveAction::Play);
/// assert_eq!(play.card.name(), "baths");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub action: MoveAction,
    pub actor: PlayerId,
    pub card: Arc<Card>,
}

impl Move {
    #[must_use]
    pub fn new(action: MoveAction, actor: PlayerId, card: Arc<Card>) -> Self {
        Self { action, actor, card }
    }

    #[must_use]
    pub fn play(actor: PlayerId, card: Arc<Card>) -> Self {
        Self::new(MoveAction::Play, actor, card)
    }

    #[must_use]
    pub fn build_wonder(actor: PlayerId, card: Arc<Card>) -> Self {
        Self::new(MoveAction::BuildWonder, actor, card)
    }

    #[must_use]
    pub fn discard(actor: PlayerId, card: Arc<Card>) -> Self {
        Self::new(MoveAction::Discard, actor, card)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} '{}'", self.actor, self.action, self.card.name())
    }
}

/// A recorded move with metadata for history tracking.
///
/// Used for replay, debugging and simulation statistics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Age the move was made in (1..=3).
    pub age: u8,

    /// Turn within the age (1-based).
    pub turn: u32,

    pub actor: PlayerId,
    pub action: MoveAction,

    /// Name of the consumed card.
    pub card: String,

    /// Coins paid to the bank for the cost.
    pub coins_to_bank: u32,

    /// Coins paid to neighbors for traded resources.
    pub coins_to_neighbors: u32,

    /// Coins received (discard value or instantaneous coin effects).
    pub coins_gained: u32,

    /// Whether the card was built for free through a chain.
    pub chained: bool,
}

impl MoveRecord {
    #[must_use]
    pub fn new(age: u8, turn: u32, mv: &Move) -> Self {
        Self {
            age,
            turn,
            actor: mv.actor,
            action: mv.action,
            card: mv.card.name().to_string(),
            coins_to_bank: 0,
            coins_to_neighbors: 0,
            coins_gained: 0,
            chained: false,
        }
    }
}
