//! Engine error taxonomy.
//!
//! Recoverable errors (`IllegalMove`, `Unaffordable`) tell a caller to pick
//! another move; nothing was mutated. Fatal errors (`InvariantViolation`,
//! `UnknownScope`) mean the engine or its card data is broken, and the game
//! runner stops on them.

use thiserror::Error;

use super::action::MoveAction;
use super::player::PlayerId;
use crate::cards::ResourceCounts;

/// Why a move was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IllegalReason {
    #[error("a card with this name is already built")]
    AlreadyOwned,

    #[error("every wonder stage is already built")]
    WonderComplete,

    #[error("cost cannot be paid, missing {0}")]
    Unaffordable(ResourceCounts),

    #[error("card is not in the player's hand")]
    CardNotInHand,

    #[error("no such seat")]
    UnknownPlayer,
}

/// Errors raised by the rules engine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The move fails validation. Recoverable: choose another move.
    #[error("illegal move by {actor}: {action} '{card}': {reason}")]
    IllegalMove {
        actor: PlayerId,
        action: MoveAction,
        card: String,
        reason: IllegalReason,
    },

    /// The trading resolver cannot complete a cost even with maximum trading.
    #[error("{actor} cannot afford cost, missing {missing}")]
    Unaffordable {
        actor: PlayerId,
        missing: ResourceCounts,
    },

    /// A core invariant would break. Indicates an engine bug.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// A scoring effect names a scope the scoring engine does not handle.
    #[error("unknown effect scope '{0}'")]
    UnknownScope(String),

    /// An effect string does not follow the effect grammar.
    #[error("cannot parse effect '{effect}': {reason}")]
    EffectParse { effect: String, reason: String },

    /// Too few eligible cards to deal an age.
    #[error("age {age} needs {needed} cards but only {available} are eligible")]
    NotEnoughCards {
        age: u8,
        needed: usize,
        available: usize,
    },

    /// Players, wonders or strategies do not fit together.
    #[error("invalid game setup: {0}")]
    InvalidSetup(String),
}

impl EngineError {
    /// Whether the caller may recover by choosing a different move.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::IllegalMove { .. } | Self::Unaffordable { .. })
    }
}

/// Result alias used across the engine.
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illegal_move_message_carries_context() {
        let err = EngineError::IllegalMove {
            actor: PlayerId::new(2),
            action: MoveAction::Play,
            card: "baths".to_string(),
            reason: IllegalReason::AlreadyOwned,
        };

        let message = err.to_string();
        assert!(message.contains("Seat 2"));
        assert!(message.contains("baths"));
        assert!(message.contains("already built"));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_fatal_errors_are_not_recoverable() {
        assert!(!EngineError::InvariantViolation("coins".into()).is_recoverable());
        assert!(!EngineError::UnknownScope("wonders".into()).is_recoverable());
    }
}
