//! Move validation and execution.
//!
//! [`validate`] checks a move against the current table and returns a
//! [`ValidatedMove`] carrying how it will be paid. [`execute`] applies a
//! validated move. [`apply_move`] does both. Validation never writes, so a
//! rejected move leaves the state exactly as it was.

use log::debug;
use rustc_hash::FxHashSet;

use super::trading::{self, PaymentPlan};
use crate::cards::ResourceCounts;
use crate::core::{
    EngineError, GameState, IllegalReason, Move, MoveAction, MoveRecord, PlayerId, Result,
};
use crate::effects::EffectResolver;

/// How a legal move settles its cost.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Settlement {
    /// Paid through a payment plan (possibly free).
    Pay(PaymentPlan),
    /// Built for free through a chain from an owned card.
    Chain,
    /// Discarded for coins from the bank.
    Sell,
}

/// A move that passed validation against a specific state.
///
/// Only [`validate`] builds one. Its move carries the actor's own copy of
/// the card, whatever card value the caller passed in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedMove {
    mv: Move,
    settlement: Settlement,
}

impl ValidatedMove {
    #[must_use]
    pub fn mv(&self) -> &Move {
        &self.mv
    }

    #[must_use]
    pub fn settlement(&self) -> &Settlement {
        &self.settlement
    }
}

fn illegal(mv: &Move, reason: IllegalReason) -> EngineError {
    EngineError::IllegalMove {
        actor: mv.actor,
        action: mv.action,
        card: mv.card.name().to_string(),
        reason,
    }
}

/// Turn trading failures into the illegal-move reason callers expect.
fn plan_or_illegal(state: &GameState, mv: &Move, cost: &ResourceCounts) -> Result<PaymentPlan> {
    trading::plan_payment(state, mv.actor, cost).map_err(|err| match err {
        EngineError::Unaffordable { missing, .. } => illegal(mv, IllegalReason::Unaffordable(missing)),
        other => other,
    })
}

/// Check a move without mutating anything.
///
/// Only the card's name is read from `mv`. Cost, chains and effects come
/// from the matching card in the actor's hand.
pub fn validate(state: &GameState, mv: &Move) -> Result<ValidatedMove> {
    let player = state
        .try_player(mv.actor)
        .ok_or_else(|| illegal(mv, IllegalReason::UnknownPlayer))?;

    let card = player
        .hand()
        .iter()
        .find(|c| c.name() == mv.card.name())
        .cloned()
        .ok_or_else(|| illegal(mv, IllegalReason::CardNotInHand))?;

    let settlement = match mv.action {
        MoveAction::Play => {
            if player.owns(card.name()) {
                return Err(illegal(mv, IllegalReason::AlreadyOwned));
            }
            if player.can_chain(card.name()) {
                Settlement::Chain
            } else {
                Settlement::Pay(plan_or_illegal(state, mv, card.cost())?)
            }
        }
        MoveAction::BuildWonder => {
            let stage = player
                .next_stage()
                .ok_or_else(|| illegal(mv, IllegalReason::WonderComplete))?;
            Settlement::Pay(plan_or_illegal(state, mv, stage.cost())?)
        }
        MoveAction::Discard => Settlement::Sell,
    };

    Ok(ValidatedMove {
        mv: Move::new(mv.action, mv.actor, card),
        settlement,
    })
}

/// Apply a move validated against this same state.
pub fn execute(state: &mut GameState, validated: ValidatedMove) -> Result<MoveRecord> {
    let ValidatedMove { mv, settlement } = validated;
    let actor = mv.actor;
    let mut record = MoveRecord::new(state.age_number(), state.turn(), &mv);

    match &settlement {
        Settlement::Pay(plan) => {
            trading::commit(state, plan)?;
            record.coins_to_bank = plan.coins_to_bank;
            record.coins_to_neighbors = plan.coins_to_neighbors();
        }
        Settlement::Chain => record.chained = true,
        Settlement::Sell => {}
    }

    let card = state
        .player_mut(actor)
        .take_from_hand(mv.card.name())
        .ok_or_else(|| EngineError::InvariantViolation(format!("'{}' left {actor}'s hand", mv.card.name())))?;

    match mv.action {
        MoveAction::Play => {
            state.player_mut(actor).add_card(card.clone())?;
            record.coins_gained = EffectResolver::apply_instant(state, actor, card.effects(), card.name());
        }
        MoveAction::BuildWonder => {
            let stage_index = state.player(actor).stages_built();
            state.player_mut(actor).build_stage()?;
            let wonder = state.player(actor).wonder().clone();
            let stage = wonder.stage(stage_index).ok_or_else(|| {
                EngineError::InvariantViolation(format!("{} has no stage {}", wonder.name(), stage_index + 1))
            })?;
            let source = format!("{} stage {}", wonder.name(), stage_index + 1);
            record.coins_gained = EffectResolver::apply_instant(state, actor, stage.effects(), &source);
        }
        MoveAction::Discard => {
            let value = state.config().discard_value;
            state.player_mut(actor).add_coins(value);
            state.push_discard(card);
            record.coins_gained = value;
        }
    }

    debug!(
        "{mv} (paid {} to bank, {} to neighbors, gained {})",
        record.coins_to_bank, record.coins_to_neighbors, record.coins_gained
    );
    state.record(record.clone());
    Ok(record)
}

/// Validate and execute a move.
pub fn apply_move(state: &mut GameState, mv: &Move) -> Result<MoveRecord> {
    let validated = validate(state, mv)?;
    execute(state, validated)
}

/// Every legal move for `actor`, one per distinct (action, card name).
///
/// Discarding is always legal, so this is never empty while the actor
/// holds cards.
#[must_use]
pub fn legal_moves(state: &GameState, actor: PlayerId) -> Vec<Move> {
    let Some(player) = state.try_player(actor) else {
        return Vec::new();
    };

    let mut seen = FxHashSet::default();
    let mut moves = Vec::new();
    for card in player.hand() {
        for action in MoveAction::ALL {
            if !seen.insert((action, card.name())) {
                continue;
            }
            let mv = Move::new(action, actor, card.clone());
            if validate(state, &mv).is_ok() {
                moves.push(mv);
            }
        }
    }
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, CardType, Resource, ResourceCounts, Wonder, WonderStage};
    use crate::core::{GameConfig, Player};
    use std::sync::Arc;

    const ME: PlayerId = PlayerId::new(0);

    fn card(name: &str, card_type: CardType, cost: &str, effect: &str) -> Arc<Card> {
        Arc::new(
            Card::new(name, card_type, 1, 3, ResourceCounts::from_letters(cost).unwrap(), effect).unwrap(),
        )
    }

    fn table() -> GameState {
        let wonder = Arc::new(
            Wonder::new(
                "ephesos",
                Resource::Papyrus,
                vec![
                    WonderStage::new(ResourceCounts::from_letters("P").unwrap(), "VVV").unwrap(),
                    WonderStage::new(ResourceCounts::from_letters("PP").unwrap(), "$$$$$$$$$").unwrap(),
                ],
            )
            .unwrap(),
        );
        let players = (0..3)
            .map(|i| Player::new(format!("p{i}"), PlayerId::new(i), wonder.clone(), 3))
            .collect();
        GameState::new(GameConfig::new(3), players).unwrap()
    }

    fn deal(state: &mut GameState, seat: PlayerId, hand: Vec<Arc<Card>>) {
        state.player_mut(seat).set_hand(hand);
    }

    fn reason(err: EngineError) -> IllegalReason {
        match err {
            EngineError::IllegalMove { reason, .. } => reason,
            other => panic!("expected illegal move, got {other:?}"),
        }
    }

    #[test]
    fn test_play_pays_and_adds_card() {
        let mut state = table();
        let press = card("press", CardType::ManufacturedGood, "$", "P");
        deal(&mut state, ME, vec![press.clone()]);

        let record = apply_move(&mut state, &Move::play(ME, press)).unwrap();

        let me = state.player(ME);
        assert!(me.owns("press"));
        assert!(me.hand().is_empty());
        assert_eq!(me.coins(), 2);
        assert_eq!(record.coins_to_bank, 1);
        assert_eq!(state.history().len(), 1);
    }

    #[test]
    fn test_play_rejects_owned_card() {
        let mut state = table();
        let altar = card("altar", CardType::Civilian, "", "VV");
        state.player_mut(ME).add_card(altar.clone()).unwrap();
        deal(&mut state, ME, vec![altar.clone()]);

        let err = apply_move(&mut state, &Move::play(ME, altar)).unwrap_err();
        assert_eq!(reason(err), IllegalReason::AlreadyOwned);
    }

    #[test]
    fn test_card_must_be_in_hand() {
        let mut state = table();
        let altar = card("altar", CardType::Civilian, "", "VV");

        let err = apply_move(&mut state, &Move::discard(ME, altar.clone())).unwrap_err();
        assert_eq!(reason(err), IllegalReason::CardNotInHand);

        let err = apply_move(&mut state, &Move::discard(PlayerId::new(5), altar)).unwrap_err();
        assert_eq!(reason(err), IllegalReason::UnknownPlayer);
    }

    #[test]
    fn test_unaffordable_play_changes_nothing() {
        let mut state = table();
        let statue = card("statue", CardType::Civilian, "OOW", "VVVV");
        deal(&mut state, ME, vec![statue.clone()]);
        let before = state.player(ME).clone();

        let err = apply_move(&mut state, &Move::play(ME, statue)).unwrap_err();
        assert!(matches!(reason(err), IllegalReason::Unaffordable(_)));
        assert_eq!(state.player(ME), &before);
        assert!(state.history().is_empty());
    }

    #[test]
    fn test_chain_builds_for_free() {
        let mut state = table();
        let baths = card("baths", CardType::Civilian, "S", "VVV");
        let aqueduct = card("aqueduct", CardType::Civilian, "SSS", "VVVVV");
        let mut with_chain = (*baths).clone();
        with_chain = with_chain.with_chain_to(["aqueduct"]);
        state.player_mut(ME).add_card(Arc::new(with_chain)).unwrap();
        deal(&mut state, ME, vec![aqueduct.clone()]);

        let record = apply_move(&mut state, &Move::play(ME, aqueduct)).unwrap();
        assert!(record.chained);
        assert_eq!(state.player(ME).coins(), 3);
        assert!(state.player(ME).owns("aqueduct"));
    }

    #[test]
    fn test_build_wonder_tucks_card() {
        let mut state = table();
        let altar = card("altar", CardType::Civilian, "", "VV");
        let baths = card("baths", CardType::Civilian, "", "VVV");
        deal(&mut state, ME, vec![altar.clone(), baths.clone()]);

        apply_move(&mut state, &Move::build_wonder(ME, altar)).unwrap();
        assert_eq!(state.player(ME).stages_built(), 1);
        assert!(state.discard_pile().is_empty());
        assert!(!state.player(ME).owns("altar"));

        // Second stage needs PP: one own, one bought for 2, then 9 coins paid out.
        let record = apply_move(&mut state, &Move::build_wonder(ME, baths)).unwrap();
        assert_eq!(record.coins_to_neighbors, 2);
        assert_eq!(record.coins_gained, 9);
        assert_eq!(state.player(ME).coins(), 3 - 2 + 9);
    }

    #[test]
    fn test_build_wonder_rejects_complete_wonder() {
        let mut state = table();
        state.player_mut(ME).build_stage().unwrap();
        state.player_mut(ME).build_stage().unwrap();
        let altar = card("altar", CardType::Civilian, "", "VV");
        deal(&mut state, ME, vec![altar.clone()]);

        let err = apply_move(&mut state, &Move::build_wonder(ME, altar)).unwrap_err();
        assert_eq!(reason(err), IllegalReason::WonderComplete);
    }

    #[test]
    fn test_discard_gives_coins() {
        let mut state = table();
        let altar = card("altar", CardType::Civilian, "", "VV");
        deal(&mut state, ME, vec![altar.clone()]);

        apply_move(&mut state, &Move::discard(ME, altar)).unwrap();
        assert_eq!(state.player(ME).coins(), 6);
        assert_eq!(state.discard_pile().len(), 1);
        assert!(state.player(ME).hand().is_empty());
    }

    #[test]
    fn test_commercial_coins_are_instant() {
        let mut state = table();
        let tavern = card("tavern", CardType::Commercial, "", "$$$$$");
        deal(&mut state, ME, vec![tavern.clone()]);

        apply_move(&mut state, &Move::play(ME, tavern)).unwrap();
        assert_eq!(state.player(ME).coins(), 8);
    }

    #[test]
    fn test_legal_moves() {
        let mut state = table();
        let altar = card("altar", CardType::Civilian, "", "VV");
        let palace = card("palace", CardType::Civilian, "SOWBFPL", "VVVVVVVV");
        deal(&mut state, ME, vec![altar, palace]);

        let moves = legal_moves(&state, ME);
        let names: Vec<_> = moves.iter().map(|m| (m.action, m.card.name().to_string())).collect();

        assert!(names.contains(&(MoveAction::Play, "altar".to_string())));
        assert!(names.contains(&(MoveAction::BuildWonder, "altar".to_string())));
        assert!(names.contains(&(MoveAction::Discard, "palace".to_string())));
        assert!(!names.contains(&(MoveAction::Play, "palace".to_string())));
        assert_eq!(moves.len(), 5);
    }

    #[test]
    fn test_cost_comes_from_hand_card() {
        let mut state = table();
        let statue = card("statue", CardType::Civilian, "OOW", "VVVV");
        deal(&mut state, ME, vec![statue]);
        let before = state.player(ME).clone();

        // Same name, no cost: still priced as the statue in hand.
        let free_copy = card("statue", CardType::Civilian, "", "VVVV");
        let err = apply_move(&mut state, &Move::play(ME, free_copy)).unwrap_err();

        assert!(matches!(reason(err), IllegalReason::Unaffordable(_)));
        assert_eq!(state.player(ME), &before);
        assert!(state.history().is_empty());
    }

    #[test]
    fn test_effects_come_from_hand_card() {
        let mut state = table();
        let altar = card("altar", CardType::Civilian, "", "VV");
        deal(&mut state, ME, vec![altar.clone()]);

        let rich_copy = card("altar", CardType::Commercial, "", "$$$$$$$$$");
        let validated = validate(&state, &Move::play(ME, rich_copy)).unwrap();
        assert!(Arc::ptr_eq(&validated.mv().card, &altar));

        let record = execute(&mut state, validated).unwrap();
        assert_eq!(record.coins_gained, 0);
        assert_eq!(state.player(ME).coins(), 3);
        assert_eq!(state.player(ME).cards()[0].card_type(), CardType::Civilian);
    }
}
