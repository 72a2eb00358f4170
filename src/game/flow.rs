//! The age/turn state machine.
//!
//! These functions drive a [`GameState`] through its phases:
//!
//! ```text
//! Dealing(age) -> PlayerTurn { age, turn } -> AgeEnd(age) -> Dealing(age + 1) | GameOver
//! ```
//!
//! They never choose moves; [`Game`](super::Game) asks the strategies and
//! calls into here between turns.

use log::{debug, info};
use std::sync::Arc;

use crate::cards::{Card, CardRegistry, CardType};
use crate::core::{Age, EngineError, GameState, Phase, PlayerId, PlayerMap, Result, Side};
use crate::rules::military;

/// What happened at the end of a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Hands were passed on; the age goes on.
    AgeContinues,
    /// Last cards discarded and military resolved.
    AgeComplete,
}

/// Deal the current age's hands.
///
/// Draws `cards_per_hand × N` cards from the age's cards for this table
/// size, shuffled with the state's RNG. With `limit_guilds` on, the age III
/// guilds are first sampled down to `N + 2`.
pub fn deal_age(state: &mut GameState, registry: &CardRegistry) -> Result<()> {
    let age = state.age()?;
    let n = state.player_count();
    let needed = state.config().cards_per_age();
    let per_hand = state.config().cards_per_hand;

    let mut deck = registry.eligible(age.number(), n);
    if age == Age::III && state.config().limit_guilds {
        let (mut guilds, rest): (Vec<Arc<Card>>, Vec<Arc<Card>>) =
            deck.into_iter().partition(|c| c.card_type() == CardType::Guild);
        state.rng_mut().shuffle(&mut guilds);
        guilds.truncate(n + 2);
        deck = rest;
        deck.extend(guilds);
    }

    if deck.len() < needed {
        return Err(EngineError::NotEnoughCards {
            age: age.number(),
            needed,
            available: deck.len(),
        });
    }

    state.rng_mut().shuffle(&mut deck);
    deck.truncate(needed);

    let mut chunks = deck.chunks(per_hand);
    for seat in PlayerId::all(n) {
        let hand = chunks.next().map(|chunk| chunk.to_vec()).unwrap_or_default();
        state.player_mut(seat).set_hand(hand);
    }

    state.set_turn(1);
    state.set_phase(Phase::PlayerTurn { age, turn: 1 });
    info!("{age}: dealt {per_hand} cards to each of {n} seats");
    Ok(())
}

/// Close a turn.
///
/// Once every hand is down to its last card, those cards go to the discard
/// pile and the age's conflicts are resolved. Otherwise every hand moves
/// one seat along and the turn counter advances.
pub fn next_turn(state: &mut GameState) -> Result<TurnOutcome> {
    let age = state.age()?;
    let sizes: Vec<usize> = state.players().values().map(|p| p.hand().len()).collect();

    if sizes.iter().all(|&s| s <= 1) {
        for seat in state.player_ids().collect::<Vec<_>>() {
            for card in state.player_mut(seat).take_hand() {
                debug!("{seat} discards last card '{}'", card.name());
                state.push_discard(card);
            }
        }
        military::resolve(state, age);
        state.set_phase(Phase::AgeEnd(age));
        info!("{age} complete after {} turns", state.turn());
        return Ok(TurnOutcome::AgeComplete);
    }

    if sizes.windows(2).any(|w| w[0] != w[1]) {
        return Err(EngineError::InvariantViolation(format!(
            "hand sizes out of step at the end of turn {}: {sizes:?}",
            state.turn()
        )));
    }

    rotate_hands(state, age.receives_from());
    let turn = state.turn() + 1;
    state.set_turn(turn);
    state.set_phase(Phase::PlayerTurn { age, turn });
    Ok(TurnOutcome::AgeContinues)
}

/// Every seat takes the hand of its neighbor on `from` in one step.
fn rotate_hands(state: &mut GameState, from: Side) {
    let n = state.player_count();
    let mut old = PlayerMap::from_vec(state.players_mut().iter_mut().map(|(_, p)| p.take_hand()).collect());

    for seat in PlayerId::all(n) {
        let hand = std::mem::take(&mut old[seat.neighbor(from, n)]);
        state.player_mut(seat).set_hand(hand);
    }
}

/// Move on to the next age. Returns `true` once the third age is over.
pub fn next_age(state: &mut GameState) -> bool {
    let age = state.age_number() + 1;
    state.set_age(age);
    state.set_turn(1);

    match Age::try_from(age) {
        Ok(next) => {
            state.set_phase(Phase::Dealing(next));
            false
        }
        Err(_) => {
            state.set_phase(Phase::GameOver);
            info!("Game over");
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::standard_registry;
    use crate::cards::{Resource, ResourceCounts, Wonder, WonderStage};
    use crate::core::{GameConfig, Player};

    fn state(n: usize, config: GameConfig) -> GameState {
        let wonder = Arc::new(
            Wonder::new(
                "giza",
                Resource::Stone,
                vec![WonderStage::new(ResourceCounts::from_letters("SS").unwrap(), "VVV").unwrap()],
            )
            .unwrap(),
        );
        let players = (0..n as u8)
            .map(|i| Player::new(format!("p{i}"), PlayerId::new(i), wonder.clone(), 3))
            .collect();
        GameState::new(config, players).unwrap()
    }

    fn hand_names(state: &GameState, seat: PlayerId) -> Vec<String> {
        state.player(seat).hand().iter().map(|c| c.name().to_string()).collect()
    }

    #[test]
    fn test_deal_fills_every_hand() {
        let registry = standard_registry().unwrap();
        for n in 3..=7 {
            let mut state = state(n, GameConfig::new(n).with_seed(n as u64));
            deal_age(&mut state, &registry).unwrap();

            for seat in state.player_ids() {
                assert_eq!(state.player(seat).hand().len(), 7);
            }
            assert_eq!(state.phase(), Phase::PlayerTurn { age: Age::I, turn: 1 });
        }
    }

    #[test]
    fn test_deal_is_seeded() {
        let registry = standard_registry().unwrap();
        let mut a = state(4, GameConfig::new(4).with_seed(11));
        let mut b = state(4, GameConfig::new(4).with_seed(11));
        deal_age(&mut a, &registry).unwrap();
        deal_age(&mut b, &registry).unwrap();

        for seat in a.player_ids() {
            assert_eq!(hand_names(&a, seat), hand_names(&b, seat));
        }
    }

    #[test]
    fn test_third_age_guilds_limited() {
        let registry = standard_registry().unwrap();
        let mut state = state(3, GameConfig::new(3).with_seed(5));
        state.set_age(3);
        deal_age(&mut state, &registry).unwrap();

        let guilds = state
            .players()
            .values()
            .flat_map(|p| p.hand().iter())
            .filter(|c| c.card_type() == CardType::Guild)
            .count();
        assert_eq!(guilds, 5);
    }

    #[test]
    fn test_not_enough_cards() {
        let registry = standard_registry().unwrap();
        let mut state = state(3, GameConfig::new(3).with_cards_per_hand(8));

        let err = deal_age(&mut state, &registry).unwrap_err();
        assert_eq!(
            err,
            EngineError::NotEnoughCards {
                age: 1,
                needed: 24,
                available: 21
            }
        );
    }

    #[test]
    fn test_rotation_direction() {
        let registry = standard_registry().unwrap();
        let mut state = state(3, GameConfig::new(3).with_seed(2));
        deal_age(&mut state, &registry).unwrap();

        let before: Vec<_> = state.player_ids().map(|s| hand_names(&state, s)).collect();
        assert_eq!(next_turn(&mut state).unwrap(), TurnOutcome::AgeContinues);

        // Age I: seat 0 now holds what seat 1 held.
        assert_eq!(hand_names(&state, PlayerId::new(0)), before[1]);
        assert_eq!(hand_names(&state, PlayerId::new(2)), before[0]);
        assert_eq!(state.turn(), 2);

        next_age(&mut state);
        deal_age(&mut state, &registry).unwrap();
        let before: Vec<_> = state.player_ids().map(|s| hand_names(&state, s)).collect();
        next_turn(&mut state).unwrap();

        // Age II: seat 0 now holds what seat 2 held.
        assert_eq!(hand_names(&state, PlayerId::new(0)), before[2]);
        assert_eq!(hand_names(&state, PlayerId::new(1)), before[0]);
    }

    #[test]
    fn test_last_cards_discarded_and_military_resolved() {
        let registry = standard_registry().unwrap();
        let mut state = state(3, GameConfig::new(3).with_cards_per_hand(1));
        deal_age(&mut state, &registry).unwrap();

        let stockade = registry.get("stockade").unwrap().clone();
        state.player_mut(PlayerId::new(0)).add_card(stockade).unwrap();

        assert_eq!(next_turn(&mut state).unwrap(), TurnOutcome::AgeComplete);
        assert_eq!(state.discard_pile().len(), 3);
        assert_eq!(state.phase(), Phase::AgeEnd(Age::I));
        assert_eq!(state.player(PlayerId::new(0)).military_tokens(), 2);
        assert_eq!(state.player(PlayerId::new(1)).military_tokens(), -1);
        assert_eq!(state.player(PlayerId::new(2)).defeats(), 1);
    }

    #[test]
    fn test_uneven_hands_rejected() {
        let registry = standard_registry().unwrap();
        let mut state = state(3, GameConfig::new(3));
        deal_age(&mut state, &registry).unwrap();
        let name = state.player(PlayerId::new(1)).hand()[0].name().to_string();
        state.player_mut(PlayerId::new(1)).take_from_hand(&name);

        assert!(matches!(next_turn(&mut state), Err(EngineError::InvariantViolation(_))));
    }

    #[test]
    fn test_next_age_ends_after_third() {
        let mut state = state(3, GameConfig::new(3));
        assert!(!next_age(&mut state));
        assert_eq!(state.phase(), Phase::Dealing(Age::II));
        assert!(!next_age(&mut state));
        assert_eq!(state.phase(), Phase::Dealing(Age::III));
        assert!(next_age(&mut state));
        assert_eq!(state.age_number(), 4);
        assert!(state.is_over());
    }
}
