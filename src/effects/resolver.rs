//! Effect resolution - evaluating parsed effects against players.
//!
//! Production is passive and is collected here for the trading resolver.
//! Coin effects are the only instantaneous effects and are applied here
//! when a card is played or a stage is built. Everything else waits for
//! the scoring engine, which shares the scope counting below.

use log::debug;
use smallvec::SmallVec;

use super::effect::{Effect, EffectList, Reach, Scope, ScopeTarget};
use crate::cards::{Resource, ResourceCounts};
use crate::core::{GameState, Player, PlayerId};

/// Goods available for one payment: fixed units plus one-of-N choices.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Production {
    pub fixed: ResourceCounts,
    pub choices: Vec<SmallVec<[Resource; 4]>>,
}

impl Production {
    /// Everything the player may use for their own costs: the wonder's
    /// starting resource, every played card and every built stage.
    #[must_use]
    pub fn own(player: &Player) -> Self {
        let mut production = Self::default();
        production.fixed.add(player.wonder().resource(), 1);
        for effect in player.effects() {
            production.add_effect(effect);
        }
        production
    }

    /// What neighbors may buy: the starting resource plus raw material and
    /// manufactured good cards. Wonder stage production is not for sale.
    #[must_use]
    pub fn tradable(player: &Player) -> Self {
        let mut production = Self::default();
        production.fixed.add(player.wonder().resource(), 1);
        for card in player.cards().iter().filter(|c| c.is_tradable()) {
            for effect in card.effects() {
                production.add_effect(effect);
            }
        }
        production
    }

    fn add_effect(&mut self, effect: &Effect) {
        match effect {
            Effect::Produce { resource, amount } => self.fixed.add(*resource, *amount),
            Effect::ProduceChoice(options) => self.choices.push(options.clone()),
            _ => {}
        }
    }
}

/// Count a scope target on one player.
///
/// `Military` may be negative. `WondersComplete` counts 1 for a finished
/// wonder.
#[must_use]
pub fn count_target(target: &ScopeTarget, player: &Player) -> i32 {
    match target {
        ScopeTarget::Wonder => player.stages_built() as i32,
        ScopeTarget::WondersComplete => i32::from(player.wonder_complete()),
        ScopeTarget::Military => player.military_tokens(),
        ScopeTarget::Defeat => player.defeats() as i32,
        ScopeTarget::CardTypes(types) => types.iter().map(|&t| player.count_cards_by_type(t) as i32).sum(),
    }
}

/// Count a scope target across the seats selected by `reach`.
#[must_use]
pub fn count_across(target: &ScopeTarget, reach: Reach, owner: &Player, left: &Player, right: &Player) -> i32 {
    let mut total = 0;
    if reach.own {
        total += count_target(target, owner);
    }
    if reach.left {
        total += count_target(target, left);
    }
    if reach.right {
        total += count_target(target, right);
    }
    total
}

/// Applies instantaneous effects.
pub struct EffectResolver;

impl EffectResolver {
    /// Coins the owner would gain from `effects`, counted on the current
    /// table.
    #[must_use]
    pub fn coins_gained(effects: &[Effect], owner: &Player, left: &Player, right: &Player) -> u32 {
        effects
            .iter()
            .map(|effect| match effect {
                Effect::Coins { amount, scope: None } => *amount,
                Effect::Coins {
                    amount,
                    scope: Some(Scope { target, reach }),
                } => amount * count_across(target, *reach, owner, left, right).max(0) as u32,
                _ => 0,
            })
            .sum()
    }

    /// Apply the instantaneous effects of a card or stage owned by `actor`.
    ///
    /// Returns the coins paid out.
    pub fn apply_instant(state: &mut GameState, actor: PlayerId, effects: &[Effect], source: &str) -> u32 {
        let instant: EffectList = effects.iter().filter(|e| e.is_instantaneous()).cloned().collect();
        let coins = Self::coins_gained(&instant, state.player(actor), state.left_of(actor), state.right_of(actor));
        if coins > 0 {
            debug!("{actor} gains {coins} coins from '{source}'");
            state.player_mut(actor).add_coins(coins);
        }

        for effect in &instant {
            if let Effect::Custom(id) = effect {
                debug!("{actor}: custom effect '{id}' from '{source}' has no engine behavior");
            }
        }
        coins
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, CardType, Wonder, WonderStage};
    use std::sync::Arc;

    fn wonder(resource: Resource) -> Arc<Wonder> {
        Arc::new(
            Wonder::new(
                "board",
                resource,
                vec![
                    WonderStage::new(ResourceCounts::new(), "W/S").unwrap(),
                    WonderStage::new(ResourceCounts::new(), "VVV").unwrap(),
                ],
            )
            .unwrap(),
        )
    }

    fn card(name: &str, card_type: CardType, effect: &str) -> Arc<Card> {
        Arc::new(Card::new(name, card_type, 1, 3, ResourceCounts::new(), effect).unwrap())
    }

    fn player(seat: u8, resource: Resource) -> Player {
        Player::new(format!("p{seat}"), PlayerId::new(seat), wonder(resource), 0)
    }

    #[test]
    fn test_own_production() {
        let mut p = player(0, Resource::Ore);
        p.add_card(card("tree farm", CardType::RawMaterial, "W/B")).unwrap();
        p.add_card(card("sawmill", CardType::RawMaterial, "WW")).unwrap();
        p.add_card(card("caravansery", CardType::Commercial, "W/S/O/B")).unwrap();
        p.build_stage().unwrap();

        let own = Production::own(&p);
        assert_eq!(own.fixed.get(Resource::Ore), 1);
        assert_eq!(own.fixed.get(Resource::Wood), 2);
        assert_eq!(own.choices.len(), 3);
        assert_eq!(own.choices.iter().filter(|c| c.contains(&Resource::Wood)).count(), 3);
    }

    #[test]
    fn test_tradable_production_excludes_commercial_and_stages() {
        let mut p = player(0, Resource::Ore);
        p.add_card(card("tree farm", CardType::RawMaterial, "W/B")).unwrap();
        p.add_card(card("caravansery", CardType::Commercial, "W/S/O/B")).unwrap();
        p.build_stage().unwrap();

        let tradable = Production::tradable(&p);
        assert_eq!(tradable.fixed.get(Resource::Ore), 1);
        assert_eq!(tradable.choices.len(), 1);
        assert_eq!(tradable.fixed.get(Resource::Stone), 0);
        assert!(tradable.choices.iter().all(|c| !c.contains(&Resource::Stone)));
    }

    #[test]
    fn test_scoped_coins_count_neighbors() {
        let mut owner = player(0, Resource::Wood);
        let mut left = player(2, Resource::Wood);
        let mut right = player(1, Resource::Wood);
        owner.add_card(card("ore vein", CardType::RawMaterial, "O")).unwrap();
        left.add_card(card("clay pit", CardType::RawMaterial, "O/B")).unwrap();
        left.add_card(card("quarry", CardType::RawMaterial, "SS")).unwrap();
        right.add_card(card("loom", CardType::ManufacturedGood, "L")).unwrap();

        let vineyard = card("vineyard", CardType::Commercial, "${raw_material}<v>");
        assert_eq!(EffectResolver::coins_gained(vineyard.effects(), &owner, &left, &right), 3);

        let tavern = card("tavern", CardType::Commercial, "$$$$$");
        assert_eq!(EffectResolver::coins_gained(tavern.effects(), &owner, &left, &right), 5);

        owner.build_stage().unwrap();
        let arena = card("arena", CardType::Commercial, "$$${wonder} V-{wonder}");
        assert_eq!(EffectResolver::coins_gained(arena.effects(), &owner, &left, &right), 3);
    }

    #[test]
    fn test_count_across() {
        let mut owner = player(0, Resource::Wood);
        let mut left = player(2, Resource::Wood);
        let right = player(1, Resource::Wood);
        owner.add_military(-1);
        left.add_military(-1);
        left.add_military(-1);

        assert_eq!(count_across(&ScopeTarget::Defeat, Reach::NEIGHBORS, &owner, &left, &right), 2);
        assert_eq!(count_across(&ScopeTarget::Defeat, Reach::ALL, &owner, &left, &right), 3);
        assert_eq!(count_target(&ScopeTarget::Military, &owner), -1);
        assert_eq!(count_target(&ScopeTarget::WondersComplete, &owner), 0);
    }

    #[test]
    fn test_apply_instant_pays_coins_only() {
        let mut players: Vec<Player> = (0..3).map(|seat| player(seat, Resource::Wood)).collect();
        players[0].build_stage().unwrap();
        let mut state = GameState::new(crate::core::GameConfig::new(3), players).unwrap();
        let me = PlayerId::new(0);

        let arena = card("arena", CardType::Commercial, "$$${wonder} V-{wonder}");
        assert_eq!(EffectResolver::apply_instant(&mut state, me, arena.effects(), arena.name()), 3);
        assert_eq!(state.player(me).coins(), 3);

        let statue = card("statue", CardType::Civilian, "VVVV");
        assert_eq!(EffectResolver::apply_instant(&mut state, me, statue.effects(), statue.name()), 0);
        assert_eq!(state.player(me).coins(), 3);
    }
}
