//! Resource payment and neighbor trading.
//!
//! Paying a cost is two-phase:
//!
//! 1. [`plan_payment`] reads the table and returns a [`PaymentPlan`]
//!    describing coins to the bank and units bought from each neighbor,
//!    or `Unaffordable` with the missing resources. It never mutates.
//! 2. [`commit`] applies a plan: one debit from the buyer, then a credit
//!    to each neighbor that sold something.
//!
//! Since nothing is written until a complete plan exists, a payment that
//! cannot be completed leaves every player untouched.
//!
//! ## Trading rules
//!
//! - Own production (including one-of-N choice producers) is used first;
//!   choices are allocated to minimise what is left to buy
//! - Missing units are bought from neighbors, at most `max_trades` units
//!   per payment, each unit only if the buyer still holds its price
//! - Each neighbor sells at most one unit per payment
//! - For each resource the cheaper neighbor is tried first and ties go to
//!   the right neighbor
//! - Neighbors sell only their starting resource and the production of
//!   raw material and manufactured good cards

use log::debug;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::cards::{Resource, ResourceCounts};
use crate::core::{EngineError, GameConfig, GameState, Player, PlayerId, Result, Side};
use crate::effects::{Effect, Production};

/// Units of one resource bought from one neighbor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Purchase {
    pub side: Side,
    pub resource: Resource,
    pub units: u32,
    pub unit_price: u32,
}

impl Purchase {
    #[must_use]
    pub fn total(&self) -> u32 {
        self.units * self.unit_price
    }
}

/// A complete, not yet applied, payment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentPlan {
    pub actor: PlayerId,
    pub coins_to_bank: u32,
    pub purchases: SmallVec<[Purchase; 2]>,
}

impl PaymentPlan {
    /// A plan that pays nothing.
    #[must_use]
    pub fn free(actor: PlayerId) -> Self {
        Self {
            actor,
            coins_to_bank: 0,
            purchases: SmallVec::new(),
        }
    }

    /// Coins owed to the neighbor on `side`.
    #[must_use]
    pub fn paid_to(&self, side: Side) -> u32 {
        self.purchases.iter().filter(|p| p.side == side).map(Purchase::total).sum()
    }

    #[must_use]
    pub fn coins_to_neighbors(&self) -> u32 {
        self.purchases.iter().map(Purchase::total).sum()
    }

    /// Everything the buyer pays.
    #[must_use]
    pub fn total_coins(&self) -> u32 {
        self.coins_to_bank + self.coins_to_neighbors()
    }

    /// Units bought from neighbors.
    #[must_use]
    pub fn trade_count(&self) -> u32 {
        self.purchases.iter().map(|p| p.units).sum()
    }
}

/// Price `buyer` pays per unit of `resource` bought from the `side` neighbor.
#[must_use]
pub fn trade_price(config: &GameConfig, buyer: &Player, side: Side, resource: Resource) -> u32 {
    let discounted = buyer.effects().any(|effect| match effect {
        Effect::TradeDiscount { resources, reach } => {
            let toward = match side {
                Side::Left => reach.left,
                Side::Right => reach.right,
            };
            toward && resources.contains(&resource)
        }
        _ => false,
    });
    if discounted {
        config.discounted_trade_cost
    } else {
        config.base_trade_cost
    }
}

/// Plan how `actor` pays `cost`. Pure: reads the table, writes nothing.
pub fn plan_payment(state: &GameState, actor: PlayerId, cost: &ResourceCounts) -> Result<PaymentPlan> {
    let buyer = state.player(actor);

    if cost.coins() > buyer.coins() {
        let mut missing = ResourceCounts::new();
        missing.set(Resource::Coin, cost.coins() - buyer.coins());
        return Err(EngineError::Unaffordable { actor, missing });
    }

    let goods = cost.goods();
    let mut plan = PaymentPlan::free(actor);
    plan.coins_to_bank = cost.coins();
    if goods.is_empty() {
        return Ok(plan);
    }

    let mut best: Option<SmallVec<[Purchase; 2]>> = None;
    let mut least_missing: Option<ResourceCounts> = None;

    for shortfall in own_shortfalls(&Production::own(buyer), &goods) {
        if shortfall.is_empty() {
            return Ok(plan);
        }
        match buy_from_neighbors(state, actor, &shortfall, buyer.coins() - cost.coins()) {
            Ok(purchases) => {
                let total: u32 = purchases.iter().map(Purchase::total).sum();
                let better = best
                    .as_ref()
                    .map_or(true, |b| total < b.iter().map(Purchase::total).sum::<u32>());
                if better {
                    best = Some(purchases);
                }
            }
            Err(missing) => {
                if least_missing.map_or(true, |m| missing.total() < m.total()) {
                    least_missing = Some(missing);
                }
            }
        }
    }

    match best {
        Some(purchases) => {
            plan.purchases = purchases;
            Ok(plan)
        }
        None => Err(EngineError::Unaffordable {
            actor,
            missing: least_missing.unwrap_or(goods),
        }),
    }
}

/// Whether `actor` could pay `cost` right now.
#[must_use]
pub fn can_afford(state: &GameState, actor: PlayerId, cost: &ResourceCounts) -> bool {
    plan_payment(state, actor, cost).is_ok()
}

/// Apply a plan produced by [`plan_payment`] on the same state.
pub fn commit(state: &mut GameState, plan: &PaymentPlan) -> Result<()> {
    let n = state.player_count();
    state.player_mut(plan.actor).spend_coins(plan.total_coins())?;

    for side in Side::TRADE_ORDER {
        let owed = plan.paid_to(side);
        if owed > 0 {
            let seller = plan.actor.neighbor(side, n);
            state.player_mut(seller).add_coins(owed);
            debug!("{} pays {owed} coins to {seller} for trades", plan.actor);
        }
    }
    Ok(())
}

/// Every distinct shortfall reachable by allocating choice producers,
/// smallest first. An allocation only assigns a choice to a resource that
/// is still needed, since leaving it idle can never help.
fn own_shortfalls(production: &Production, goods: &ResourceCounts) -> Vec<ResourceCounts> {
    let mut remaining = ResourceCounts::new();
    for (resource, needed) in goods.iter() {
        remaining.set(resource, needed.saturating_sub(production.fixed.get(resource)));
    }

    let mut found = FxHashSet::default();
    allocate_choices(&production.choices, 0, &mut remaining, &mut found);

    let mut shortfalls: Vec<ResourceCounts> = found.into_iter().collect();
    shortfalls.sort_by_key(|s| (s.total(), Resource::GOODS.map(|r| s.get(r))));
    shortfalls
}

fn allocate_choices(
    choices: &[SmallVec<[Resource; 4]>],
    index: usize,
    remaining: &mut ResourceCounts,
    found: &mut FxHashSet<ResourceCounts>,
) {
    if index == choices.len() || remaining.is_empty() {
        found.insert(*remaining);
        return;
    }

    let mut assigned = false;
    for &resource in &choices[index] {
        let needed = remaining.get(resource);
        if needed > 0 {
            assigned = true;
            remaining.set(resource, needed - 1);
            allocate_choices(choices, index + 1, remaining, found);
            remaining.set(resource, needed);
        }
    }
    if !assigned {
        allocate_choices(choices, index + 1, remaining, found);
    }
}

/// Stock one neighbor can still sell during this payment.
struct Stall {
    fixed: ResourceCounts,
    choices: Vec<SmallVec<[Resource; 4]>>,
}

impl Stall {
    fn new(production: Production) -> Self {
        let mut choices = production.choices;
        choices.sort_by_key(|c| c.len());
        Self {
            fixed: production.fixed,
            choices,
        }
    }

    /// Take one unit, preferring fixed stock over the narrowest choice.
    fn take(&mut self, resource: Resource) -> bool {
        let fixed = self.fixed.get(resource);
        if fixed > 0 {
            self.fixed.set(resource, fixed - 1);
            return true;
        }
        match self.choices.iter().position(|c| c.contains(&resource)) {
            Some(i) => {
                self.choices.remove(i);
                true
            }
            None => false,
        }
    }
}

/// Buy the shortfall from the neighbors, at most one unit from each side.
fn buy_from_neighbors(
    state: &GameState,
    actor: PlayerId,
    shortfall: &ResourceCounts,
    mut budget: u32,
) -> std::result::Result<SmallVec<[Purchase; 2]>, ResourceCounts> {
    let config = state.config();
    let buyer = state.player(actor);
    let mut left = Stall::new(Production::tradable(state.neighbor(actor, Side::Left)));
    let mut right = Stall::new(Production::tradable(state.neighbor(actor, Side::Right)));

    let mut purchases: SmallVec<[Purchase; 2]> = SmallVec::new();
    let mut missing = *shortfall;

    for resource in Resource::GOODS {
        if missing.get(resource) == 0 {
            continue;
        }

        let mut sides = Side::TRADE_ORDER;
        sides.sort_by_key(|&side| trade_price(config, buyer, side, resource));

        for side in sides {
            let used = purchases.iter().any(|p| p.side == side);
            let price = trade_price(config, buyer, side, resource);
            if used || missing.get(resource) == 0 || purchases.len() as u32 >= config.max_trades || budget < price {
                continue;
            }

            let stall = match side {
                Side::Left => &mut left,
                Side::Right => &mut right,
            };
            if stall.take(resource) {
                missing.set(resource, missing.get(resource) - 1);
                budget -= price;
                purchases.push(Purchase {
                    side,
                    resource,
                    units: 1,
                    unit_price: price,
                });
            }
        }
    }

    if missing.is_empty() {
        Ok(purchases)
    } else {
        Err(missing)
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
                vec![WonderStage::new(ResourceCounts::from_letters("LL").unwrap(), "VVV").unwrap()],
            )
            .unwrap(),
        )
    }

    fn card(name: &str, card_type: CardType, effect: &str) -> Arc<Card> {
        Arc::new(Card::new(name, card_type, 1, 3, ResourceCounts::new(), effect).unwrap())
    }

    /// Seat 0 starts with papyrus, seat 1 (right) with wood, seat 2 (left) with `left`.
    fn table_with(coins: u32, left: Resource) -> GameState {
        let players = vec![
            Player::new("a", PlayerId::new(0), wonder(Resource::Papyrus), coins),
            Player::new("b", PlayerId::new(1), wonder(Resource::Wood), 3),
            Player::new("c", PlayerId::new(2), wonder(left), 3),
        ];
        GameState::new(GameConfig::new(3), players).unwrap()
    }

    fn table(coins: u32) -> GameState {
        table_with(coins, Resource::Wood)
    }

    fn cost(letters: &str) -> ResourceCounts {
        ResourceCounts::from_letters(letters).unwrap()
    }

    const ME: PlayerId = PlayerId::new(0);

    #[test]
    fn test_own_resources_cost_nothing() {
        let state = table(3);
        let plan = plan_payment(&state, ME, &cost("P")).unwrap();
        assert_eq!(plan.total_coins(), 0);
        assert_eq!(plan.trade_count(), 0);
    }

    #[test]
    fn test_coin_cost() {
        let state = table(3);
        let plan = plan_payment(&state, ME, &cost("$$")).unwrap();
        assert_eq!(plan.coins_to_bank, 2);

        let err = plan_payment(&state, ME, &cost("$$$$")).unwrap_err();
        assert!(matches!(err, EngineError::Unaffordable { missing, .. } if missing.coins() == 1));
    }

    #[test]
    fn test_buys_from_right_first_on_tie() {
        let state = table(3);
        let plan = plan_payment(&state, ME, &cost("W")).unwrap();

        assert_eq!(plan.paid_to(Side::Right), 2);
        assert_eq!(plan.paid_to(Side::Left), 0);
    }

    #[test]
    fn test_second_unit_comes_from_other_side() {
        let state = table(4);
        let plan = plan_payment(&state, ME, &cost("WW")).unwrap();

        assert_eq!(plan.paid_to(Side::Right), 2);
        assert_eq!(plan.paid_to(Side::Left), 2);
        assert_eq!(plan.trade_count(), 2);
    }

    #[test]
    fn test_budget_limits_trades() {
        let state = table(3);
        let err = plan_payment(&state, ME, &cost("WW")).unwrap_err();
        assert!(matches!(err, EngineError::Unaffordable { missing, .. } if missing.get(Resource::Wood) == 1));
    }

    #[test]
    fn test_trade_cap() {
        let mut state = table(10);
        for seat in [1, 2] {
            state
                .player_mut(PlayerId::new(seat))
                .add_card(card("sawmill", CardType::RawMaterial, "WW"))
                .unwrap();
        }

        let plan = plan_payment(&state, ME, &cost("WW")).unwrap();
        assert_eq!(plan.trade_count(), 2);
        assert!(plan_payment(&state, ME, &cost("WWW")).is_err());
    }

    #[test]
    fn test_one_unit_per_neighbor() {
        let mut state = table_with(10, Resource::Stone);
        let right = PlayerId::new(1);
        state.player_mut(right).add_card(card("sawmill", CardType::RawMaterial, "WW")).unwrap();

        let plan = plan_payment(&state, ME, &cost("W")).unwrap();
        assert_eq!(plan.purchases.len(), 1);
        assert_eq!(plan.purchases[0].units, 1);

        // The right neighbor has three wood but sells only one.
        let err = plan_payment(&state, ME, &cost("WW")).unwrap_err();
        assert!(matches!(err, EngineError::Unaffordable { missing, .. } if missing.get(Resource::Wood) == 1));

        // One unit from each side, of different goods.
        let plan = plan_payment(&state, ME, &cost("WS")).unwrap();
        assert_eq!(plan.paid_to(Side::Right), 2);
        assert_eq!(plan.paid_to(Side::Left), 2);
    }

    #[test]
    fn test_discount_prefers_cheaper_side() {
        let mut state = table(3);
        state
            .player_mut(ME)
            .add_card(card("west trading post", CardType::Commercial, "trade{W/S/O/B}<"))
            .unwrap();

        let plan = plan_payment(&state, ME, &cost("W")).unwrap();
        assert_eq!(plan.paid_to(Side::Left), 1);
        assert_eq!(plan.paid_to(Side::Right), 0);
    }

    #[test]
    fn test_neighbors_do_not_sell_commercial_production() {
        let mut state = table(5);
        for seat in [1, 2] {
            state
                .player_mut(PlayerId::new(seat))
                .add_card(card("forum", CardType::Commercial, "F/P/L"))
                .unwrap();
        }
        assert!(plan_payment(&state, ME, &cost("F")).is_err());
    }

    #[test]
    fn test_choice_allocation_minimises_shortfall() {
        let mut state = table(0);
        let me = state.player_mut(ME);
        me.add_card(card("tree farm", CardType::RawMaterial, "W/B")).unwrap();
        me.add_card(card("clay pit", CardType::RawMaterial, "O/B")).unwrap();

        // W/B must cover the wood so that O/B can cover the brick.
        assert!(plan_payment(&state, ME, &cost("WB")).is_ok());
        assert!(plan_payment(&state, ME, &cost("WBB")).is_err());
    }

    #[test]
    fn test_commit_moves_coins() {
        let mut state = table(4);
        let plan = plan_payment(&state, ME, &cost("WW$")).unwrap_err();
        assert!(matches!(plan, EngineError::Unaffordable { .. }));

        let plan = plan_payment(&state, ME, &cost("W$")).unwrap();
        commit(&mut state, &plan).unwrap();

        assert_eq!(state.player(ME).coins(), 1);
        assert_eq!(state.player(PlayerId::new(1)).coins(), 5);
        assert_eq!(state.player(PlayerId::new(2)).coins(), 3);
    }
}
