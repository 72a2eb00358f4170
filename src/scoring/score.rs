//! Per-category scoring of one player at the end of the game.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::science;
use crate::cards::CardType;
use crate::core::{EngineError, Player, Result};
use crate::effects::{count_across, count_target, Effect, Reach, Scope, ScopeTarget};

/// Final score, split by category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Score {
    pub military: i32,
    pub treasury: i32,
    pub wonders: i32,
    pub civilian: i32,
    pub scientific: i32,
    pub commercial: i32,
    pub guilds: i32,
}

impl Score {
    #[must_use]
    pub fn total(&self) -> i32 {
        self.military
            + self.treasury
            + self.wonders
            + self.civilian
            + self.scientific
            + self.commercial
            + self.guilds
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (military {}, treasury {}, wonders {}, civilian {}, science {}, commercial {}, guilds {})",
            self.total(),
            self.military,
            self.treasury,
            self.wonders,
            self.civilian,
            self.scientific,
            self.commercial,
            self.guilds
        )
    }
}

/// Score `player` seated between `left` and `right`.
pub fn score_player(player: &Player, left: &Player, right: &Player) -> Result<Score> {
    Ok(Score {
        military: player.military_tokens(),
        treasury: (player.coins() / 3) as i32,
        wonders: wonder_points(player),
        civilian: civilian_points(player),
        scientific: science_points(player),
        commercial: commercial_points(player)?,
        guilds: guild_points(player, left, right)?,
    })
}

/// Flat points printed on built stages.
#[must_use]
pub fn wonder_points(player: &Player) -> i32 {
    player
        .built_stages()
        .flat_map(|s| s.effects().iter())
        .map(Effect::flat_points)
        .sum::<u32>() as i32
}

#[must_use]
pub fn civilian_points(player: &Player) -> i32 {
    player
        .cards()
        .iter()
        .filter(|c| c.card_type() == CardType::Civilian)
        .flat_map(|c| c.effects().iter())
        .map(Effect::flat_points)
        .sum::<u32>() as i32
}

/// Science symbols from every card and built stage, wildcards placed for
/// the best result.
#[must_use]
pub fn science_points(player: &Player) -> i32 {
    let mut counts = [0u32; 3];
    let mut jolly = 0;
    for effect in player.effects() {
        match effect {
            Effect::Science(symbol) => counts[symbol.index()] += 1,
            Effect::ScienceWildcard => jolly += 1,
            _ => {}
        }
    }
    science::best_score(counts, jolly) as i32
}

/// Points on commercial cards: flat, or scaled by the owner's own stages,
/// military tokens or card counts.
pub fn commercial_points(player: &Player) -> Result<i32> {
    let mut total = 0;
    for card in player.cards().iter().filter(|c| c.card_type() == CardType::Commercial) {
        for effect in card.effects() {
            let Effect::VictoryPoints { amount, scope } = effect else {
                continue;
            };
            let amount = *amount as i32;
            total += match scope {
                None => amount,
                Some(Scope { target, .. }) => match target {
                    ScopeTarget::Wonder | ScopeTarget::Military | ScopeTarget::CardTypes(_) => {
                        amount * count_target(target, player)
                    }
                    other => return Err(EngineError::UnknownScope(other.to_string())),
                },
            };
        }
    }
    Ok(total)
}

/// Points on guild cards.
///
/// - `wonders_complete`: 7 once every stage of the owner's wonder is built
/// - `wonder`: stages built by the owner and both neighbors
/// - `defeat`: defeats suffered by both neighbors
/// - card types (`military` here means military cards): counted on the
///   seats the markers select
///
/// Guilds with no scope, such as the science guild, add nothing here.
pub fn guild_points(player: &Player, left: &Player, right: &Player) -> Result<i32> {
    let mut total = 0;
    for card in player.cards().iter().filter(|c| c.card_type() == CardType::Guild) {
        for effect in card.effects() {
            let Effect::VictoryPoints {
                amount,
                scope: Some(Scope { target, reach }),
            } = effect
            else {
                continue;
            };
            let amount = *amount as i32;
            total += match target {
                ScopeTarget::WondersComplete => {
                    if player.wonder_complete() {
                        7
                    } else {
                        0
                    }
                }
                ScopeTarget::Wonder => amount * count_across(target, Reach::ALL, player, left, right),
                ScopeTarget::Defeat => amount * count_across(target, Reach::NEIGHBORS, player, left, right),
                ScopeTarget::Military => {
                    let cards = ScopeTarget::CardTypes(smallvec::smallvec![CardType::Military]);
                    amount * count_across(&cards, *reach, player, left, right)
                }
                ScopeTarget::CardTypes(_) => amount * count_across(target, *reach, player, left, right),
            };
        }
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Resource, ResourceCounts, Wonder, WonderStage};
    use crate::core::PlayerId;
    use std::sync::Arc;

    fn wonder() -> Arc<Wonder> {
        Arc::new(
            Wonder::new(
                "babylon",
                Resource::Brick,
                vec![
                    WonderStage::new(ResourceCounts::new(), "VVV").unwrap(),
                    WonderStage::new(ResourceCounts::new(), "C/T/G").unwrap(),
                    WonderStage::new(ResourceCounts::new(), "VVVVVVV").unwrap(),
                ],
            )
            .unwrap(),
        )
    }

    fn player(seat: u8) -> Player {
        Player::new(format!("p{seat}"), PlayerId::new(seat), wonder(), 0)
    }

    fn give(player: &mut Player, name: &str, card_type: CardType, effect: &str) {
        let card = Card::new(name, card_type, 1, 3, ResourceCounts::new(), effect).unwrap();
        player.add_card(Arc::new(card)).unwrap();
    }

    #[test]
    fn test_total_is_sum() {
        let score = Score {
            military: -2,
            treasury: 3,
            wonders: 10,
            civilian: 12,
            scientific: 26,
            commercial: 4,
            guilds: 7,
        };
        assert_eq!(score.total(), 60);
    }

    #[test]
    fn test_simple_categories() {
        let mut p = player(0);
        p.add_coins(8);
        p.add_military(5);
        p.add_military(-1);
        give(&mut p, "altar", CardType::Civilian, "VV");
        give(&mut p, "pantheon", CardType::Civilian, "VVVVVVV");
        give(&mut p, "tavern", CardType::Commercial, "$$$$$");
        p.build_stage().unwrap();

        let score = score_player(&p, &player(2), &player(1)).unwrap();
        assert_eq!(score.military, 4);
        assert_eq!(score.treasury, 2);
        assert_eq!(score.wonders, 3);
        assert_eq!(score.civilian, 9);
        assert_eq!(score.commercial, 0);
    }

    #[test]
    fn test_science_with_stage_wildcard() {
        let mut p = player(0);
        give(&mut p, "apothecary", CardType::Scientific, "C");
        give(&mut p, "workshop", CardType::Scientific, "G");
        give(&mut p, "scriptorium", CardType::Scientific, "T");
        give(&mut p, "scientists guild", CardType::Guild, "C/T/G");
        p.build_stage().unwrap();
        p.build_stage().unwrap();

        // 1/1/1 plus two wildcards: 2/2/1 scores 7 + 9 = 16, 3/1/1 scores 7 + 11 = 18.
        assert_eq!(science_points(&p), 18);
        assert_eq!(guild_points(&p, &player(2), &player(1)).unwrap(), 0);
    }

    #[test]
    fn test_commercial_scopes() {
        let mut p = player(0);
        give(&mut p, "haven", CardType::Commercial, "${raw_material} V-{raw_material}");
        give(&mut p, "lumber yard", CardType::RawMaterial, "W");
        give(&mut p, "ore vein", CardType::RawMaterial, "O");
        give(&mut p, "arena", CardType::Commercial, "$$${wonder} V-{wonder}");
        give(&mut p, "lighthouse", CardType::Commercial, "${commercial} V-{commercial}");
        p.build_stage().unwrap();

        // haven 2, arena 1, lighthouse 3
        assert_eq!(commercial_points(&p).unwrap(), 6);
    }

    #[test]
    fn test_commercial_military_scope_can_be_negative() {
        let mut p = player(0);
        give(&mut p, "war chest", CardType::Commercial, "V-{military}");
        p.add_military(-1);
        p.add_military(-1);
        assert_eq!(commercial_points(&p).unwrap(), -2);
    }

    #[test]
    fn test_commercial_unknown_scope() {
        let mut p = player(0);
        give(&mut p, "odd market", CardType::Commercial, "V-{defeat}");
        assert_eq!(commercial_points(&p), Err(EngineError::UnknownScope("defeat".to_string())));
    }

    #[test]
    fn test_guild_scopes() {
        let mut me = player(0);
        let mut left = player(2);
        let mut right = player(1);

        give(&mut left, "altar", CardType::Civilian, "VV");
        give(&mut left, "baths", CardType::Civilian, "VVV");
        give(&mut right, "theater", CardType::Civilian, "VVV");
        give(&mut me, "pawnshop", CardType::Civilian, "VVV");
        give(&mut me, "magistrates guild", CardType::Guild, "V-{civilian}_<>");
        assert_eq!(guild_points(&me, &left, &right).unwrap(), 3);

        left.build_stage().unwrap();
        right.build_stage().unwrap();
        me.build_stage().unwrap();
        give(&mut me, "builders guild", CardType::Guild, "V-{wonder}<v>");
        assert_eq!(guild_points(&me, &left, &right).unwrap(), 6);

        left.add_military(-1);
        right.add_military(-1);
        me.add_military(-1);
        give(&mut me, "strategists guild", CardType::Guild, "V-{defeat}<>");
        assert_eq!(guild_points(&me, &left, &right).unwrap(), 8);

        give(&mut me, "shipowners guild", CardType::Guild, "V-{raw_material;manufactured_good;guild}");
        // Four guilds now in front of the owner.
        assert_eq!(guild_points(&me, &left, &right).unwrap(), 12);
    }

    #[test]
    fn test_guild_wonders_complete_and_military_cards() {
        let mut me = player(0);
        let left = {
            let mut l = player(2);
            give(&mut l, "stockade", CardType::Military, "M");
            l
        };
        let right = player(1);

        give(&mut me, "spies guild", CardType::Guild, "V-{military}<>");
        assert_eq!(guild_points(&me, &left, &right).unwrap(), 1);

        give(&mut me, "builders", CardType::Guild, "V-{wonders_complete}");
        for _ in 0..3 {
            me.build_stage().unwrap();
        }
        assert_eq!(guild_points(&me, &left, &right).unwrap(), 8);
    }
}
