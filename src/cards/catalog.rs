//! The base game: every card for 3-7 players and the seven wonder boards.
//!
//! Each row lists the player counts at which a copy enters the deck; a row
//! with `[3, 5]` contributes one copy from three players up and a second
//! from five players up. Ages I and II hold exactly `7 × N` cards for `N`
//! players. Age III holds `7 × N − (N + 2)` non-guild cards plus all ten
//! guilds, which the deal samples down to `N + 2`.

use super::definition::{Card, Wonder, WonderStage};
use super::registry::CardRegistry;
use super::resource::{CardType, Resource, ResourceCounts};
use crate::core::Result;

use CardType::{
    Civilian as CIV, Commercial as COM, Guild as GLD, ManufacturedGood as MAN, Military as MIL,
    RawMaterial as RAW, Scientific as SCI,
};

/// name, type, cost, effect, player counts, chains to
type Row = (&'static str, CardType, &'static str, &'static str, &'static [u8], &'static [&'static str]);

const AGE_I: &[Row] = &[
    ("lumber yard", RAW, "", "W", &[3, 4], &[]),
    ("stone pit", RAW, "", "S", &[3, 5], &[]),
    ("clay pool", RAW, "", "B", &[3, 5], &[]),
    ("ore vein", RAW, "", "O", &[3, 4], &[]),
    ("tree farm", RAW, "$", "W/B", &[6], &[]),
    ("excavation", RAW, "$", "S/B", &[4], &[]),
    ("clay pit", RAW, "$", "B/O", &[3], &[]),
    ("timber yard", RAW, "$", "S/W", &[3], &[]),
    ("forest cave", RAW, "$", "W/O", &[5], &[]),
    ("mine", RAW, "$", "S/O", &[6], &[]),
    ("loom", MAN, "", "L", &[3, 6], &[]),
    ("glassworks", MAN, "", "F", &[3, 6], &[]),
    ("press", MAN, "", "P", &[3, 6], &[]),
    ("pawnshop", CIV, "", "VVV", &[4, 7], &[]),
    ("baths", CIV, "S", "VVV", &[3, 7], &["aqueduct"]),
    ("altar", CIV, "", "VV", &[3, 5], &["temple"]),
    ("theater", CIV, "", "VV", &[3, 6], &["statue"]),
    ("tavern", COM, "", "$$$$$", &[4, 5, 7], &[]),
    ("east trading post", COM, "", "trade{W/S/O/B}>", &[3, 7], &["forum"]),
    ("west trading post", COM, "", "trade{W/S/O/B}<", &[3, 7], &["forum"]),
    ("marketplace", COM, "", "trade{F/P/L}<>", &[3, 6], &["caravansery"]),
    ("stockade", MIL, "W", "M", &[3, 7], &[]),
    ("barracks", MIL, "O", "M", &[3, 5], &[]),
    ("guard tower", MIL, "B", "M", &[3, 4], &[]),
    ("apothecary", SCI, "L", "C", &[3, 5], &["stables", "dispensary"]),
    ("workshop", SCI, "F", "G", &[3, 7], &["archery range", "laboratory"]),
    ("scriptorium", SCI, "P", "T", &[3, 4], &["courthouse", "library"]),
];

const AGE_II: &[Row] = &[
    ("sawmill", RAW, "$", "WW", &[3, 4], &[]),
    ("quarry", RAW, "$", "SS", &[3, 4], &[]),
    ("brickyard", RAW, "$", "BB", &[3, 4], &[]),
    ("foundry", RAW, "$", "OO", &[3, 4], &[]),
    ("loom", MAN, "", "L", &[3, 5], &[]),
    ("glassworks", MAN, "", "F", &[3, 5], &[]),
    ("press", MAN, "", "P", &[3, 5], &[]),
    ("aqueduct", CIV, "SSS", "VVVVV", &[3, 7], &[]),
    ("temple", CIV, "WBF", "VVV", &[3, 6], &["pantheon"]),
    ("statue", CIV, "OOW", "VVVV", &[3, 7], &["gardens"]),
    ("courthouse", CIV, "BBL", "VVVV", &[3, 5], &[]),
    ("forum", COM, "BB", "F/P/L", &[3, 6, 7], &["haven"]),
    ("caravansery", COM, "WW", "W/S/O/B", &[3, 5, 6], &["lighthouse"]),
    ("vineyard", COM, "", "${raw_material}<v>", &[3, 6], &[]),
    ("bazar", COM, "", "$${manufactured_good}<v>", &[4, 7], &[]),
    ("walls", MIL, "SSS", "MM", &[3, 7], &["fortifications"]),
    ("training ground", MIL, "WOO", "MM", &[4, 6, 7], &["circus"]),
    ("stables", MIL, "BWO", "MM", &[3, 5], &[]),
    ("archery range", MIL, "WWO", "MM", &[3, 6], &[]),
    ("dispensary", SCI, "OOF", "C", &[3, 4], &["lodge", "arena"]),
    ("laboratory", SCI, "BBP", "G", &[3, 5], &["siege workshop", "observatory"]),
    ("library", SCI, "SSL", "T", &[3, 6], &["senate", "university"]),
    ("school", SCI, "WP", "T", &[3, 7], &["academy", "study"]),
];

const AGE_III: &[Row] = &[
    ("pantheon", CIV, "BBOFPL", "VVVVVVV", &[3, 6], &[]),
    ("gardens", CIV, "BBW", "VVVVV", &[3, 4], &[]),
    ("town hall", CIV, "SSOF", "VVVVVV", &[3, 5, 6], &[]),
    ("palace", CIV, "SOWBFPL", "VVVVVVVV", &[3, 7], &[]),
    ("senate", CIV, "WWSO", "VVVVVV", &[3, 5], &[]),
    ("haven", COM, "OWL", "${raw_material} V-{raw_material}", &[3, 4], &[]),
    ("lighthouse", COM, "SF", "${commercial} V-{commercial}", &[3, 6], &[]),
    (
        "chamber of commerce",
        COM,
        "BBP",
        "$${manufactured_good} VV-{manufactured_good}",
        &[4, 6],
        &[],
    ),
    ("arena", COM, "SSO", "$$${wonder} V-{wonder}", &[3, 5, 7], &[]),
    ("fortifications", MIL, "SOOO", "MMM", &[3, 7], &[]),
    ("circus", MIL, "SSSO", "MMM", &[4, 5, 6], &[]),
    ("arsenal", MIL, "WWOL", "MMM", &[3, 4, 7], &[]),
    ("siege workshop", MIL, "BBBW", "MMM", &[3, 5], &[]),
    ("lodge", SCI, "BBLP", "C", &[3, 6], &[]),
    ("observatory", SCI, "OOFL", "G", &[3, 7], &[]),
    ("university", SCI, "WWFP", "T", &[3, 4], &[]),
    ("academy", SCI, "SSSF", "C", &[3, 7], &[]),
    ("study", SCI, "WPL", "G", &[3, 5], &[]),
    ("workers guild", GLD, "OOBSW", "V-{raw_material}<>", &[3], &[]),
    ("craftsmens guild", GLD, "OOSS", "VV-{manufactured_good}<>", &[3], &[]),
    ("traders guild", GLD, "LPF", "V-{commercial}<>", &[3], &[]),
    ("philosophers guild", GLD, "BBBLP", "V-{scientific}<>", &[3], &[]),
    ("spies guild", GLD, "BBBF", "V-{military}<>", &[3], &[]),
    ("strategists guild", GLD, "OOSL", "V-{defeat}<>", &[3], &[]),
    ("shipowners guild", GLD, "WWWPF", "V-{raw_material;manufactured_good;guild}", &[3], &[]),
    ("scientists guild", GLD, "WWOOP", "C/T/G", &[3], &[]),
    ("magistrates guild", GLD, "WWWSL", "V-{civilian}_<>", &[3], &[]),
    ("builders guild", GLD, "SSBBF", "V-{wonder}<v>", &[3], &[]),
];

/// name, starting resource, stages as (cost, effect)
type WonderRow = (&'static str, Resource, [(&'static str, &'static str); 3]);

const WONDERS: &[WonderRow] = &[
    ("rhodes", Resource::Ore, [("WW", "VVV"), ("BBB", "MM"), ("OOOO", "VVVVVVV")]),
    ("alexandria", Resource::Glass, [("SS", "VVV"), ("OO", "W/S/O/B"), ("FF", "VVVVVVV")]),
    ("ephesos", Resource::Papyrus, [("SS", "VVV"), ("WW", "$$$$$$$$$"), ("PP", "VVVVVVV")]),
    ("babylon", Resource::Brick, [("BB", "VVV"), ("WWW", "C/T/G"), ("BBBB", "VVVVVVV")]),
    ("olympia", Resource::Wood, [("WW", "VVV"), ("SS", "_free_build"), ("OO", "VVVVVVV")]),
    ("halicarnassus", Resource::Loom, [("BB", "VVV"), ("OOO", "_build_from_discard"), ("LL", "VVVVVVV")]),
    ("giza", Resource::Stone, [("SS", "VVV"), ("WWW", "VVVVV"), ("SSSS", "VVVVVVV")]),
];

/// Every card of one age, one entry per physical copy.
pub fn age_cards(age: u8) -> Result<Vec<Card>> {
    let rows = match age {
        1 => AGE_I,
        2 => AGE_II,
        3 => AGE_III,
        _ => &[],
    };

    let mut cards = Vec::new();
    for &(name, card_type, cost, effect, counts, chains) in rows {
        let cost = ResourceCounts::from_letters(cost)?;
        for &min_players in counts {
            let card = Card::new(name, card_type, age, min_players, cost, effect)?.with_chain_to(chains.iter().copied());
            cards.push(card);
        }
    }
    Ok(cards)
}

/// The seven wonder boards, day side.
pub fn standard_wonders() -> Result<Vec<Wonder>> {
    WONDERS
        .iter()
        .map(|&(name, resource, stages)| {
            let stages = stages
                .iter()
                .map(|&(cost, effect)| WonderStage::new(ResourceCounts::from_letters(cost)?, effect))
                .collect::<Result<Vec<_>>>()?;
            Wonder::new(name, resource, stages)
        })
        .collect()
}

/// A registry holding the full base game.
///
/// ```
/// use rust_wonders::cards::standard_registry;
///
/// let registry = standard_registry().unwrap();
/// assert_eq!(registry.eligible(1, 3).len(), 21);
/// assert_eq!(registry.wonders().len(), 7);
/// ```
pub fn standard_registry() -> Result<CardRegistry> {
    let mut registry = CardRegistry::new();
    for age in 1..=3 {
        for card in age_cards(age)? {
            registry.register(card);
        }
    }
    for wonder in standard_wonders()? {
        registry.register_wonder(wonder)?;
    }
    Ok(registry)
}
