//! Card and wonder definitions - static game data.
//!
//! `Card`, `WonderStage` and `Wonder` are immutable once built and shared
//! through `Arc` between the deck, hands, played sets and views. The encoded
//! effect string is parsed at construction; a malformed string is rejected
//! there rather than at play time.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::resource::{CardType, Resource, ResourceCounts};
use crate::core::{EngineError, Result};
use crate::effects::{parse_effects, Effect, EffectList, ScopeTarget};

/// A card definition.
///
/// Identity is the name: two cards with the same name are equal, which is
/// what the "no duplicate card in front of a player" rule compares.
///
/// ## Example
///
/// ```
/// use rust_wonders::cards::{Card, CardType, ResourceCounts};
///
/// let barracks = Card::new("barracks", CardType::Military, 1, 3, ResourceCounts::from_letters("O").unwrap(), "M")
///     .unwrap();
///
/// assert_eq!(barracks.shields(), 1);
/// assert_eq!(barracks.card_type(), CardType::Military);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Card {
    name: String,
    card_type: CardType,
    age: u8,
    min_players: u8,
    cost: ResourceCounts,
    chain_to: SmallVec<[String; 2]>,
    encoded_effect: String,
    effects: EffectList,
}

impl Card {
    /// Create a card, parsing its effect string.
    pub fn new(
        name: impl Into<String>,
        card_type: CardType,
        age: u8,
        min_players: u8,
        cost: ResourceCounts,
        effect: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        if !(1..=3).contains(&age) {
            return Err(EngineError::InvalidSetup(format!("card '{name}' has age {age}")));
        }
        let encoded_effect = effect.into();
        let effects = parse_effects(&encoded_effect)?;
        check_coin_scopes(&effects, &encoded_effect)?;

        Ok(Self {
            name,
            card_type,
            age,
            min_players,
            cost,
            chain_to: SmallVec::new(),
            encoded_effect,
            effects,
        })
    }

    /// Add chain targets (builder pattern).
    #[must_use]
    pub fn with_chain_to<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.chain_to.extend(names.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn card_type(&self) -> CardType {
        self.card_type
    }

    #[must_use]
    pub fn age(&self) -> u8 {
        self.age
    }

    #[must_use]
    pub fn min_players(&self) -> u8 {
        self.min_players
    }

    #[must_use]
    pub fn cost(&self) -> &ResourceCounts {
        &self.cost
    }

    /// Names of cards this one lets its owner build for free.
    #[must_use]
    pub fn chain_to(&self) -> &[String] {
        &self.chain_to
    }

    #[must_use]
    pub fn encoded_effect(&self) -> &str {
        &self.encoded_effect
    }

    #[must_use]
    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    #[must_use]
    pub fn shields(&self) -> u32 {
        self.effects.iter().map(Effect::shields).sum()
    }

    /// Whether neighbors may buy this card's production.
    #[must_use]
    pub fn is_tradable(&self) -> bool {
        self.card_type.is_tradable_producer()
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Card {}

impl Hash for Card {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, age {})", self.name, self.card_type, self.age)
    }
}

/// One tier of a wonder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WonderStage {
    cost: ResourceCounts,
    encoded_effect: String,
    effects: EffectList,
}

impl WonderStage {
    pub fn new(cost: ResourceCounts, effect: impl Into<String>) -> Result<Self> {
        let encoded_effect = effect.into();
        let effects = parse_effects(&encoded_effect)?;
        check_coin_scopes(&effects, &encoded_effect)?;
        Ok(Self {
            cost,
            encoded_effect,
            effects,
        })
    }

    #[must_use]
    pub fn cost(&self) -> &ResourceCounts {
        &self.cost
    }

    #[must_use]
    pub fn encoded_effect(&self) -> &str {
        &self.encoded_effect
    }

    #[must_use]
    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    #[must_use]
    pub fn shields(&self) -> u32 {
        self.effects.iter().map(Effect::shields).sum()
    }
}

/// A wonder board: a starting resource and its ordered stages.
///
/// ```
/// use rust_wonders::cards::{Resource, ResourceCounts, Wonder, WonderStage};
///
/// let giza = Wonder::new(
///     "giza",
///     Resource::Stone,
///     vec![
///         WonderStage::new(ResourceCounts::from_letters("SS").unwrap(), "VVV").unwrap(),
///         WonderStage::new(ResourceCounts::from_letters("WWW").unwrap(), "VVVVV").unwrap(),
///     ],
/// )
/// .unwrap();
///
/// assert_eq!(giza.stage_count(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wonder {
    name: String,
    resource: Resource,
    stages: Vec<WonderStage>,
}

impl Wonder {
    pub fn new(name: impl Into<String>, resource: Resource, stages: Vec<WonderStage>) -> Result<Self> {
        let name = name.into();
        if resource == Resource::Coin {
            return Err(EngineError::InvalidSetup(format!("wonder '{name}' cannot start with coins")));
        }
        if stages.is_empty() {
            return Err(EngineError::InvalidSetup(format!("wonder '{name}' has no stages")));
        }
        Ok(Self { name, resource, stages })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The resource the board produces from the start.
    #[must_use]
    pub fn resource(&self) -> Resource {
        self.resource
    }

    #[must_use]
    pub fn stages(&self) -> &[WonderStage] {
        &self.stages
    }

    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// The stage at 0-based `index`, if it exists.
    #[must_use]
    pub fn stage(&self, index: usize) -> Option<&WonderStage> {
        self.stages.get(index)
    }
}

impl fmt::Display for Wonder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Coin effects are paid out at play time, so only scopes the executor can
/// count are accepted.
fn check_coin_scopes(effects: &[Effect], encoded: &str) -> Result<()> {
    for effect in effects {
        if let Effect::Coins { scope: Some(scope), .. } = effect {
            if !matches!(scope.target, ScopeTarget::Wonder | ScopeTarget::CardTypes(_)) {
                return Err(EngineError::EffectParse {
                    effect: encoded.to_string(),
                    reason: format!("coins cannot be scoped by '{}'", scope.target),
                });
            }
        }
    }
    Ok(())
}
