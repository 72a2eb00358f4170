//! Card registry for deck construction.
//!
//! The `CardRegistry` stores every physical card and every wonder board
//! available to a game. Each registered card is one physical copy: the same
//! name may appear more than once with different player-count thresholds.

use rustc_hash::FxHashMap;
use std::sync::Arc;

use super::definition::{Card, Wonder};
use super::resource::CardType;
use crate::core::{EngineError, Result};

/// Registry of cards and wonders.
///
/// ## Example
///
/// ```
/// use rust_wonders::cards::{Card, CardRegistry, CardType, ResourceCounts};
///
/// let mut registry = CardRegistry::new();
/// registry.register(Card::new("lumber yard", CardType::RawMaterial, 1, 3, ResourceCounts::new(), "W").unwrap());
/// registry.register(Card::new("lumber yard", CardType::RawMaterial, 1, 4, ResourceCounts::new(), "W").unwrap());
///
/// assert_eq!(registry.len(), 2);
/// assert_eq!(registry.eligible(1, 3).len(), 1);
/// assert_eq!(registry.eligible(1, 4).len(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: Vec<Arc<Card>>,
    by_name: FxHashMap<String, usize>,
    wonders: Vec<Arc<Wonder>>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one physical card.
    pub fn register(&mut self, card: Card) {
        self.by_name.entry(card.name().to_string()).or_insert(self.cards.len());
        self.cards.push(Arc::new(card));
    }

    /// Register a wonder board. Wonder names must be unique.
    pub fn register_wonder(&mut self, wonder: Wonder) -> Result<()> {
        if self.wonders.iter().any(|w| w.name() == wonder.name()) {
            return Err(EngineError::InvalidSetup(format!(
                "wonder '{}' registered twice",
                wonder.name()
            )));
        }
        self.wonders.push(Arc::new(wonder));
        Ok(())
    }

    /// First registered card with this name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<Card>> {
        self.by_name.get(name).map(|&i| &self.cards[i])
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Number of physical cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Card>> {
        self.cards.iter()
    }

    pub fn find_by_type(&self, card_type: CardType) -> impl Iterator<Item = &Arc<Card>> {
        self.cards.iter().filter(move |c| c.card_type() == card_type)
    }

    /// Cards dealt in `age` for a table of `player_count`.
    #[must_use]
    pub fn eligible(&self, age: u8, player_count: usize) -> Vec<Arc<Card>> {
        self.cards
            .iter()
            .filter(|c| c.age() == age && usize::from(c.min_players()) <= player_count)
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn wonders(&self) -> &[Arc<Wonder>] {
        &self.wonders
    }

    #[must_use]
    pub fn wonder(&self, name: &str) -> Option<&Arc<Wonder>> {
        self.wonders.iter().find(|w| w.name() == name)
    }
}
