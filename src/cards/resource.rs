//! Resources, card types, science symbols and resource counting.
//!
//! Every enum here has a one-letter (or snake_case tag) code used by the
//! effect grammar and by compact cost strings:
//!
//! | Code | Meaning |
//! |---|---|
//! | `W` `S` `O` `B` | wood, stone, ore, brick |
//! | `F` `P` `L` | glass, papyrus, loom |
//! | `$` | coin |
//! | `C` `T` `G` | compass, tablet, gear |

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::{EngineError, Result};

/// A tradable good, or coin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Resource {
    Wood,
    Stone,
    Ore,
    Brick,
    Glass,
    Papyrus,
    Loom,
    Coin,
}

impl Resource {
    /// Number of resource kinds, coin included.
    pub const COUNT: usize = 8;

    /// All resources in index order.
    pub const ALL: [Resource; Self::COUNT] = [
        Resource::Wood,
        Resource::Stone,
        Resource::Ore,
        Resource::Brick,
        Resource::Glass,
        Resource::Papyrus,
        Resource::Loom,
        Resource::Coin,
    ];

    /// Resources that can be produced and traded (everything but coin).
    pub const GOODS: [Resource; 7] = [
        Resource::Wood,
        Resource::Stone,
        Resource::Ore,
        Resource::Brick,
        Resource::Glass,
        Resource::Papyrus,
        Resource::Loom,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Letter code.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Resource::Wood => 'W',
            Resource::Stone => 'S',
            Resource::Ore => 'O',
            Resource::Brick => 'B',
            Resource::Glass => 'F',
            Resource::Papyrus => 'P',
            Resource::Loom => 'L',
            Resource::Coin => '$',
        }
    }

    /// Parse a letter code. Glass is `F` so that `G` stays free for gear.
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.letter() == letter)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Card category (the card's color in the physical game).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CardType {
    RawMaterial,
    ManufacturedGood,
    Civilian,
    Commercial,
    Military,
    Scientific,
    Guild,
}

impl CardType {
    pub const ALL: [CardType; 7] = [
        CardType::RawMaterial,
        CardType::ManufacturedGood,
        CardType::Civilian,
        CardType::Commercial,
        CardType::Military,
        CardType::Scientific,
        CardType::Guild,
    ];

    /// Tag used inside effect scopes, e.g. `{raw_material}`.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            CardType::RawMaterial => "raw_material",
            CardType::ManufacturedGood => "manufactured_good",
            CardType::Civilian => "civilian",
            CardType::Commercial => "commercial",
            CardType::Military => "military",
            CardType::Scientific => "scientific",
            CardType::Guild => "guild",
        }
    }

    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.tag() == tag)
    }

    /// Whether production on cards of this type can be sold to neighbors.
    #[must_use]
    pub const fn is_tradable_producer(self) -> bool {
        matches!(self, CardType::RawMaterial | CardType::ManufacturedGood)
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Science symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScienceSymbol {
    Tablet,
    Compass,
    Gear,
}

impl ScienceSymbol {
    pub const ALL: [ScienceSymbol; 3] = [ScienceSymbol::Tablet, ScienceSymbol::Compass, ScienceSymbol::Gear];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            ScienceSymbol::Tablet => 'T',
            ScienceSymbol::Compass => 'C',
            ScienceSymbol::Gear => 'G',
        }
    }

    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.letter() == letter)
    }
}

/// A count per resource kind. Used for costs, production and shortfalls.
///
/// ```
/// use rust_wonders::cards::{Resource, ResourceCounts};
///
/// let cost = ResourceCounts::from_letters("$OOW").unwrap();
/// assert_eq!(cost.get(Resource::Ore), 2);
/// assert_eq!(cost.coins(), 1);
/// assert_eq!(cost.to_string(), "WOO$");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceCounts([u32; Resource::COUNT]);

impl ResourceCounts {
    #[must_use]
    pub const fn new() -> Self {
        Self([0; Resource::COUNT])
    }

    /// Parse a compact letter string such as `"WWO"` or `"$$"`.
    pub fn from_letters(letters: &str) -> Result<Self> {
        let mut counts = Self::new();
        for letter in letters.chars() {
            let resource = Resource::from_letter(letter).ok_or_else(|| {
                EngineError::InvalidSetup(format!("unknown resource letter '{letter}' in '{letters}'"))
            })?;
            counts.add(resource, 1);
        }
        Ok(counts)
    }

    /// Build from (resource, amount) pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Resource, u32)>) -> Self {
        let mut counts = Self::new();
        for (resource, amount) in pairs {
            counts.add(resource, amount);
        }
        counts
    }

    #[must_use]
    pub fn get(&self, resource: Resource) -> u32 {
        self.0[resource.index()]
    }

    pub fn set(&mut self, resource: Resource, amount: u32) {
        self.0[resource.index()] = amount;
    }

    pub fn add(&mut self, resource: Resource, amount: u32) {
        self.0[resource.index()] += amount;
    }

    /// Coin component.
    #[must_use]
    pub fn coins(&self) -> u32 {
        self.get(Resource::Coin)
    }

    /// Copy with the coin component removed.
    #[must_use]
    pub fn goods(&self) -> Self {
        let mut goods = *self;
        goods.set(Resource::Coin, 0);
        goods
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&n| n == 0)
    }

    /// Sum over every kind.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    /// Non-zero entries in resource order.
    pub fn iter(&self) -> impl Iterator<Item = (Resource, u32)> + '_ {
        Resource::ALL
            .into_iter()
            .map(|r| (r, self.get(r)))
            .filter(|&(_, n)| n > 0)
    }
}

impl fmt::Display for ResourceCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("nothing");
        }
        for (resource, amount) in self.iter() {
            for _ in 0..amount {
                write!(f, "{}", resource.letter())?;
            }
        }
        Ok(())
    }
}
