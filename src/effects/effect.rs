//! Effect definitions.
//!
//! Every card and wonder stage carries a short encoded effect string. It is
//! parsed once, at construction, into a list of `Effect` values so that the
//! rest of the engine matches on variants instead of scanning substrings.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use crate::cards::{CardType, Resource, ScienceSymbol};

/// Which seats a scope counts: the owner and/or the two ring neighbors.
///
/// Encoded with markers after the scope: `<` left, `>` right, `v` self.
/// Without any angle marker the scope covers the owner only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reach {
    pub own: bool,
    pub left: bool,
    pub right: bool,
}

impl Reach {
    /// Owner only.
    pub const OWN: Reach = Reach {
        own: true,
        left: false,
        right: false,
    };

    /// Owner and both neighbors.
    pub const ALL: Reach = Reach {
        own: true,
        left: true,
        right: true,
    };

    /// Both neighbors, not the owner.
    pub const NEIGHBORS: Reach = Reach {
        own: false,
        left: true,
        right: true,
    };

    /// Decode a marker string such as `"<v>"`, `"<>"` or `""`.
    #[must_use]
    pub fn from_markers(markers: &str) -> Self {
        let left = markers.contains('<');
        let right = markers.contains('>');
        let own = markers.contains('v') || (!left && !right);
        Self { own, left, right }
    }
}

impl Default for Reach {
    fn default() -> Self {
        Self::OWN
    }
}

/// What a scope counts.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScopeTarget {
    /// Wonder stages built.
    Wonder,
    /// All stages of the owner's wonder built.
    WondersComplete,
    /// Military token total.
    Military,
    /// Defeat tokens collected.
    Defeat,
    /// Cards of any of the listed types.
    CardTypes(SmallVec<[CardType; 3]>),
}

impl ScopeTarget {
    /// Parse the text between the braces. Card types are `;`-joined.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "wonder" => Some(Self::Wonder),
            "wonders_complete" => Some(Self::WondersComplete),
            "military" => Some(Self::Military),
            "defeat" => Some(Self::Defeat),
            _ => tag
                .split(';')
                .map(CardType::from_tag)
                .collect::<Option<SmallVec<[CardType; 3]>>>()
                .map(Self::CardTypes),
        }
    }
}

impl fmt::Display for ScopeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeTarget::Wonder => f.write_str("wonder"),
            ScopeTarget::WondersComplete => f.write_str("wonders_complete"),
            ScopeTarget::Military => f.write_str("military"),
            ScopeTarget::Defeat => f.write_str("defeat"),
            ScopeTarget::CardTypes(types) => {
                for (i, card_type) in types.iter().enumerate() {
                    if i > 0 {
                        f.write_str(";")?;
                    }
                    f.write_str(card_type.tag())?;
                }
                Ok(())
            }
        }
    }
}

/// A multiplier scope: what to count, and across which seats.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scope {
    pub target: ScopeTarget,
    pub reach: Reach,
}

impl Scope {
    #[must_use]
    pub fn new(target: ScopeTarget, reach: Reach) -> Self {
        Self { target, reach }
    }
}

/// A parsed card or wonder-stage effect.
///
/// ## Passive
///
/// - `Produce`, `ProduceChoice`: production used when paying costs
/// - `Shields`: counted at each military conflict
/// - `TradeDiscount`: lowers neighbor trading prices
///
/// ## Instantaneous
///
/// - `Coins`: paid out once, when the card is played or the stage built
///
/// ## End of game
///
/// - `VictoryPoints`, `Science`, `ScienceWildcard`: read by the scoring engine
///
/// `Custom` effects name a unique ability outside the general grammar.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    Produce {
        resource: Resource,
        amount: u32,
    },

    /// One unit of any one of the listed resources, chosen per payment.
    ProduceChoice(SmallVec<[Resource; 4]>),

    Coins {
        amount: u32,
        scope: Option<Scope>,
    },

    Shields(u32),

    VictoryPoints {
        amount: u32,
        scope: Option<Scope>,
    },

    Science(ScienceSymbol),

    /// Counts as whichever science symbol scores best.
    ScienceWildcard,

    /// Neighbor trades for these resources cost the discounted price.
    TradeDiscount {
        resources: SmallVec<[Resource; 4]>,
        reach: Reach,
    },

    Custom(String),
}

impl Effect {
    /// Shield count, zero for other effects.
    #[must_use]
    pub fn shields(&self) -> u32 {
        match self {
            Effect::Shields(n) => *n,
            _ => 0,
        }
    }

    /// Unscoped victory points, zero for other effects.
    #[must_use]
    pub fn flat_points(&self) -> u32 {
        match self {
            Effect::VictoryPoints { amount, scope: None } => *amount,
            _ => 0,
        }
    }

    /// Whether this effect acts when the card is played or the stage built.
    #[must_use]
    pub fn is_instantaneous(&self) -> bool {
        matches!(self, Effect::Coins { .. } | Effect::Custom(_))
    }
}

/// Effects parsed from one encoded string.
pub type EffectList = SmallVec<[Effect; 2]>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reach_from_markers() {
        assert_eq!(Reach::from_markers(""), Reach::OWN);
        assert_eq!(Reach::from_markers("v"), Reach::OWN);
        assert_eq!(Reach::from_markers("<>"), Reach::NEIGHBORS);
        assert_eq!(Reach::from_markers("<v>"), Reach::ALL);

        let left_only = Reach::from_markers("<");
        assert!(left_only.left);
        assert!(!left_only.right);
        assert!(!left_only.own);
    }

    #[test]
    fn test_scope_target_tags() {
        assert_eq!(ScopeTarget::from_tag("wonder"), Some(ScopeTarget::Wonder));
        assert_eq!(ScopeTarget::from_tag("defeat"), Some(ScopeTarget::Defeat));

        let types = ScopeTarget::from_tag("raw_material;manufactured_good").unwrap();
        assert_eq!(
            types,
            ScopeTarget::CardTypes(SmallVec::from_slice(&[
                CardType::RawMaterial,
                CardType::ManufacturedGood
            ]))
        );
        assert_eq!(types.to_string(), "raw_material;manufactured_good");

        assert_eq!(ScopeTarget::from_tag("wonders"), None);
        assert_eq!(ScopeTarget::from_tag("civilian;bogus"), None);
    }

    #[test]
    fn test_effect_accessors() {
        assert_eq!(Effect::Shields(2).shields(), 2);
        assert_eq!(Effect::Science(ScienceSymbol::Gear).shields(), 0);

        let flat = Effect::VictoryPoints { amount: 3, scope: None };
        let scoped = Effect::VictoryPoints {
            amount: 1,
            scope: Some(Scope::new(ScopeTarget::Wonder, Reach::OWN)),
        };
        assert_eq!(flat.flat_points(), 3);
        assert_eq!(scoped.flat_points(), 0);

        assert!(Effect::Coins { amount: 5, scope: None }.is_instantaneous());
        assert!(!flat.is_instantaneous());
        assert!(Effect::Custom("free_build".into()).is_instantaneous());
    }
}
