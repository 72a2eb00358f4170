//! Effect string parser.
//!
//! An encoded effect is a whitespace-separated list of tokens. Each token
//! becomes exactly one [`Effect`]:
//!
//! | Token | Effect |
//! |---|---|
//! | `WW`, `O`, ... | produce that many of the resource |
//! | `W/S/O/B` | produce one of the listed resources |
//! | `$$$` | gain coins once |
//! | `$${raw_material}<v>` | gain coins per counted card |
//! | `MM` | shields |
//! | `VVV` | victory points |
//! | `V-{wonder}`, `V-{civilian}_<>` | victory points per counted item |
//! | `C`, `T`, `G` | science symbol |
//! | `C/T/G` | science wildcard |
//! | `trade{W/S/O/B}<` | discounted trading toward the marked neighbors |
//! | `_free_build` | custom ability |
//!
//! ```
//! use rust_wonders::effects::{parse_effects, Effect};
//!
//! let effects = parse_effects("MM").unwrap();
//! assert_eq!(effects.as_slice(), &[Effect::Shields(2)]);
//! ```

use smallvec::SmallVec;

use super::effect::{Effect, EffectList, Reach, Scope, ScopeTarget};
use crate::cards::{Resource, ScienceSymbol};
use crate::core::{EngineError, Result};

const WILDCARD_SCIENCE: &str = "C/T/G";
const TRADE_PREFIX: &str = "trade{";

/// Parse a full encoded effect string. The empty string has no effects.
pub fn parse_effects(encoded: &str) -> Result<EffectList> {
    encoded.split_whitespace().map(parse_token).collect()
}

/// Parse a single token.
pub fn parse_token(token: &str) -> Result<Effect> {
    let fail = |reason: &str| EngineError::EffectParse {
        effect: token.to_string(),
        reason: reason.to_string(),
    };

    if let Some(id) = token.strip_prefix('_') {
        if id.is_empty() {
            return Err(fail("custom effect has no name"));
        }
        return Ok(Effect::Custom(id.to_string()));
    }

    if token == WILDCARD_SCIENCE {
        return Ok(Effect::ScienceWildcard);
    }

    if let Some(body) = token.strip_prefix(TRADE_PREFIX) {
        let (inner, markers) = body.split_once('}').ok_or_else(|| fail("unclosed trade brace"))?;
        let resources = parse_resource_list(inner).ok_or_else(|| fail("bad trade resource list"))?;
        let reach = parse_markers(markers).ok_or_else(|| fail("bad neighbor markers"))?;
        if !reach.left && !reach.right {
            return Err(fail("trade discount names no neighbor"));
        }
        return Ok(Effect::TradeDiscount { resources, reach });
    }

    if token.contains('/') {
        let options = parse_resource_list(token).ok_or_else(|| fail("bad resource choice"))?;
        if options.len() < 2 {
            return Err(fail("resource choice needs at least two options"));
        }
        return Ok(Effect::ProduceChoice(options));
    }

    let first = token.chars().next().ok_or_else(|| fail("empty token"))?;
    let run = token.chars().take_while(|&c| c == first).count();
    let rest = &token[run * first.len_utf8()..];
    let amount = run as u32;

    match first {
        '$' => {
            let scope = parse_optional_scope(rest, token)?;
            Ok(Effect::Coins { amount, scope })
        }
        'V' => {
            let scope = parse_optional_scope(rest, token)?;
            Ok(Effect::VictoryPoints { amount, scope })
        }
        _ if !rest.is_empty() => Err(fail("unexpected characters after letter run")),
        'M' => Ok(Effect::Shields(amount)),
        c => {
            if let Some(symbol) = ScienceSymbol::from_letter(c) {
                return if run == 1 {
                    Ok(Effect::Science(symbol))
                } else {
                    Err(fail("science symbols come one per token"))
                };
            }
            match Resource::from_letter(c) {
                Some(resource) if resource != Resource::Coin => Ok(Effect::Produce { resource, amount }),
                _ => Err(fail("unknown effect letter")),
            }
        }
    }
}

/// Parse `{tag}markers` or `-{tag}markers` after a `$` or `V` run.
fn parse_optional_scope(rest: &str, token: &str) -> Result<Option<Scope>> {
    if rest.is_empty() {
        return Ok(None);
    }
    let fail = |reason: &str| EngineError::EffectParse {
        effect: token.to_string(),
        reason: reason.to_string(),
    };

    let body = rest.strip_prefix('-').unwrap_or(rest);
    let body = body.strip_prefix('{').ok_or_else(|| fail("expected '{' to open a scope"))?;
    let (tag, markers) = body.split_once('}').ok_or_else(|| fail("unclosed scope brace"))?;

    let target = ScopeTarget::from_tag(tag).ok_or_else(|| EngineError::UnknownScope(tag.to_string()))?;
    let reach = parse_markers(markers).ok_or_else(|| fail("bad neighbor markers"))?;

    Ok(Some(Scope::new(target, reach)))
}

/// Markers may be separated from the brace by one `_`.
fn parse_markers(markers: &str) -> Option<Reach> {
    let markers = markers.strip_prefix('_').unwrap_or(markers);
    if markers.chars().all(|c| matches!(c, '<' | '>' | 'v')) {
        Some(Reach::from_markers(markers))
    } else {
        None
    }
}

fn parse_resource_list(list: &str) -> Option<SmallVec<[Resource; 4]>> {
    list.split('/')
        .map(|part| {
            let mut chars = part.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Resource::from_letter(c).filter(|&r| r != Resource::Coin),
                _ => None,
            }
        })
        .collect()
}
