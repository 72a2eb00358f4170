//! Effect system for cards and wonder stages.
//!
//! - `Effect`: parsed effect variants
//! - `parse_effects`: the encoded string grammar
//! - `EffectResolver` / `Production`: instantaneous effects and passive
//!   production
//!
//! Effects are parsed once when a card is built and never re-scanned, so
//! evaluation is an exhaustive `match` over variants.

mod effect;
mod parser;
mod resolver;

pub use effect::{Effect, EffectList, Reach, Scope, ScopeTarget};
pub use parser::{parse_effects, parse_token};
pub use resolver::{count_across, count_target, EffectResolver, Production};
