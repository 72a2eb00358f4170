//! Card system: resources, definitions, registry and the standard catalog.
//!
//! ## Key Types
//!
//! - `Resource`, `CardType`, `ScienceSymbol`: the game's enumerations
//! - `ResourceCounts`: costs and production tallies
//! - `Card`, `Wonder`, `WonderStage`: immutable definitions
//! - `CardRegistry`: the deck and wonder boards available to a game
//!
//! `catalog::standard_registry` builds the base game for 3-7 players.

pub mod catalog;
pub mod definition;
pub mod registry;
pub mod resource;

pub use catalog::standard_registry;
pub use definition::{Card, Wonder, WonderStage};
pub use registry::CardRegistry;
pub use resource::{CardType, Resource, ResourceCounts, ScienceSymbol};
