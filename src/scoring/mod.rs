//! End-of-game scoring.
//!
//! Scoring is a pure function of the final table: each player's own cards,
//! stages, coins and tokens, plus the two neighbors for guild scopes.
//!
//! ## Categories
//!
//! | Category | Source |
//! |---|---|
//! | military | token total |
//! | treasury | coins ÷ 3 |
//! | wonders | points on built stages |
//! | civilian | points on civilian cards |
//! | scientific | best placement of wildcard symbols |
//! | commercial | scoped points on commercial cards |
//! | guilds | scoped points on guild cards |

pub mod science;
mod score;

pub use score::{
    civilian_points, commercial_points, guild_points, science_points, score_player, wonder_points, Score,
};

use log::debug;

use crate::core::{GameState, PlayerId, PlayerMap, Result};

/// Score one seat.
pub fn calculate(state: &GameState, seat: PlayerId) -> Result<Score> {
    score_player(state.player(seat), state.left_of(seat), state.right_of(seat))
}

/// Score every seat.
pub fn calculate_all(state: &GameState) -> Result<PlayerMap<Score>> {
    let scores = state
        .player_ids()
        .map(|seat| calculate(state, seat))
        .collect::<Result<Vec<_>>>()?;

    for (i, score) in scores.iter().enumerate() {
        debug!("Seat {i} scores {score}");
    }
    Ok(PlayerMap::from_vec(scores))
}
