//! Game outcomes.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, PlayerMap};
use crate::scoring::Score;

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Several seats share the best total.
    Winners(Vec<PlayerId>),
}

impl GameResult {
    /// Decide the result from final scores: the best total wins, a shared
    /// best total is a shared win.
    #[must_use]
    pub fn from_scores(scores: &PlayerMap<Score>) -> Self {
        let best = scores.values().map(Score::total).max().unwrap_or(0);
        let mut winners: Vec<PlayerId> = scores
            .iter()
            .filter(|(_, s)| s.total() == best)
            .map(|(p, _)| p)
            .collect();

        if winners.len() == 1 {
            GameResult::Winner(winners.remove(0))
        } else {
            GameResult::Winners(winners)
        }
    }

    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Winners(ps) => ps.contains(&player),
        }
    }

    #[must_use]
    pub fn winners(&self) -> Vec<PlayerId> {
        match self {
            GameResult::Winner(p) => vec![*p],
            GameResult::Winners(ps) => ps.clone(),
        }
    }
}

/// Final scores and the result of a finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalStandings {
    pub scores: PlayerMap<Score>,
    pub result: GameResult,
}

impl FinalStandings {
    #[must_use]
    pub fn new(scores: PlayerMap<Score>) -> Self {
        let result = GameResult::from_scores(&scores);
        Self { scores, result }
    }

    /// Seats ordered by total, best first. Ties keep seat order.
    #[must_use]
    pub fn ranking(&self) -> Vec<(PlayerId, i32)> {
        let mut ranking: Vec<_> = self.scores.iter().map(|(p, s)| (p, s.total())).collect();
        ranking.sort_by_key(|&(p, total)| (std::cmp::Reverse(total), p));
        ranking
    }
}
