//! Military conflicts at the end of each age.
//!
//! Every seat compares shields with each neighbor independently. All
//! outcomes are computed from one snapshot of shield counts and only then
//! applied, so the order seats are processed in cannot matter.

use log::debug;

use crate::core::{Age, GameState, PlayerId, PlayerMap};

/// Tokens gained by a seat with `own` shields against a neighbor with
/// `other` shields: a win is worth the age's tokens, a loss costs one,
/// a tie is nothing.
///
/// ```
/// use rust_wonders::core::Age;
/// use rust_wonders::rules::military::outcome;
///
/// assert_eq!(outcome(1, 0, Age::I), 1);
/// assert_eq!(outcome(1, 2, Age::I), -1);
/// assert_eq!(outcome(4, 4, Age::III), 0);
/// assert_eq!(outcome(3, 1, Age::III), 5);
/// ```
#[must_use]
pub fn outcome(own: u32, other: u32, age: Age) -> i32 {
    use std::cmp::Ordering;

    match own.cmp(&other) {
        Ordering::Greater => age.victory_tokens(),
        Ordering::Less => -1,
        Ordering::Equal => 0,
    }
}

/// Token results for one seat, one per neighbor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConflictResult {
    pub against_left: i32,
    pub against_right: i32,
}

impl ConflictResult {
    #[must_use]
    pub fn total(&self) -> i32 {
        self.against_left + self.against_right
    }
}

/// Compute every seat's results without touching the state.
#[must_use]
pub fn compute(state: &GameState, age: Age) -> PlayerMap<ConflictResult> {
    let n = state.player_count();
    let shields = state.players().map(|_, p| p.shields());

    shields.map(|seat, &own| ConflictResult {
        against_left: outcome(own, shields[seat.left(n)], age),
        against_right: outcome(own, shields[seat.right(n)], age),
    })
}

/// Resolve the conflicts of `age` and apply the tokens.
pub fn resolve(state: &mut GameState, age: Age) -> PlayerMap<ConflictResult> {
    let results = compute(state, age);

    for (seat, result) in results.iter() {
        apply_one(state, seat, result.against_left);
        apply_one(state, seat, result.against_right);
        debug!(
            "{age} conflicts: {seat} scores {} (left {}, right {})",
            result.total(),
            result.against_left,
            result.against_right
        );
    }
    results
}

fn apply_one(state: &mut GameState, seat: PlayerId, delta: i32) {
    if delta != 0 {
        state.player_mut(seat).add_military(delta);
    }
}
