//! Game state: ages, phases, players and the table.
//!
//! ## Player
//!
//! Everything one seat owns: wonder progress, played cards, coins,
//! military tokens and the current hand. Mutated only through the rules
//! engine; strategies only ever see a [`PlayerView`](super::view::PlayerView).
//!
//! ## GameState
//!
//! The ring of players (fixed order), age and turn counters, the public
//! discard pile, the move history and the game's RNG.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::action::MoveRecord;
use super::config::GameConfig;
use super::error::{EngineError, Result};
use super::player::{PlayerId, PlayerMap, Side};
use super::rng::GameRng;
use crate::cards::{Card, CardType, Wonder, WonderStage};
use crate::effects::Effect;

/// One of the three ages.
///
/// Military rewards and the hand-passing direction both depend on the age.
/// Converting from a raw number outside 1..=3 fails, so an invalid age
/// cannot reach the military resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Age {
    I,
    II,
    III,
}

impl Age {
    pub const ALL: [Age; 3] = [Age::I, Age::II, Age::III];

    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Age::I => 1,
            Age::II => 2,
            Age::III => 3,
        }
    }

    /// Tokens won for beating a neighbor in this age.
    #[must_use]
    pub const fn victory_tokens(self) -> i32 {
        match self {
            Age::I => 1,
            Age::II => 3,
            Age::III => 5,
        }
    }

    /// The neighbor whose hand a seat receives when hands rotate.
    #[must_use]
    pub const fn receives_from(self) -> Side {
        match self {
            Age::I | Age::III => Side::Right,
            Age::II => Side::Left,
        }
    }

    #[must_use]
    pub const fn next(self) -> Option<Age> {
        match self {
            Age::I => Some(Age::II),
            Age::II => Some(Age::III),
            Age::III => None,
        }
    }
}

impl TryFrom<u8> for Age {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Age::I),
            2 => Ok(Age::II),
            3 => Ok(Age::III),
            other => Err(EngineError::InvariantViolation(format!("age {other} is not 1, 2 or 3"))),
        }
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Age {}", self.number())
    }
}

/// Where the game is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Hands for this age are about to be dealt.
    Dealing(Age),
    /// Players are choosing moves.
    PlayerTurn { age: Age, turn: u32 },
    /// Last cards discarded, military resolved.
    AgeEnd(Age),
    GameOver,
}

/// One seat's mutable state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    seat: PlayerId,
    wonder: Arc<Wonder>,
    cards: Vec<Arc<Card>>,
    card_names: FxHashSet<String>,
    coins: u32,
    military_tokens: i32,
    defeats: u32,
    stages_built: usize,
    hand: Vec<Arc<Card>>,
}

impl Player {
    #[must_use]
    pub fn new(name: impl Into<String>, seat: PlayerId, wonder: Arc<Wonder>, coins: u32) -> Self {
        Self {
            name: name.into(),
            seat,
            wonder,
            cards: Vec::new(),
            card_names: FxHashSet::default(),
            coins,
            military_tokens: 0,
            defeats: 0,
            stages_built: 0,
            hand: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn seat(&self) -> PlayerId {
        self.seat
    }

    #[must_use]
    pub fn wonder(&self) -> &Arc<Wonder> {
        &self.wonder
    }

    /// Played cards in play order.
    #[must_use]
    pub fn cards(&self) -> &[Arc<Card>] {
        &self.cards
    }

    #[must_use]
    pub fn coins(&self) -> u32 {
        self.coins
    }

    #[must_use]
    pub fn military_tokens(&self) -> i32 {
        self.military_tokens
    }

    #[must_use]
    pub fn defeats(&self) -> u32 {
        self.defeats
    }

    #[must_use]
    pub fn stages_built(&self) -> usize {
        self.stages_built
    }

    #[must_use]
    pub fn hand(&self) -> &[Arc<Card>] {
        &self.hand
    }

    /// Whether a card with this name is already played.
    #[must_use]
    pub fn owns(&self, name: &str) -> bool {
        self.card_names.contains(name)
    }

    #[must_use]
    pub fn count_cards_by_type(&self, card_type: CardType) -> u32 {
        self.cards.iter().filter(|c| c.card_type() == card_type).count() as u32
    }

    /// Whether a played card chains to `name`.
    #[must_use]
    pub fn can_chain(&self, name: &str) -> bool {
        self.cards.iter().any(|c| c.chain_to().iter().any(|target| target == name))
    }

    /// The next stage to build, if any remain.
    #[must_use]
    pub fn next_stage(&self) -> Option<&WonderStage> {
        self.wonder.stage(self.stages_built)
    }

    #[must_use]
    pub fn wonder_complete(&self) -> bool {
        self.stages_built >= self.wonder.stage_count()
    }

    /// Stages already built, in build order.
    pub fn built_stages(&self) -> impl Iterator<Item = &WonderStage> {
        self.wonder.stages().iter().take(self.stages_built)
    }

    /// Effects of every played card and built stage.
    pub fn effects(&self) -> impl Iterator<Item = &Effect> {
        self.cards
            .iter()
            .flat_map(|c| c.effects().iter())
            .chain(self.built_stages().flat_map(|s| s.effects().iter()))
    }

    /// Shields from played cards and built stages.
    #[must_use]
    pub fn shields(&self) -> u32 {
        self.effects().map(Effect::shields).sum()
    }

    // === Mutation (rules engine only) ===

    pub(crate) fn add_coins(&mut self, amount: u32) {
        self.coins += amount;
    }

    pub(crate) fn spend_coins(&mut self, amount: u32) -> Result<()> {
        if amount > self.coins {
            return Err(EngineError::InvariantViolation(format!(
                "{} would go negative: has {} coins, spending {}",
                self.seat, self.coins, amount
            )));
        }
        self.coins -= amount;
        Ok(())
    }

    pub(crate) fn add_card(&mut self, card: Arc<Card>) -> Result<()> {
        if !self.card_names.insert(card.name().to_string()) {
            return Err(EngineError::InvariantViolation(format!(
                "{} already owns '{}'",
                self.seat,
                card.name()
            )));
        }
        self.cards.push(card);
        Ok(())
    }

    pub(crate) fn build_stage(&mut self) -> Result<()> {
        if self.wonder_complete() {
            return Err(EngineError::InvariantViolation(format!(
                "{} has no wonder stage left to build",
                self.seat
            )));
        }
        self.stages_built += 1;
        Ok(())
    }

    pub(crate) fn add_military(&mut self, delta: i32) {
        self.military_tokens += delta;
        if delta < 0 {
            self.defeats += 1;
        }
    }

    /// Remove the first hand card with this name.
    pub(crate) fn take_from_hand(&mut self, name: &str) -> Option<Arc<Card>> {
        let index = self.hand.iter().position(|c| c.name() == name)?;
        Some(self.hand.remove(index))
    }

    pub(crate) fn set_hand(&mut self, hand: Vec<Arc<Card>>) {
        self.hand = hand;
    }

    pub(crate) fn take_hand(&mut self) -> Vec<Arc<Card>> {
        std::mem::take(&mut self.hand)
    }
}

/// Complete game state.
///
/// `im::Vector` keeps the discard pile and history cheap to clone into
/// views and snapshots.
#[derive(Clone, Debug)]
pub struct GameState {
    config: GameConfig,
    phase: Phase,
    age: u8,
    turn: u32,
    players: PlayerMap<Player>,
    discard: Vector<Arc<Card>>,
    history: Vector<MoveRecord>,
    rng: GameRng,
}

impl GameState {
    /// Create the state for a fresh game, before the first deal.
    pub fn new(config: GameConfig, players: Vec<Player>) -> Result<Self> {
        if players.len() != config.player_count {
            return Err(EngineError::InvalidSetup(format!(
                "configured for {} players but {} were seated",
                config.player_count,
                players.len()
            )));
        }
        for (i, player) in players.iter().enumerate() {
            if player.seat().index() != i {
                return Err(EngineError::InvalidSetup(format!(
                    "player '{}' sits at {} but is listed at position {}",
                    player.name(),
                    player.seat(),
                    i
                )));
            }
        }

        let rng = GameRng::new(config.seed);
        Ok(Self {
            config,
            phase: Phase::Dealing(Age::I),
            age: 1,
            turn: 1,
            players: PlayerMap::from_vec(players),
            discard: Vector::new(),
            history: Vector::new(),
            rng,
        })
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.player_count())
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Raw age counter: 1..=3 while playing, 4 once the game is over.
    #[must_use]
    pub fn age_number(&self) -> u8 {
        self.age
    }

    /// Current age as the typed enum.
    pub fn age(&self) -> Result<Age> {
        Age::try_from(self.age)
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    /// A seated player, or `None` for a seat outside the ring.
    #[must_use]
    pub fn try_player(&self, id: PlayerId) -> Option<&Player> {
        (id.index() < self.player_count()).then(|| &self.players[id])
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    #[must_use]
    pub fn left_of(&self, id: PlayerId) -> &Player {
        &self.players[id.left(self.player_count())]
    }

    #[must_use]
    pub fn right_of(&self, id: PlayerId) -> &Player {
        &self.players[id.right(self.player_count())]
    }

    #[must_use]
    pub fn neighbor(&self, id: PlayerId, side: Side) -> &Player {
        &self.players[id.neighbor(side, self.player_count())]
    }

    #[must_use]
    pub fn discard_pile(&self) -> &Vector<Arc<Card>> {
        &self.discard
    }

    #[must_use]
    pub fn history(&self) -> &Vector<MoveRecord> {
        &self.history
    }

    // === Mutation (rules engine only) ===

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id]
    }

    pub(crate) fn players_mut(&mut self) -> &mut PlayerMap<Player> {
        &mut self.players
    }

    pub(crate) fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub(crate) fn set_age(&mut self, age: u8) {
        self.age = age;
    }

    pub(crate) fn set_turn(&mut self, turn: u32) {
        self.turn = turn;
    }

    pub(crate) fn push_discard(&mut self, card: Arc<Card>) {
        self.discard.push_back(card);
    }

    pub(crate) fn record(&mut self, record: MoveRecord) {
        self.history.push_back(record);
    }
}
