use super::Strategy;
use crate::core::{GameRng, GameView, Move, MoveAction};

/// Always the first legal move.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstLegal;

impl Strategy for FirstLegal {
    fn choose_move(&mut self, view: &GameView<'_>, _rng: &mut GameRng) -> Option<Move> {
        view.legal_moves().into_iter().next()
    }

    fn name(&self) -> &str {
        "first-legal"
    }
}

/// Builds the wonder when it can, otherwise plays a card, otherwise
/// discards.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimpleStrategy;

impl SimpleStrategy {
    const PRIORITY: [MoveAction; 3] = [MoveAction::BuildWonder, MoveAction::Play, MoveAction::Discard];
}

impl Strategy for SimpleStrategy {
    fn choose_move(&mut self, view: &GameView<'_>, _rng: &mut GameRng) -> Option<Move> {
        let moves = view.legal_moves();
        Self::PRIORITY
            .iter()
            .find_map(|&action| moves.iter().find(|m| m.action == action).cloned())
    }

    fn name(&self) -> &str {
        "simple"
    }
}

/// Takes whichever move adds the most shields; the first legal move when
/// nothing does.
#[derive(Clone, Copy, Debug, Default)]
pub struct WarriorStrategy;

impl WarriorStrategy {
    fn shields_gained(view: &GameView<'_>, mv: &Move) -> u32 {
        match mv.action {
            MoveAction::Play => mv.card.shields(),
            MoveAction::BuildWonder => view.me().next_stage().map_or(0, |stage| stage.shields()),
            MoveAction::Discard => 0,
        }
    }
}

impl Strategy for WarriorStrategy {
    fn choose_move(&mut self, view: &GameView<'_>, _rng: &mut GameRng) -> Option<Move> {
        let mut moves = view.legal_moves().into_iter();
        let mut best = moves.next()?;
        let mut most = Self::shields_gained(view, &best);

        for mv in moves {
            let shields = Self::shields_gained(view, &mv);
            if shields > most {
                most = shields;
                best = mv;
            }
        }
        Some(best)
    }

    fn name(&self) -> &str {
        "warrior"
    }
}

/// Uniformly random legal move.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomStrategy;

impl Strategy for RandomStrategy {
    fn choose_move(&mut self, view: &GameView<'_>, rng: &mut GameRng) -> Option<Move> {
        let moves = view.legal_moves();
        rng.choose(&moves).cloned()
    }

    fn name(&self) -> &str {
        "random"
    }
}
