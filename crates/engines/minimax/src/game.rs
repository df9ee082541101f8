//! The view of the rules engine the search works against.

use std::fmt::Debug;

use chess_core::{legal_moves, ChessError, Color, Move, Outcome, Position};

/// A game position the search can expand.
///
/// Implementations must treat positions as values: [`GameState::apply`]
/// returns a new successor and never alters `self`, so sibling branches of
/// the search cannot observe each other.
pub trait GameState: Clone {
    type Move: Copy + Eq + Debug;

    fn side_to_move(&self) -> Color;

    /// Legal moves in a stable order. Tie-breaks depend on this order.
    fn legal_moves(&self) -> Vec<Self::Move>;

    fn apply(&self, mv: Self::Move) -> Result<Self, ChessError>;

    fn outcome(&self) -> Outcome;

    /// The move that produced this position, if any.
    fn last_move(&self) -> Option<Self::Move>;

    /// Rejects positions the rules engine cannot reason about.
    fn validate(&self) -> Result<(), ChessError> {
        Ok(())
    }
}

impl GameState for Position {
    type Move = Move;

    fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    fn legal_moves(&self) -> Vec<Move> {
        legal_moves(self)
    }

    fn apply(&self, mv: Move) -> Result<Self, ChessError> {
        Position::apply(self, mv)
    }

    fn outcome(&self) -> Outcome {
        Position::outcome(self)
    }

    fn last_move(&self) -> Option<Move> {
        Position::last_move(self)
    }

    fn validate(&self) -> Result<(), ChessError> {
        Position::validate(self)
    }
}
