//! Game termination: checkmate, stalemate and the automatic draw rules.

use std::fmt;

use crate::board::Position;
use crate::movegen::has_legal_move;
use crate::types::{Color, PieceKind};

/// Half-moves without capture or pawn move after which a draw may be claimed.
pub const FIFTY_MOVE_PLIES: u32 = 100;
/// Half-moves after which the game is drawn without a claim.
pub const SEVENTY_FIVE_MOVE_PLIES: u32 = 150;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawReason {
    Stalemate,
    InsufficientMaterial,
    SeventyFiveMoves,
    FivefoldRepetition,
}

/// Result of a position as far as the rules are concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Ongoing,
    Decisive { winner: Color },
    Draw(DrawReason),
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::Ongoing
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            Outcome::Decisive { winner } => Some(winner),
            _ => None,
        }
    }

    /// PGN-style result token.
    pub fn result_str(self) -> &'static str {
        match self {
            Outcome::Ongoing => "*",
            Outcome::Decisive {
                winner: Color::White,
            } => "1-0",
            Outcome::Decisive {
                winner: Color::Black,
            } => "0-1",
            Outcome::Draw(_) => "1/2-1/2",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Ongoing => f.write_str("ongoing"),
            Outcome::Decisive { winner } => write!(f, "{winner} wins"),
            Outcome::Draw(reason) => write!(f, "draw ({reason:?})"),
        }
    }
}

impl Position {
    /// Terminal status without any draw claims.
    ///
    /// Checkmate is tested first, so a mate delivered on the 150th half-move
    /// still counts as a win.
    pub fn outcome(&self) -> Outcome {
        if !has_legal_move(self) {
            return if self.in_check(self.side_to_move) {
                Outcome::Decisive {
                    winner: self.side_to_move.other(),
                }
            } else {
                Outcome::Draw(DrawReason::Stalemate)
            };
        }
        if self.is_insufficient_material() {
            return Outcome::Draw(DrawReason::InsufficientMaterial);
        }
        if self.halfmove_clock >= SEVENTY_FIVE_MOVE_PLIES {
            return Outcome::Draw(DrawReason::SeventyFiveMoves);
        }
        if self.repetition_count() >= 5 {
            return Outcome::Draw(DrawReason::FivefoldRepetition);
        }
        Outcome::Ongoing
    }

    pub fn is_checkmate(&self) -> bool {
        self.in_check(self.side_to_move) && !has_legal_move(self)
    }

    pub fn is_stalemate(&self) -> bool {
        !self.in_check(self.side_to_move) && !has_legal_move(self)
    }

    /// Claimable under the fifty-move rule.
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= FIFTY_MOVE_PLIES
    }

    /// Claimable by threefold repetition.
    pub fn is_threefold_repetition(&self) -> bool {
        self.repetition_count() >= 3
    }

    /// How many times the current position has occurred, this one included.
    pub fn repetition_count(&self) -> usize {
        let key = self.zobrist_hash();
        1 + self.history().iter().filter(|&&h| h == key).count()
    }

    /// Neither side can possibly mate: bare kings, a single minor piece, or
    /// bishops that all stand on one square color.
    pub fn is_insufficient_material(&self) -> bool {
        let mut minors = 0;
        let mut knights = 0;
        let mut bishop_shades = [false; 2];
        for (s, pc) in self.board.iter().enumerate() {
            let Some(pc) = pc else {
                continue;
            };
            match pc.kind {
                PieceKind::King => {}
                PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
                PieceKind::Knight => {
                    minors += 1;
                    knights += 1;
                }
                PieceKind::Bishop => {
                    minors += 1;
                    bishop_shades[(s / 8 + s % 8) % 2] = true;
                }
            }
        }
        if minors <= 1 {
            return true;
        }
        knights == 0 && !(bishop_shades[0] && bishop_shades[1])
    }
}
