//! Material-based position evaluation

use chess_core::{Color, Outcome, PieceKind, Position};

use crate::config::{DrawScore, SearchConfig, TerminalPolicy};
use crate::game::GameState;

/// Material balance in pawns.
pub type Score = i32;

/// Score of a won game. Also the initial beta of a search.
pub const INFINITY: Score = i32::MAX;
/// Score of a lost game. Also the initial alpha of a search.
pub const NEG_INFINITY: Score = -i32::MAX;

/// Material values in pawns, indexed by PieceKind::idx().
/// Order: Pawn, Knight, Bishop, Rook, Queen, King
const PIECE_VALUES: [Score; 6] = [1, 3, 3, 5, 9, 0];

/// Static evaluation of a leaf.
///
/// `maximizer` is the color whose advantage counts as positive. The score
/// must depend only on the position and `outcome`, never on search state.
pub trait Evaluator<S: GameState> {
    fn evaluate(&self, state: &S, outcome: Outcome, maximizer: Color) -> Score;
}

#[inline]
pub fn piece_value(kind: PieceKind) -> Score {
    PIECE_VALUES[kind.idx()]
}

/// White material minus Black material. Kings count zero.
pub fn material_balance(pos: &Position) -> Score {
    pos.board
        .iter()
        .flatten()
        .map(|pc| match pc.color {
            Color::White => piece_value(pc.kind),
            Color::Black => -piece_value(pc.kind),
        })
        .sum()
}

/// Counts material, with configurable treatment of finished games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaterialEvaluator {
    pub terminal: TerminalPolicy,
    pub draw: DrawScore,
}

impl MaterialEvaluator {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            terminal: config.terminal,
            draw: config.draw,
        }
    }
}

impl Evaluator<Position> for MaterialEvaluator {
    fn evaluate(&self, pos: &Position, outcome: Outcome, maximizer: Color) -> Score {
        match outcome {
            Outcome::Decisive { winner } if self.terminal == TerminalPolicy::Decisive => {
                if winner == maximizer {
                    INFINITY
                } else {
                    NEG_INFINITY
                }
            }
            Outcome::Draw(_) if self.draw == DrawScore::Zero => 0,
            _ => {
                let balance = material_balance(pos);
                match maximizer {
                    Color::White => balance,
                    Color::Black => -balance,
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
