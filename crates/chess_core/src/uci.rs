//! Coordinate move text and `position` command arguments.

use crate::board::Position;
use crate::error::{ChessError, ChessResult};
use crate::movegen::legal_moves;
use crate::types::*;

/// Text for "no move" in `bestmove` replies.
pub const NULL_MOVE: &str = "0000";

pub fn move_to_uci(mv: Option<Move>) -> String {
    match mv {
        Some(mv) => mv.to_string(),
        None => NULL_MOVE.to_string(),
    }
}

/// Resolves coordinate text against the position's legal moves so the
/// castle and en-passant flags come out right.
pub fn parse_uci_move(pos: &Position, txt: &str) -> ChessResult<Move> {
    let bad_text = || ChessError::InvalidMoveText {
        text: txt.to_string(),
    };
    if !(4..=5).contains(&txt.len()) || !txt.is_ascii() {
        return Err(bad_text());
    }
    let from = parse_square(&txt[0..2]).ok_or_else(bad_text)?;
    let to = parse_square(&txt[2..4]).ok_or_else(bad_text)?;
    let promo = match txt[4..].chars().next() {
        None => None,
        Some(c) => match PieceKind::from_letter(c) {
            Some(k) if PieceKind::PROMOTIONS.contains(&k) => Some(k),
            _ => return Err(bad_text()),
        },
    };

    legal_moves(pos)
        .into_iter()
        .find(|m| m.from == from && m.to == to && m.promo == promo)
        .ok_or_else(|| ChessError::IllegalMove {
            mv: txt.to_string(),
            fen: pos.to_fen(),
        })
}

/// Builds a position from the arguments of a `position` command:
/// `startpos [moves ...]` or `fen <fields> [moves ...]`.
pub fn position_from_uci(args: &[&str]) -> ChessResult<Position> {
    let moves_at = args.iter().position(|&a| a == "moves");
    let (setup, moves) = match moves_at {
        Some(i) => (&args[..i], &args[i + 1..]),
        None => (args, &[][..]),
    };

    let mut pos = match setup.split_first() {
        None | Some((&"startpos", [])) => Position::startpos(),
        Some((&"fen", fields)) => Position::from_fen(&fields.join(" "))?,
        Some(_) => {
            return Err(ChessError::fen(
                &setup.join(" "),
                "expected 'startpos' or 'fen <fields>'",
            ));
        }
    };
    pos.validate()?;

    for txt in moves {
        let mv = parse_uci_move(&pos, txt)?;
        pos = pos.apply(mv)?;
    }
    Ok(pos)
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;
