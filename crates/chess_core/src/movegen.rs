use crate::board::{CastlingRights, DIAGONALS, KING_DELTAS, KNIGHT_DELTAS, ORTHOGONALS, Position};
use crate::types::*;

/// Generate all legal moves, returning a freshly allocated vector.
///
/// Order is stable: squares a1..h8, then per-piece direction order. The
/// search relies on this for reproducible tie-breaks.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut scratch = pos.clone();
    let mut out = Vec::with_capacity(64);
    legal_moves_into(&mut scratch, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
///
/// `pos` is used as scratch space and is restored before returning.
pub fn legal_moves_into(pos: &mut Position, out: &mut Vec<Move>) {
    out.clear();
    for from in 0..64u8 {
        piece_moves_into(pos, from, out);
    }

    let mover = pos.side_to_move;
    out.retain(|&mv| {
        let undo = pos.make_move(mv);
        let exposed = pos.in_check(mover);
        pos.unmake_move(mv, undo);
        !exposed
    });
}

/// Whether the side to move has at least one legal move.
pub fn has_legal_move(pos: &Position) -> bool {
    let mut scratch = pos.clone();
    let mover = pos.side_to_move;
    let mut buf = Vec::with_capacity(32);
    for from in 0..64u8 {
        buf.clear();
        piece_moves_into(&scratch, from, &mut buf);
        for &mv in &buf {
            let undo = scratch.make_move(mv);
            let exposed = scratch.in_check(mover);
            scratch.unmake_move(mv, undo);
            if !exposed {
                return true;
            }
        }
    }
    false
}

/// Appends the pseudo-legal moves of the side-to-move piece on `from`.
pub(crate) fn piece_moves_into(pos: &Position, from: u8, out: &mut Vec<Move>) {
    let Some(pc) = pos.piece_at(from) else {
        return;
    };
    if pc.color != pos.side_to_move {
        return;
    }
    match pc.kind {
        PieceKind::Pawn => gen_pawn(pos, from, pc.color, out),
        PieceKind::Knight => gen_steps(pos, from, pc.color, &KNIGHT_DELTAS, out),
        PieceKind::Bishop => gen_rays(pos, from, pc.color, &DIAGONALS, out),
        PieceKind::Rook => gen_rays(pos, from, pc.color, &ORTHOGONALS, out),
        PieceKind::Queen => {
            gen_rays(pos, from, pc.color, &DIAGONALS, out);
            gen_rays(pos, from, pc.color, &ORTHOGONALS, out);
        }
        PieceKind::King => {
            gen_steps(pos, from, pc.color, &KING_DELTAS, out);
            gen_castles(pos, from, pc.color, out);
        }
    }
}

fn push_pawn_move(from: u8, to: u8, c: Color, out: &mut Vec<Move>) {
    let last_rank = match c {
        Color::White => 7,
        Color::Black => 0,
    };
    if rank_of(to) == last_rank {
        out.extend(
            PieceKind::PROMOTIONS
                .iter()
                .map(|&kind| Move::with_promo(from, to, kind)),
        );
    } else {
        out.push(Move::new(from, to));
    }
}

fn gen_pawn(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>) {
    let f = file_of(from);
    let r = rank_of(from);
    let dir = c.pawn_dir();
    let home_rank = match c {
        Color::White => 1,
        Color::Black => 6,
    };

    if let Some(one) = sq(f, r + dir)
        && pos.piece_at(one).is_none()
    {
        push_pawn_move(from, one, c, out);
        if r == home_rank
            && let Some(two) = sq(f, r + 2 * dir)
            && pos.piece_at(two).is_none()
        {
            out.push(Move::new(from, two));
        }
    }

    for df in [-1, 1] {
        let Some(to) = sq(f + df, r + dir) else {
            continue;
        };
        match pos.piece_at(to) {
            Some(target) if target.color != c => push_pawn_move(from, to, c, out),
            None if pos.en_passant == Some(to) => out.push(Move {
                is_en_passant: true,
                ..Move::new(from, to)
            }),
            _ => {}
        }
    }
}

fn gen_steps(pos: &Position, from: u8, c: Color, deltas: &[(i8, i8)], out: &mut Vec<Move>) {
    let (f, r) = (file_of(from), rank_of(from));
    for (df, dr) in deltas {
        if let Some(to) = sq(f + df, r + dr) {
            match pos.piece_at(to) {
                Some(pc) if pc.color == c => {}
                _ => out.push(Move::new(from, to)),
            }
        }
    }
}

fn gen_rays(pos: &Position, from: u8, c: Color, dirs: &[(i8, i8)], out: &mut Vec<Move>) {
    let (f0, r0) = (file_of(from), rank_of(from));
    for (df, dr) in dirs {
        let (mut f, mut r) = (f0 + df, r0 + dr);
        while let Some(to) = sq(f, r) {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) => {
                    if pc.color != c {
                        out.push(Move::new(from, to));
                    }
                    break;
                }
            }
            f += df;
            r += dr;
        }
    }
}

/// Castling: king and rook unmoved, path empty, and the king neither starts
/// in, passes through, nor lands on an attacked square.
fn gen_castles(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>) {
    let (home, king_side, queen_side) = match c {
        Color::White => (4u8, CastlingRights::WHITE_KING, CastlingRights::WHITE_QUEEN),
        Color::Black => (60u8, CastlingRights::BLACK_KING, CastlingRights::BLACK_QUEEN),
    };
    if from != home || pos.in_check(c) {
        return;
    }
    let enemy = c.other();
    let rook = Some(Piece::new(c, PieceKind::Rook));
    // (right, rook square, squares that must be empty, squares the king crosses)
    let wings = [
        (king_side, home + 3, [home + 1, home + 2, home + 2], [home + 1, home + 2]),
        (queen_side, home - 4, [home - 1, home - 2, home - 3], [home - 1, home - 2]),
    ];
    for (right, rook_sq, empty, crossed) in wings {
        if pos.castling.has(right)
            && pos.piece_at(rook_sq) == rook
            && empty.iter().all(|&s| pos.piece_at(s).is_none())
            && crossed.iter().all(|&s| !pos.is_square_attacked(s, enemy))
        {
            out.push(Move {
                is_castle: true,
                ..Move::new(from, crossed[1])
            });
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
