use std::fmt;

use crate::error::{ChessError, ChessResult};
use crate::movegen::piece_moves_into;
use crate::types::*;

pub(crate) const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];
pub(crate) const KING_DELTAS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];
pub(crate) const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Castling rights packed into four bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const WHITE_KING: u8 = 1;
    pub const WHITE_QUEEN: u8 = 2;
    pub const BLACK_KING: u8 = 4;
    pub const BLACK_QUEEN: u8 = 8;
    pub const ALL: CastlingRights = CastlingRights(15);
    pub const NONE: CastlingRights = CastlingRights(0);

    pub fn has(self, flag: u8) -> bool {
        self.0 & flag != 0
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    /// Rights that survive a piece leaving or arriving on `sq`.
    fn touch(&mut self, sq: u8) {
        self.0 &= match sq {
            0 => !Self::WHITE_QUEEN,
            4 => !(Self::WHITE_KING | Self::WHITE_QUEEN),
            7 => !Self::WHITE_KING,
            56 => !Self::BLACK_QUEEN,
            60 => !(Self::BLACK_KING | Self::BLACK_QUEEN),
            63 => !Self::BLACK_KING,
            _ => 0xff,
        };
    }

    fn parse(field: &str) -> Option<Self> {
        if field == "-" {
            return Some(Self::NONE);
        }
        let mut bits = 0;
        for c in field.chars() {
            bits |= match c {
                'K' => Self::WHITE_KING,
                'Q' => Self::WHITE_QUEEN,
                'k' => Self::BLACK_KING,
                'q' => Self::BLACK_QUEEN,
                _ => return None,
            };
        }
        Some(CastlingRights(bits))
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return f.write_str("-");
        }
        for (flag, c) in [
            (Self::WHITE_KING, 'K'),
            (Self::WHITE_QUEEN, 'Q'),
            (Self::BLACK_KING, 'k'),
            (Self::BLACK_QUEEN, 'q'),
        ] {
            if self.has(flag) {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

/// A chess position.
///
/// Public operations never mutate in place: [`Position::apply`] returns an
/// independent successor. Make/unmake is kept crate-private for scratch
/// copies during legality filtering and perft.
#[derive(Clone, Debug)]
pub struct Position {
    pub board: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>, // square a pawn skipped over on its double step
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    last_move: Option<Move>,
    /// Hashes of earlier positions since the last irreversible move.
    history: Vec<u64>,
}

#[derive(Clone, Debug)]
pub(crate) struct Undo {
    captured: Option<(u8, Piece)>,
    castling: CastlingRights,
    en_passant: Option<u8>,
    halfmove_clock: u32,
    fullmove_number: u32,
    promoted: bool,
}

fn castle_rook_squares(king_to: u8) -> Option<(u8, u8)> {
    match king_to {
        6 => Some((7, 5)),
        2 => Some((0, 3)),
        62 => Some((63, 61)),
        58 => Some((56, 59)),
        _ => None,
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Position {
    pub fn startpos() -> Self {
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        let mut board = [None; 64];
        for (f, &kind) in back.iter().enumerate() {
            board[f] = Some(Piece::new(Color::White, kind));
            board[8 + f] = Some(Piece::new(Color::White, PieceKind::Pawn));
            board[48 + f] = Some(Piece::new(Color::Black, PieceKind::Pawn));
            board[56 + f] = Some(Piece::new(Color::Black, kind));
        }
        Position {
            board,
            side_to_move: Color::White,
            castling: CastlingRights::ALL,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            last_move: None,
            history: Vec::new(),
        }
    }

    /// Parses Forsyth-Edwards Notation. The clock fields are optional.
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(ChessError::fen(fen, "expected at least 4 fields"));
        }

        let mut board = [None; 64];
        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(ChessError::fen(fen, "board must have 8 ranks"));
        }
        for (i, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - i as i8; // FEN lists rank 8 first
            let mut file: i8 = 0;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as i8;
                } else {
                    let pc = Piece::from_symbol(ch)
                        .ok_or_else(|| ChessError::fen(fen, format!("bad piece '{ch}'")))?;
                    let s = sq(file, rank)
                        .ok_or_else(|| ChessError::fen(fen, format!("rank {} overflows", rank + 1)))?;
                    board[s as usize] = Some(pc);
                    file += 1;
                }
                if file > 8 {
                    return Err(ChessError::fen(fen, format!("rank {} overflows", rank + 1)));
                }
            }
            if file != 8 {
                return Err(ChessError::fen(fen, format!("rank {} is short", rank + 1)));
            }
        }

        let side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(ChessError::fen(fen, format!("bad side to move '{other}'"))),
        };
        let castling = CastlingRights::parse(fields[2])
            .ok_or_else(|| ChessError::fen(fen, "bad castling field"))?;
        let en_passant = match fields[3] {
            "-" => None,
            s => Some(parse_square(s).ok_or_else(|| ChessError::fen(fen, "bad en passant square"))?),
        };
        let halfmove_clock = match fields.get(4) {
            Some(s) => s
                .parse()
                .map_err(|_| ChessError::fen(fen, "bad halfmove clock"))?,
            None => 0,
        };
        let fullmove_number = match fields.get(5) {
            Some(s) => s
                .parse()
                .map_err(|_| ChessError::fen(fen, "bad fullmove number"))?,
            None => 1,
        };

        Ok(Position {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
            last_move: None,
            history: Vec::new(),
        })
    }

    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(90);
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.board[rank * 8 + file] {
                    Some(pc) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(pc.symbol());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }
        let stm = match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        };
        let ep = self.en_passant.map(square_name).unwrap_or_else(|| "-".into());
        format!(
            "{out} {stm} {} {ep} {} {}",
            self.castling, self.halfmove_clock, self.fullmove_number
        )
    }

    /// Checks the position is one chess can actually reach: one king per
    /// side, no pawns on the back ranks, an en passant square left by a
    /// double push, and the side that just moved not left in check.
    pub fn validate(&self) -> ChessResult<()> {
        for color in [Color::White, Color::Black] {
            let kings = self
                .board
                .iter()
                .flatten()
                .filter(|pc| pc.color == color && pc.kind == PieceKind::King)
                .count();
            if kings != 1 {
                return Err(ChessError::InvalidPosition {
                    reason: format!("{color} has {kings} kings"),
                });
            }
        }
        let back_rank_pawn = (0..8u8)
            .chain(56..64)
            .any(|s| matches!(self.piece_at(s), Some(pc) if pc.kind == PieceKind::Pawn));
        if back_rank_pawn {
            return Err(ChessError::InvalidPosition {
                reason: "pawn on first or last rank".into(),
            });
        }
        if let Some(ep) = self.en_passant
            && !self.en_passant_consistent(ep)
        {
            return Err(ChessError::InvalidPosition {
                reason: format!(
                    "en passant square {} does not follow a double push",
                    square_name(ep)
                ),
            });
        }
        if self.in_check(self.side_to_move.other()) {
            return Err(ChessError::InvalidPosition {
                reason: format!("{} to move can capture the king", self.side_to_move),
            });
        }
        Ok(())
    }

    /// The skipped square must be empty, with the pushed pawn in front of it
    /// and its start square behind it empty.
    fn en_passant_consistent(&self, ep: u8) -> bool {
        let pusher = self.side_to_move.other();
        let skipped_rank = match pusher {
            Color::White => 2,
            Color::Black => 5,
        };
        let (f, r) = (file_of(ep), rank_of(ep));
        let dir = pusher.pawn_dir();
        r == skipped_rank
            && self.piece_at(ep).is_none()
            && sq(f, r - dir).is_some_and(|start| self.piece_at(start).is_none())
            && sq(f, r + dir).is_some_and(|landed| {
                self.piece_at(landed) == Some(Piece::new(pusher, PieceKind::Pawn))
            })
    }

    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.board[sq as usize]
    }

    fn set_piece(&mut self, sq: u8, pc: Option<Piece>) {
        self.board[sq as usize] = pc;
    }

    /// The move that produced this position, if it was reached by [`Position::apply`].
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    pub(crate) fn history(&self) -> &[u64] {
        &self.history
    }

    pub fn king_sq(&self, c: Color) -> Option<u8> {
        (0..64u8).find(|&s| self.piece_at(s) == Some(Piece::new(c, PieceKind::King)))
    }

    pub fn in_check(&self, c: Color) -> bool {
        match self.king_sq(c) {
            Some(k) => self.is_square_attacked(k, c.other()),
            None => false,
        }
    }

    fn holds(&self, s: u8, by: Color, kinds: &[PieceKind]) -> bool {
        matches!(self.piece_at(s), Some(pc) if pc.color == by && kinds.contains(&pc.kind))
    }

    pub fn is_square_attacked(&self, target: u8, by: Color) -> bool {
        let tf = file_of(target);
        let tr = rank_of(target);

        // A pawn of `by` attacks from one rank behind its direction of travel.
        let pr = tr - by.pawn_dir();
        for df in [-1, 1] {
            if let Some(s) = sq(tf + df, pr)
                && self.holds(s, by, &[PieceKind::Pawn])
            {
                return true;
            }
        }

        let leapers = [
            (&KNIGHT_DELTAS, PieceKind::Knight),
            (&KING_DELTAS, PieceKind::King),
        ];
        for (deltas, kind) in leapers {
            for (df, dr) in deltas {
                if let Some(s) = sq(tf + df, tr + dr)
                    && self.holds(s, by, &[kind])
                {
                    return true;
                }
            }
        }

        let sliders = [
            (&DIAGONALS, PieceKind::Bishop),
            (&ORTHOGONALS, PieceKind::Rook),
        ];
        for (dirs, kind) in sliders {
            for (df, dr) in dirs {
                let (mut f, mut r) = (tf + df, tr + dr);
                while let Some(s) = sq(f, r) {
                    if self.piece_at(s).is_some() {
                        if self.holds(s, by, &[kind, PieceKind::Queen]) {
                            return true;
                        }
                        break;
                    }
                    f += df;
                    r += dr;
                }
            }
        }
        false
    }

    /// Plays a move in place. The move must be pseudo-legal.
    pub(crate) fn make_move(&mut self, mv: Move) -> Undo {
        let moved = self.board[mv.from as usize].expect("make_move: empty from-square");
        let mut undo = Undo {
            captured: self.piece_at(mv.to).map(|pc| (mv.to, pc)),
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            promoted: false,
        };

        if mv.is_en_passant {
            let cap = mv.to.wrapping_add_signed(-8 * moved.color.pawn_dir());
            undo.captured = self.piece_at(cap).map(|pc| (cap, pc));
            self.set_piece(cap, None);
        }

        self.set_piece(mv.from, None);
        let landed = match mv.promo {
            Some(kind) if moved.kind == PieceKind::Pawn => {
                undo.promoted = true;
                Piece::new(moved.color, kind)
            }
            _ => moved,
        };
        self.set_piece(mv.to, Some(landed));

        if mv.is_castle
            && let Some((rf, rt)) = castle_rook_squares(mv.to)
        {
            let rook = self.piece_at(rf);
            self.set_piece(rf, None);
            self.set_piece(rt, rook);
        }

        self.castling.touch(mv.from);
        self.castling.touch(mv.to);

        self.en_passant = None;
        if moved.kind == PieceKind::Pawn && (mv.to as i8 - mv.from as i8).abs() == 16 {
            self.en_passant = Some((mv.from + mv.to) / 2);
        }

        if moved.kind == PieceKind::Pawn || undo.captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.other();
        undo
    }

    pub(crate) fn unmake_move(&mut self, mv: Move, undo: Undo) {
        self.side_to_move = self.side_to_move.other();
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;

        if mv.is_castle
            && let Some((rf, rt)) = castle_rook_squares(mv.to)
        {
            let rook = self.piece_at(rt);
            self.set_piece(rt, None);
            self.set_piece(rf, rook);
        }

        let mut piece = self.piece_at(mv.to).expect("unmake_move: empty to-square");
        if undo.promoted {
            piece.kind = PieceKind::Pawn;
        }
        self.set_piece(mv.to, None);
        self.set_piece(mv.from, Some(piece));
        if let Some((s, pc)) = undo.captured {
            self.set_piece(s, Some(pc));
        }
    }

    /// Returns the position after `mv`, leaving `self` untouched.
    ///
    /// Fails with [`ChessError::IllegalMove`] unless `mv` is one of the
    /// position's legal moves.
    pub fn apply(&self, mv: Move) -> ChessResult<Position> {
        let illegal = || ChessError::IllegalMove {
            mv: mv.to_string(),
            fen: self.to_fen(),
        };
        match self.piece_at(mv.from) {
            Some(pc) if pc.color == self.side_to_move => {}
            _ => return Err(illegal()),
        }
        let mut candidates = Vec::with_capacity(32);
        piece_moves_into(self, mv.from, &mut candidates);
        if !candidates.contains(&mv) {
            return Err(illegal());
        }

        let prior = self.zobrist_hash();
        let mut next = self.clone();
        next.make_move(mv);
        if next.in_check(self.side_to_move) {
            return Err(illegal());
        }
        if next.halfmove_clock == 0 {
            next.history.clear();
        } else {
            next.history.push(prior);
        }
        next.last_move = Some(mv);
        Ok(next)
    }
}

/// Board grid, rank 8 first, empty squares as dots.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            let row: Vec<String> = (0..8u8)
                .map(|file| match self.piece_at(rank * 8 + file) {
                    Some(pc) => pc.symbol().to_string(),
                    None => ".".to_string(),
                })
                .collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
