//! Chess rules: board representation, FEN, legal move generation, move
//! application and game outcome detection.

pub mod board;
pub mod error;
pub mod movegen;
pub mod outcome;
pub mod perft;
pub mod types;
pub mod uci;
pub mod zobrist;

pub use board::{CastlingRights, Position, START_FEN};
pub use error::{ChessError, ChessResult};
pub use movegen::{has_legal_move, legal_moves, legal_moves_into};
pub use outcome::{DrawReason, Outcome};
pub use perft::perft;
pub use types::*;
pub use uci::{move_to_uci, parse_uci_move, position_from_uci, NULL_MOVE};
