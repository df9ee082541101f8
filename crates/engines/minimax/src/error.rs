//! Search errors

use chess_core::ChessError;

/// Errors surfaced by the search engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// Caller passed a depth or side the search cannot honour
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Rules engine reported no legal moves for a position it calls ongoing
    #[error("rules engine inconsistency: no legal moves in a non-terminal position ({depth} plies left)")]
    InconsistentRules { depth: u8 },

    /// Failure inside the rules engine, passed through unchanged
    #[error(transparent)]
    Rules(#[from] ChessError),
}
