//! Error types for the rules engine.

/// Errors raised while building positions or applying moves.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChessError {
    /// FEN string could not be parsed
    #[error("invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },

    /// Position parsed but breaks the rules of chess
    #[error("invalid position: {reason}")]
    InvalidPosition { reason: String },

    /// Move is not legal in the position it was applied to
    #[error("illegal move {mv} in position {fen}")]
    IllegalMove { mv: String, fen: String },

    /// Text is not a coordinate-notation move
    #[error("cannot parse move '{text}'")]
    InvalidMoveText { text: String },
}

impl ChessError {
    pub(crate) fn fen(fen: &str, reason: impl Into<String>) -> Self {
        ChessError::InvalidFen {
            fen: fen.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for rules-engine operations
pub type ChessResult<T> = Result<T, ChessError>;
