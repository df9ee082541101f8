//! Search configuration

use chess_core::Color;
use serde::{Deserialize, Serialize};

/// Default search depth in plies.
pub const DEFAULT_DEPTH: u8 = 3;
/// Deepest search the engine accepts. Node count grows as branching^depth.
pub const MAX_DEPTH: u8 = 8;

/// Whose material balance the scores are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorePerspective {
    /// White minus Black. The root maximizes when White searches and
    /// minimizes when Black searches.
    #[default]
    Absolute,
    /// Searching side minus opponent. The root always maximizes.
    Relative,
}

impl ScorePerspective {
    /// The color whose score the tree maximizes when `side` searches.
    pub fn maximizer(self, side: Color) -> Color {
        match self {
            ScorePerspective::Absolute => Color::White,
            ScorePerspective::Relative => side,
        }
    }
}

/// How finished games are scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalPolicy {
    /// Checkmate scores like any other position: by material.
    Material,
    /// A win for the maximizer is +infinity, a loss -infinity.
    #[default]
    Decisive,
}

/// Score given to drawn positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawScore {
    #[default]
    Material,
    Zero,
}

/// Which of several equally scored moves a node keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// The last move reaching the best score wins.
    #[default]
    LastEqual,
    /// The first move reaching the best score wins.
    FirstEqual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub depth: u8,
    pub perspective: ScorePerspective,
    pub terminal: TerminalPolicy,
    pub draw: DrawScore,
    pub tie_break: TieBreak,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            perspective: ScorePerspective::default(),
            terminal: TerminalPolicy::default(),
            draw: DrawScore::default(),
            tie_break: TieBreak::default(),
        }
    }
}
