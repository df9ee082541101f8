//! Minimax search with alpha-beta pruning

use chess_core::Color;
use tracing::{error, trace};

use crate::config::TieBreak;
use crate::error::SearchError;
use crate::eval::{Evaluator, Score, INFINITY, NEG_INFINITY};
use crate::game::GameState;

/// Score of a node and the move that achieved it.
///
/// At a leaf `best_move` is the move that *reached* the leaf. At an
/// interior node it is the node's own child move, so the root reports a
/// move playable from the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult<M> {
    pub score: Score,
    pub best_move: Option<M>,
}

/// State threaded through one search: what to evaluate with, whose score
/// is maximized, and node statistics.
pub struct SearchContext<'a, E> {
    pub evaluator: &'a E,
    pub maximizer: Color,
    pub tie_break: TieBreak,
    pub nodes: u64,
}

impl<'a, E> SearchContext<'a, E> {
    pub fn new(evaluator: &'a E, maximizer: Color, tie_break: TieBreak) -> Self {
        Self {
            evaluator,
            maximizer,
            tie_break,
            nodes: 0,
        }
    }
}

#[inline]
fn takes_over(score: Score, best: Score, maximizing: bool, tie_break: TieBreak) -> bool {
    match (maximizing, tie_break) {
        (true, TieBreak::LastEqual) => score >= best,
        (true, TieBreak::FirstEqual) => score > best,
        (false, TieBreak::LastEqual) => score <= best,
        (false, TieBreak::FirstEqual) => score < best,
    }
}

/// Depth-limited minimax with alpha-beta pruning.
///
/// Returns the node's score within the `(alpha, beta)` window. Call from the
/// root with `NEG_INFINITY, INFINITY`; the root score then equals the plain
/// minimax value.
pub fn alpha_beta<S, E>(
    ctx: &mut SearchContext<'_, E>,
    state: &S,
    depth: u8,
    mut alpha: Score,
    mut beta: Score,
    maximizing: bool,
) -> Result<SearchResult<S::Move>, SearchError>
where
    S: GameState,
    E: Evaluator<S>,
{
    ctx.nodes += 1;

    let outcome = state.outcome();
    if depth == 0 || outcome.is_terminal() {
        return Ok(SearchResult {
            score: ctx.evaluator.evaluate(state, outcome, ctx.maximizer),
            best_move: state.last_move(),
        });
    }

    let moves = state.legal_moves();
    if moves.is_empty() {
        error!(
            depth,
            ?outcome,
            "no legal moves in a position the rules engine calls ongoing"
        );
        return Err(SearchError::InconsistentRules { depth });
    }

    let mut best = SearchResult {
        score: if maximizing { NEG_INFINITY } else { INFINITY },
        best_move: None,
    };

    for (i, mv) in moves.iter().copied().enumerate() {
        let child = state.apply(mv)?;
        // A child that only fails low onto the current best would look like
        // a tie. Under LastEqual the window is widened by one so ties are exact.
        let (child_alpha, child_beta) = match (ctx.tie_break, maximizing) {
            (TieBreak::LastEqual, true) => (alpha.saturating_sub(1), beta),
            (TieBreak::LastEqual, false) => (alpha, beta.saturating_add(1)),
            (TieBreak::FirstEqual, _) => (alpha, beta),
        };
        let score =
            alpha_beta(ctx, &child, depth - 1, child_alpha, child_beta, !maximizing)?.score;

        if best.best_move.is_none() || takes_over(score, best.score, maximizing, ctx.tie_break)
        {
            best.score = score;
            best.best_move = Some(mv);
        }
        if maximizing {
            alpha = alpha.max(score);
        } else {
            beta = beta.min(score);
        }

        // The child that triggers the cutoff has already been recorded.
        if beta <= alpha {
            trace!(depth, skipped = moves.len() - i - 1, "cutoff");
            break;
        }
    }

    Ok(best)
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
