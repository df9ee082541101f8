//! Minimax Chess Engine
//!
//! Fixed-depth minimax search with alpha-beta pruning over any
//! [`GameState`], scored by a pluggable [`Evaluator`]. The default evaluator
//! counts material.

pub mod config;
pub mod error;
pub mod eval;
pub mod game;
pub mod search;

use chess_core::Color;
use tracing::debug;

pub use config::{
    DrawScore, ScorePerspective, SearchConfig, TerminalPolicy, TieBreak, DEFAULT_DEPTH, MAX_DEPTH,
};
pub use error::SearchError;
pub use eval::{material_balance, piece_value, Evaluator, MaterialEvaluator, Score, INFINITY, NEG_INFINITY};
pub use game::GameState;
pub use search::{alpha_beta, SearchContext, SearchResult};

/// Outcome of a root search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchReport<M> {
    pub best_move: M,
    /// Score of `best_move` from the maximizer's point of view.
    pub score: Score,
    pub depth: u8,
    pub nodes: u64,
}

/// Checks a requested depth against `1..=MAX_DEPTH`.
pub fn check_depth(depth: i32) -> Result<u8, SearchError> {
    u8::try_from(depth)
        .ok()
        .filter(|d| (1..=MAX_DEPTH).contains(d))
        .ok_or_else(|| {
            SearchError::InvalidArgument(format!("depth {depth} is outside 1..={MAX_DEPTH}"))
        })
}

/// Depth-limited minimax engine.
///
/// Holds only its configuration and the node count of the last search, so
/// one engine can serve any number of positions.
#[derive(Debug, Clone)]
pub struct MinimaxEngine<E = MaterialEvaluator> {
    config: SearchConfig,
    evaluator: E,
    nodes: u64,
}

impl MinimaxEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self::with_evaluator(config, MaterialEvaluator::new(&config))
    }
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl<E> MinimaxEngine<E> {
    pub fn with_evaluator(config: SearchConfig, evaluator: E) -> Self {
        Self {
            config,
            evaluator,
            nodes: 0,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Sets the depth used by [`MinimaxEngine::search_default`].
    pub fn set_depth(&mut self, depth: i32) -> Result<(), SearchError> {
        self.config.depth = check_depth(depth)?;
        Ok(())
    }

    /// Nodes visited by the last search.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Searches `state` to `depth` plies for `side`.
    ///
    /// Returns `Ok(None)` when the game is already over.
    pub fn analyse<S>(
        &mut self,
        state: &S,
        depth: i32,
        side: Color,
    ) -> Result<Option<SearchReport<S::Move>>, SearchError>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        self.nodes = 0;
        let depth = check_depth(depth)?;
        if side != state.side_to_move() {
            return Err(SearchError::InvalidArgument(format!(
                "cannot search for {side}: {} is to move",
                state.side_to_move()
            )));
        }
        state.validate()?;

        let outcome = state.outcome();
        if outcome.is_terminal() {
            debug!(%outcome, "root is terminal, no move to search");
            return Ok(None);
        }

        let maximizer = self.config.perspective.maximizer(side);
        let mut ctx = SearchContext::new(&self.evaluator, maximizer, self.config.tie_break);
        let result = alpha_beta(
            &mut ctx,
            state,
            depth,
            NEG_INFINITY,
            INFINITY,
            maximizer == side,
        )?;
        self.nodes = ctx.nodes;

        let Some(best_move) = result.best_move else {
            return Err(SearchError::InconsistentRules { depth });
        };
        debug!(
            depth,
            score = result.score,
            nodes = self.nodes,
            best = ?best_move,
            "search finished"
        );
        Ok(Some(SearchReport {
            best_move,
            score: result.score,
            depth,
            nodes: self.nodes,
        }))
    }

    /// Best move for `side` at `depth` plies, or `None` if the game is over.
    ///
    /// `depth` must lie in `1..=MAX_DEPTH`. Zero, negative and deeper
    /// requests fail with [`SearchError::InvalidArgument`].
    pub fn best_move<S>(
        &mut self,
        state: &S,
        depth: i32,
        side: Color,
    ) -> Result<Option<S::Move>, SearchError>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        Ok(self.analyse(state, depth, side)?.map(|report| report.best_move))
    }

    /// Searches for the side to move at the configured depth.
    pub fn search_default<S>(&mut self, state: &S) -> Result<Option<SearchReport<S::Move>>, SearchError>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        self.analyse(state, i32::from(self.config.depth), state.side_to_move())
    }
}
