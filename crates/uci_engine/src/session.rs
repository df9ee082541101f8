//! Command loop state: the current game and the engine that plays it.

use std::io::{self, Write};

use chess_core::{move_to_uci, position_from_uci, Move, Position};
use minimax_engine::{MinimaxEngine, SearchError, SearchReport, INFINITY, MAX_DEPTH};
use tracing::{debug, error, warn};

use crate::config::EngineConfig;

/// What the command loop should do after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// One protocol session. Owns the authoritative position; the engine only
/// ever borrows it.
pub struct Session {
    position: Position,
    engine: MinimaxEngine,
    config: EngineConfig,
}

impl Session {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            position: Position::startpos(),
            engine: MinimaxEngine::new(config.search),
            config,
        }
    }

    pub fn depth(&self) -> u8 {
        self.engine.config().depth
    }

    /// Handles one input line, writing any replies to `out`.
    pub fn handle(&mut self, line: &str, out: &mut impl Write) -> io::Result<Control> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = parts.split_first() else {
            return Ok(Control::Continue);
        };

        match command {
            "uci" => {
                writeln!(out, "id name {}", self.config.name)?;
                writeln!(out, "id author {}", self.config.author)?;
                writeln!(
                    out,
                    "option name Depth type spin default {} min 1 max {MAX_DEPTH}",
                    self.depth()
                )?;
                writeln!(out, "uciok")?;
            }
            "isready" => writeln!(out, "readyok")?,
            "ucinewgame" => self.position = Position::startpos(),
            "position" => self.set_position(args, out)?,
            "go" => self.go(args, out)?,
            "setoption" => self.set_option(args, out)?,
            "d" => {
                write!(out, "{}", self.position)?;
                writeln!(out, "Fen: {}", self.position.to_fen())?;
                let outcome = self.position.outcome();
                writeln!(out, "Result: {} ({outcome})", outcome.result_str())?;
            }
            "stop" => {}
            "quit" => {
                debug!("quit received");
                return Ok(Control::Quit);
            }
            _ => {
                warn!(line, "unknown command");
                writeln!(out, "Unknown command: {}", line.trim())?;
            }
        }
        out.flush()?;
        Ok(Control::Continue)
    }

    fn set_position(&mut self, args: &[&str], out: &mut impl Write) -> io::Result<()> {
        match position_from_uci(args) {
            Ok(pos) => {
                debug!(fen = %pos.to_fen(), "position set");
                self.position = pos;
            }
            Err(err) => {
                warn!(%err, "position rejected");
                writeln!(out, "info string {err}")?;
            }
        }
        Ok(())
    }

    fn set_option(&mut self, args: &[&str], out: &mut impl Write) -> io::Result<()> {
        // setoption name <id> [value <x>]
        let name = args.iter().position(|&a| a == "name").and_then(|i| args.get(i + 1));
        let value = args.iter().position(|&a| a == "value").and_then(|i| args.get(i + 1));

        match (name, value) {
            (Some(name), Some(value)) if name.eq_ignore_ascii_case("depth") => {
                let result = value
                    .parse::<i32>()
                    .map_err(|_| {
                        SearchError::InvalidArgument(format!("depth '{value}' is not a number"))
                    })
                    .and_then(|d| self.engine.set_depth(d));
                if let Err(err) = result {
                    warn!(%err, "setoption rejected");
                    writeln!(out, "info string {err}")?;
                }
            }
            _ => {
                warn!(?args, "unsupported option");
                writeln!(out, "info string unsupported option: {}", args.join(" "))?;
            }
        }
        Ok(())
    }

    fn go(&mut self, args: &[&str], out: &mut impl Write) -> io::Result<()> {
        // Only `depth` is honoured; clock parameters are ignored.
        let depth = match args.iter().position(|&a| a == "depth").map(|i| args.get(i + 1)) {
            None => i32::from(self.depth()),
            Some(Some(text)) => match text.parse() {
                Ok(d) => d,
                Err(_) => {
                    writeln!(out, "info string depth '{text}' is not a number")?;
                    return writeln!(out, "bestmove {}", move_to_uci(None));
                }
            },
            Some(None) => {
                writeln!(out, "info string go depth needs a value")?;
                return writeln!(out, "bestmove {}", move_to_uci(None));
            }
        };

        let side = self.position.side_to_move;
        match self.engine.analyse(&self.position, depth, side) {
            Ok(Some(report)) => {
                self.write_info(&report, out)?;
                writeln!(out, "bestmove {}", move_to_uci(Some(report.best_move)))
            }
            Ok(None) => writeln!(out, "bestmove {}", move_to_uci(None)),
            Err(err) => {
                match &err {
                    SearchError::InvalidArgument(_) => warn!(%err, "search rejected"),
                    _ => error!(%err, "search failed"),
                }
                writeln!(out, "info string {err}")?;
                writeln!(out, "bestmove {}", move_to_uci(None))
            }
        }
    }

    fn write_info(
        &self,
        report: &SearchReport<Move>,
        out: &mut impl Write,
    ) -> io::Result<()> {
        // Scores are reported from the side to move, in centipawns.
        let side = self.position.side_to_move;
        let score = if self.engine.config().perspective.maximizer(side) == side {
            report.score
        } else {
            -report.score
        };
        write!(out, "info depth {} nodes {}", report.depth, report.nodes)?;
        if score.abs() < INFINITY {
            write!(out, " score cp {}", score * 100)?;
        }
        writeln!(out, " pv {}", report.best_move)
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
