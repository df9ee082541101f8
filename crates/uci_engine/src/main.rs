//! UCI front end: reads commands from stdin, answers on stdout.
//!
//! Logs go to stderr so they never mix with protocol output.

mod config;
mod session;

use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use minimax_engine::check_depth;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::EngineConfig;
use session::{Control, Session};

#[derive(Parser)]
#[command(name = "uci_engine")]
#[command(about = "Fixed-depth minimax chess engine speaking UCI", long_about = None)]
struct Args {
    /// TOML file with engine and search settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Search depth in plies, overrides the config file
    #[arg(short, long)]
    depth: Option<i32>,

    /// Log filter, e.g. "debug" or "minimax_engine=trace". Defaults to RUST_LOG, then "warn".
    #[arg(long)]
    log_level: Option<String>,
}

fn init_tracing(level: Option<&str>) -> Result<()> {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level).context("invalid --log-level")?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_level.as_deref())?;

    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(depth) = args.depth {
        config.search.depth = check_depth(depth)?;
    }
    info!(name = %config.name, search = ?config.search, "engine ready");

    let mut session = Session::new(config);
    let mut stdout = io::stdout().lock();
    for line in io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        if session.handle(&line, &mut stdout)? == Control::Quit {
            break;
        }
    }

    info!("shutting down");
    Ok(())
}
