//! Line-delimited JSON search worker
//!
//! Reads one search request per stdin line and writes one response per
//! stdout line:
//!
//! ```text
//! > {"moveHistory":[[4,4]],"firstPlayer":"A","depth":3}
//! < {"move":[4,0],"nodesVisited":…,"depth":3,"score":0,"elapsedMs":…}
//! ```
//!
//! A request that cannot be searched gets `{"error": "..."}` instead. Logs go
//! to stderr so stdout stays a clean JSON channel.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use uttt::engine::{DEFAULT_TIME_BUDGET_MS, MAX_DEPTH};
use uttt::{AIEngine, EngineConfig, SubBoardWinPolicy};

#[derive(Debug, Parser)]
#[command(name = "uttt_worker")]
#[command(version, about = "Answer Ultimate Tic-Tac-Toe search requests over stdin/stdout", long_about = None)]
struct Cli {
    /// Budget for requests without a depth, in milliseconds
    #[arg(long, default_value_t = DEFAULT_TIME_BUDGET_MS)]
    time_budget_ms: u64,

    /// Deepest depth iterative deepening may reach
    #[arg(long, default_value_t = MAX_DEPTH)]
    max_depth: u8,

    /// Score moves that win a sub-board without searching past them
    #[arg(long)]
    short_circuit: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = EngineConfig {
        time_budget_ms: cli.time_budget_ms,
        max_depth: cli.max_depth,
        sub_board_wins: if cli.short_circuit {
            SubBoardWinPolicy::ShortCircuit
        } else {
            SubBoardWinPolicy::Explore
        },
    };
    info!(?config, "worker ready");

    let mut engine = AIEngine::with_config(config);
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line.context("failed to read request")?;
        if line.trim().is_empty() {
            continue;
        }
        debug!(%line, "request");

        let reply = match engine.handle_line(&line) {
            Ok(response) => serde_json::to_string(&response)?,
            Err(err) => json!({ "error": err.to_string() }).to_string(),
        };

        writeln!(stdout, "{reply}").context("failed to write response")?;
        stdout.flush()?;
    }

    info!("stdin closed, worker exiting");
    Ok(())
}
