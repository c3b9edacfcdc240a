//! Ultimate Tic-Tac-Toe GUI
//!
//! Play against the engine or against another player on the same screen.

use std::io;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use uttt::engine::{DEFAULT_TIME_BUDGET_MS, MAX_DEPTH};
use uttt::ui::{GameMode, UtttApp};
use uttt::{EngineConfig, Player, SubBoardWinPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Side {
    A,
    B,
}

impl From<Side> for Player {
    fn from(side: Side) -> Self {
        match side {
            Side::A => Player::A,
            Side::B => Player::B,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "uttt")]
#[command(version, about = "Ultimate Tic-Tac-Toe against a minimax engine", long_about = None)]
struct Cli {
    /// Wall-clock budget per engine move, in milliseconds
    #[arg(long, default_value_t = DEFAULT_TIME_BUDGET_MS)]
    time_budget_ms: u64,

    /// Search at a fixed depth instead of deepening under the time budget
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=MAX_DEPTH as i64))]
    depth: Option<u8>,

    /// Player who makes the opening move
    #[arg(long, value_enum, default_value_t = Side::A)]
    first_player: Side,

    /// Side the engine plays; omit for two human players
    #[arg(long, value_enum)]
    engine_plays: Option<Side>,

    /// Score moves that win a sub-board without searching past them
    #[arg(long)]
    short_circuit: bool,
}

impl Cli {
    fn config(&self) -> EngineConfig {
        EngineConfig {
            time_budget_ms: self.time_budget_ms,
            sub_board_wins: if self.short_circuit {
                SubBoardWinPolicy::ShortCircuit
            } else {
                SubBoardWinPolicy::Explore
            },
            ..EngineConfig::default()
        }
    }

    fn mode(&self) -> GameMode {
        match self.engine_plays {
            Some(engine) => GameMode::PvE {
                human: Player::from(engine).opponent(),
            },
            None => GameMode::PvP,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = cli.config();
    let mode = cli.mode();
    let depth = cli.depth;
    let first_player = Player::from(cli.first_player);

    info!(?mode, ?config, ?depth, %first_player, "starting");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 750.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Ultimate Tic-Tac-Toe"),
        ..Default::default()
    };

    eframe::run_native(
        "Ultimate Tic-Tac-Toe",
        options,
        Box::new(move |cc| Ok(Box::new(UtttApp::new(cc, mode, config, depth, first_player)))),
    )
    .map_err(|err| anyhow::anyhow!("GUI failed: {err}"))
}
