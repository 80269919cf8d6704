//! Chess CLI - searches positions, counts perft nodes and plays itself.

mod output;

use anyhow::{bail, Context};
use chess_engine::movegen::perft::{perft, perft_divide};
use chess_engine::{apply, status, GameState, GameStatus};
use chess_search::{SearchConfig, SearchCoordinator, SearchRequest};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chess-cli")]
#[command(about = "Chess rules engine and search")]
struct Cli {
    /// Search configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the maximum search depth
    #[arg(long, global = true)]
    max_depth: Option<u32>,

    /// Seed for tie-breaking between equal moves
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search a position for the best move
    Search {
        /// Position in FEN
        #[arg(long, default_value = chess_core::FenRecord::STARTPOS)]
        fen: String,
        /// Time budget in milliseconds (defaults to the configured value)
        #[arg(long)]
        time_ms: Option<u64>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Count leaf nodes of the legal move tree
    Perft {
        /// Position in FEN
        #[arg(long, default_value = chess_core::FenRecord::STARTPOS)]
        fen: String,
        /// Depth in plies
        #[arg(long, default_value = "4")]
        depth: u32,
        /// Print the count below each root move
        #[arg(long)]
        divide: bool,
    },
    /// Let the engine play both sides from the initial position
    Selfplay {
        /// Maximum number of plies to play
        #[arg(long, default_value = "40")]
        plies: u32,
        /// Time budget per move in milliseconds
        #[arg(long, default_value = "200")]
        time_ms: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SearchConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SearchConfig::default(),
    };
    if let Some(depth) = cli.max_depth {
        config.max_depth = depth;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    config.validate()?;

    match cli.command {
        Commands::Search { fen, time_ms, json } => {
            let state = GameState::from_fen(&fen).context("parsing FEN")?;
            let time_ms = time_ms.unwrap_or(config.default_time_limit_ms);
            let coordinator = SearchCoordinator::spawn(config);
            let response = coordinator
                .search(SearchRequest::new(state, time_ms))
                .await?;
            if json {
                println!("{}", output::to_json(&response)?);
            } else {
                println!("{}", output::to_text(&response));
            }
        }

        Commands::Perft { fen, depth, divide } => {
            let state = GameState::from_fen(&fen).context("parsing FEN")?;
            let start = Instant::now();
            let nodes = if divide {
                let counts = perft_divide(&state, depth);
                for (mv, count) in &counts {
                    println!("{mv}: {count}");
                }
                counts.iter().map(|(_, count)| count).sum()
            } else {
                perft(&state, depth)
            };
            let elapsed = start.elapsed();
            println!("\nNodes searched: {nodes}");
            tracing::info!(depth, nodes, elapsed_ms = elapsed.as_millis() as u64, "perft done");
        }

        Commands::Selfplay { plies, time_ms } => {
            selfplay(config, plies, time_ms).await?;
        }
    }

    Ok(())
}

async fn selfplay(config: SearchConfig, plies: u32, time_ms: u64) -> anyhow::Result<()> {
    let coordinator = SearchCoordinator::spawn(config);
    let mut state = GameState::startpos();

    for ply in 0..plies {
        let game_status = status(&state);
        if game_status.is_over() {
            println!("{game_status:?} after {ply} plies");
            return Ok(());
        }

        let response = coordinator
            .search(SearchRequest::new(state, time_ms))
            .await?;
        let Some(best) = response.result.best_move else {
            bail!("search returned no move in an ongoing game: {}", state.to_fen());
        };
        println!("{}. {}", ply + 1, output::to_text(&response));
        state = apply(&state, best, best.promotion)?;
    }

    match status(&state) {
        GameStatus::Ongoing => println!("Stopped after {plies} plies: {}", state.to_fen()),
        over => println!("{over:?} after {plies} plies"),
    }
    Ok(())
}
