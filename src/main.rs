//! Command line entry point for the go-ratings tools
//!
//! Operator-facing previews of single games and summaries of rating history
//! exports, driven by the same configuration as the rating batch.

use anyhow::Result;
use clap::{Parser, Subcommand};
use go_ratings::config::AppConfig;
use go_ratings::history::{chronological, group_by_month, max_games_in_a_month, parse_history_tsv};
use go_ratings::history::{aggregate_index_range, has_games, WinLossSummary};
use go_ratings::ranks::{rank_label, rating_to_rank, HandicapAwareClassifier};
use go_ratings::rating::{preview_gor_match, preview_match, Glicko2Entry};
use std::path::PathBuf;
use tracing::{error, info};

/// Go Ratings - Glicko-2 and GOR tools for a Go server
#[derive(Parser)]
#[command(
    name = "go-ratings",
    version,
    about = "Preview rating changes and summarize rating history",
    long_about = "go-ratings exposes the server's Glicko-2 and legacy GOR rating engines: \
                 preview what a game would do to both players, or summarize a player's \
                 rating history export month by month."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)",
        global = true
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)",
        global = true
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging", global = true)]
    debug: bool,

    /// Dry run mode (validate config and exit)
    #[arg(long, help = "Validate configuration and exit", global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Preview a Glicko-2 game for every result
    Glicko {
        #[arg(long, default_value_t = 1500.0)]
        black_rating: f64,
        #[arg(long, default_value_t = 350.0)]
        black_deviation: f64,
        #[arg(long, default_value_t = 0.06)]
        black_volatility: f64,
        #[arg(long, default_value_t = 1500.0)]
        white_rating: f64,
        #[arg(long, default_value_t = 350.0)]
        white_deviation: f64,
        #[arg(long, default_value_t = 0.06)]
        white_volatility: f64,
        /// Handicap stones given to black
        #[arg(long, default_value_t = 0)]
        handicap: i32,
    },
    /// Preview a GOR game for every result
    Gor {
        #[arg(long)]
        black: f64,
        #[arg(long)]
        white: f64,
        /// Rating offset credited to black
        #[arg(long, default_value_t = 0.0)]
        handicap: f64,
    },
    /// Summarize a tab-separated rating history export
    History {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Log the effective configuration
fn display_banner(config: &AppConfig) {
    info!("Go Ratings {}", go_ratings::VERSION);
    info!("   Service: {}", config.service.name);
    info!("   Log level: {}", config.service.log_level);
    info!(
        "   Glicko-2: tao {} rd [{}, {}]",
        config.rating.glicko2.tao, config.rating.glicko2.min_rd, config.rating.glicko2.max_rd
    );
    info!("   GOR epsilon: {}", config.rating.gor.epsilon);
}

/// Load and merge configuration from file, environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    go_ratings::config::validate_config(&config)?;
    Ok(config)
}

fn describe(entry: &Glicko2Entry) -> String {
    format!(
        "{:.1} ±{:.1} σ {:.4} ({})",
        entry.rating,
        entry.deviation,
        entry.volatility,
        rank_label(rating_to_rank(entry.rating), true)
    )
}

fn run(command: Command, config: &AppConfig) -> Result<()> {
    match command {
        Command::Glicko {
            black_rating,
            black_deviation,
            black_volatility,
            white_rating,
            white_deviation,
            white_volatility,
            handicap,
        } => {
            let glicko2 = config.rating.glicko2;
            let black =
                Glicko2Entry::with_config(black_rating, black_deviation, black_volatility, glicko2);
            let white =
                Glicko2Entry::with_config(white_rating, white_deviation, white_volatility, glicko2);
            let preview = preview_match(&black, &white, handicap);

            println!("black {}", describe(&black));
            println!("  win:  {}", describe(&preview.black_win));
            println!("  loss: {}", describe(&preview.black_loss));
            println!("white {}", describe(&white));
            println!("  win:  {}", describe(&preview.white_win));
            println!("  loss: {}", describe(&preview.white_loss));
        }
        Command::Gor {
            black,
            white,
            handicap,
        } => {
            let black = config.rating.gor.entry(black).with_handicap(handicap);
            let white = config.rating.gor.entry(white);
            let preview = preview_gor_match(&black, &white);

            println!(
                "black {:.1} (expected {:.3})",
                black.rating,
                black.expected_win_probability(&white)
            );
            println!("  win:  {:.1}", preview.black_win.rating);
            println!("  loss: {:.1}", preview.black_loss.rating);
            println!(
                "white {:.1} (expected {:.3})",
                white.rating,
                white.expected_win_probability(&black)
            );
            println!("  win:  {:.1}", preview.white_win.rating);
            println!("  loss: {:.1}", preview.white_loss.rating);
        }
        Command::History { file } => {
            let text = std::fs::read_to_string(&file)?;
            let rows = parse_history_tsv(&text)?;
            let entries = chronological(&rows, &HandicapAwareClassifier);
            info!(rows = rows.len(), "Loaded history from {}", file.display());

            if !has_games(&entries) {
                println!("no rated games");
                return Ok(());
            }

            let months = group_by_month(&entries);
            for month in &months {
                println!(
                    "{}  {:>4} games  {:>3}W {:>3}L  {:.1} -> {:.1}{}",
                    month.ended.format("%Y-%m"),
                    month.count,
                    month.wins,
                    month.losses,
                    month.starting_rating,
                    month.rating,
                    if month.increase { "  ↑" } else { "" }
                );
            }
            println!("busiest month: {} games", max_games_in_a_month(&months));

            let summary =
                WinLossSummary::from(aggregate_index_range(&entries, 0, entries.len()).as_ref());
            println!(
                "wins {} (vs stronger {}, vs weaker {})  losses {} (vs stronger {}, vs weaker {})",
                summary.wins(),
                summary.strong_wins,
                summary.weak_wins,
                summary.losses(),
                summary.strong_losses,
                summary.weak_losses
            );
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {:#}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if args.dry_run {
        info!("Configuration validation successful");
        display_banner(&config);
        info!("Dry run completed - exiting");
        return Ok(());
    }

    let Some(command) = args.command else {
        display_banner(&config);
        info!("No command given; see --help");
        return Ok(());
    };

    if let Err(e) = run(command, &config) {
        error!("{:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
