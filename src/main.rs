//! Talent exchange entry point.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use talent_exchange::api::{create_router, AppState};
use talent_exchange::config::Config;
use talent_exchange::market::{initialize, MarketFeed, MarketSnapshot, RngEntropy};
use talent_exchange::profile::{PageView, ProfilePanel, ProfileView};
use talent_exchange::render;
use talent_exchange::signals::{analyze, load_records, SearchIndex, DEFAULT_TOP_K};
use talent_exchange::utils::shutdown_signal;
use talent_exchange::ExchangeError;

/// Simulated talent marketplace.
#[derive(Parser, Debug)]
#[command(name = "talent-exchange")]
#[command(about = "Live hype ticker and gated talent profile")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the live market board to the terminal (default).
    Run {
        /// Stop after this many ticks.
        #[arg(long)]
        ticks: Option<u64>,

        /// Milliseconds between ticks.
        #[arg(long)]
        interval_ms: Option<u64>,

        /// Seed for reproducible runs.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Serve the page state over HTTP.
    Serve {
        /// HTTP server port.
        #[arg(short, long)]
        port: Option<u16>,

        /// Milliseconds between ticks.
        #[arg(long)]
        interval_ms: Option<u64>,

        /// Seed for reproducible runs.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the opening board.
    Snapshot,

    /// Print a profile panel.
    Profile {
        /// Show the unlocked card instead of the teaser.
        #[arg(long)]
        unlocked: bool,
    },

    /// Score ingested pull requests for likely machine authorship.
    Analyze {
        /// JSON file of ingested pull requests.
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Rank ingested pull requests against a query.
    Search {
        /// Free-text query.
        query: String,

        /// JSON file of ingested pull requests.
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Number of results to show.
        #[arg(short = 'k', long, default_value_t = DEFAULT_TOP_K)]
        top_k: usize,
    },

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("talent_exchange=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Handle subcommands
    match args.command {
        Some(Command::Run {
            ticks,
            interval_ms,
            seed,
        }) => cmd_run(ticks, interval_ms, seed).await,
        Some(Command::Serve {
            port,
            interval_ms,
            seed,
        }) => cmd_serve(port, interval_ms, seed).await,
        Some(Command::Snapshot) => cmd_snapshot(),
        Some(Command::Profile { unlocked }) => cmd_profile(unlocked),
        Some(Command::Analyze { input }) => cmd_analyze(input),
        Some(Command::Search {
            query,
            input,
            top_k,
        }) => cmd_search(&query, input, top_k),
        Some(Command::CheckConfig) => cmd_check_config(),
        None => cmd_run(None, None, None).await,
    }
}

/// Load configuration and apply CLI overrides.
fn load_config(interval_ms: Option<u64>, seed: Option<u64>) -> talent_exchange::Result<Config> {
    let mut config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        ExchangeError::from(e)
    })?;

    if let Some(interval_ms) = interval_ms {
        config.tick_interval_ms = interval_ms;
    }
    if seed.is_some() {
        config.market_seed = seed;
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(ExchangeError::InvalidConfig(e));
    }

    Ok(config)
}

/// Print the market board on every tick until Ctrl+C or the tick limit.
async fn cmd_run(
    max_ticks: Option<u64>,
    interval_ms: Option<u64>,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    let config = load_config(interval_ms, seed)?;

    println!("📈  OPENING MARKET: The Talent Exchange");
    println!("=======================================");

    let feed = MarketFeed::start(
        initialize(),
        config.tick_interval(),
        RngEntropy::from_optional_seed(config.market_seed),
    )?;
    let mut snapshots = feed.subscribe();
    let opening = snapshots.borrow_and_update().clone();
    println!("{}", render::market_board(&opening));

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    let mut done = opening.reached(max_ticks);
    while !done {
        tokio::select! {
            _ = &mut shutdown => break,
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = snapshots.borrow_and_update().clone();
                println!("{}", render::market_board(&snapshot));
                done = snapshot.reached(max_ticks);
            }
        }
    }

    let ticks = feed.stop().await?;
    info!("Market closed after {} ticks", ticks);
    Ok(())
}

/// Run the market feed behind the HTTP API.
async fn cmd_serve(
    port: Option<u16>,
    interval_ms: Option<u64>,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    info!("Loading configuration...");
    let mut config = load_config(interval_ms, seed)?;
    if let Some(port) = port {
        config.port = port;
    }

    match config.market_seed {
        Some(seed) => info!("Market seed: {}", seed),
        None => info!("Market seed: random"),
    }

    let (app_state, feed) = AppState::launch(&config)?;
    info!("Tick interval: {:?}", feed.period());
    app_state.set_ready(true);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);

    let router = create_router(app_state.clone());
    let served = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    app_state.set_ready(false);
    let ticks = feed.stop().await?;
    info!("Market closed after {} ticks", ticks);

    served?;
    Ok(())
}

/// Print the opening board.
fn cmd_snapshot() -> anyhow::Result<()> {
    let snapshot = MarketSnapshot::new(0, initialize());
    println!("{}", render::page(&PageView::compose(&snapshot, ProfileView::Locked)));
    Ok(())
}

/// Print a profile panel.
fn cmd_profile(unlocked: bool) -> anyhow::Result<()> {
    let view = if unlocked {
        ProfileView::Unlocked
    } else {
        ProfileView::Locked
    };
    println!("{}", render::profile_panel(&ProfilePanel::for_view(view)));
    Ok(())
}

/// Resolve the records file: CLI flag, then configuration.
fn signals_path(input: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    match input {
        Some(path) => Ok(path),
        None => Ok(load_config(None, None)?.signals_path),
    }
}

/// Print the authorship table for every ingested record.
fn cmd_analyze(input: Option<PathBuf>) -> anyhow::Result<()> {
    let path = signals_path(input)?;
    let records = load_records(&path)?;
    if records.is_empty() {
        warn!("No records in {}", path.display());
    }

    let rows: Vec<_> = records.iter().map(analyze).collect();
    println!("{}", render::forensics_table(&rows));
    Ok(())
}

/// Print the best matches for a query.
fn cmd_search(query: &str, input: Option<PathBuf>, top_k: usize) -> anyhow::Result<()> {
    let path = signals_path(input)?;
    let records = load_records(&path)?;
    let index = SearchIndex::build(&records);

    println!("{}", render::search_results(query, &index.search(query, top_k)));
    Ok(())
}

/// Check configuration validity.
fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("TALENT EXCHANGE - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match Config::load() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Tick Interval: {:?}", config.tick_interval());
    match config.market_seed {
        Some(seed) => println!("  Market Seed: {}", seed),
        None => println!("  Market Seed: random"),
    }
    println!("  Signals File: {}", config.signals_path.display());
    println!("  Port: {}", config.port);
    println!(
        "  Metrics: {}",
        if config.metrics_enabled { "Enabled" } else { "Disabled" }
    );
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}
