//! clusterfall: cascade engine command line
//!
//! Usage:
//!   clusterfall play --deposit 1000 --bet 10 --spins 20   - Play a session, one JSON result per spin
//!   clusterfall simulate --sessions 100 --spins 10000     - Batch simulation report
//!   clusterfall config --format yaml                      - Print the effective configuration

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use cf_core::CascadeConfig;
use cf_session::{GameError, StandardSession};
use cf_sim::SimConfig;

#[derive(Parser)]
#[command(name = "clusterfall", about = "Cascading-cluster slot engine", version)]
struct Cli {
    /// Game configuration file (.yaml, .yml or .json); built-in tables if omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play spins on a fresh session
    Play {
        /// Bet per spin (positive, even)
        #[arg(short, long, default_value_t = 10)]
        bet: u64,
        /// Number of spin calls
        #[arg(short, long, default_value_t = 10)]
        spins: u32,
        /// Starting balance
        #[arg(short, long, default_value_t = 1_000)]
        deposit: u64,
        /// Buy the bonus for this amount before spinning
        #[arg(long)]
        buy_bonus: Option<u64>,
        /// Seed for a reproducible session
        #[arg(long)]
        seed: Option<u64>,
        /// Pretty-print each result
        #[arg(long)]
        pretty: bool,
    },
    /// Run a parallel batch simulation
    Simulate {
        #[arg(long, default_value_t = 100)]
        sessions: usize,
        /// Spin calls per session
        #[arg(long, default_value_t = 10_000)]
        spins: u32,
        #[arg(short, long, default_value_t = 2)]
        bet: u64,
        #[arg(long, default_value_t = 1_000_000)]
        balance: u64,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Worker threads (defaults to the CPU count)
        #[arg(short, long)]
        threads: Option<usize>,
    },
    /// Print the effective configuration
    Config {
        #[arg(short, long, value_enum, default_value_t = Format::Yaml)]
        format: Format,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Play {
            bet,
            spins,
            deposit,
            buy_bonus,
            seed,
            pretty,
        } => play(config, bet, spins, deposit, buy_bonus, seed, pretty),
        Commands::Simulate {
            sessions,
            spins,
            bet,
            balance,
            seed,
            threads,
        } => simulate(
            &config,
            SimConfig {
                sessions,
                spins_per_session: spins,
                bet,
                starting_balance: balance,
                seed,
                threads,
            },
        ),
        Commands::Config { format } => print_config(&config, format),
    }
}

fn load_config(path: Option<&Path>) -> Result<CascadeConfig> {
    let config = match path {
        Some(path) => CascadeConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => CascadeConfig::standard(),
    };
    config.validate().context("Invalid game configuration")?;
    Ok(config)
}

fn play(
    config: CascadeConfig,
    bet: u64,
    spins: u32,
    deposit: u64,
    buy_bonus: Option<u64>,
    seed: Option<u64>,
    pretty: bool,
) -> Result<()> {
    let config = Arc::new(config);
    let session = match seed {
        Some(seed) => StandardSession::seeded(config, seed),
        None => StandardSession::standard(config),
    };

    session.deposit(deposit)?;
    if let Some(amount) = buy_bonus {
        let purchase = session.buy_bonus(amount).context("Bonus buy failed")?;
        println!("{}", to_json(&purchase, pretty)?);
    }

    for i in 0..spins {
        match session.spin(bet) {
            Ok(result) => println!("{}", to_json(&result, pretty)?),
            Err(e @ GameError::InsufficientBalance { .. }) => {
                log::warn!("Stopping after {i} spins: {e}");
                break;
            }
            Err(e) => return Err(e).context("Spin failed"),
        }
    }

    let data = session.check_data()?;
    println!("{}", to_json(&data, pretty)?);
    Ok(())
}

fn simulate(config: &CascadeConfig, sim: SimConfig) -> Result<()> {
    let report = cf_sim::run(config, &sim)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn print_config(config: &CascadeConfig, format: Format) -> Result<()> {
    let text = match format {
        Format::Yaml => config.to_yaml_string()?,
        Format::Json => config.to_json_string()?,
    };
    println!("{text}");
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    })
}
