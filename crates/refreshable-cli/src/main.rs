//! CLI binary entry point for replaying and simulating resource lifecycles.
//!
//! Usage:
//!   refreshable [OPTIONS] <COMMAND>
//!
//! Commands:
//!   replay <SCRIPT>   Apply a TOML event script and print each state
//!   simulate          Run a periodic fetcher against the async driver
//!
//! Options:
//!   -c, --config <FILE>    Path to configuration TOML file
//!   -v, --verbose          Increase logging verbosity
//!
//! States are printed to stdout as JSON lines; logs go to stderr.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use refreshable_cli::config::CliConfig;
use refreshable_cli::driver::ResourceDriver;
use refreshable_cli::script::EventScript;
use refreshable_cli::simulation::{join_fetcher, Fetcher};

/// Refreshable - inspect stale-while-revalidating resource lifecycles.
#[derive(Parser, Debug)]
#[command(name = "refreshable")]
#[command(about = "Replay and simulate refreshable resource lifecycles")]
#[command(version)]
struct Cli {
    /// Path to configuration TOML file.
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (can be repeated: -v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply an event script and print the state after each event.
    Replay {
        /// TOML file with `[[events]]` tables.
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,

        /// Replay through the four-state model (no stale values).
        #[arg(long)]
        four_state: bool,
    },
    /// Run a simulated refreshing data source.
    Simulate {
        /// Number of refresh cycles (overrides config).
        #[arg(long)]
        ticks: Option<u32>,

        /// Milliseconds between refreshes (overrides config).
        #[arg(long, value_name = "MS")]
        interval_ms: Option<u64>,

        /// Outcome pattern, e.g. "ssf" (overrides config).
        #[arg(long)]
        pattern: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration.
    let mut config = CliConfig::load(cli.config.as_deref())?;

    // Adjust log level based on verbosity.
    let log_level = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };

    // Initialize logging.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    if config.logging.json_format {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Command::Replay { script, four_state } => {
            let script = EventScript::from_file(&script)?;
            tracing::info!(events = script.events.len(), four_state, "Replaying script");
            if four_state {
                print_states(&script.replay_remote())?;
            } else {
                print_states(&script.replay())?;
            }
        }
        Command::Simulate {
            ticks,
            interval_ms,
            pattern,
        } => {
            // Apply CLI overrides.
            if let Some(ticks) = ticks {
                config.simulation.ticks = ticks;
            }
            if let Some(ms) = interval_ms {
                config.simulation.interval_ms = ms;
            }
            if let Some(pattern) = pattern {
                config.simulation.pattern = pattern;
            }
            simulate(&config).await?;
        }
    }

    Ok(())
}

fn print_states<S: Serialize>(states: &[S]) -> anyhow::Result<()> {
    for state in states {
        println!("{}", serde_json::to_string(state)?);
    }
    Ok(())
}

async fn simulate(config: &CliConfig) -> anyhow::Result<()> {
    let fetcher = Fetcher::from_config(&config.simulation)?;
    let (driver, handle, mut states) = ResourceDriver::new(config.simulation.channel_capacity);

    tracing::info!(
        ticks = config.simulation.ticks,
        interval_ms = config.simulation.interval_ms,
        pattern = %config.simulation.pattern,
        "Starting simulation"
    );

    let driver_task = tokio::spawn(driver.run());
    let fetcher_task = tokio::spawn(fetcher.run(handle));

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            changed = states.changed() => {
                if changed.is_err() {
                    // Driver dropped its publisher: every event is applied.
                    break;
                }
                let state = states.borrow_and_update().clone();
                println!("{}", serde_json::to_string(&state)?);
            }
            _ = &mut shutdown => {
                tracing::warn!("Interrupted, stopping simulation");
                fetcher_task.abort();
                break;
            }
        }
    }

    join_fetcher(fetcher_task).await?;
    let final_state = driver_task.await?;
    tracing::info!(
        state = %final_state.kind(),
        refreshing = final_state.is_refreshing(),
        "Simulation finished"
    );

    Ok(())
}
