//! bdi CLI - runs the built-in multi-agent scenarios.
//!
//! - `bdi run` - run a scenario and print its history
//! - `bdi scenarios` - list the scenarios

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use bdi_cli::{output, simulate, OutputFormat, Scenario, SimConfig};

#[derive(Parser)]
#[command(name = "bdi")]
#[command(about = "Belief-desire-intention agent simulations", version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario
    Run {
        /// Scenario to run (overrides the config file)
        #[arg(short, long, value_enum)]
        scenario: Option<Scenario>,

        /// Number of ticks (overrides the config file)
        #[arg(short, long)]
        iterations: Option<u64>,

        /// YAML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format (overrides the config file)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Compact output instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// List the available scenarios
    Scenarios,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let subscriber = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.with_target(false).init();
    }

    match cli.command {
        Commands::Run {
            scenario,
            iterations,
            config,
            format,
            compact,
        } => {
            let mut config = SimConfig::load_or_default(config.as_deref())?;
            if let Some(scenario) = scenario {
                config.scenario = scenario;
            }
            if let Some(iterations) = iterations {
                config.iterations = iterations;
            }
            if let Some(format) = format {
                config.output.format = format;
            }
            if compact {
                config.output.pretty = false;
            }
            run(&config)
        }
        Commands::Scenarios => {
            for scenario in Scenario::ALL {
                println!("{:<8} {}", scenario.name(), scenario.description());
            }
            Ok(())
        }
    }
}

fn run(config: &SimConfig) -> Result<()> {
    let history = simulate(config)?;
    println!("{}", output::format_history(&history, config.output)?);
    Ok(())
}
