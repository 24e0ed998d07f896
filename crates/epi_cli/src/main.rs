//! epi - Epidemiology Metrics Calculator
//!
//! Interactive menu loop (default) and one-shot computations.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use epi_cli::{input, repl, ComputeReport, Session};
use epi_core::{CalculatorConfig, MetricRequest};

#[derive(Parser)]
#[command(name = "epi", version = epi_core::VERSION)]
#[command(about = "Epidemiology metrics calculator for outbreak analysis", long_about = None)]
struct Cli {
    /// JSON config file (overrides EPI_CONFIG_PATH)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// History file path
    #[arg(long, global = true)]
    history: Option<PathBuf>,

    /// Keep history in memory only; `history` then shows nothing
    #[arg(long, global = true, default_value = "false")]
    no_persist: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive menu (default)
    Repl,

    /// Compute a single metric
    Compute {
        #[command(subcommand)]
        metric: MetricCommand,
    },

    /// Print the saved calculation history
    History,
}

#[derive(Args)]
struct OutputArgs {
    /// Print the result as JSON
    #[arg(long, default_value = "false")]
    json: bool,

    /// Append the result to the history file
    #[arg(long, default_value = "false")]
    record: bool,
}

#[derive(Subcommand)]
enum MetricCommand {
    /// Attack rate (%)
    AttackRate {
        /// New cases
        #[arg(long, value_parser = input::non_negative)]
        cases: f64,

        /// Population at risk
        #[arg(long, value_parser = input::non_negative)]
        population: f64,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Case fatality rate (%)
    #[command(name = "cfr", alias = "case-fatality-rate")]
    CaseFatalityRate {
        /// Number of deaths
        #[arg(long, value_parser = input::non_negative)]
        deaths: f64,

        /// Confirmed cases
        #[arg(long, value_parser = input::non_negative)]
        cases: f64,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Incidence rate per `multiplier` population
    IncidenceRate {
        /// New cases
        #[arg(long, value_parser = input::non_negative)]
        cases: f64,

        /// Total population
        #[arg(long, value_parser = input::non_negative)]
        population: f64,

        /// Scale, e.g. 1000 or 100000
        #[arg(long, value_parser = input::multiplier)]
        multiplier: f64,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Prevalence (%)
    Prevalence {
        /// Existing cases
        #[arg(long, value_parser = input::non_negative)]
        existing_cases: f64,

        /// Total population
        #[arg(long, value_parser = input::non_negative)]
        population: f64,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Doubling time (days)
    DoublingTime {
        /// Exponential growth rate, e.g. 0.2
        #[arg(long, value_parser = input::non_negative)]
        growth_rate: f64,

        #[command(flatten)]
        output: OutputArgs,
    },
}

impl MetricCommand {
    fn into_parts(self) -> (MetricRequest, OutputArgs) {
        match self {
            MetricCommand::AttackRate {
                cases,
                population,
                output,
            } => (MetricRequest::AttackRate { cases, population }, output),
            MetricCommand::CaseFatalityRate {
                deaths,
                cases,
                output,
            } => (MetricRequest::CaseFatalityRate { deaths, cases }, output),
            MetricCommand::IncidenceRate {
                cases,
                population,
                multiplier,
                output,
            } => (
                MetricRequest::IncidenceRate {
                    cases,
                    population,
                    multiplier,
                },
                output,
            ),
            MetricCommand::Prevalence {
                existing_cases,
                population,
                output,
            } => (
                MetricRequest::Prevalence {
                    existing_cases,
                    population,
                },
                output,
            ),
            MetricCommand::DoublingTime {
                growth_rate,
                output,
            } => (MetricRequest::DoublingTime { growth_rate }, output),
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    log::debug!("Using config: {:?}", config);

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => {
            let mut session = match Session::open(&config) {
                Ok(session) => session,
                Err(err) if err.is_recoverable() => {
                    log::warn!(
                        "Could not load history from {}: {}; continuing without saving",
                        config.history_path.display(),
                        err
                    );
                    Session::ephemeral(&config)
                }
                Err(err) => {
                    return Err(err).with_context(|| {
                        format!("Failed to load history from {}", config.history_path.display())
                    })
                }
            };
            let stdin = io::stdin();
            repl::run(&mut session, stdin.lock(), io::stdout().lock())?;
        }

        Commands::Compute { metric } => {
            let (request, output) = metric.into_parts();
            compute(&config, &request, &output)?;
        }

        Commands::History => {
            let history = Session::saved_history(&config)?;
            if history.is_empty() {
                println!("No calculations yet.");
            }
            for entry in history.entries() {
                println!("{}", entry);
            }
        }
    }

    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<CalculatorConfig> {
    let mut config = match &cli.config {
        Some(path) => CalculatorConfig::from_file(path)?,
        None => CalculatorConfig::from_env()?,
    };

    if let Some(history) = &cli.history {
        config.history_path = history.clone();
    }
    if cli.no_persist {
        config.persist_history = false;
    }

    config.validate()?;
    Ok(config)
}

fn compute(config: &CalculatorConfig, request: &MetricRequest, output: &OutputArgs) -> Result<()> {
    let mut session = if output.record {
        Session::open(config)?
    } else {
        Session::ephemeral(config)
    };

    let result = session.calculate(request)?;

    if output.json {
        println!("{}", serde_json::to_string_pretty(&ComputeReport::from(result))?);
    } else {
        println!("{}", result);
    }

    if output.record {
        if !session.is_persistent() {
            log::warn!("--record ignored: history persistence is disabled");
        }
        session.save()?;
    }
    Ok(())
}
