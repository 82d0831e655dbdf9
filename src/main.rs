use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use env_logger::Env;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::path::PathBuf;

use vlsm_drill::config::Config;
use vlsm_drill::config_loader;
use vlsm_drill::generator::{Exercise, ExerciseAnswer, InstanceGenerator};
use vlsm_drill::ip::CidrNetwork;
use vlsm_drill::planner::{plan, Requirement};
use vlsm_drill::render::{render_answer, render_answers, render_question};

/// IPv4 VLSM subnetting exercise generator and solver
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log level filter (overrides RUST_LOG and the configuration file)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate an exercise and print it with its answer key
    Generate {
        /// Path to a YAML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Seed for a reproducible exercise
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Plan an allocation for a given network and requirements
    Solve {
        /// Parent network, e.g. 192.168.0.0/24
        #[arg(short, long)]
        network: String,

        /// Requirement as ID=HOSTS; repeat for each subnet
        #[arg(short, long = "require", required = true)]
        requirements: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct GeneratedOutput<'a> {
    seed: u64,
    exercise: &'a Exercise,
    answers: &'a [ExerciseAnswer],
}

/// Parse `ID=HOSTS`
fn parse_requirement(text: &str) -> Result<Requirement> {
    let (id, hosts) = text
        .split_once('=')
        .ok_or_else(|| eyre!("Requirement '{}' is not in the format ID=HOSTS", text))?;
    let host_count = hosts
        .trim()
        .parse::<u64>()
        .wrap_err_with(|| format!("Invalid host count in requirement '{}'", text))?;
    Ok(Requirement::new(id.trim(), host_count))
}

fn run_generate(config: &Config, seed: Option<u64>, format: OutputFormat) -> Result<()> {
    let seed = seed.or(config.general.seed).unwrap_or_else(rand::random);
    info!("Generating exercise with seed {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let generator = InstanceGenerator::new(config.generator.clone())?;
    let exercise = Exercise::generate(&generator, &config.exercise, &mut rng)?;
    let answers = exercise.answers()?;

    match format {
        OutputFormat::Text => {
            print!("{}", render_question(&exercise));
            print!("{}", render_answers(&answers));
        }
        OutputFormat::Json => {
            let output = GeneratedOutput { seed, exercise: &exercise, answers: &answers };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

fn run_solve(network: &str, requirements: &[String], format: OutputFormat) -> Result<()> {
    let network: CidrNetwork = network
        .parse()
        .wrap_err_with(|| format!("Invalid network '{}'", network))?;
    let requirements = requirements
        .iter()
        .map(|text| parse_requirement(text))
        .collect::<Result<Vec<_>>>()?;

    let result = plan(&network, &requirements)?;
    let answer = ExerciseAnswer { label: network.to_string(), network, result };

    match format {
        OutputFormat::Text => print!("{}", render_answer(&answer)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&answer)?),
    }
    Ok(())
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse command-line arguments
    let args = Args::parse();

    // Configuration is read before logging starts so it can set the level
    let config = match &args.command {
        Command::Generate { config, .. } => config_loader::load_or_default(config.as_deref())?,
        Command::Solve { .. } => Config::default(),
    };

    // Initialize logging with default filter level of "info"
    let mut logger = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    if let Some(level) = args.log_level.as_ref().or(config.general.log_level.as_ref()) {
        logger.parse_filters(level);
    }
    logger.init();

    match args.command {
        Command::Generate { seed, format, .. } => run_generate(&config, seed, format),
        Command::Solve { network, requirements, format } => run_solve(&network, &requirements, format),
    }
}
