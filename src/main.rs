//! healthcost - health insurance cost prediction CLI
//!
//! Reads an applicant as a flat JSON object and prints the predicted cost.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use healthcost::config::ARTIFACTS_ENV_VAR;
use healthcost::{encode, ArtifactStore, HealthcostConfig, HealthcostError, Predictor, RawInput};

#[derive(Parser)]
#[command(name = "healthcost")]
#[command(version = "0.1.0")]
#[command(about = "Predict health insurance cost from applicant attributes", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Project directory holding .healthcost/settings.json (defaults to current directory)
    #[arg(short, long, global = true, default_value = ".")]
    project: PathBuf,

    /// Artifact directory (overrides settings)
    #[arg(short, long, global = true, env = ARTIFACTS_ENV_VAR)]
    artifacts: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict the cost for one applicant
    Predict {
        /// Applicant JSON file (reads stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output bracket, raw output and scaled features as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the encoded, unscaled feature row (no artifacts needed)
    Encode {
        /// Applicant JSON file (reads stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Load the artifacts and describe them
    Inspect {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show effective configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show configuration file paths
    Paths,
}

fn main() {
    let cli = Cli::parse();

    let config = match HealthcostConfig::load(&cli.project) {
        Ok(config) => config,
        Err(e) => fail(&anyhow::Error::new(e)),
    };

    // Initialize tracing; RUST_LOG wins over the defaults
    let default_filter = if cli.verbose {
        "healthcost=debug,info"
    } else {
        "healthcost=info,warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json || config.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    if let Err(e) = run(cli, config) {
        fail(&e);
    }
}

fn fail(err: &anyhow::Error) -> ! {
    eprintln!("{} {:#}", "Error:".red().bold(), err);
    let code = err
        .downcast_ref::<HealthcostError>()
        .map_or(1, HealthcostError::exit_code);
    std::process::exit(code);
}

fn run(cli: Cli, config: HealthcostConfig) -> anyhow::Result<()> {
    let artifacts_dir = config.artifacts_dir(&cli.project, cli.artifacts.as_deref());

    match cli.command {
        Commands::Predict { input, json } => {
            let raw = read_input(input.as_deref())?;
            let store = ArtifactStore::load(&artifacts_dir)?;
            let predictor = Predictor::new(Arc::new(store));

            let prediction = predictor.predict_detailed(&raw)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&prediction)?);
            } else {
                println!("{}", prediction.cost);
            }
        }

        Commands::Encode { input } => {
            let raw = read_input(input.as_deref())?;
            let row = encode(&raw)?;
            println!("{}", serde_json::to_string_pretty(&row)?);
        }

        Commands::Inspect { json } => {
            let store = ArtifactStore::load(&artifacts_dir)?;
            if json {
                println!("{}", serde_json::to_string_pretty(store.manifest())?);
            } else {
                println!(
                    "{} Artifacts loaded from {}",
                    "OK".green().bold(),
                    artifacts_dir.display()
                );
                for info in store.manifest() {
                    println!(
                        "   {:<6} {:<18} {}  {}",
                        info.bracket.to_string().cyan(),
                        info.kind,
                        &info.sha256[..12],
                        info.path.display()
                    );
                }
            }
        }

        Commands::Config { action } => match action {
            ConfigAction::Show { json } => {
                if json {
                    println!("{}", serde_json::to_string_pretty(&config)?);
                } else {
                    println!("{}", "Configuration".bold());
                    println!("   Artifacts:  {}", artifacts_dir.display());
                    println!("   JSON logs:  {}", config.log_json);
                }
            }
            ConfigAction::Paths => {
                let settings = HealthcostConfig::settings_path(&cli.project);
                let marker = |path: &Path| {
                    if path.exists() {
                        "exists".green()
                    } else {
                        "missing".yellow()
                    }
                };
                println!("   Settings:   {} ({})", settings.display(), marker(&settings));
                println!(
                    "   Artifacts:  {} ({})",
                    artifacts_dir.display(),
                    marker(&artifacts_dir)
                );
            }
        },
    }

    Ok(())
}

/// Read a Raw Input JSON object from a file, or stdin when no path is given.
fn read_input(path: Option<&Path>) -> anyhow::Result<RawInput> {
    let content = match path {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let raw: RawInput = serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Input is not a JSON object of attributes: {e}"))?;
    Ok(raw)
}
