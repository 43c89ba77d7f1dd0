#![forbid(unsafe_code)]
//! Adapter Scaffold Command Line Interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

use scaffold::commands::{
    execute_init, execute_migrate, execute_questions, execute_replay, InitOptions,
    MigrateOptions, QuestionsOptions, ReplayOptions,
};
use scaffold::config::CONFIG_FILE;
use scaffold::Config;

#[derive(Parser)]
#[command(name = "scaffold")]
#[command(about = "Adapter Scaffold - Resolve the answers that drive project generation")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Infer the answers of an existing adapter project
    Migrate {
        /// Project directory
        dir: PathBuf,

        /// Answer file path (default: <DIR>/.create-adapter.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the answers instead of writing them
        #[arg(long, conflicts_with = "output")]
        stdout: bool,

        /// Skip validation of a question (can specify multiple)
        #[arg(long = "skip-validation")]
        skip_validation: Vec<String>,
    },

    /// Resolve a stored answer file again
    Replay {
        /// Answer file
        file: PathBuf,

        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Answer the questions interactively
    Init {
        /// Ask expert-only questions
        #[arg(long)]
        expert: bool,

        /// Answer file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the question graph
    Questions {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "scaffold=debug" } else { "scaffold=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load_if_exists(&cli.config)?;

    match cli.command {
        Commands::Migrate {
            dir,
            output,
            stdout,
            skip_validation,
        } => {
            let options = MigrateOptions {
                dir,
                output,
                stdout,
                skip_validation,
            };
            execute_migrate(options, &config).await?;
        }

        Commands::Replay { file, output } => {
            execute_replay(ReplayOptions { file, output }).await?;
        }

        Commands::Init { expert, output } => {
            execute_init(InitOptions { expert, output }, &config).await?;
        }

        Commands::Questions { json } => {
            execute_questions(QuestionsOptions { json })?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", style("✗").red(), e);
        std::process::exit(1);
    }
}
