#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod command;

use clap::{Parser, Subcommand};
use command::{
    CommandStrategy, InfoStrategy, InitStrategy, ListenStrategy, MemoriesCommand,
    MemoriesStrategy, ProcessInput, ProcessStrategy, RulesCommand, RulesStrategy, VersionStrategy,
};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "hotmem")]
#[command(about = "Hot-phrase memory extraction for transcript streams", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process one transcript line through the extraction pipeline
    Process {
        /// Transcript text to process
        text: Option<String>,

        /// Use one of the built-in sample lines instead of TEXT
        #[arg(short, long)]
        simulate: bool,
    },
    /// Follow the configured live transcript feed
    Listen,
    /// Manage trigger rules
    Rules {
        #[command(subcommand)]
        command: RulesCommand,
    },
    /// Browse, search, and delete extracted memories
    Memories {
        #[command(subcommand)]
        command: MemoriesCommand,
    },
    /// Show configuration and usage stats
    Info,
    /// Initialize configuration
    Init,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Process { text, simulate } => {
            ProcessStrategy
                .execute(ProcessInput { text, simulate })
                .await
        }
        Commands::Listen => ListenStrategy.execute(()).await,
        Commands::Rules { command } => RulesStrategy.execute(command).await,
        Commands::Memories { command } => MemoriesStrategy.execute(command).await,
        Commands::Info => InfoStrategy.execute(()).await,
        Commands::Init => InitStrategy.execute(()).await,
        Commands::Version => VersionStrategy.execute(()).await,
    }
}
