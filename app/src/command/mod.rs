//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy with its own input type, dispatched
//! statically from `main` — no dynamic trait objects, no runtime casting.

use hotmem_config::Config;
use hotmem_memory::{IngestPipeline, JsonStore};
use std::sync::Arc;

mod info;
mod init;
mod listen;
mod memories;
mod process;
mod rules;
mod version;

pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use listen::ListenStrategy;
pub use memories::{MemoriesCommand, MemoriesStrategy};
pub use process::{ProcessInput, ProcessStrategy};
pub use rules::{RulesCommand, RulesStrategy};
pub use version::VersionStrategy;

/// Core trait defining the contract for all command strategies.
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// Open the JSON store for this process. One instance per process, shared
/// by reference, which keeps the whole-collection read-modify-write cycles
/// single-writer.
fn open_store(config: &Config) -> anyhow::Result<Arc<JsonStore>> {
    Ok(Arc::new(JsonStore::open(config.data_dir()?)?))
}

/// Wire the ingestion pipeline around the shared store.
fn build_pipeline(config: &Config, store: &Arc<JsonStore>) -> IngestPipeline {
    IngestPipeline::new(
        Arc::clone(store) as _,
        Arc::clone(store) as _,
        Arc::clone(store) as _,
    )
    .with_processing_delay(config.processing_delay())
}
