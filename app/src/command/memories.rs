use chrono::{DateTime, Utc};
use clap::Subcommand;
use hotmem_config::Config;
use hotmem_core::{Memory, MemoryStore};
use hotmem_memory::MemoryQuery;
use uuid::Uuid;

#[derive(Subcommand)]
pub enum MemoriesCommand {
    /// List memories, oldest first
    List {
        /// Show at most this many of the newest memories
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Search memories by text, tags, and date range
    Search {
        /// Case-insensitive text matched against content and tags
        #[arg(short, long)]
        text: Option<String>,

        /// Require at least one of these tags (repeatable)
        #[arg(short = 'T', long = "tag")]
        tags: Vec<String>,

        /// Only memories created at or after this instant (RFC 3339)
        #[arg(long)]
        from: Option<DateTime<Utc>>,

        /// Only memories created at or before this instant (RFC 3339)
        #[arg(long)]
        to: Option<DateTime<Utc>>,
    },
    /// Delete a memory by id
    Delete { id: Uuid },
}

/// Strategy for browsing the extracted memories.
#[derive(Debug, Clone, Copy)]
pub struct MemoriesStrategy;

impl super::CommandStrategy for MemoriesStrategy {
    type Input = MemoriesCommand;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let store = super::open_store(&config)?;

        match input {
            MemoriesCommand::List { limit } => {
                let memories = MemoryStore::list(store.as_ref()).await?;
                let skip = limit.map_or(0, |n| memories.len().saturating_sub(n));
                print_memories(&memories[skip..]);
            }
            MemoriesCommand::Search {
                text,
                tags,
                from,
                to,
            } => {
                let query = MemoryQuery {
                    text,
                    tags,
                    from,
                    to,
                };
                let memories = MemoryStore::list(store.as_ref()).await?;
                print_memories(&query.filter(&memories));
            }
            MemoriesCommand::Delete { id } => {
                MemoryStore::delete(store.as_ref(), &id).await?;
                println!("Deleted memory {id}");
            }
        }

        Ok(())
    }
}

fn print_memories(memories: &[Memory]) {
    if memories.is_empty() {
        println!("No memories found.");
        return;
    }

    for memory in memories {
        let phrase = memory
            .hot_phrase
            .as_deref()
            .map_or_else(String::new, |p| format!(" via \"{p}\""));
        println!(
            "[{}] {} ({}{phrase}) tags: {}",
            memory.id,
            memory.content,
            memory.memory_type,
            memory.tags.join(", ")
        );
        println!("    {}", memory.timestamp.to_rfc3339());
    }
}
