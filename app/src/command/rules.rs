use clap::Subcommand;
use hotmem_config::Config;
use hotmem_core::{Rule, RuleCategory, RuleStore};
use hotmem_memory::JsonStore;

#[derive(Subcommand)]
pub enum RulesCommand {
    /// List configured rules
    List,
    /// Add a new rule
    Add {
        /// Trigger phrase, matched case-insensitively as a substring
        phrase: String,

        /// Action fired on match (create_note, create_memory, add_research,
        /// create_reminder; anything else creates a general memory)
        action: String,

        /// Rule category: note, research, or reminder
        #[arg(short, long, default_value = "note")]
        category: String,
    },
    /// Enable a rule by id
    Enable { id: String },
    /// Disable a rule by id
    Disable { id: String },
    /// Remove a rule by id
    Remove { id: String },
}

/// Strategy for the rule editor.
///
/// Validation lives here, not in the store: the store accepts anything,
/// the editor refuses blank phrase and action fields.
#[derive(Debug, Clone, Copy)]
pub struct RulesStrategy;

impl super::CommandStrategy for RulesStrategy {
    type Input = RulesCommand;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let store = super::open_store(&config)?;

        match input {
            RulesCommand::List => {
                let rules = RuleStore::list(store.as_ref()).await?;
                if rules.is_empty() {
                    println!("No rules configured.");
                    return Ok(());
                }
                for rule in rules {
                    let flag = if rule.enabled { "enabled" } else { "disabled" };
                    println!(
                        "[{}] \"{}\" -> {} ({}, {flag})",
                        rule.id, rule.phrase, rule.action, rule.category
                    );
                }
            }
            RulesCommand::Add {
                phrase,
                action,
                category,
            } => {
                if phrase.trim().is_empty() {
                    anyhow::bail!("Rule phrase must not be blank");
                }
                if action.trim().is_empty() {
                    anyhow::bail!("Rule action must not be blank");
                }
                let category: RuleCategory = category.parse()?;

                let rule = Rule::new(phrase.trim(), action.trim(), category);
                RuleStore::save(store.as_ref(), &rule).await?;
                println!("Added rule [{}] \"{}\"", rule.id, rule.phrase);
            }
            RulesCommand::Enable { id } => set_enabled(store.as_ref(), &id, true).await?,
            RulesCommand::Disable { id } => set_enabled(store.as_ref(), &id, false).await?,
            RulesCommand::Remove { id } => {
                RuleStore::delete(store.as_ref(), &id).await?;
                println!("Removed rule [{id}]");
            }
        }

        Ok(())
    }
}

async fn set_enabled(store: &JsonStore, id: &str, enabled: bool) -> anyhow::Result<()> {
    let rules = RuleStore::list(store).await?;
    let Some(mut rule) = rules.into_iter().find(|r| r.id == id) else {
        anyhow::bail!("No rule with id {id}");
    };

    rule.enabled = enabled;
    RuleStore::save(store, &rule).await?;

    println!(
        "Rule [{id}] {}",
        if enabled { "enabled" } else { "disabled" }
    );
    Ok(())
}
