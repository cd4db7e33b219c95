use hotmem_config::Config;

/// Strategy for displaying configuration and usage stats.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let store = super::open_store(&config)?;
        let pipeline = super::build_pipeline(&config, &store);

        let stats = pipeline.stats().await?;

        println!("=== hotmem Configuration ===\n");
        println!("Data directory:   {}", config.data_dir()?.display());
        println!(
            "Live feed:        {}",
            config.transcript.url.as_deref().unwrap_or("(disabled)")
        );
        println!(
            "Processing delay: {} ms",
            config.ingest.processing_delay_ms
        );
        println!();
        println!("=== Usage ===\n");
        println!("Memories:              {}", stats.total_memories);
        println!("Transcript entries:    {}", stats.total_transcripts);
        println!("Hot phrases triggered: {}", stats.hot_phrases_triggered);
        let last_activity = stats
            .last_activity
            .map_or_else(|| "(none)".to_string(), |ts| ts.to_rfc3339());
        println!("Last activity:         {last_activity}");

        Ok(())
    }
}
