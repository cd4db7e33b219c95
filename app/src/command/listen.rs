use hotmem_config::Config;
use hotmem_live::LiveIngestor;
use std::sync::Arc;
use tracing::info;

/// Strategy for following the live transcript feed.
///
/// Runs until the feed closes or fails. The connection error state is
/// sticky and there is no automatic reconnect; re-run the command to retry.
#[derive(Debug, Clone, Copy)]
pub struct ListenStrategy;

impl super::CommandStrategy for ListenStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;

        if config.transcript.url.is_none() {
            println!(
                "No transcript feed configured. Set \"transcript.url\" in ~/hotmem/config.json."
            );
            return Ok(());
        }

        let store = super::open_store(&config)?;
        let pipeline = Arc::new(super::build_pipeline(&config, &store));

        let (ingestor, mut state_rx, mut events_rx) =
            LiveIngestor::new(pipeline, config.transcript.url.clone());

        let state_task = tokio::spawn(async move {
            while state_rx.changed().await.is_ok() {
                let state = *state_rx.borrow_and_update();
                info!("Connection state: {state:?}");
            }
        });

        let events_task = tokio::spawn(async move {
            let mut total = 0_usize;
            while let Some(event) = events_rx.recv().await {
                total += event.created();
                println!(
                    "Line ingested: {} matched, {} memories created ({total} total from stream)",
                    event.matched_phrases.len(),
                    event.created()
                );
            }
        });

        info!("Live ingestion running. Press Ctrl+C to stop.");
        let result = ingestor.run().await;

        state_task.abort();
        events_task.abort();

        result?;
        Ok(())
    }
}
