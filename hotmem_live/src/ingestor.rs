//! Live ingestion adapter.
//!
//! Bridges a WebSocket transcript feed into the ingestion pipeline. Lines
//! are handled sequentially within one read loop: record raw, extract,
//! update, publish an ingestion event. Only UTF-8 text frames are
//! meaningful; everything else is ignored.

use futures_util::StreamExt;
use hotmem_memory::IngestPipeline;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{Error, Result};

/// Lifecycle of the live transcript connection.
///
/// `Error` is sticky: a close arriving after an error does not revert the
/// state to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Idle,
    Connecting,
    Open,
    Error,
}

/// Structured result of one live ingestion, published to subscribers.
///
/// Carries counts and ids only — consumers re-query the store for full
/// objects.
#[derive(Debug, Clone)]
pub struct IngestEvent {
    pub entry_id: Uuid,
    pub matched_phrases: Vec<String>,
    pub memory_ids: Vec<Uuid>,
}

impl IngestEvent {
    /// Number of memories this ingestion created.
    #[must_use]
    pub fn created(&self) -> usize {
        self.memory_ids.len()
    }
}

const EVENT_BUFFER: usize = 64;

/// One instance serves one connection attempt. There is no automatic
/// reconnect; construct a new ingestor to retry after an error.
pub struct LiveIngestor {
    pipeline: Arc<IngestPipeline>,
    url: Option<String>,
    state_tx: watch::Sender<ConnectionState>,
    events_tx: mpsc::Sender<IngestEvent>,
}

impl LiveIngestor {
    /// Returns the ingestor plus its state and event subscriptions.
    #[must_use]
    pub fn new(
        pipeline: Arc<IngestPipeline>,
        url: Option<String>,
    ) -> (
        Self,
        watch::Receiver<ConnectionState>,
        mpsc::Receiver<IngestEvent>,
    ) {
        let (state_tx, state_rx) = watch::channel(ConnectionState::Idle);
        let (events_tx, events_rx) = mpsc::channel(EVENT_BUFFER);

        let ingestor = Self {
            pipeline,
            url,
            state_tx,
            events_tx,
        };
        (ingestor, state_rx, events_rx)
    }

    /// Consume the feed until it closes.
    ///
    /// Without a configured endpoint this performs no connection attempt and
    /// returns immediately, leaving the state `Idle` permanently — a
    /// disabled live feed is a valid state, not an error.
    pub async fn run(self) -> Result<()> {
        let Some(url) = self.url.clone() else {
            info!("No transcript endpoint configured, live ingestion stays idle");
            return Ok(());
        };

        self.set_state(ConnectionState::Connecting);
        let (stream, _) = match connect_async(url.as_str()).await {
            Ok(connected) => connected,
            Err(e) => {
                warn!("Failed to connect to transcript feed: {e}");
                self.set_state(ConnectionState::Error);
                return Err(Error::Transport(e));
            }
        };
        self.set_state(ConnectionState::Open);
        info!("Connected to transcript feed at {url}");

        let (_write, mut read) = stream.split();

        while let Some(frame) = read.next().await {
            match frame {
                Ok(Message::Text(text)) => {
                    if let Err(e) = self.ingest_line(&text).await {
                        // Store failures are fatal to the run but are not a
                        // transport error; the sticky error state is
                        // reserved for the connection itself.
                        self.close();
                        return Err(e);
                    }
                }
                Ok(Message::Close(_)) => break,
                Ok(_) => {} // non-text frames are ignored
                Err(e) => {
                    warn!("Transcript feed failed: {e}");
                    self.set_state(ConnectionState::Error);
                    return Err(Error::Transport(e));
                }
            }
        }

        self.close();
        Ok(())
    }

    async fn ingest_line(&self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }

        let report = self
            .pipeline
            .ingest_live(text)
            .await
            .map_err(Error::Ingest)?;

        let event = IngestEvent {
            entry_id: report.entry_id,
            matched_phrases: report.matched_phrases,
            memory_ids: report.memory_ids,
        };

        // Fire-and-forget: a slow or absent subscriber never blocks the
        // read loop.
        if let Err(e) = self.events_tx.try_send(event) {
            warn!("Dropping ingestion event: {e}");
        }

        Ok(())
    }

    fn set_state(&self, state: ConnectionState) {
        self.state_tx.send(state).ok();
    }

    /// Transition to `Idle` unless the sticky `Error` state was entered.
    fn close(&self) {
        self.state_tx.send_if_modified(|state| {
            if *state == ConnectionState::Error {
                return false;
            }
            *state = ConnectionState::Idle;
            true
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotmem_core::MemoryStore;
    use hotmem_memory::JsonStore;

    fn ingestor(
        url: Option<String>,
    ) -> (
        LiveIngestor,
        watch::Receiver<ConnectionState>,
        mpsc::Receiver<IngestEvent>,
        Arc<JsonStore>,
        tempfile::TempDir,
    ) {
        #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
        let dir = tempfile::tempdir().expect("tempdir should be created");
        #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
        let store = Arc::new(JsonStore::open(dir.path()).expect("store should open"));
        let pipeline = Arc::new(IngestPipeline::new(
            Arc::clone(&store) as _,
            Arc::clone(&store) as _,
            Arc::clone(&store) as _,
        ));

        let (ingestor, state_rx, events_rx) = LiveIngestor::new(pipeline, url);
        (ingestor, state_rx, events_rx, store, dir)
    }

    #[tokio::test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    async fn test_missing_endpoint_stays_idle() {
        let (ingestor, state_rx, _events_rx, _store, _dir) = ingestor(None);

        ingestor.run().await.expect("idle run should succeed");

        assert_eq!(*state_rx.borrow(), ConnectionState::Idle);
    }

    #[tokio::test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    async fn test_ingest_line_publishes_event_and_persists() {
        let (ingestor, _state_rx, mut events_rx, store, _dir) = ingestor(None);

        ingestor
            .ingest_line("note this: live ingestion works")
            .await
            .expect("ingestion should succeed");

        let event = events_rx.try_recv().expect("event should be published");
        assert_eq!(event.matched_phrases, vec!["note this"]);
        assert_eq!(event.created(), 1);

        let memories = MemoryStore::list(store.as_ref())
            .await
            .expect("list should succeed");
        assert_eq!(memories.len(), 1);
        assert_eq!(memories[0].content, "live ingestion works");
    }

    #[tokio::test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    async fn test_empty_frames_are_skipped_entirely() {
        let (ingestor, _state_rx, mut events_rx, store, _dir) = ingestor(None);

        ingestor
            .ingest_line("")
            .await
            .expect("empty line should be a no-op");

        assert!(events_rx.try_recv().is_err());
        assert!(
            hotmem_core::TranscriptStore::list(store.as_ref())
                .await
                .expect("list should succeed")
                .is_empty()
        );
    }

    #[test]
    fn test_error_state_is_sticky_across_close() {
        let (ingestor, state_rx, _events_rx, _store, _dir) = ingestor(None);

        ingestor.set_state(ConnectionState::Error);
        ingestor.close();

        assert_eq!(*state_rx.borrow(), ConnectionState::Error);
    }

    #[test]
    fn test_close_without_error_returns_to_idle() {
        let (ingestor, state_rx, _events_rx, _store, _dir) = ingestor(None);

        ingestor.set_state(ConnectionState::Open);
        ingestor.close();

        assert_eq!(*state_rx.borrow(), ConnectionState::Idle);
    }
}
