use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use scout_core::Effect;
use scout_logging::{scout_info, scout_warn};

use crate::{EngineEvent, JobSearchProvider};

/// Runs effects on a background tokio runtime and reports completions over a
/// channel. State stays with the caller; the engine only performs IO.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<Effect>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(provider: Arc<dyn JobSearchProvider>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<Effect>();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;

        thread::spawn(move || {
            while let Ok(effect) = cmd_rx.recv() {
                let provider = provider.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let event = execute(provider.as_ref(), effect).await;
                    let _ = event_tx.send(event);
                });
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn submit(&self, effect: Effect) {
        let _ = self.cmd_tx.send(effect);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

/// Performs one effect against `provider` and reports its outcome.
pub async fn execute(provider: &dyn JobSearchProvider, effect: Effect) -> EngineEvent {
    match effect {
        Effect::FetchPage { generation, params } => {
            scout_info!(
                "FetchPage generation={} page={} query={:?}",
                generation,
                params.page,
                params.query
            );
            let result = provider.search(&params).await;
            match &result {
                Ok(batch) => scout_info!("Page {} returned {} listings", params.page, batch.len()),
                Err(err) => scout_warn!("Page {} failed: {}", params.page, err),
            }
            EngineEvent::PageFetched {
                generation,
                page: params.page,
                result,
            }
        }
        Effect::FetchDetails {
            listing_id,
            country,
        } => {
            scout_info!("FetchDetails listing_id={}", listing_id);
            let result = provider.fetch_details(&listing_id, &country).await;
            if let Err(err) = &result {
                scout_warn!("Details for {} failed: {}", listing_id, err);
            }
            EngineEvent::DetailsFetched { listing_id, result }
        }
    }
}
