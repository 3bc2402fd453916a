use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use scout_core::{update, AppState, Effect, Msg};
use scout_engine::{EngineHandle, JSearchClient, JobSearchProvider};
use scout_logging::{scout_debug, scout_info, scout_warn};

use crate::config::AppConfig;

/// Bridges core effects to the engine and engine events back to messages.
pub struct EffectRunner {
    engine: EngineHandle,
    deadline: Duration,
}

impl EffectRunner {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        if config.api_key.is_none() {
            scout_warn!("No API key configured; remote requests will likely be rejected");
        }
        let client = JSearchClient::new(config.search_settings())?;
        Self::with_provider(Arc::new(client), config.response_deadline())
    }

    pub fn with_provider(
        provider: Arc<dyn JobSearchProvider>,
        deadline: Duration,
    ) -> anyhow::Result<Self> {
        let engine = EngineHandle::new(provider).context("starting engine runtime")?;
        Ok(Self { engine, deadline })
    }

    /// Hands effects to the engine; `execute` logs each one as it runs.
    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            self.engine.submit(effect);
        }
    }

    /// Completed engine work, as messages, without blocking.
    pub fn poll(&self) -> Vec<Msg> {
        std::iter::from_fn(|| self.engine.try_recv())
            .map(Msg::from)
            .collect()
    }

    /// Blocks until the next engine event or the response deadline passes.
    pub fn wait(&self) -> Option<Msg> {
        self.engine.recv_timeout(self.deadline).map(Msg::from)
    }

    /// Runs `update` and submits the resulting effects.
    pub fn apply(&self, state: AppState, msg: Msg) -> AppState {
        if let Msg::PageLoaded {
            generation, page, ..
        } = &msg
        {
            if *generation != state.generation() {
                scout_debug!(
                    "Discarding page {} from superseded generation {}",
                    page,
                    generation
                );
            }
        }
        let was_exhausted = state.is_exhausted();
        let (state, effects) = update(state, msg);
        if !was_exhausted && state.is_exhausted() {
            scout_info!(
                "Search exhausted after page {} with {} listings",
                state.page(),
                state.listings().len()
            );
        }
        self.enqueue(effects);
        state
    }

    /// Feeds `msg` through `update`, then keeps applying engine events
    /// until no page fetch is in flight.
    pub fn run_until_idle(&self, state: AppState, msg: Msg) -> anyhow::Result<AppState> {
        let mut state = self.apply(state, msg);
        while state.is_loading() || state.is_loading_more() {
            let Some(msg) = self.wait() else {
                bail!("no response within {:?}", self.deadline);
            };
            state = self.apply(state, msg);
        }
        Ok(state)
    }

    /// Opens details for `listing_id` and waits for that answer.
    pub fn run_details(&self, state: AppState, listing_id: String) -> anyhow::Result<AppState> {
        let mut state = self.apply(state, Msg::DetailsRequested(listing_id.clone()));
        loop {
            let Some(msg) = self.wait() else {
                bail!("no details for {listing_id} within {:?}", self.deadline);
            };
            let answered = matches!(&msg, Msg::DetailsLoaded { listing_id: id, .. } if *id == listing_id);
            state = self.apply(state, msg);
            if answered {
                return Ok(state);
            }
        }
    }
}
