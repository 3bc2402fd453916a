use std::collections::VecDeque;

use scout_core::{update, AppState, ListingId, Msg, Query, SearchDefaults};
use scout_logging::scout_info;

use crate::{execute, JobSearchProvider};

/// Drives one search session in-process: every effect produced by `update`
/// is awaited before the call returns.
///
/// Calls take `&mut self`, so at most one request is in flight and no stale
/// response can arrive; the generation check in the state still guards the
/// channel-based `EngineHandle` path.
pub struct PaginationController<P> {
    provider: P,
    state: AppState,
}

impl<P: JobSearchProvider> PaginationController<P> {
    pub fn new(provider: P, defaults: SearchDefaults) -> Self {
        Self {
            provider,
            state: AppState::with_defaults(defaults),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Resets the session and fetches page 1.
    pub async fn start_search(&mut self, query: Query) {
        self.dispatch(Msg::SearchSubmitted(query)).await;
    }

    /// Fetches the next page unless a fetch is running or the session is
    /// exhausted.
    pub async fn load_more(&mut self) {
        let was_exhausted = self.state.is_exhausted();
        self.dispatch(Msg::LoadMoreRequested).await;
        if !was_exhausted && self.state.is_exhausted() {
            scout_info!(
                "Search exhausted after page {} with {} listings",
                self.state.page(),
                self.state.listings().len()
            );
        }
    }

    /// Repeats the last failed request (or the whole search).
    pub async fn retry(&mut self) {
        self.dispatch(Msg::RetryClicked).await;
    }

    pub async fn open_details(&mut self, listing_id: ListingId) {
        self.dispatch(Msg::DetailsRequested(listing_id)).await;
    }

    pub fn close_details(&mut self) {
        let state = std::mem::take(&mut self.state);
        let (state, _effects) = update(state, Msg::DetailsClosed);
        self.state = state;
    }

    async fn dispatch(&mut self, msg: Msg) {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            for effect in effects {
                let event = execute(&self.provider, effect).await;
                inbox.push_back(event.into());
            }
        }
        self.state.consume_dirty();
    }
}
