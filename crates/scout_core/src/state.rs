use std::collections::HashSet;

use crate::view_model::{AppViewModel, ListingRowView};
use crate::{dedupe, translate, Listing, ListingId, Query, SearchDefaults, SearchError, SearchParams};

/// Monotonic search-session token. A response whose generation differs from
/// the current one belongs to a superseded search and is discarded.
pub type Generation = u64;

/// Which kind of page request a failure (or an in-flight fetch) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequest {
    Initial,
    More,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum FetchPhase {
    #[default]
    Idle,
    Loading,
    LoadingMore,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct DetailsState {
    requested: Option<ListingId>,
    listing: Option<Listing>,
    error: Option<SearchError>,
}

/// Accumulation state for one search session plus the details pane.
///
/// `loading` and `loading_more` share one phase field so they can never be
/// true together.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    defaults: SearchDefaults,
    query: Option<Query>,
    params: Option<SearchParams>,
    generation: Generation,
    listings: Vec<Listing>,
    seen: HashSet<ListingId>,
    page: u32,
    initial_loaded: bool,
    exhausted: bool,
    phase: FetchPhase,
    error: Option<(PageRequest, SearchError)>,
    details: DetailsState,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults(defaults: SearchDefaults) -> Self {
        Self {
            defaults,
            ..Self::default()
        }
    }

    pub fn defaults(&self) -> &SearchDefaults {
        &self.defaults
    }

    pub fn query(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    /// Page-1 parameters of the current session.
    pub fn params(&self) -> Option<&SearchParams> {
        self.params.as_ref()
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn is_loading(&self) -> bool {
        self.phase == FetchPhase::Loading
    }

    pub fn is_loading_more(&self) -> bool {
        self.phase == FetchPhase::LoadingMore
    }

    pub fn error(&self) -> Option<&SearchError> {
        self.error.as_ref().map(|(_, err)| err)
    }

    pub fn failed_request(&self) -> Option<PageRequest> {
        self.error.as_ref().map(|(request, _)| *request)
    }

    /// True when a `LoadMoreRequested` would issue a fetch.
    pub fn can_load_more(&self) -> bool {
        self.initial_loaded && !self.exhausted && self.phase == FetchPhase::Idle
    }

    pub fn details(&self) -> Option<&Listing> {
        self.details.listing.as_ref()
    }

    pub fn details_error(&self) -> Option<&SearchError> {
        self.details.error.as_ref()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            query: self.params.as_ref().map(|p| p.query.clone()),
            listings: self
                .listings
                .iter()
                .enumerate()
                .map(|(index, listing)| ListingRowView::from_listing(index + 1, listing))
                .collect(),
            page: self.page,
            loading: self.is_loading(),
            loading_more: self.is_loading_more(),
            exhausted: self.exhausted,
            can_load_more: self.can_load_more(),
            error: self
                .error
                .as_ref()
                .map(|(_, err)| err.kind.user_message().to_string()),
            error_retryable: self
                .error
                .as_ref()
                .is_some_and(|(_, err)| err.kind.is_transient()),
            details: self.details.listing.clone(),
            details_error: self
                .details
                .error
                .as_ref()
                .map(|err| err.kind.user_message().to_string()),
            dirty: self.dirty,
        }
    }

    /// Returns whether the state changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn translate(&self, query: &Query) -> SearchParams {
        translate(query, 1, &self.defaults)
    }

    /// Resets the session for `query` and returns the page-1 request.
    pub(crate) fn begin_search(&mut self, query: Query) -> (Generation, SearchParams) {
        let params = self.translate(&query);
        self.generation += 1;
        self.query = Some(query);
        self.params = Some(params.clone());
        self.listings.clear();
        self.seen.clear();
        self.page = 1;
        self.initial_loaded = false;
        self.exhausted = false;
        self.error = None;
        self.phase = FetchPhase::Loading;
        self.dirty = true;
        (self.generation, params)
    }

    /// Marks an incremental fetch in flight and returns its request, or `None`
    /// when a fetch is already running, the initial page has not landed yet,
    /// or the session is exhausted.
    pub(crate) fn begin_load_more(&mut self) -> Option<(Generation, SearchParams)> {
        if !self.can_load_more() {
            return None;
        }
        let params = self.params.as_ref()?.with_page(self.page + 1);
        self.phase = FetchPhase::LoadingMore;
        self.error = None;
        self.dirty = true;
        Some((self.generation, params))
    }

    /// Applies a page response. Responses from an older generation, or for a
    /// page that is not the one currently awaited, leave the state untouched.
    pub(crate) fn apply_page(
        &mut self,
        generation: Generation,
        page: u32,
        result: Result<Vec<Listing>, SearchError>,
    ) {
        if generation != self.generation {
            return;
        }
        match self.phase {
            FetchPhase::Loading if page == 1 => self.apply_initial(result),
            FetchPhase::LoadingMore if page == self.page + 1 => self.apply_more(page, result),
            _ => {}
        }
    }

    fn apply_initial(&mut self, result: Result<Vec<Listing>, SearchError>) {
        self.phase = FetchPhase::Idle;
        self.dirty = true;
        match result {
            Ok(batch) => {
                self.listings = dedupe(&HashSet::new(), batch);
                self.seen = self.listings.iter().map(|l| l.id.clone()).collect();
                self.initial_loaded = true;
            }
            Err(err) => {
                self.error = Some((PageRequest::Initial, err));
            }
        }
    }

    fn apply_more(&mut self, page: u32, result: Result<Vec<Listing>, SearchError>) {
        self.phase = FetchPhase::Idle;
        self.dirty = true;
        match result {
            Ok(batch) => {
                let fresh = dedupe(&self.seen, batch);
                if fresh.is_empty() {
                    self.exhausted = true;
                    return;
                }
                self.seen.extend(fresh.iter().map(|l| l.id.clone()));
                self.listings.extend(fresh);
                self.page = page;
            }
            Err(err) => {
                self.error = Some((PageRequest::More, err));
            }
        }
    }

    pub(crate) fn begin_details(&mut self, listing_id: ListingId) -> String {
        self.details = DetailsState {
            requested: Some(listing_id),
            listing: None,
            error: None,
        };
        self.dirty = true;
        self.params
            .as_ref()
            .map(|p| p.country.clone())
            .unwrap_or_else(|| self.defaults.country.clone())
    }

    pub(crate) fn apply_details(
        &mut self,
        listing_id: &str,
        result: Result<Listing, SearchError>,
    ) {
        if self.details.requested.as_deref() != Some(listing_id) {
            return;
        }
        match result {
            Ok(listing) => self.details.listing = Some(listing),
            Err(err) => self.details.error = Some(err),
        }
        self.dirty = true;
    }

    pub(crate) fn close_details(&mut self) {
        if self.details != DetailsState::default() {
            self.details = DetailsState::default();
            self.dirty = true;
        }
    }
}
