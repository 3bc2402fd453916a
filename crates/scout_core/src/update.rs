use crate::{AppState, Effect, Msg, PageRequest, Query};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SearchSubmitted(query) => start_search(&mut state, query),
        Msg::QueryChanged(query) => {
            // Value equality on the translated request, so an unchanged
            // selection never costs a network call.
            let unchanged = state.params() == Some(&state.translate(&query));
            if unchanged {
                Vec::new()
            } else {
                start_search(&mut state, query)
            }
        }
        Msg::LoadMoreRequested => load_more(&mut state),
        Msg::RetryClicked => match state.failed_request() {
            Some(PageRequest::More) => load_more(&mut state),
            Some(PageRequest::Initial) | None => match state.query().cloned() {
                Some(query) if !state.is_loading() && !state.is_loading_more() => {
                    start_search(&mut state, query)
                }
                _ => Vec::new(),
            },
        },
        Msg::PageLoaded {
            generation,
            page,
            result,
        } => {
            state.apply_page(generation, page, result);
            Vec::new()
        }
        Msg::DetailsRequested(listing_id) => {
            let country = state.begin_details(listing_id.clone());
            vec![Effect::FetchDetails {
                listing_id,
                country,
            }]
        }
        Msg::DetailsLoaded { listing_id, result } => {
            state.apply_details(&listing_id, result);
            Vec::new()
        }
        Msg::DetailsClosed => {
            state.close_details();
            Vec::new()
        }
    };

    (state, effects)
}

fn start_search(state: &mut AppState, query: Query) -> Vec<Effect> {
    let (generation, params) = state.begin_search(query);
    vec![Effect::FetchPage { generation, params }]
}

fn load_more(state: &mut AppState) -> Vec<Effect> {
    match state.begin_load_more() {
        Some((generation, params)) => vec![Effect::FetchPage { generation, params }],
        None => Vec::new(),
    }
}
