use scout_core::{Generation, Listing, ListingId, Msg, SearchError};

/// Completion reports from effect execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    PageFetched {
        generation: Generation,
        page: u32,
        result: Result<Vec<Listing>, SearchError>,
    },
    DetailsFetched {
        listing_id: ListingId,
        result: Result<Listing, SearchError>,
    },
}

impl From<EngineEvent> for Msg {
    fn from(event: EngineEvent) -> Self {
        match event {
            EngineEvent::PageFetched {
                generation,
                page,
                result,
            } => Msg::PageLoaded {
                generation,
                page,
                result,
            },
            EngineEvent::DetailsFetched { listing_id, result } => {
                Msg::DetailsLoaded { listing_id, result }
            }
        }
    }
}
