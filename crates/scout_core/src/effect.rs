#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Request one page; the answer comes back as `Msg::PageLoaded` carrying
    /// the same generation and `params.page`.
    FetchPage {
        generation: crate::Generation,
        params: crate::SearchParams,
    },
    /// Request the full record for one listing.
    FetchDetails {
        listing_id: crate::ListingId,
        country: String,
    },
}
