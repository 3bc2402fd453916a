#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User explicitly ran a search; always starts a new session.
    SearchSubmitted(crate::Query),
    /// Search inputs changed; starts a new session only if the translated
    /// parameters differ from the current session's.
    QueryChanged(crate::Query),
    /// User scrolled to the end of the results or asked for more.
    LoadMoreRequested,
    /// User clicked "Try Again".
    RetryClicked,
    /// Remote result for a page request.
    PageLoaded {
        generation: crate::Generation,
        page: u32,
        result: Result<Vec<crate::Listing>, crate::SearchError>,
    },
    /// User opened the details of one listing.
    DetailsRequested(crate::ListingId),
    /// Remote result for a details request.
    DetailsLoaded {
        listing_id: crate::ListingId,
        result: Result<crate::Listing, crate::SearchError>,
    },
    /// User dismissed the details view.
    DetailsClosed,
}
