use futures::stream::{self, Stream};

use super::domain::{ApiResponse, SearchApi, SearchRequest};
use crate::shared::errors::AppResult;

/// Lazily fetch pages `1..=total_pages` of `request`, one request at a time.
///
/// Nothing is requested until the stream is polled. The stream ends after
/// `total_pages` items; calling `pages` again starts over from page 1.
pub fn pages<'a>(
    api: &'a dyn SearchApi,
    request: SearchRequest,
    total_pages: u32,
) -> impl Stream<Item = AppResult<(u32, ApiResponse)>> + 'a {
    stream::unfold(1u32, move |page| {
        let request = request.clone().page(page);
        async move {
            if page > total_pages {
                return None;
            }
            let fetched = api.search(&request).await.map(|response| (page, response));
            Some((fetched, page + 1))
        }
    })
}
