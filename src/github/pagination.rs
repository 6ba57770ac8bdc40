//! Page-based aggregation of remote collections.
//!
//! GitHub list endpoints return at most one page per request. [`drain_pages`]
//! repeatedly invokes a page-scoped listing operation and concatenates the
//! results, so callers never need to know a collection's size in advance.

/// Items requested per page for pull-request-scoped listings.
pub const PER_PAGE: u8 = 100;

/// Aggregates a paginated collection into a single ordered sequence.
///
/// Pages are 1-indexed and requested strictly sequentially, so at most one
/// request is in flight and cross-page ordering matches the remote service.
/// Fetching stops once a page returns fewer items than `per_page`; when the
/// collection size is an exact multiple of `per_page` this deliberately costs
/// one extra request for the terminal empty page, keeping observable request
/// counts identical to the established behaviour.
///
/// `per_page` must be at least 1.
///
/// # Errors
///
/// Propagates the first error returned by `fetch`; items from earlier pages
/// are discarded.
pub async fn drain_pages<T, E, F>(per_page: u8, mut fetch: F) -> Result<Vec<T>, E>
where
    F: AsyncFnMut(u32, u8) -> Result<Vec<T>, E>,
{
    debug_assert!(per_page > 0, "per_page must be at least 1");

    let mut items = Vec::new();
    let mut page = 1_u32;

    loop {
        let batch = fetch(page, per_page).await?;
        let is_last = batch.len() < usize::from(per_page);
        items.extend(batch);
        if is_last {
            return Ok(items);
        }
        page += 1;
    }
}
