use crate::domain::model::QueryDescriptor;
use crate::domain::ports::PageSource;
use crate::utils::error::Result;
use serde::de::DeserializeOwned;

/// Fetches every page of `query` in ascending order and concatenates the records.
///
/// Page 1 decides how many pages there are. Any failed page aborts the whole
/// fetch and nothing collected so far is returned.
pub async fn fetch_all<T, S>(source: &S, query: &QueryDescriptor) -> Result<Vec<T>>
where
    T: DeserializeOwned + Send + 'static,
    S: PageSource,
{
    let first = source.fetch_page::<T>(query, 1).await?;
    let total_pages = first.total_pages;
    tracing::debug!(
        "Page 1/{} returned {} records (reported count {})",
        total_pages.max(1),
        first.data.len(),
        first.count
    );

    let mut records = first.data;

    for page in 2..=total_pages {
        let envelope = source.fetch_page::<T>(query, page).await?;
        if envelope.total_pages != total_pages {
            tracing::debug!(
                "Page {} reports total_pages={}, keeping {}",
                page,
                envelope.total_pages,
                total_pages
            );
        }
        tracing::debug!(
            "Page {}/{} returned {} records",
            page,
            total_pages,
            envelope.data.len()
        );
        records.extend(envelope.data);
    }

    Ok(records)
}
