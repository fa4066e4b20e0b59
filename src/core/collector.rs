use crate::domain::model::{Collection, StopReason};
use crate::domain::normalize::normalize;
use crate::domain::ports::PageSource;
use std::time::Duration;
use tokio::time::Instant;

/// Walks pages from 1 until the source reports the last page, returns an
/// empty page, or fails. A failure ends collection but keeps what was
/// already gathered.
///
/// `delay` is the minimum spacing between the starts of two consecutive
/// requests; the first request is sent immediately.
pub async fn collect_pages<P>(source: &P, delay: Duration) -> Collection
where
    P: PageSource + ?Sized,
{
    let mut records = Vec::new();
    let mut page: u32 = 1;
    let mut pages_fetched: u32 = 0;
    let mut previous_start: Option<Instant> = None;

    let stop_reason = loop {
        if let Some(started) = previous_start {
            tokio::time::sleep_until(started + delay).await;
        }
        previous_start = Some(Instant::now());
        pages_fetched += 1;

        let fetched = match source.fetch_page(page).await {
            Ok(fetched) => fetched,
            Err(e) => {
                tracing::error!("Error fetching page {}: {}", page, e);
                tracing::debug!("💡 {}", e.recovery_suggestion());
                break StopReason::FetchFailed;
            }
        };

        if fetched.items.is_empty() {
            tracing::info!("No more data available or reached the end.");
            break StopReason::Exhausted;
        }

        records.extend(fetched.items.iter().map(normalize));
        tracing::info!(
            "Page {} completed. Total anime collected: {}",
            page,
            records.len()
        );

        if !fetched.has_next_page {
            tracing::info!("Reached the last page.");
            break StopReason::LastPage;
        }

        page += 1;
    };

    Collection {
        records,
        pages_fetched,
        stop_reason,
    }
}
