//! Polling session: fixed-cadence status fetches while the link is degraded
//!
//! Runs only in fallback mode with an active search. A failed tick publishes
//! nothing and schedules nothing; the next regular tick retries.

use std::sync::Arc;

use tokio::time::interval;
use tracing::{debug, info};

use super::manager::Inner;
use crate::events::{BusEvent, SearchComplete};

/// Poll the status endpoint for one search until it reaches a terminal state
pub(crate) async fn poll_loop(inner: Arc<Inner>, search_id: String) {
    let mut ticker = interval(inner.config.poll_interval);
    // The first tick completes immediately; polling starts one interval later.
    ticker.tick().await;

    loop {
        ticker.tick().await;

        let snapshot = match inner.fetcher.fetch_status(&search_id).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                debug!("status poll for {} failed, retrying next tick: {}", search_id, e);
                continue;
            }
        };

        inner.publish(BusEvent::Progress(snapshot.to_progress())).await;

        if snapshot.is_terminal() {
            info!("search {} finished with status {}", search_id, snapshot.status);
            inner
                .publish(BusEvent::Complete(SearchComplete {
                    search_id: search_id.clone(),
                    result_count: snapshot.result_count(),
                }))
                .await;
            inner.finish_search(&search_id).await;
            return;
        }
    }
}
