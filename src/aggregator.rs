use std::collections::BTreeSet;

use futures::future;
use tracing::{error, info, warn};

use crate::config::FeedConfig;
use crate::fetcher::{FetchError, Fetcher};
use crate::parser::{self, Entry};

/// Terminal state of one source's fetch+parse task.
#[derive(Debug)]
pub enum FetchOutcome {
    Success(Vec<Entry>),
    /// Endpoint returned 404; the source is a prune candidate.
    NotFound,
    /// Transient failure; the source contributes nothing this run but is
    /// not pruned.
    Failed(FetchError),
}

/// Merged result of one aggregation run.
#[derive(Debug, Default)]
pub struct AggregateResult {
    /// All entries from successful sources, sorted by publication time
    /// descending. Entries with no timestamp sort last.
    pub entries: Vec<Entry>,
    /// URLs of sources that returned 404.
    pub prune: BTreeSet<String>,
}

/// Fetch and parse every source concurrently, then merge.
///
/// One task per source, all spawned up front. Each task resolves to a
/// tagged outcome; a failure, timeout, or panic in one task never
/// affects the others. The merge concatenates successful sources in
/// configuration order and stable-sorts by timestamp, so the output is
/// deterministic regardless of completion order.
pub async fn aggregate(fetcher: &Fetcher, feeds: &[FeedConfig]) -> AggregateResult {
    let handles: Vec<_> = feeds
        .iter()
        .map(|feed| {
            let fetcher = fetcher.clone();
            let feed = feed.clone();
            tokio::spawn(async move { fetch_source(&fetcher, &feed).await })
        })
        .collect();

    let outcomes = future::join_all(handles).await;

    let mut result = AggregateResult::default();
    for (feed, joined) in feeds.iter().zip(outcomes) {
        match joined {
            Ok(FetchOutcome::Success(mut entries)) => {
                info!(
                    feed = %feed.name,
                    count = entries.len(),
                    "Fetched feed"
                );
                result.entries.append(&mut entries);
            }
            Ok(FetchOutcome::NotFound) => {
                warn!(feed = %feed.name, url = %feed.url, "Feed returned 404, marking for pruning");
                result.prune.insert(feed.url.clone());
            }
            Ok(FetchOutcome::Failed(e)) => {
                error!(feed = %feed.name, error = %e, "Failed to fetch feed");
            }
            Err(join_err) => {
                error!(feed = %feed.name, error = %join_err, "Feed task panicked");
            }
        }
    }

    // Newest first; None (no timestamp) compares lowest so it lands at
    // the end. Vec::sort_by is stable, preserving config order on ties.
    result.entries.sort_by(|a, b| b.published.cmp(&a.published));

    result
}

async fn fetch_source(fetcher: &Fetcher, feed: &FeedConfig) -> FetchOutcome {
    let content = match fetcher.fetch(&feed.url).await {
        Ok(content) => content,
        Err(FetchError::NotFound) => return FetchOutcome::NotFound,
        Err(e) => return FetchOutcome::Failed(e),
    };

    match parser::parse_entries(content.as_bytes(), &feed.name, &feed.url) {
        Ok(entries) => FetchOutcome::Success(entries),
        Err(e) => FetchOutcome::Failed(FetchError::Parse(e.to_string())),
    }
}
