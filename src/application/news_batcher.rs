use crate::domain::entities::token_record::TokenRecord;
use crate::domain::ports::news_summarizer::NewsSummarizer;
use chrono::{DateTime, Duration, Utc};
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Substituted for every record of a batch whose news call failed.
pub const NEWS_FALLBACK: &str = "no news available";
/// Tokens per news call.
pub const NEWS_BATCH_SIZE: usize = 3;

const CACHE_TTL_MINUTES: i64 = 15;
const CACHE_CAPACITY: usize = 64;

struct CachedSummary {
    summary: String,
    cached_at: DateTime<Utc>,
}

/// Bounded, expiring summary cache keyed by the batch's sorted symbol set.
/// Owned by the batcher, not by process-wide state.
struct NewsCache {
    entries: Mutex<HashMap<Vec<String>, CachedSummary>>,
    ttl: Duration,
    capacity: usize,
}

impl NewsCache {
    fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            capacity,
        }
    }

    fn key(symbols: &[String]) -> Vec<String> {
        let mut key = symbols.to_vec();
        key.sort();
        key
    }

    fn get(&self, symbols: &[String]) -> Option<String> {
        let key = Self::key(symbols);
        let mut entries = self.entries.lock().ok()?;
        match entries.get(&key) {
            Some(entry) if entry.cached_at + self.ttl > Utc::now() => {
                Some(entry.summary.clone())
            }
            Some(_) => {
                entries.remove(&key);
                None
            }
            None => None,
        }
    }

    fn put(&self, symbols: &[String], summary: &str) {
        let key = Self::key(symbols);
        if let Ok(mut entries) = self.entries.lock() {
            if !entries.contains_key(&key) && entries.len() >= self.capacity {
                let oldest = entries
                    .iter()
                    .min_by_key(|(_, entry)| entry.cached_at)
                    .map(|(k, _)| k.clone());
                if let Some(oldest) = oldest {
                    entries.remove(&oldest);
                }
            }
            entries.insert(
                key,
                CachedSummary {
                    summary: summary.to_string(),
                    cached_at: Utc::now(),
                },
            );
        }
    }
}

/// Partitions the record list into contiguous batches of at most
/// `NEWS_BATCH_SIZE`, resolves one summary per batch (cache first, then the
/// provider) and writes that same summary onto every record of the batch.
/// News is deliberately batch-granular: tokens sharing a batch share a
/// summary string.
pub struct NewsBatcher {
    news: Arc<dyn NewsSummarizer>,
    cache: NewsCache,
    batch_size: usize,
}

impl NewsBatcher {
    pub fn new(news: Arc<dyn NewsSummarizer>) -> Self {
        Self {
            news,
            cache: NewsCache::new(Duration::minutes(CACHE_TTL_MINUTES), CACHE_CAPACITY),
            batch_size: NEWS_BATCH_SIZE,
        }
    }

    pub async fn run(&self, tokens: &mut [TokenRecord]) {
        if tokens.is_empty() {
            return;
        }

        let batches: Vec<Vec<String>> = tokens
            .chunks(self.batch_size)
            .map(|batch| batch.iter().map(|t| t.symbol.clone()).collect())
            .collect();

        let summaries =
            join_all(batches.iter().map(|symbols| self.batch_summary(symbols))).await;

        for (batch, summary) in tokens.chunks_mut(self.batch_size).zip(summaries) {
            for record in batch {
                record.news_summary = Some(summary.clone());
            }
        }
    }

    async fn batch_summary(&self, symbols: &[String]) -> String {
        if let Some(cached) = self.cache.get(symbols) {
            debug!(symbols = ?symbols, "news cache hit");
            return cached;
        }
        match self.news.summarize(symbols).await {
            Ok(summary) => {
                // Fallbacks are never cached, so a later run can retry
                self.cache.put(symbols, &summary);
                summary
            }
            Err(e) => {
                warn!(symbols = ?symbols, error = %e, "news summarization failed");
                NEWS_FALLBACK.to_string()
            }
        }
    }
}
