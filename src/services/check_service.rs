use log::{info, warn};

use crate::domain::{CheckpointSet, FeedConfig};
use crate::errors::FeederResult;
use crate::services::scanner::{FeedScanner, ScanReport};
use crate::services::traits::Notifier;
use crate::sources::FeedSource;

/// Totals for one pass over every feed
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub feeds_checked: usize,
    pub feeds_failed: usize,
    pub notified: usize,
    pub failed_deliveries: usize,
    pub skipped_items: usize,
}

pub struct CheckService<S: FeedSource, N: Notifier> {
    source: S,
    scanner: FeedScanner<N>,
}

impl<S: FeedSource, N: Notifier> CheckService<S, N> {
    pub fn new(source: S, notifier: N) -> Self {
        Self {
            source,
            scanner: FeedScanner::new(notifier),
        }
    }

    /// Fetch one feed, deliver its new items and advance its checkpoint.
    /// On a fetch error the feed is left untouched.
    pub fn check_feed(&self, feed: &mut FeedConfig) -> FeederResult<ScanReport> {
        let items = self.source.fetch_items(&feed.url)?;
        let report = self.scanner.scan(feed, &items);
        report.apply_to(feed);
        Ok(report)
    }

    /// Check every feed in order; per-feed errors are logged and never escape
    pub fn check_all(&self, checkpoints: &mut CheckpointSet) -> RunSummary {
        let mut summary = RunSummary::default();

        for feed in checkpoints.feeds_mut() {
            info!("Checking {} ({})", feed.name, feed.url);

            match self.check_feed(feed) {
                Ok(report) => {
                    summary.feeds_checked += 1;
                    summary.notified += report.delivered.len();
                    summary.failed_deliveries += report.failures.len();
                    summary.skipped_items += report.skipped;

                    if !report.delivered.is_empty() || !report.failures.is_empty() {
                        println!(
                            "{}: {} notified, {} failed",
                            feed.name,
                            report.delivered.len(),
                            report.failures.len()
                        );
                    }
                }
                Err(e) => {
                    // Log error but continue with other feeds
                    warn!("Error fetching {}: {}", feed.name, e);
                    summary.feeds_failed += 1;
                }
            }
        }

        summary
    }
}
