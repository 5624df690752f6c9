use chrono::{DateTime, Utc};
use log::{debug, error, warn};

use crate::domain::{FeedConfig, FeedItem, Notification, PendingItem};
use crate::errors::DeliveryError;
use crate::services::traits::Notifier;

#[derive(Debug)]
pub struct DeliveryFailure {
    pub item_title: String,
    pub published: DateTime<Utc>,
    pub error: DeliveryError,
}

/// Outcome of scanning one feed
#[derive(Debug)]
pub struct ScanReport {
    pub delivered: Vec<Notification>,
    pub failures: Vec<DeliveryFailure>,
    /// Items without a usable published time
    pub skipped: usize,
    pub watermark: DateTime<Utc>,
    pub pending: Vec<PendingItem>,
}

impl ScanReport {
    /// Write the new watermark and retry list back into the feed
    pub fn apply_to(&self, feed: &mut FeedConfig) {
        feed.last_seen = self.watermark;
        feed.pending = self.pending.clone();
    }
}

pub struct FeedScanner<N: Notifier> {
    notifier: N,
}

impl<N: Notifier> FeedScanner<N> {
    pub fn new(notifier: N) -> Self {
        Self { notifier }
    }

    /// Deliver every candidate item and compute the feed's next watermark.
    ///
    /// The watermark only moves to the published time of a delivered item.
    /// Failed items at or below the final watermark are returned as pending so
    /// the next run retries them; failed items above it are candidates anyway.
    pub fn scan(&self, feed: &FeedConfig, items: &[FeedItem]) -> ScanReport {
        let mut watermark = feed.last_seen;
        let mut delivered = Vec::new();
        let mut failures = Vec::new();
        let mut failed_items: Vec<PendingItem> = Vec::new();
        let mut skipped = 0;

        for item in items {
            let Some(published) = item.published else {
                warn!(
                    "[{}] Skipping '{}': no published date",
                    feed.name, item.title
                );
                skipped += 1;
                continue;
            };

            if published <= feed.last_seen && !feed.is_pending(item) {
                continue;
            }

            let notification = Notification::from_item(feed, item);
            match self.notifier.notify(&notification) {
                Ok(()) => {
                    debug!("[{}] Notified '{}'", feed.name, item.title);
                    watermark = watermark.max(published);
                    delivered.push(notification);
                }
                Err(e) => {
                    error!(
                        "[{}] Delivery failed for '{}': {}",
                        feed.name, item.title, e
                    );
                    let pending = PendingItem::new(published, item.link.clone());
                    if !failed_items.contains(&pending) {
                        failed_items.push(pending);
                    }
                    failures.push(DeliveryFailure {
                        item_title: item.title.clone(),
                        published,
                        error: e,
                    });
                }
            }
        }

        let pending = failed_items
            .into_iter()
            .filter(|p| p.published <= watermark)
            .collect();

        ScanReport {
            delivered,
            failures,
            skipped,
            watermark,
            pending,
        }
    }
}
