use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::FeedItem;

/// An item that failed delivery while sitting at or below its feed's watermark
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingItem {
    pub published: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl PendingItem {
    pub fn new(published: DateTime<Utc>, link: Option<String>) -> Self {
        Self { published, link }
    }

    pub fn matches(&self, item: &FeedItem) -> bool {
        item.published == Some(self.published) && item.link == self.link
    }
}

/// One tracked feed and its watermark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedConfig {
    pub name: String,
    pub url: String,
    pub last_seen: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pending: Vec<PendingItem>,
}

impl FeedConfig {
    pub fn new(name: String, url: String, last_seen: DateTime<Utc>) -> Self {
        Self {
            name,
            url,
            last_seen,
            pending: Vec::new(),
        }
    }

    pub fn is_pending(&self, item: &FeedItem) -> bool {
        self.pending.iter().any(|p| p.matches(item))
    }
}

/// Ordered list of every tracked feed; persisted as a plain JSON array
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckpointSet {
    feeds: Vec<FeedConfig>,
}

impl CheckpointSet {
    pub fn new(feeds: Vec<FeedConfig>) -> Self {
        Self { feeds }
    }

    pub fn feeds(&self) -> &[FeedConfig] {
        &self.feeds
    }

    pub fn feeds_mut(&mut self) -> &mut [FeedConfig] {
        &mut self.feeds
    }

    pub fn push(&mut self, feed: FeedConfig) {
        self.feeds.push(feed);
    }

    pub fn contains_url(&self, url: &str) -> bool {
        self.feeds.iter().any(|f| f.url == url)
    }

    pub fn len(&self) -> usize {
        self.feeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feeds.is_empty()
    }
}
