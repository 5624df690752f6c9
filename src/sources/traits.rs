use crate::domain::FeedItem;
use crate::errors::FeederResult;

#[cfg_attr(test, mockall::automock)]
pub trait FeedSource: Send + Sync {
    /// Fetch and parse the feed at `url`, returning items in document order
    fn fetch_items(&self, url: &str) -> FeederResult<Vec<FeedItem>>;
}
