use super::{FeedConfig, FeedItem};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub feed_name: String,
    pub item_title: String,
    pub link: Option<String>,
}

impl Notification {
    pub fn from_item(feed: &FeedConfig, item: &FeedItem) -> Self {
        Self {
            feed_name: feed.name.clone(),
            item_title: item.title.clone(),
            link: item.link.clone().filter(|l| !l.is_empty()),
        }
    }

    /// Format: "New post to {feedName}: {itemTitle}"
    pub fn format(&self) -> String {
        format!("New post to {}: {}", self.feed_name, self.item_title)
    }

    pub fn to_message(&self) -> pushover::Message {
        let message = pushover::Message::new(self.format());
        match &self.link {
            Some(link) => message.with_link(link, &self.item_title),
            None => message,
        }
    }
}
