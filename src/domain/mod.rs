pub mod feed;
pub mod item;
pub mod notification;

pub use feed::{CheckpointSet, FeedConfig, PendingItem};
pub use item::FeedItem;
pub use notification::Notification;
