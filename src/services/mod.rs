pub mod traits;
pub mod scanner;
pub mod check_service;
pub mod notification_service;

pub use traits::Notifier;
pub use scanner::{DeliveryFailure, FeedScanner, ScanReport};
pub use check_service::{CheckService, RunSummary};
pub use notification_service::{DryRunNotifier, NotificationService};
