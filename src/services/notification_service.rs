use pushover::PushoverClient;

use crate::config::Config;
use crate::domain::Notification;
use crate::errors::{DeliveryError, FeederResult};
use crate::services::traits::Notifier;

pub struct NotificationService {
    client: PushoverClient,
}

impl NotificationService {
    pub fn new(config: &Config) -> FeederResult<Self> {
        let (token, user) = config.credentials()?;
        let client = PushoverClient::new(&config.pushover_url, token, user)?;

        Ok(Self { client })
    }
}

impl Notifier for NotificationService {
    /// Send a notification to Pushover; fields over the API limits are truncated
    fn notify(&self, notification: &Notification) -> Result<(), DeliveryError> {
        self.client
            .send_message(&notification.to_message())
            .map_err(DeliveryError::from)
    }
}

/// Prints what would be sent and reports success without touching the network
#[derive(Debug, Default)]
pub struct DryRunNotifier;

impl Notifier for DryRunNotifier {
    fn notify(&self, notification: &Notification) -> Result<(), DeliveryError> {
        match &notification.link {
            Some(link) => println!("  [DRY RUN] {} ({})", notification.format(), link),
            None => println!("  [DRY RUN] {}", notification.format()),
        }
        Ok(())
    }
}
