use crate::domain::Notification;
use crate::errors::DeliveryError;

#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    /// Deliver one notification; exactly one outbound call per invocation
    fn notify(&self, notification: &Notification) -> Result<(), DeliveryError>;
}

impl<T: Notifier + ?Sized> Notifier for Box<T> {
    fn notify(&self, notification: &Notification) -> Result<(), DeliveryError> {
        (**self).notify(notification)
    }
}
