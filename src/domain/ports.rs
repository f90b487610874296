use crate::domain::model::Notification;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Delivery boundary. Implementations own transport concerns; the exchange
/// only hands over finished messages.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, sender: &str, notification: &Notification) -> Result<()>;
}

pub trait MailSettings: Send + Sync {
    fn sender(&self) -> &str;
    fn outbox_dir(&self) -> &str;
}
