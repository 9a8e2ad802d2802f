use nido_domain::{ContactDetails, ID};
use serde::Serialize;
use tracing::warn;

/// Notification content delivered for a due reminder. The same payload goes
/// to the push provider and to the in-app broadcast.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PushPayload {
    pub reminder_id: ID,
    pub owner_id: ID,
    pub title: String,
    pub body: String,
    pub contact: Option<ContactDetails>,
}

#[derive(Debug)]
pub struct PushError {
    pub message: String,
    /// The provider rejected the device token itself. Callers should report
    /// this upward so the stored token can be replaced.
    pub invalid_token: bool,
}

#[async_trait::async_trait]
pub trait IPushService: Send + Sync {
    async fn send(&self, device_token: &str, payload: &PushPayload) -> Result<(), PushError>;
}

/// Used when no push provider is configured. Deliveries still count as
/// dispatched so the in-app broadcast and trigger bookkeeping behave the
/// same with and without a provider.
pub struct DiscardPushService;

#[async_trait::async_trait]
impl IPushService for DiscardPushService {
    async fn send(&self, _device_token: &str, payload: &PushPayload) -> Result<(), PushError> {
        warn!(
            "No push provider configured, skipping push for reminder: {}",
            payload.reminder_id
        );
        Ok(())
    }
}
