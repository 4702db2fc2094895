mod gateway;
mod inmemory;

pub use gateway::NotificationGateway;
use inkgest_domain::{Channel, CommunicationPreferences, ID};
pub use inmemory::{InMemoryNotificationService, SentMessage};
use serde::Serialize;

/// Payload handed to the messaging gateway for one reminder delivery.
/// The gateway owns template rendering per channel; this is the data it
/// renders from.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderMessage {
    pub appointment_id: ID,
    pub client_name: String,
    pub artist_name: String,
    pub service_name: String,
    /// Appointment start rendered in the store's timezone
    pub starts_at: String,
    /// Preferred language of the client, e.g. "en" or "es"
    pub language: String,
    /// Only set for confirmation reminders
    pub confirmation_url: Option<String>,
}

/// The external messaging provider. Resolves how a client wants to be
/// reached and delivers messages over a concrete channel.
#[async_trait::async_trait]
pub trait INotificationService: Send + Sync {
    async fn get_communication_preferences(
        &self,
        client_id: &ID,
    ) -> anyhow::Result<CommunicationPreferences>;

    async fn send_channel_message(
        &self,
        client_id: &ID,
        channel: Channel,
        message: &ReminderMessage,
    ) -> anyhow::Result<()>;
}
