use super::{INotificationService, ReminderMessage};
use inkgest_domain::{Channel, CommunicationPreferences, ID};
use std::collections::HashMap;
use std::sync::Mutex;

/// A delivery recorded by the inmemory notification service
#[derive(Debug, Clone)]
pub struct SentMessage {
    pub client_id: ID,
    pub channel: Channel,
    pub message: ReminderMessage,
}

/// Inmemory `INotificationService` used when testing. Preferences are
/// registered per client and individual channels can be told to fail to
/// exercise fallback and retry behavior.
pub struct InMemoryNotificationService {
    preferences: Mutex<HashMap<ID, CommunicationPreferences>>,
    failing_channels: Mutex<Vec<Channel>>,
    pub sent: Mutex<Vec<SentMessage>>,
}

impl InMemoryNotificationService {
    pub fn new() -> Self {
        Self {
            preferences: Mutex::new(HashMap::new()),
            failing_channels: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn set_preferences(&self, client_id: ID, preferences: CommunicationPreferences) {
        self.preferences
            .lock()
            .unwrap()
            .insert(client_id, preferences);
    }

    pub fn fail_channel(&self, channel: Channel) {
        self.failing_channels.lock().unwrap().push(channel);
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl Default for InMemoryNotificationService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl INotificationService for InMemoryNotificationService {
    async fn get_communication_preferences(
        &self,
        client_id: &ID,
    ) -> anyhow::Result<CommunicationPreferences> {
        Ok(self
            .preferences
            .lock()
            .unwrap()
            .get(client_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn send_channel_message(
        &self,
        client_id: &ID,
        channel: Channel,
        message: &ReminderMessage,
    ) -> anyhow::Result<()> {
        if self.failing_channels.lock().unwrap().contains(&channel) {
            return Err(anyhow::anyhow!(
                "Channel {:?} rejected the message",
                channel
            ));
        }
        self.sent.lock().unwrap().push(SentMessage {
            client_id: client_id.clone(),
            channel,
            message: message.clone(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn message_factory() -> ReminderMessage {
        ReminderMessage {
            appointment_id: Default::default(),
            client_name: "Iris".into(),
            artist_name: "Nico".into(),
            service_name: "Septum piercing".into(),
            starts_at: "2021-02-21 10:00".into(),
            language: "en".into(),
            confirmation_url: None,
        }
    }

    #[tokio::test]
    async fn unknown_clients_get_default_preferences() {
        let service = InMemoryNotificationService::new();
        let preferences = service
            .get_communication_preferences(&ID::default())
            .await
            .unwrap();
        assert!(preferences.reminders_enabled);
    }

    #[tokio::test]
    async fn failing_channels_reject_sends() {
        let service = InMemoryNotificationService::new();
        service.fail_channel(Channel::ChatMessage);

        let client_id = ID::default();
        assert!(service
            .send_channel_message(&client_id, Channel::ChatMessage, &message_factory())
            .await
            .is_err());
        assert!(service
            .send_channel_message(&client_id, Channel::Email, &message_factory())
            .await
            .is_ok());
        assert_eq!(service.sent_count(), 1);
    }
}
