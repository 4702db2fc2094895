use super::{INotificationService, ReminderMessage};
use inkgest_domain::{Channel, CommunicationPreferences, ID};
use reqwest::Client;
use serde::Serialize;
use tracing::error;

/// `INotificationService` backed by an external messaging gateway over
/// its REST api. The gateway keeps the per-client opt-in state and does
/// the actual channel delivery (chat providers, smtp).
pub struct NotificationGateway {
    client: Client,
    base_url: String,
    api_key: String,
}

impl NotificationGateway {
    pub fn new(base_url: String, api_key: String) -> Self {
        let client = Client::new();

        Self {
            client,
            base_url,
            api_key,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendMessageRequest<'a> {
    client_id: &'a ID,
    channel: Channel,
    message: &'a ReminderMessage,
}

#[async_trait::async_trait]
impl INotificationService for NotificationGateway {
    async fn get_communication_preferences(
        &self,
        client_id: &ID,
    ) -> anyhow::Result<CommunicationPreferences> {
        match self
            .client
            .get(&format!(
                "{}/clients/{}/preferences",
                self.base_url, client_id
            ))
            .header("x-api-key", &self.api_key)
            .send()
            .await
        {
            Ok(res) => res
                .json::<CommunicationPreferences>()
                .await
                .map_err(|e| {
                    error!(
                        "[Unexpected Response] Messaging gateway preferences error. Error message: {:?}",
                        e
                    );
                    anyhow::Error::new(e)
                }),
            Err(e) => {
                error!(
                    "[Network Error] Messaging gateway preferences error. Error message: {:?}",
                    e
                );
                Err(anyhow::Error::new(e))
            }
        }
    }

    async fn send_channel_message(
        &self,
        client_id: &ID,
        channel: Channel,
        message: &ReminderMessage,
    ) -> anyhow::Result<()> {
        let body = SendMessageRequest {
            client_id,
            channel,
            message,
        };
        match self
            .client
            .post(&format!("{}/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
        {
            Ok(res) if res.status().is_success() => Ok(()),
            Ok(res) => {
                error!(
                    "[Unexpected Response] Messaging gateway send error. Status: {}",
                    res.status()
                );
                Err(anyhow::anyhow!(
                    "Messaging gateway rejected message with status: {}",
                    res.status()
                ))
            }
            Err(e) => {
                error!(
                    "[Network Error] Messaging gateway send error. Error message: {:?}",
                    e
                );
                Err(anyhow::Error::new(e))
            }
        }
    }
}
