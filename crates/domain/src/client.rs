use crate::shared::entity::{Entity, ID};
use chrono::{Datelike, TimeZone, Utc};
use serde::{Deserialize, Serialize};

const AGE_OF_MAJORITY: i32 = 18;

/// A `Client` is a customer of a `Store`. Intake data is collected once
/// and referenced by every `Appointment` the client books.
#[derive(Debug, Clone)]
pub struct Client {
    pub id: ID,
    pub store_id: ID,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Birth date in millis since epoch. Needed for the guardian rule.
    pub birth_date: Option<i64>,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
}

impl Client {
    pub fn new(store_id: ID, name: &str) -> Self {
        Self {
            id: Default::default(),
            store_id,
            name: name.to_string(),
            email: None,
            phone: None,
            birth_date: None,
            guardian_name: None,
            guardian_phone: None,
        }
    }

    /// Whether the client is younger than the age of majority at the
    /// given timestamp. `None` when no birth date is on record.
    pub fn is_minor(&self, now: i64) -> Option<bool> {
        let birth_date = self.birth_date?;
        let birth = Utc.timestamp_millis(birth_date).date();
        let today = Utc.timestamp_millis(now).date();
        let mut age = today.year() - birth.year();
        if (today.month(), today.day()) < (birth.month(), birth.day()) {
            age -= 1;
        }
        Some(age < AGE_OF_MAJORITY)
    }

    pub fn has_guardian_info(&self) -> bool {
        self.guardian_name.is_some() && self.guardian_phone.is_some()
    }
}

impl Entity for Client {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// A notification delivery medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Channel {
    ChatMessage,
    Email,
}

/// How a `Client` wants to be reached about upcoming appointments.
/// Resolved through the notification sender, not stored on the client
/// record itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationPreferences {
    pub reminders_enabled: bool,
    pub preferred_channel: Channel,
    pub chat_message_enabled: bool,
    pub email_enabled: bool,
    pub language: String,
}

impl CommunicationPreferences {
    pub fn channel_enabled(&self, channel: Channel) -> bool {
        match channel {
            Channel::ChatMessage => self.chat_message_enabled,
            Channel::Email => self.email_enabled,
        }
    }

    /// The enabled channels in delivery order: the preferred channel
    /// first, then the remaining enabled ones as fallback.
    pub fn delivery_channels(&self) -> Vec<Channel> {
        let mut channels = Vec::new();
        if self.channel_enabled(self.preferred_channel) {
            channels.push(self.preferred_channel);
        }
        for channel in [Channel::ChatMessage, Channel::Email].iter() {
            if *channel != self.preferred_channel && self.channel_enabled(*channel) {
                channels.push(*channel);
            }
        }
        channels
    }
}

impl Default for CommunicationPreferences {
    fn default() -> Self {
        Self {
            reminders_enabled: true,
            preferred_channel: Channel::ChatMessage,
            chat_message_enabled: true,
            email_enabled: true,
            language: "en".into(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn client_born_at(birth_date: i64) -> Client {
        let mut client = Client::new(Default::default(), "Iris");
        client.birth_date = Some(birth_date);
        client
    }

    #[test]
    fn it_detects_minor_clients() {
        // Sun Feb 21 2021 00:00:00 GMT
        let now = 1613862000000;
        // Born 2010-01-01
        let minor = client_born_at(1262304000000);
        assert_eq!(minor.is_minor(now), Some(true));
        // Born 1990-01-01
        let adult = client_born_at(631152000000);
        assert_eq!(adult.is_minor(now), Some(false));

        let unknown = Client::new(Default::default(), "Iris");
        assert_eq!(unknown.is_minor(now), None);
    }

    #[test]
    fn it_prefers_the_preferred_channel() {
        let prefs = CommunicationPreferences::default();
        assert_eq!(
            prefs.delivery_channels(),
            vec![Channel::ChatMessage, Channel::Email]
        );

        let mut prefs = CommunicationPreferences::default();
        prefs.preferred_channel = Channel::Email;
        assert_eq!(
            prefs.delivery_channels(),
            vec![Channel::Email, Channel::ChatMessage]
        );
    }

    #[test]
    fn it_excludes_disabled_channels() {
        let mut prefs = CommunicationPreferences::default();
        prefs.chat_message_enabled = false;
        assert_eq!(prefs.delivery_channels(), vec![Channel::Email]);

        prefs.email_enabled = false;
        assert!(prefs.delivery_channels().is_empty());
    }
}
