use crate::shared::entity::{Entity, ID};
use inkgest_utils::create_random_secret;
use serde::{Deserialize, Serialize};

const API_KEY_LEN: usize = 30;

/// A `Store` is a single studio and acts as a namespace for all other
/// resources, which lets multiple studios share one instance of this
/// server without interfering with each other.
#[derive(Debug, Clone)]
pub struct Store {
    pub id: ID,
    pub name: String,
    pub secret_api_key: String,
    pub settings: StoreSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSettings {
    /// Timezone used when formatting appointment times in outbound
    /// reminder messages
    pub timezone: chrono_tz::Tz,
}

impl StoreSettings {
    /// Renders a millisecond timestamp as a local date time string for
    /// this `Store`
    pub fn format_timestamp(&self, timestamp_millis: i64) -> String {
        use chrono::TimeZone;
        self.timezone
            .timestamp_millis(timestamp_millis)
            .format("%Y-%m-%d %H:%M")
            .to_string()
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::UTC,
        }
    }
}

impl Store {
    pub fn new(name: &str) -> Self {
        Self {
            id: Default::default(),
            name: name.to_string(),
            secret_api_key: Self::generate_secret_api_key(),
            settings: Default::default(),
        }
    }

    pub fn generate_secret_api_key() -> String {
        let rand_secret = create_random_secret(API_KEY_LEN);
        format!("sk_{}", rand_secret)
    }
}

impl Entity for Store {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_creates_store_with_api_key() {
        let store = Store::new("Black Lotus Ink");
        assert!(store.secret_api_key.starts_with("sk_"));
        assert!(store.secret_api_key.len() > API_KEY_LEN);
    }

    #[test]
    fn it_formats_timestamps_in_store_timezone() {
        let mut settings = StoreSettings::default();
        settings.timezone = chrono_tz::Europe::Madrid;
        // Sun Feb 21 2021 00:00:00 GMT+0100
        assert_eq!(settings.format_timestamp(1613862000000), "2021-02-21 00:00");
    }
}
