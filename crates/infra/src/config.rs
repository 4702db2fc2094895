use inkgest_utils::create_random_secret;
use tracing::{info, log::warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Secret code required to create new `Store`s
    pub create_store_secret_code: String,
    /// Port for the application to run on
    pub port: usize,
    /// Base url of the external messaging gateway used to resolve client
    /// communication preferences and deliver reminders. When unset, the
    /// dispatch pass records every delivery attempt as failed.
    pub notify_gateway_url: Option<String>,
    /// Api key for the messaging gateway
    pub notify_gateway_key: Option<String>,
    /// Public base url used when building confirmation links handed to
    /// clients
    pub confirmation_base_url: String,
}

impl Config {
    pub fn new() -> Self {
        let create_store_secret_code = match std::env::var("CREATE_STORE_SECRET_CODE") {
            Ok(code) => code,
            Err(_) => {
                info!("Did not find CREATE_STORE_SECRET_CODE environment variable. Going to create one.");
                let code = create_random_secret(16);
                info!(
                    "Secret code for creating stores was generated and set to: {}",
                    code
                );
                code
            }
        };
        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or(default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };
        let notify_gateway_url = std::env::var("NOTIFY_GATEWAY_URL").ok();
        let notify_gateway_key = std::env::var("NOTIFY_GATEWAY_KEY").ok();
        if notify_gateway_url.is_none() {
            warn!("NOTIFY_GATEWAY_URL is not set. Reminder delivery will fail until it is configured.");
        }
        let confirmation_base_url = std::env::var("CONFIRMATION_BASE_URL")
            .unwrap_or_else(|_| format!("http://localhost:{}", port));

        Self {
            create_store_secret_code,
            port,
            notify_gateway_url,
            notify_gateway_key,
            confirmation_base_url,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
