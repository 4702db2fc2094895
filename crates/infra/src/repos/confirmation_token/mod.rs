mod inmemory;
mod postgres;

pub use inmemory::InMemoryConfirmationTokenRepo;
use inkgest_domain::{AppointmentConfirmationToken, ID};
pub use postgres::PostgresConfirmationTokenRepo;

#[async_trait::async_trait]
pub trait IConfirmationTokenRepo: Send + Sync {
    async fn insert(&self, token: &AppointmentConfirmationToken) -> anyhow::Result<()>;
    async fn save(&self, token: &AppointmentConfirmationToken) -> anyhow::Result<()>;
    async fn find_by_token(&self, token: &str) -> Option<AppointmentConfirmationToken>;
    async fn find_by_appointment(&self, appointment_id: &ID)
        -> Vec<AppointmentConfirmationToken>;
}
