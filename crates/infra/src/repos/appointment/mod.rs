mod inmemory;
mod postgres;

use crate::repos::shared::query_structs::AppointmentQuery;
pub use inmemory::InMemoryAppointmentRepo;
use inkgest_domain::{Appointment, ID};
pub use postgres::PostgresAppointmentRepo;

#[async_trait::async_trait]
pub trait IAppointmentRepo: Send + Sync {
    async fn insert(&self, appointment: &Appointment) -> anyhow::Result<()>;
    async fn save(&self, appointment: &Appointment) -> anyhow::Result<()>;
    async fn find(&self, appointment_id: &ID) -> Option<Appointment>;
    async fn find_many(&self, appointment_ids: &[ID]) -> anyhow::Result<Vec<Appointment>>;
    async fn find_by_store(&self, query: AppointmentQuery) -> anyhow::Result<Vec<Appointment>>;
}
