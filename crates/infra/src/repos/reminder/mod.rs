mod inmemory;
mod postgres;

use crate::repos::shared::repo::UpdateResult;
pub use inmemory::InMemoryReminderRepo;
use inkgest_domain::{ReminderSchedule, ReminderType, ID};
pub use postgres::PostgresReminderRepo;

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &ReminderSchedule) -> anyhow::Result<()>;
    async fn save(&self, reminder: &ReminderSchedule) -> anyhow::Result<()>;
    async fn find_by_appointment_and_type(
        &self,
        appointment_id: &ID,
        reminder_type: ReminderType,
    ) -> Option<ReminderSchedule>;
    async fn find_by_appointment(&self, appointment_id: &ID) -> Vec<ReminderSchedule>;
    /// All unsent reminders that are due at or before the given timestamp
    async fn find_due(&self, before_inc: i64) -> anyhow::Result<Vec<ReminderSchedule>>;
    async fn find_by_store_in_range(
        &self,
        store_id: &ID,
        start_ts: i64,
        end_ts: i64,
    ) -> anyhow::Result<Vec<ReminderSchedule>>;
    /// Flips every unsent reminder of the appointment to a terminal sent
    /// state carrying the given error message. Sent rows are untouched.
    async fn cancel_by_appointment(
        &self,
        appointment_id: &ID,
        now: i64,
        error_message: &str,
    ) -> anyhow::Result<UpdateResult>;
}
