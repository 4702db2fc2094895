use super::IReminderRepo;
use crate::repos::shared::repo::UpdateResult;
use inkgest_domain::{ReminderSchedule, ReminderType, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_uid: Uuid,
    appointment_uid: Uuid,
    store_uid: Uuid,
    reminder_type: String,
    scheduled_for: i64,
    sent: bool,
    sent_at: Option<i64>,
    error: Option<String>,
    retry_count: i64,
}

impl From<ReminderRaw> for ReminderSchedule {
    fn from(e: ReminderRaw) -> Self {
        Self {
            id: e.reminder_uid.into(),
            appointment_id: e.appointment_uid.into(),
            store_id: e.store_uid.into(),
            reminder_type: e.reminder_type.parse().unwrap(),
            scheduled_for: e.scheduled_for,
            sent: e.sent,
            sent_at: e.sent_at,
            error: e.error,
            retry_count: e.retry_count,
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn insert(&self, reminder: &ReminderSchedule) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminder_schedules
            (reminder_uid, appointment_uid, store_uid, reminder_type,
             scheduled_for, sent, sent_at, error, retry_count)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(reminder.appointment_id.inner_ref())
        .bind(reminder.store_id.inner_ref())
        .bind(reminder.reminder_type.as_str())
        .bind(reminder.scheduled_for)
        .bind(reminder.sent)
        .bind(reminder.sent_at)
        .bind(&reminder.error)
        .bind(reminder.retry_count)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert reminder: {:?}. DB returned error: {:?}",
                reminder, e
            );
            e
        })?;
        Ok(())
    }

    async fn save(&self, reminder: &ReminderSchedule) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE reminder_schedules
            SET scheduled_for = $2,
            sent = $3,
            sent_at = $4,
            error = $5,
            retry_count = $6
            WHERE reminder_uid = $1
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(reminder.scheduled_for)
        .bind(reminder.sent)
        .bind(reminder.sent_at)
        .bind(&reminder.error)
        .bind(reminder.retry_count)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to save reminder: {:?}. DB returned error: {:?}",
                reminder, e
            );
            e
        })?;
        Ok(())
    }

    async fn find_by_appointment_and_type(
        &self,
        appointment_id: &ID,
        reminder_type: ReminderType,
    ) -> Option<ReminderSchedule> {
        let res: Option<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminder_schedules
            WHERE appointment_uid = $1 AND reminder_type = $2
            "#,
        )
        .bind(appointment_id.inner_ref())
        .bind(reminder_type.as_str())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or(None);
        res.map(|reminder| reminder.into())
    }

    async fn find_by_appointment(&self, appointment_id: &ID) -> Vec<ReminderSchedule> {
        let res: Vec<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminder_schedules
            WHERE appointment_uid = $1
            "#,
        )
        .bind(appointment_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default();
        res.into_iter().map(|reminder| reminder.into()).collect()
    }

    async fn find_due(&self, before_inc: i64) -> anyhow::Result<Vec<ReminderSchedule>> {
        let reminders: Vec<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminder_schedules
            WHERE sent = FALSE AND scheduled_for <= $1
            ORDER BY scheduled_for
            "#,
        )
        .bind(before_inc)
        .fetch_all(&self.pool)
        .await?;
        Ok(reminders.into_iter().map(|reminder| reminder.into()).collect())
    }

    async fn find_by_store_in_range(
        &self,
        store_id: &ID,
        start_ts: i64,
        end_ts: i64,
    ) -> anyhow::Result<Vec<ReminderSchedule>> {
        let reminders: Vec<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminder_schedules
            WHERE store_uid = $1 AND scheduled_for >= $2 AND scheduled_for <= $3
            "#,
        )
        .bind(store_id.inner_ref())
        .bind(start_ts)
        .bind(end_ts)
        .fetch_all(&self.pool)
        .await?;
        Ok(reminders.into_iter().map(|reminder| reminder.into()).collect())
    }

    async fn cancel_by_appointment(
        &self,
        appointment_id: &ID,
        now: i64,
        error_message: &str,
    ) -> anyhow::Result<UpdateResult> {
        let res = sqlx::query(
            r#"
            UPDATE reminder_schedules
            SET sent = TRUE,
            sent_at = $2,
            error = $3
            WHERE appointment_uid = $1 AND sent = FALSE
            "#,
        )
        .bind(appointment_id.inner_ref())
        .bind(now)
        .bind(error_message)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to cancel reminders for appointment: {}. DB returned error: {:?}",
                appointment_id, e
            );
            e
        })?;
        Ok(UpdateResult {
            updated_count: res.rows_affected() as i64,
        })
    }
}
