use super::IAppointmentRepo;
use crate::repos::shared::query_structs::AppointmentQuery;
use inkgest_domain::{Appointment, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresAppointmentRepo {
    pool: PgPool,
}

impl PostgresAppointmentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AppointmentRaw {
    appointment_uid: Uuid,
    store_uid: Uuid,
    client_uid: Uuid,
    artist_uid: Uuid,
    service_uid: Uuid,
    start_ts: i64,
    end_ts: i64,
    status: String,
    notes: Option<String>,
    cancellation_reason: Option<String>,
    created: i64,
    updated: i64,
}

impl From<AppointmentRaw> for Appointment {
    fn from(e: AppointmentRaw) -> Self {
        Self {
            id: e.appointment_uid.into(),
            store_id: e.store_uid.into(),
            client_id: e.client_uid.into(),
            artist_id: e.artist_uid.into(),
            service_id: e.service_uid.into(),
            start_ts: e.start_ts,
            end_ts: e.end_ts,
            status: e.status.parse().unwrap(),
            notes: e.notes,
            cancellation_reason: e.cancellation_reason,
            created: e.created,
            updated: e.updated,
        }
    }
}

#[async_trait::async_trait]
impl IAppointmentRepo for PostgresAppointmentRepo {
    async fn insert(&self, appointment: &Appointment) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO appointments
            (appointment_uid, store_uid, client_uid, artist_uid, service_uid,
             start_ts, end_ts, status, notes, cancellation_reason, created, updated)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(appointment.id.inner_ref())
        .bind(appointment.store_id.inner_ref())
        .bind(appointment.client_id.inner_ref())
        .bind(appointment.artist_id.inner_ref())
        .bind(appointment.service_id.inner_ref())
        .bind(appointment.start_ts)
        .bind(appointment.end_ts)
        .bind(appointment.status.as_str())
        .bind(&appointment.notes)
        .bind(&appointment.cancellation_reason)
        .bind(appointment.created)
        .bind(appointment.updated)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert appointment: {:?}. DB returned error: {:?}",
                appointment, e
            );
            e
        })?;
        Ok(())
    }

    async fn save(&self, appointment: &Appointment) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE appointments
            SET client_uid = $2,
            artist_uid = $3,
            service_uid = $4,
            start_ts = $5,
            end_ts = $6,
            status = $7,
            notes = $8,
            cancellation_reason = $9,
            updated = $10
            WHERE appointment_uid = $1
            "#,
        )
        .bind(appointment.id.inner_ref())
        .bind(appointment.client_id.inner_ref())
        .bind(appointment.artist_id.inner_ref())
        .bind(appointment.service_id.inner_ref())
        .bind(appointment.start_ts)
        .bind(appointment.end_ts)
        .bind(appointment.status.as_str())
        .bind(&appointment.notes)
        .bind(&appointment.cancellation_reason)
        .bind(appointment.updated)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to save appointment: {:?}. DB returned error: {:?}",
                appointment, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, appointment_id: &ID) -> Option<Appointment> {
        let res: Option<AppointmentRaw> = sqlx::query_as(
            r#"
            SELECT * FROM appointments
            WHERE appointment_uid = $1
            "#,
        )
        .bind(appointment_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or(None);
        res.map(|appointment| appointment.into())
    }

    async fn find_many(&self, appointment_ids: &[ID]) -> anyhow::Result<Vec<Appointment>> {
        let ids: Vec<Uuid> = appointment_ids.iter().map(|id| *id.inner_ref()).collect();
        let appointments: Vec<AppointmentRaw> = sqlx::query_as(
            r#"
            SELECT * FROM appointments
            WHERE appointment_uid = ANY($1)
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(appointments
            .into_iter()
            .map(|appointment| appointment.into())
            .collect())
    }

    async fn find_by_store(&self, query: AppointmentQuery) -> anyhow::Result<Vec<Appointment>> {
        let appointments: Vec<AppointmentRaw> = sqlx::query_as(
            r#"
            SELECT * FROM appointments
            WHERE store_uid = $1
            AND ($2::bigint IS NULL OR start_ts >= $2)
            AND ($3::bigint IS NULL OR start_ts <= $3)
            AND ($4::uuid IS NULL OR artist_uid = $4)
            AND ($5::uuid IS NULL OR client_uid = $5)
            AND ($6::text IS NULL OR status = $6)
            ORDER BY start_ts
            "#,
        )
        .bind(query.store_id.inner_ref())
        .bind(query.start_ts)
        .bind(query.end_ts)
        .bind(query.artist_id.map(|id| *id.inner_ref()))
        .bind(query.client_id.map(|id| *id.inner_ref()))
        .bind(query.status.map(|status| status.as_str().to_string()))
        .fetch_all(&self.pool)
        .await?;
        Ok(appointments
            .into_iter()
            .map(|appointment| appointment.into())
            .collect())
    }
}
