use super::IConfirmationTokenRepo;
use inkgest_domain::{AppointmentConfirmationToken, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresConfirmationTokenRepo {
    pool: PgPool,
}

impl PostgresConfirmationTokenRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ConfirmationTokenRaw {
    token_uid: Uuid,
    appointment_uid: Uuid,
    token: String,
    confirmed: bool,
    confirmed_at: Option<i64>,
    expires_at: i64,
}

impl From<ConfirmationTokenRaw> for AppointmentConfirmationToken {
    fn from(e: ConfirmationTokenRaw) -> Self {
        Self {
            id: e.token_uid.into(),
            appointment_id: e.appointment_uid.into(),
            token: e.token,
            confirmed: e.confirmed,
            confirmed_at: e.confirmed_at,
            expires_at: e.expires_at,
        }
    }
}

#[async_trait::async_trait]
impl IConfirmationTokenRepo for PostgresConfirmationTokenRepo {
    async fn insert(&self, token: &AppointmentConfirmationToken) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO confirmation_tokens
            (token_uid, appointment_uid, token, confirmed, confirmed_at, expires_at)
            VALUES($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(token.id.inner_ref())
        .bind(token.appointment_id.inner_ref())
        .bind(&token.token)
        .bind(token.confirmed)
        .bind(token.confirmed_at)
        .bind(token.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert confirmation token: {:?}. DB returned error: {:?}",
                token, e
            );
            e
        })?;
        Ok(())
    }

    async fn save(&self, token: &AppointmentConfirmationToken) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE confirmation_tokens
            SET confirmed = $2,
            confirmed_at = $3,
            expires_at = $4
            WHERE token_uid = $1
            "#,
        )
        .bind(token.id.inner_ref())
        .bind(token.confirmed)
        .bind(token.confirmed_at)
        .bind(token.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to save confirmation token: {:?}. DB returned error: {:?}",
                token, e
            );
            e
        })?;
        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> Option<AppointmentConfirmationToken> {
        let res: Option<ConfirmationTokenRaw> = sqlx::query_as(
            r#"
            SELECT * FROM confirmation_tokens
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or(None);
        res.map(|token| token.into())
    }

    async fn find_by_appointment(
        &self,
        appointment_id: &ID,
    ) -> Vec<AppointmentConfirmationToken> {
        let res: Vec<ConfirmationTokenRaw> = sqlx::query_as(
            r#"
            SELECT * FROM confirmation_tokens
            WHERE appointment_uid = $1
            "#,
        )
        .bind(appointment_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default();
        res.into_iter().map(|token| token.into()).collect()
    }
}
