use super::IServiceOfferingRepo;
use inkgest_domain::{ServiceOffering, ID};
use serde_json::Value;
use sqlx::{
    types::{Json, Uuid},
    FromRow, PgPool,
};
use tracing::error;

pub struct PostgresServiceOfferingRepo {
    pool: PgPool,
}

impl PostgresServiceOfferingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ServiceOfferingRaw {
    service_uid: Uuid,
    store_uid: Uuid,
    name: String,
    duration: i64,
    price_cents: i64,
    category: Value,
}

impl From<ServiceOfferingRaw> for ServiceOffering {
    fn from(e: ServiceOfferingRaw) -> Self {
        Self {
            id: e.service_uid.into(),
            store_id: e.store_uid.into(),
            name: e.name,
            duration: e.duration,
            price_cents: e.price_cents,
            category: serde_json::from_value(e.category).unwrap(),
        }
    }
}

#[async_trait::async_trait]
impl IServiceOfferingRepo for PostgresServiceOfferingRepo {
    async fn insert(&self, service: &ServiceOffering) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO service_offerings
            (service_uid, store_uid, name, duration, price_cents, category)
            VALUES($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(service.id.inner_ref())
        .bind(service.store_id.inner_ref())
        .bind(&service.name)
        .bind(service.duration)
        .bind(service.price_cents)
        .bind(Json(&service.category))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert service offering: {:?}. DB returned error: {:?}",
                service, e
            );
            e
        })?;
        Ok(())
    }

    async fn save(&self, service: &ServiceOffering) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE service_offerings
            SET name = $3,
            duration = $4,
            price_cents = $5,
            category = $6
            WHERE service_uid = $1 AND store_uid = $2
            "#,
        )
        .bind(service.id.inner_ref())
        .bind(service.store_id.inner_ref())
        .bind(&service.name)
        .bind(service.duration)
        .bind(service.price_cents)
        .bind(Json(&service.category))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to save service offering: {:?}. DB returned error: {:?}",
                service, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, service_id: &ID) -> Option<ServiceOffering> {
        let res: Option<ServiceOfferingRaw> = sqlx::query_as(
            r#"
            SELECT * FROM service_offerings
            WHERE service_uid = $1
            "#,
        )
        .bind(service_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or(None);
        res.map(|service| service.into())
    }

    async fn find_many(&self, service_ids: &[ID]) -> anyhow::Result<Vec<ServiceOffering>> {
        let ids: Vec<Uuid> = service_ids.iter().map(|id| *id.inner_ref()).collect();
        let services: Vec<ServiceOfferingRaw> = sqlx::query_as(
            r#"
            SELECT * FROM service_offerings
            WHERE service_uid = ANY($1)
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(services.into_iter().map(|service| service.into()).collect())
    }
}
