use super::IStoreRepo;
use inkgest_domain::{Store, ID};
use serde_json::Value;
use sqlx::{
    types::{Json, Uuid},
    FromRow, PgPool,
};
use tracing::error;

pub struct PostgresStoreRepo {
    pool: PgPool,
}

impl PostgresStoreRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct StoreRaw {
    store_uid: Uuid,
    name: String,
    secret_api_key: String,
    settings: Value,
}

impl From<StoreRaw> for Store {
    fn from(e: StoreRaw) -> Self {
        Self {
            id: e.store_uid.into(),
            name: e.name,
            secret_api_key: e.secret_api_key,
            settings: serde_json::from_value(e.settings).unwrap(),
        }
    }
}

#[async_trait::async_trait]
impl IStoreRepo for PostgresStoreRepo {
    async fn insert(&self, store: &Store) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO stores(store_uid, name, secret_api_key, settings)
            VALUES($1, $2, $3, $4)
            "#,
        )
        .bind(store.id.inner_ref())
        .bind(&store.name)
        .bind(&store.secret_api_key)
        .bind(Json(&store.settings))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert store: {:?}. DB returned error: {:?}",
                store, e
            );
            e
        })?;
        Ok(())
    }

    async fn save(&self, store: &Store) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE stores
            SET name = $2,
            secret_api_key = $3,
            settings = $4
            WHERE store_uid = $1
            "#,
        )
        .bind(store.id.inner_ref())
        .bind(&store.name)
        .bind(&store.secret_api_key)
        .bind(Json(&store.settings))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to save store: {:?}. DB returned error: {:?}",
                store, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, store_id: &ID) -> Option<Store> {
        let res: Option<StoreRaw> = sqlx::query_as(
            r#"
            SELECT * FROM stores
            WHERE store_uid = $1
            "#,
        )
        .bind(store_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or(None);
        res.map(|store| store.into())
    }
}
