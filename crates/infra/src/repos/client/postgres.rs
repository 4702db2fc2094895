use super::IClientRepo;
use inkgest_domain::{Client, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresClientRepo {
    pool: PgPool,
}

impl PostgresClientRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ClientRaw {
    client_uid: Uuid,
    store_uid: Uuid,
    name: String,
    email: Option<String>,
    phone: Option<String>,
    birth_date: Option<i64>,
    guardian_name: Option<String>,
    guardian_phone: Option<String>,
}

impl From<ClientRaw> for Client {
    fn from(e: ClientRaw) -> Self {
        Self {
            id: e.client_uid.into(),
            store_id: e.store_uid.into(),
            name: e.name,
            email: e.email,
            phone: e.phone,
            birth_date: e.birth_date,
            guardian_name: e.guardian_name,
            guardian_phone: e.guardian_phone,
        }
    }
}

#[async_trait::async_trait]
impl IClientRepo for PostgresClientRepo {
    async fn insert(&self, client: &Client) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO clients
            (client_uid, store_uid, name, email, phone, birth_date, guardian_name, guardian_phone)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(client.id.inner_ref())
        .bind(client.store_id.inner_ref())
        .bind(&client.name)
        .bind(&client.email)
        .bind(&client.phone)
        .bind(client.birth_date)
        .bind(&client.guardian_name)
        .bind(&client.guardian_phone)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert client: {:?}. DB returned error: {:?}",
                client, e
            );
            e
        })?;
        Ok(())
    }

    async fn save(&self, client: &Client) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE clients
            SET name = $3,
            email = $4,
            phone = $5,
            birth_date = $6,
            guardian_name = $7,
            guardian_phone = $8
            WHERE client_uid = $1 AND store_uid = $2
            "#,
        )
        .bind(client.id.inner_ref())
        .bind(client.store_id.inner_ref())
        .bind(&client.name)
        .bind(&client.email)
        .bind(&client.phone)
        .bind(client.birth_date)
        .bind(&client.guardian_name)
        .bind(&client.guardian_phone)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to save client: {:?}. DB returned error: {:?}",
                client, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, client_id: &ID) -> Option<Client> {
        let res: Option<ClientRaw> = sqlx::query_as(
            r#"
            SELECT * FROM clients
            WHERE client_uid = $1
            "#,
        )
        .bind(client_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or(None);
        res.map(|client| client.into())
    }

    async fn find_many(&self, client_ids: &[ID]) -> anyhow::Result<Vec<Client>> {
        let ids: Vec<Uuid> = client_ids.iter().map(|id| *id.inner_ref()).collect();
        let clients: Vec<ClientRaw> = sqlx::query_as(
            r#"
            SELECT * FROM clients
            WHERE client_uid = ANY($1)
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(clients.into_iter().map(|client| client.into()).collect())
    }
}
