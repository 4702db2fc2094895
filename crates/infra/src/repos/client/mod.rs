mod inmemory;
mod postgres;

pub use inmemory::InMemoryClientRepo;
use inkgest_domain::{Client, ID};
pub use postgres::PostgresClientRepo;

#[async_trait::async_trait]
pub trait IClientRepo: Send + Sync {
    async fn insert(&self, client: &Client) -> anyhow::Result<()>;
    async fn save(&self, client: &Client) -> anyhow::Result<()>;
    async fn find(&self, client_id: &ID) -> Option<Client>;
    async fn find_many(&self, client_ids: &[ID]) -> anyhow::Result<Vec<Client>>;
}
