mod inmemory;
mod postgres;

pub use inmemory::InMemoryStoreRepo;
use inkgest_domain::{Store, ID};
pub use postgres::PostgresStoreRepo;

#[async_trait::async_trait]
pub trait IStoreRepo: Send + Sync {
    async fn insert(&self, store: &Store) -> anyhow::Result<()>;
    async fn save(&self, store: &Store) -> anyhow::Result<()>;
    async fn find(&self, store_id: &ID) -> Option<Store>;
}
