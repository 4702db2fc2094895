mod inmemory;
mod postgres;

pub use inmemory::InMemoryServiceOfferingRepo;
use inkgest_domain::{ServiceOffering, ID};
pub use postgres::PostgresServiceOfferingRepo;

#[async_trait::async_trait]
pub trait IServiceOfferingRepo: Send + Sync {
    async fn insert(&self, service: &ServiceOffering) -> anyhow::Result<()>;
    async fn save(&self, service: &ServiceOffering) -> anyhow::Result<()>;
    async fn find(&self, service_id: &ID) -> Option<ServiceOffering>;
    async fn find_many(&self, service_ids: &[ID]) -> anyhow::Result<Vec<ServiceOffering>>;
}
