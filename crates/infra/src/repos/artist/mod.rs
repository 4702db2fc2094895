mod inmemory;
mod postgres;

pub use inmemory::InMemoryArtistRepo;
use inkgest_domain::{Artist, ID};
pub use postgres::PostgresArtistRepo;

#[async_trait::async_trait]
pub trait IArtistRepo: Send + Sync {
    async fn insert(&self, artist: &Artist) -> anyhow::Result<()>;
    async fn save(&self, artist: &Artist) -> anyhow::Result<()>;
    async fn find(&self, artist_id: &ID) -> Option<Artist>;
}
