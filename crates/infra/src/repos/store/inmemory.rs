use super::IStoreRepo;
use crate::repos::shared::inmemory_repo::*;
use inkgest_domain::{Store, ID};

pub struct InMemoryStoreRepo {
    stores: std::sync::Mutex<Vec<Store>>,
}

impl InMemoryStoreRepo {
    pub fn new() -> Self {
        Self {
            stores: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IStoreRepo for InMemoryStoreRepo {
    async fn insert(&self, store: &Store) -> anyhow::Result<()> {
        insert(store, &self.stores);
        Ok(())
    }

    async fn save(&self, store: &Store) -> anyhow::Result<()> {
        save(store, &self.stores);
        Ok(())
    }

    async fn find(&self, store_id: &ID) -> Option<Store> {
        find(store_id, &self.stores)
    }
}
