use super::IServiceOfferingRepo;
use crate::repos::shared::inmemory_repo::*;
use inkgest_domain::{ServiceOffering, ID};

pub struct InMemoryServiceOfferingRepo {
    services: std::sync::Mutex<Vec<ServiceOffering>>,
}

impl InMemoryServiceOfferingRepo {
    pub fn new() -> Self {
        Self {
            services: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IServiceOfferingRepo for InMemoryServiceOfferingRepo {
    async fn insert(&self, service: &ServiceOffering) -> anyhow::Result<()> {
        insert(service, &self.services);
        Ok(())
    }

    async fn save(&self, service: &ServiceOffering) -> anyhow::Result<()> {
        save(service, &self.services);
        Ok(())
    }

    async fn find(&self, service_id: &ID) -> Option<ServiceOffering> {
        find(service_id, &self.services)
    }

    async fn find_many(&self, service_ids: &[ID]) -> anyhow::Result<Vec<ServiceOffering>> {
        let res = find_by(&self.services, |service| service_ids.contains(&service.id));
        Ok(res)
    }
}
