use inkgest_domain::{ServiceCategory, ServiceOffering, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOfferingDTO {
    pub id: ID,
    pub store_id: ID,
    pub name: String,
    pub duration: i64,
    pub price_cents: i64,
    pub category: ServiceCategory,
}

impl ServiceOfferingDTO {
    pub fn new(service: ServiceOffering) -> Self {
        Self {
            id: service.id.clone(),
            store_id: service.store_id.clone(),
            name: service.name,
            duration: service.duration,
            price_cents: service.price_cents,
            category: service.category,
        }
    }
}
