use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceCategory {
    Tattoo,
    Piercing,
    LaserRemoval,
    Consultation,
}

/// A bookable service at a `Store`, e.g. a tattoo session or a piercing.
#[derive(Debug, Clone)]
pub struct ServiceOffering {
    pub id: ID,
    pub store_id: ID,
    pub name: String,
    /// Default duration in millis
    pub duration: i64,
    pub price_cents: i64,
    pub category: ServiceCategory,
}

impl ServiceOffering {
    pub fn new(store_id: ID, name: &str, duration: i64, category: ServiceCategory) -> Self {
        Self {
            id: Default::default(),
            store_id,
            name: name.to_string(),
            duration,
            price_cents: 0,
            category,
        }
    }
}

impl Entity for ServiceOffering {
    fn id(&self) -> &ID {
        &self.id
    }
}
