use inkgest_domain::{Store, StoreSettings, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StoreDTO {
    pub id: ID,
    pub name: String,
    pub secret_api_key: String,
    pub settings: StoreSettings,
}

impl StoreDTO {
    pub fn new(store: Store) -> Self {
        Self {
            id: store.id.clone(),
            name: store.name,
            secret_api_key: store.secret_api_key,
            settings: store.settings,
        }
    }
}
