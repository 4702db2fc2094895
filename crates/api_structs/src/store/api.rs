use crate::dtos::StoreDTO;
use inkgest_domain::{Store, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreResponse {
    pub success: bool,
    pub data: StoreDTO,
}

impl StoreResponse {
    pub fn new(store: Store) -> Self {
        Self {
            success: true,
            data: StoreDTO::new(store),
        }
    }
}

pub mod create_store {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub name: String,
        pub code: String,
        /// IANA timezone name, e.g. "Europe/Madrid"
        pub timezone: Option<String>,
    }

    pub type APIResponse = StoreResponse;
}

pub mod get_store {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub store_id: ID,
    }

    pub type APIResponse = StoreResponse;
}
