use crate::dtos::ServiceOfferingDTO;
use inkgest_domain::{ServiceCategory, ServiceOffering, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOfferingResponse {
    pub success: bool,
    pub data: ServiceOfferingDTO,
}

impl ServiceOfferingResponse {
    pub fn new(service: ServiceOffering) -> Self {
        Self {
            success: true,
            data: ServiceOfferingDTO::new(service),
        }
    }
}

pub mod create_service_offering {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub store_id: ID,
        pub name: String,
        pub duration: i64,
        pub price_cents: Option<i64>,
        pub category: ServiceCategory,
    }

    pub type APIResponse = ServiceOfferingResponse;
}

pub mod get_service_offering {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub service_id: ID,
    }

    pub type APIResponse = ServiceOfferingResponse;
}
