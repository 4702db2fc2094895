use crate::dtos::ClientDTO;
use inkgest_domain::{Client, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientResponse {
    pub success: bool,
    pub data: ClientDTO,
}

impl ClientResponse {
    pub fn new(client: Client) -> Self {
        Self {
            success: true,
            data: ClientDTO::new(client),
        }
    }
}

pub mod create_client {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub store_id: ID,
        pub name: String,
        pub email: Option<String>,
        pub phone: Option<String>,
        pub birth_date: Option<i64>,
        pub guardian_name: Option<String>,
        pub guardian_phone: Option<String>,
    }

    pub type APIResponse = ClientResponse;
}

pub mod get_client {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub client_id: ID,
    }

    pub type APIResponse = ClientResponse;
}
