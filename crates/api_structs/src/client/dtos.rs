use inkgest_domain::{Client, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ClientDTO {
    pub id: ID,
    pub store_id: ID,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<i64>,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
}

impl ClientDTO {
    pub fn new(client: Client) -> Self {
        Self {
            id: client.id.clone(),
            store_id: client.store_id.clone(),
            name: client.name,
            email: client.email,
            phone: client.phone,
            birth_date: client.birth_date,
            guardian_name: client.guardian_name,
            guardian_phone: client.guardian_phone,
        }
    }
}
