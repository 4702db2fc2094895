use inkgest_domain::{Artist, ServiceCategory, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ArtistDTO {
    pub id: ID,
    pub store_id: ID,
    pub name: String,
    pub email: Option<String>,
    pub commission_rate: i64,
    pub specialties: Vec<ServiceCategory>,
}

impl ArtistDTO {
    pub fn new(artist: Artist) -> Self {
        Self {
            id: artist.id.clone(),
            store_id: artist.store_id.clone(),
            name: artist.name,
            email: artist.email,
            commission_rate: artist.commission_rate,
            specialties: artist.specialties,
        }
    }
}
