use crate::dtos::ArtistDTO;
use inkgest_domain::{Artist, ServiceCategory, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistResponse {
    pub success: bool,
    pub data: ArtistDTO,
}

impl ArtistResponse {
    pub fn new(artist: Artist) -> Self {
        Self {
            success: true,
            data: ArtistDTO::new(artist),
        }
    }
}

pub mod create_artist {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub store_id: ID,
        pub name: String,
        pub email: Option<String>,
        pub commission_rate: i64,
        pub specialties: Option<Vec<ServiceCategory>>,
    }

    pub type APIResponse = ArtistResponse;
}

pub mod get_artist {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub artist_id: ID,
    }

    pub type APIResponse = ArtistResponse;
}
