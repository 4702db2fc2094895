use crate::error::InkGestError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use inkgest_api_structs::get_artist::*;
use inkgest_domain::{Artist, ID};
use inkgest_infra::InkGestContext;

pub async fn get_artist_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<InkGestContext>,
) -> Result<HttpResponse, InkGestError> {
    let usecase = GetArtistUseCase {
        artist_id: path_params.artist_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|artist| HttpResponse::Ok().json(APIResponse::new(artist)))
        .map_err(InkGestError::from)
}

#[derive(Debug)]
pub struct GetArtistUseCase {
    pub artist_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for InkGestError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(artist_id) => {
                Self::NotFound(format!("The artist with id: {}, was not found.", artist_id))
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetArtistUseCase {
    type Response = Artist;

    type Error = UseCaseError;

    const NAME: &'static str = "GetArtist";

    async fn execute(&mut self, ctx: &InkGestContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .artists
            .find(&self.artist_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.artist_id.clone()))
    }
}
