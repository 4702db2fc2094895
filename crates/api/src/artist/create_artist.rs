use crate::error::{FieldError, InkGestError};
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use inkgest_api_structs::create_artist::*;
use inkgest_domain::{Artist, ServiceCategory, ID};
use inkgest_infra::InkGestContext;

pub async fn create_artist_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<InkGestContext>,
) -> Result<HttpResponse, InkGestError> {
    let body = body.0;
    let usecase = CreateArtistUseCase {
        store_id: body.store_id,
        name: body.name,
        email: body.email,
        commission_rate: body.commission_rate,
        specialties: body.specialties.unwrap_or_default(),
    };

    execute(usecase, &ctx)
        .await
        .map(|artist| HttpResponse::Created().json(APIResponse::new(artist)))
        .map_err(InkGestError::from)
}

#[derive(Debug)]
pub struct CreateArtistUseCase {
    pub store_id: ID,
    pub name: String,
    pub email: Option<String>,
    pub commission_rate: i64,
    pub specialties: Vec<ServiceCategory>,
}

#[derive(Debug)]
pub enum UseCaseError {
    StoreNotFound(ID),
    InvalidArtist(Vec<FieldError>),
    StorageError,
}

impl From<UseCaseError> for InkGestError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StoreNotFound(store_id) => {
                Self::NotFound(format!("The store with id: {}, was not found.", store_id))
            }
            UseCaseError::InvalidArtist(errors) => Self::Validation(errors),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateArtistUseCase {
    type Response = Artist;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateArtist";

    async fn execute(&mut self, ctx: &InkGestContext) -> Result<Self::Response, Self::Error> {
        if ctx.repos.stores.find(&self.store_id).await.is_none() {
            return Err(UseCaseError::StoreNotFound(self.store_id.clone()));
        }

        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(FieldError::new("name", "Name must not be empty"));
        }
        if !Artist::valid_commission_rate(self.commission_rate) {
            errors.push(FieldError::new(
                "commissionRate",
                "Commission rate must be between 0 and 100",
            ));
        }
        if !errors.is_empty() {
            return Err(UseCaseError::InvalidArtist(errors));
        }

        let mut artist = Artist::new(self.store_id.clone(), &self.name, self.commission_rate);
        artist.email = self.email.clone();
        artist.specialties = self.specialties.clone();

        ctx.repos
            .artists
            .insert(&artist)
            .await
            .map(|_| artist)
            .map_err(|_| UseCaseError::StorageError)
    }
}
