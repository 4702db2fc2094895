use crate::error::InkGestError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use inkgest_api_structs::get_store::*;
use inkgest_domain::{Store, ID};
use inkgest_infra::InkGestContext;

pub async fn get_store_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<InkGestContext>,
) -> Result<HttpResponse, InkGestError> {
    let usecase = GetStoreUseCase {
        store_id: path_params.store_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|store| HttpResponse::Ok().json(APIResponse::new(store)))
        .map_err(InkGestError::from)
}

#[derive(Debug)]
pub struct GetStoreUseCase {
    pub store_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for InkGestError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(store_id) => {
                Self::NotFound(format!("The store with id: {}, was not found.", store_id))
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetStoreUseCase {
    type Response = Store;

    type Error = UseCaseError;

    const NAME: &'static str = "GetStore";

    async fn execute(&mut self, ctx: &InkGestContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .stores
            .find(&self.store_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.store_id.clone()))
    }
}
