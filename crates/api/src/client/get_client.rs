use crate::error::InkGestError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use inkgest_api_structs::get_client::*;
use inkgest_domain::{Client, ID};
use inkgest_infra::InkGestContext;

pub async fn get_client_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<InkGestContext>,
) -> Result<HttpResponse, InkGestError> {
    let usecase = GetClientUseCase {
        client_id: path_params.client_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|client| HttpResponse::Ok().json(APIResponse::new(client)))
        .map_err(InkGestError::from)
}

#[derive(Debug)]
pub struct GetClientUseCase {
    pub client_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for InkGestError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(client_id) => {
                Self::NotFound(format!("The client with id: {}, was not found.", client_id))
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetClientUseCase {
    type Response = Client;

    type Error = UseCaseError;

    const NAME: &'static str = "GetClient";

    async fn execute(&mut self, ctx: &InkGestContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .clients
            .find(&self.client_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.client_id.clone()))
    }
}
