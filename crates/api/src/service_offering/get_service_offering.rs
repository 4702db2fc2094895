use crate::error::InkGestError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use inkgest_api_structs::get_service_offering::*;
use inkgest_domain::{ServiceOffering, ID};
use inkgest_infra::InkGestContext;

pub async fn get_service_offering_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<InkGestContext>,
) -> Result<HttpResponse, InkGestError> {
    let usecase = GetServiceOfferingUseCase {
        service_id: path_params.service_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|service| HttpResponse::Ok().json(APIResponse::new(service)))
        .map_err(InkGestError::from)
}

#[derive(Debug)]
pub struct GetServiceOfferingUseCase {
    pub service_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for InkGestError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(service_id) => Self::NotFound(format!(
                "The service offering with id: {}, was not found.",
                service_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetServiceOfferingUseCase {
    type Response = ServiceOffering;

    type Error = UseCaseError;

    const NAME: &'static str = "GetServiceOffering";

    async fn execute(&mut self, ctx: &InkGestContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .service_offerings
            .find(&self.service_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.service_id.clone()))
    }
}
