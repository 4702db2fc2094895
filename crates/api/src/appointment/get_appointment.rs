use crate::error::InkGestError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use inkgest_api_structs::get_appointment::*;
use inkgest_domain::{Appointment, ID};
use inkgest_infra::InkGestContext;

pub async fn get_appointment_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<InkGestContext>,
) -> Result<HttpResponse, InkGestError> {
    let usecase = GetAppointmentUseCase {
        appointment_id: path_params.appointment_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|appointment| HttpResponse::Ok().json(APIResponse::new(appointment)))
        .map_err(InkGestError::from)
}

#[derive(Debug)]
pub struct GetAppointmentUseCase {
    pub appointment_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for InkGestError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(appointment_id) => Self::NotFound(format!(
                "The appointment with id: {}, was not found.",
                appointment_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetAppointmentUseCase {
    type Response = Appointment;

    type Error = UseCaseError;

    const NAME: &'static str = "GetAppointment";

    async fn execute(&mut self, ctx: &InkGestContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .appointments
            .find(&self.appointment_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.appointment_id.clone()))
    }
}
