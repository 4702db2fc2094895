use super::subscribers::ScheduleRemindersOnAppointmentCreated;
use crate::error::{FieldError, InkGestError};
use crate::shared::usecase::{execute, Subscriber, UseCase};
use actix_web::{web, HttpResponse};
use inkgest_api_structs::create_appointment::*;
use inkgest_domain::{Appointment, AppointmentStatus, ID};
use inkgest_infra::InkGestContext;

pub async fn create_appointment_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<InkGestContext>,
) -> Result<HttpResponse, InkGestError> {
    let body = body.0;
    let usecase = CreateAppointmentUseCase {
        store_id: body.store_id,
        client_id: body.client_id,
        artist_id: body.artist_id,
        service_id: body.service_id,
        start_ts: body.start_ts,
        end_ts: body.end_ts,
        notes: body.notes,
    };

    execute(usecase, &ctx)
        .await
        .map(|appointment| HttpResponse::Created().json(APIResponse::new(appointment)))
        .map_err(InkGestError::from)
}

#[derive(Debug)]
pub struct CreateAppointmentUseCase {
    pub store_id: ID,
    pub client_id: ID,
    pub artist_id: ID,
    pub service_id: ID,
    pub start_ts: i64,
    pub end_ts: i64,
    pub notes: Option<String>,
}

#[derive(Debug)]
pub enum UseCaseError {
    StoreNotFound(ID),
    ClientNotFound(ID),
    ArtistNotFound(ID),
    ServiceNotFound(ID),
    InvalidAppointment(Vec<FieldError>),
    StorageError,
}

impl From<UseCaseError> for InkGestError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StoreNotFound(id) => {
                Self::NotFound(format!("The store with id: {}, was not found.", id))
            }
            UseCaseError::ClientNotFound(id) => {
                Self::NotFound(format!("The client with id: {}, was not found.", id))
            }
            UseCaseError::ArtistNotFound(id) => {
                Self::NotFound(format!("The artist with id: {}, was not found.", id))
            }
            UseCaseError::ServiceNotFound(id) => Self::NotFound(format!(
                "The service offering with id: {}, was not found.",
                id
            )),
            UseCaseError::InvalidAppointment(errors) => Self::Validation(errors),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateAppointmentUseCase {
    type Response = Appointment;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateAppointment";

    async fn execute(&mut self, ctx: &InkGestContext) -> Result<Self::Response, Self::Error> {
        if ctx.repos.stores.find(&self.store_id).await.is_none() {
            return Err(UseCaseError::StoreNotFound(self.store_id.clone()));
        }
        let client = ctx
            .repos
            .clients
            .find(&self.client_id)
            .await
            .ok_or_else(|| UseCaseError::ClientNotFound(self.client_id.clone()))?;
        let artist = ctx
            .repos
            .artists
            .find(&self.artist_id)
            .await
            .ok_or_else(|| UseCaseError::ArtistNotFound(self.artist_id.clone()))?;
        let service = ctx
            .repos
            .service_offerings
            .find(&self.service_id)
            .await
            .ok_or_else(|| UseCaseError::ServiceNotFound(self.service_id.clone()))?;

        let mut errors = Vec::new();
        if self.end_ts <= self.start_ts {
            errors.push(FieldError::new(
                "endTs",
                "The appointment end has to come after its start",
            ));
        }
        if client.store_id != self.store_id {
            errors.push(FieldError::new(
                "clientId",
                "The client does not belong to the store",
            ));
        }
        if artist.store_id != self.store_id {
            errors.push(FieldError::new(
                "artistId",
                "The artist does not belong to the store",
            ));
        }
        if service.store_id != self.store_id {
            errors.push(FieldError::new(
                "serviceId",
                "The service offering does not belong to the store",
            ));
        }
        if !errors.is_empty() {
            return Err(UseCaseError::InvalidAppointment(errors));
        }

        let appointment = Appointment {
            id: Default::default(),
            store_id: self.store_id.clone(),
            client_id: self.client_id.clone(),
            artist_id: self.artist_id.clone(),
            service_id: self.service_id.clone(),
            start_ts: self.start_ts,
            end_ts: self.end_ts,
            status: AppointmentStatus::Scheduled,
            notes: self.notes.clone(),
            cancellation_reason: None,
            created: ctx.sys.get_timestamp_millis(),
            updated: ctx.sys.get_timestamp_millis(),
        };

        ctx.repos
            .appointments
            .insert(&appointment)
            .await
            .map(|_| appointment)
            .map_err(|_| UseCaseError::StorageError)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(ScheduleRemindersOnAppointmentCreated)]
    }
}
