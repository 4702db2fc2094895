use crate::error::InkGestError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use inkgest_api_structs::get_appointments::*;
use inkgest_domain::{Appointment, AppointmentStatus, ID};
use inkgest_infra::{AppointmentQuery, InkGestContext};

pub async fn get_appointments_controller(
    query_params: web::Query<QueryParams>,
    ctx: web::Data<InkGestContext>,
) -> Result<HttpResponse, InkGestError> {
    let query = query_params.0;
    let usecase = GetAppointmentsUseCase {
        store_id: query.store_id,
        start_date: query.start_date,
        end_date: query.end_date,
        artist_id: query.artist_id,
        client_id: query.client_id,
        status: query.status,
    };

    execute(usecase, &ctx)
        .await
        .map(|appointments| HttpResponse::Ok().json(APIResponse::new(appointments)))
        .map_err(InkGestError::from)
}

#[derive(Debug)]
pub struct GetAppointmentsUseCase {
    pub store_id: ID,
    pub start_date: Option<i64>,
    pub end_date: Option<i64>,
    pub artist_id: Option<ID>,
    pub client_id: Option<ID>,
    pub status: Option<AppointmentStatus>,
}

#[derive(Debug)]
pub enum UseCaseError {
    StoreNotFound(ID),
    InvalidTimespan,
    StorageError,
}

impl From<UseCaseError> for InkGestError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StoreNotFound(store_id) => {
                Self::NotFound(format!("The store with id: {}, was not found.", store_id))
            }
            UseCaseError::InvalidTimespan => {
                Self::BadClientData("The end date has to come after the start date".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetAppointmentsUseCase {
    type Response = Vec<Appointment>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetAppointments";

    async fn execute(&mut self, ctx: &InkGestContext) -> Result<Self::Response, Self::Error> {
        if let (Some(start_date), Some(end_date)) = (self.start_date, self.end_date) {
            if end_date < start_date {
                return Err(UseCaseError::InvalidTimespan);
            }
        }
        if ctx.repos.stores.find(&self.store_id).await.is_none() {
            return Err(UseCaseError::StoreNotFound(self.store_id.clone()));
        }

        ctx.repos
            .appointments
            .find_by_store(AppointmentQuery {
                store_id: self.store_id.clone(),
                start_ts: self.start_date,
                end_ts: self.end_date,
                artist_id: self.artist_id.clone(),
                client_id: self.client_id.clone(),
                status: self.status,
            })
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::appointment::create_appointment::test::{setup, usecase_factory};

    #[actix_web::main]
    #[test]
    async fn filters_by_status_and_timespan() {
        let test_ctx = setup().await;
        let now = test_ctx.ctx.sys.get_timestamp_millis();

        for offset_hours in [24, 48, 72].iter() {
            let usecase = usecase_factory(&test_ctx, now + offset_hours * 60 * 60 * 1000);
            execute(usecase, &test_ctx.ctx).await.unwrap();
        }

        let usecase = GetAppointmentsUseCase {
            store_id: test_ctx.store.id.clone(),
            start_date: None,
            end_date: None,
            artist_id: None,
            client_id: None,
            status: None,
        };
        let all = execute(usecase, &test_ctx.ctx).await.unwrap();
        assert_eq!(all.len(), 3);

        // Only the first two fall within the queried window
        let usecase = GetAppointmentsUseCase {
            store_id: test_ctx.store.id.clone(),
            start_date: Some(now),
            end_date: Some(now + 49 * 60 * 60 * 1000),
            artist_id: None,
            client_id: None,
            status: None,
        };
        let in_window = execute(usecase, &test_ctx.ctx).await.unwrap();
        assert_eq!(in_window.len(), 2);

        let usecase = GetAppointmentsUseCase {
            store_id: test_ctx.store.id.clone(),
            start_date: None,
            end_date: None,
            artist_id: None,
            client_id: None,
            status: Some(AppointmentStatus::Cancelled),
        };
        let cancelled = execute(usecase, &test_ctx.ctx).await.unwrap();
        assert!(cancelled.is_empty());
    }
}
