use super::subscribers::CancelRemindersOnAppointmentCancelled;
use crate::error::InkGestError;
use crate::shared::usecase::{execute, Subscriber, UseCase};
use actix_web::{web, HttpResponse};
use inkgest_api_structs::cancel_appointment::*;
use inkgest_domain::{Appointment, AppointmentStatus, ID};
use inkgest_infra::InkGestContext;

pub async fn cancel_appointment_controller(
    path_params: web::Path<PathParams>,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<InkGestContext>,
) -> Result<HttpResponse, InkGestError> {
    let usecase = CancelAppointmentUseCase {
        appointment_id: path_params.appointment_id.clone(),
        reason: query_params.0.reason,
    };

    execute(usecase, &ctx)
        .await
        .map(|appointment| HttpResponse::Ok().json(APIResponse::new(appointment)))
        .map_err(InkGestError::from)
}

/// Cancellation is terminal for the appointment. The row is kept with
/// its reason, and the cancel subscriber closes out every pending
/// reminder.
#[derive(Debug)]
pub struct CancelAppointmentUseCase {
    pub appointment_id: ID,
    pub reason: Option<String>,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    AlreadyCancelled(ID),
    StorageError,
}

impl From<UseCaseError> for InkGestError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(appointment_id) => Self::NotFound(format!(
                "The appointment with id: {}, was not found.",
                appointment_id
            )),
            UseCaseError::AlreadyCancelled(appointment_id) => Self::Conflict(format!(
                "The appointment with id: {}, is already cancelled.",
                appointment_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CancelAppointmentUseCase {
    type Response = Appointment;

    type Error = UseCaseError;

    const NAME: &'static str = "CancelAppointment";

    async fn execute(&mut self, ctx: &InkGestContext) -> Result<Self::Response, Self::Error> {
        let mut appointment = ctx
            .repos
            .appointments
            .find(&self.appointment_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.appointment_id.clone()))?;

        if appointment.status == AppointmentStatus::Cancelled {
            return Err(UseCaseError::AlreadyCancelled(appointment.id));
        }

        appointment.status = AppointmentStatus::Cancelled;
        appointment.cancellation_reason = self.reason.clone();
        appointment.updated = ctx.sys.get_timestamp_millis();

        ctx.repos
            .appointments
            .save(&appointment)
            .await
            .map(|_| appointment)
            .map_err(|_| UseCaseError::StorageError)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(CancelRemindersOnAppointmentCancelled)]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::appointment::create_appointment::test::{setup, usecase_factory};

    #[actix_web::main]
    #[test]
    async fn cancelling_marks_appointment_and_closes_reminders() {
        let test_ctx = setup().await;
        let start_ts = test_ctx.ctx.sys.get_timestamp_millis() + 48 * 60 * 60 * 1000;
        let appointment = execute(usecase_factory(&test_ctx, start_ts), &test_ctx.ctx)
            .await
            .unwrap();

        let usecase = CancelAppointmentUseCase {
            appointment_id: appointment.id.clone(),
            reason: Some("Client request".into()),
        };
        let cancelled = execute(usecase, &test_ctx.ctx).await.unwrap();
        assert_eq!(cancelled.status, AppointmentStatus::Cancelled);
        assert_eq!(cancelled.cancellation_reason.as_deref(), Some("Client request"));

        for reminder in test_ctx
            .ctx
            .repos
            .reminders
            .find_by_appointment(&appointment.id)
            .await
        {
            assert!(reminder.sent);
            assert_eq!(reminder.error.as_deref(), Some("Appointment cancelled"));
        }
    }

    #[actix_web::main]
    #[test]
    async fn cancelling_twice_conflicts() {
        let test_ctx = setup().await;
        let start_ts = test_ctx.ctx.sys.get_timestamp_millis() + 48 * 60 * 60 * 1000;
        let appointment = execute(usecase_factory(&test_ctx, start_ts), &test_ctx.ctx)
            .await
            .unwrap();

        let usecase = CancelAppointmentUseCase {
            appointment_id: appointment.id.clone(),
            reason: None,
        };
        execute(usecase, &test_ctx.ctx).await.unwrap();

        let usecase = CancelAppointmentUseCase {
            appointment_id: appointment.id.clone(),
            reason: None,
        };
        let res = execute(usecase, &test_ctx.ctx).await;
        assert!(matches!(
            res.unwrap_err(),
            UseCaseError::AlreadyCancelled(_)
        ));
    }
}
