use crate::error::InkGestError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use inkgest_api_structs::cancel_appointment_reminders::*;
use inkgest_domain::ID;
use inkgest_infra::InkGestContext;

pub const APPOINTMENT_CANCELLED_ERROR: &str = "Appointment cancelled";

pub async fn cancel_appointment_reminders_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<InkGestContext>,
) -> Result<HttpResponse, InkGestError> {
    let usecase = CancelAppointmentRemindersUseCase {
        appointment_id: path_params.appointment_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|cancelled_count| HttpResponse::Ok().json(APIResponse::new(cancelled_count)))
        .map_err(InkGestError::from)
}

/// Flips every unsent reminder of the appointment into a terminal state.
/// Already sent reminders stay untouched, the rows are delivery history.
#[derive(Debug)]
pub struct CancelAppointmentRemindersUseCase {
    pub appointment_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    AppointmentNotFound(ID),
    StorageError,
}

impl From<UseCaseError> for InkGestError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::AppointmentNotFound(appointment_id) => Self::NotFound(format!(
                "The appointment with id: {}, was not found.",
                appointment_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CancelAppointmentRemindersUseCase {
    type Response = i64;

    type Error = UseCaseError;

    const NAME: &'static str = "CancelAppointmentReminders";

    async fn execute(&mut self, ctx: &InkGestContext) -> Result<Self::Response, Self::Error> {
        if ctx
            .repos
            .appointments
            .find(&self.appointment_id)
            .await
            .is_none()
        {
            return Err(UseCaseError::AppointmentNotFound(self.appointment_id.clone()));
        }

        let now = ctx.sys.get_timestamp_millis();
        let res = ctx
            .repos
            .reminders
            .cancel_by_appointment(&self.appointment_id, now, APPOINTMENT_CANCELLED_ERROR)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(res.updated_count)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reminder::schedule_appointment_reminders::{
        test::insert_appointment, ScheduleAppointmentRemindersUseCase,
    };
    use inkgest_infra::setup_context_inmemory;

    #[actix_web::main]
    #[test]
    async fn cancels_unsent_reminders_and_keeps_sent_history() {
        let ctx = setup_context_inmemory();
        let appointment =
            insert_appointment(&ctx, ctx.sys.get_timestamp_millis() + 48 * 60 * 60 * 1000).await;
        let usecase = ScheduleAppointmentRemindersUseCase {
            appointment_id: appointment.id.clone(),
        };
        execute(usecase, &ctx).await.unwrap();

        // Pretend the confirmation reminder already went out
        let mut sent = ctx
            .repos
            .reminders
            .find_by_appointment_and_type(
                &appointment.id,
                inkgest_domain::ReminderType::Confirmation,
            )
            .await
            .unwrap();
        sent.mark_sent(500);
        ctx.repos.reminders.save(&sent).await.unwrap();

        let usecase = CancelAppointmentRemindersUseCase {
            appointment_id: appointment.id.clone(),
        };
        let cancelled_count = execute(usecase, &ctx).await.unwrap();
        assert_eq!(cancelled_count, 2);

        for reminder in ctx.repos.reminders.find_by_appointment(&appointment.id).await {
            assert!(reminder.sent);
            if reminder.id == sent.id {
                assert_eq!(reminder.error, None);
                assert_eq!(reminder.sent_at, Some(500));
            } else {
                assert_eq!(reminder.error.as_deref(), Some("Appointment cancelled"));
            }
        }
    }

    #[actix_web::main]
    #[test]
    async fn rejects_unknown_appointment() {
        let ctx = setup_context_inmemory();
        let usecase = CancelAppointmentRemindersUseCase {
            appointment_id: ID::default(),
        };
        let res = execute(usecase, &ctx).await;
        assert!(matches!(
            res.unwrap_err(),
            UseCaseError::AppointmentNotFound(_)
        ));
    }
}
