use super::subscribers::SyncRemindersOnAppointmentUpdated;
use crate::error::{FieldError, InkGestError};
use crate::shared::usecase::{execute, Subscriber, UseCase};
use actix_web::{web, HttpResponse};
use inkgest_api_structs::update_appointment::*;
use inkgest_domain::{Appointment, AppointmentStatus, ID};
use inkgest_infra::InkGestContext;

pub async fn update_appointment_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<InkGestContext>,
) -> Result<HttpResponse, InkGestError> {
    let body = body.0;
    let usecase = UpdateAppointmentUseCase {
        appointment_id: path_params.appointment_id.clone(),
        artist_id: body.artist_id,
        service_id: body.service_id,
        start_ts: body.start_ts,
        end_ts: body.end_ts,
        status: body.status,
        notes: body.notes,
    };

    execute(usecase, &ctx)
        .await
        .map(|updated| HttpResponse::Ok().json(APIResponse::new(updated.appointment)))
        .map_err(InkGestError::from)
}

#[derive(Debug)]
pub struct UpdateAppointmentUseCase {
    pub appointment_id: ID,
    pub artist_id: Option<ID>,
    pub service_id: Option<ID>,
    pub start_ts: Option<i64>,
    pub end_ts: Option<i64>,
    pub status: Option<AppointmentStatus>,
    pub notes: Option<String>,
}

/// The update response remembers whether the appointment was moved in
/// time so the reminder sync subscriber only re-targets reminders when
/// it has to.
#[derive(Debug)]
pub struct UpdatedAppointment {
    pub appointment: Appointment,
    pub start_changed: bool,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    ArtistNotFound(ID),
    ServiceNotFound(ID),
    InvalidAppointment(Vec<FieldError>),
    StorageError,
}

impl From<UseCaseError> for InkGestError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(appointment_id) => Self::NotFound(format!(
                "The appointment with id: {}, was not found.",
                appointment_id
            )),
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
impl UseCase for UpdateAppointmentUseCase {
    type Response = UpdatedAppointment;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateAppointment";

    async fn execute(&mut self, ctx: &InkGestContext) -> Result<Self::Response, Self::Error> {
        let mut appointment = ctx
            .repos
            .appointments
            .find(&self.appointment_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.appointment_id.clone()))?;

        if let Some(artist_id) = &self.artist_id {
            ctx.repos
                .artists
                .find(artist_id)
                .await
                .ok_or_else(|| UseCaseError::ArtistNotFound(artist_id.clone()))?;
            appointment.artist_id = artist_id.clone();
        }
        if let Some(service_id) = &self.service_id {
            ctx.repos
                .service_offerings
                .find(service_id)
                .await
                .ok_or_else(|| UseCaseError::ServiceNotFound(service_id.clone()))?;
            appointment.service_id = service_id.clone();
        }

        let old_start_ts = appointment.start_ts;
        if let Some(start_ts) = self.start_ts {
            appointment.start_ts = start_ts;
        }
        if let Some(end_ts) = self.end_ts {
            appointment.end_ts = end_ts;
        }
        if let Some(status) = self.status {
            appointment.status = status;
        }
        if let Some(notes) = &self.notes {
            appointment.notes = Some(notes.clone());
        }

        if appointment.end_ts <= appointment.start_ts {
            return Err(UseCaseError::InvalidAppointment(vec![FieldError::new(
                "endTs",
                "The appointment end has to come after its start",
            )]));
        }

        appointment.updated = ctx.sys.get_timestamp_millis();
        ctx.repos
            .appointments
            .save(&appointment)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(UpdatedAppointment {
            start_changed: appointment.start_ts != old_start_ts,
            appointment,
        })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(SyncRemindersOnAppointmentUpdated)]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::appointment::create_appointment::test::{setup, usecase_factory};
    use inkgest_domain::ReminderType;

    const HOUR: i64 = 60 * 60 * 1000;

    #[actix_web::main]
    #[test]
    async fn moving_an_appointment_retargets_its_reminders() {
        let test_ctx = setup().await;
        let start_ts = test_ctx.ctx.sys.get_timestamp_millis() + 48 * HOUR;
        let appointment = execute(usecase_factory(&test_ctx, start_ts), &test_ctx.ctx)
            .await
            .unwrap();

        let new_start = start_ts + 12 * HOUR;
        let usecase = UpdateAppointmentUseCase {
            appointment_id: appointment.id.clone(),
            artist_id: None,
            service_id: None,
            start_ts: Some(new_start),
            end_ts: Some(new_start + 3 * HOUR),
            status: None,
            notes: None,
        };
        let updated = execute(usecase, &test_ctx.ctx).await.unwrap();
        assert!(updated.start_changed);

        let reminders = test_ctx
            .ctx
            .repos
            .reminders
            .find_by_appointment(&appointment.id)
            .await;
        assert_eq!(reminders.len(), 3);
        let day_before = reminders
            .iter()
            .find(|r| r.reminder_type == ReminderType::TwentyFourHours)
            .unwrap();
        assert_eq!(day_before.scheduled_for, new_start - 24 * HOUR);
    }

    #[actix_web::main]
    #[test]
    async fn unrelated_updates_leave_reminders_untouched() {
        let test_ctx = setup().await;
        let start_ts = test_ctx.ctx.sys.get_timestamp_millis() + 48 * HOUR;
        let appointment = execute(usecase_factory(&test_ctx, start_ts), &test_ctx.ctx)
            .await
            .unwrap();

        // Pretend the confirmation reminder was already delivered
        let mut confirmation = test_ctx
            .ctx
            .repos
            .reminders
            .find_by_appointment_and_type(&appointment.id, ReminderType::Confirmation)
            .await
            .unwrap();
        confirmation.mark_sent(500);
        test_ctx.ctx.repos.reminders.save(&confirmation).await.unwrap();

        let usecase = UpdateAppointmentUseCase {
            appointment_id: appointment.id.clone(),
            artist_id: None,
            service_id: None,
            start_ts: None,
            end_ts: None,
            status: None,
            notes: Some("Bring reference artwork".into()),
        };
        let updated = execute(usecase, &test_ctx.ctx).await.unwrap();
        assert!(!updated.start_changed);

        let confirmation = test_ctx
            .ctx
            .repos
            .reminders
            .find_by_appointment_and_type(&appointment.id, ReminderType::Confirmation)
            .await
            .unwrap();
        assert!(confirmation.sent);
        assert_eq!(confirmation.sent_at, Some(500));
    }

    #[actix_web::main]
    #[test]
    async fn cancelling_through_update_cancels_pending_reminders() {
        let test_ctx = setup().await;
        let start_ts = test_ctx.ctx.sys.get_timestamp_millis() + 48 * HOUR;
        let appointment = execute(usecase_factory(&test_ctx, start_ts), &test_ctx.ctx)
            .await
            .unwrap();

        let usecase = UpdateAppointmentUseCase {
            appointment_id: appointment.id.clone(),
            artist_id: None,
            service_id: None,
            start_ts: None,
            end_ts: None,
            status: Some(AppointmentStatus::Cancelled),
            notes: None,
        };
        execute(usecase, &test_ctx.ctx).await.unwrap();

        for reminder in test_ctx
            .ctx
            .repos
            .reminders
            .find_by_appointment(&appointment.id)
            .await
        {
            assert!(reminder.sent);
        }
    }

    #[actix_web::main]
    #[test]
    async fn rejects_update_that_inverts_the_timespan() {
        let test_ctx = setup().await;
        let start_ts = test_ctx.ctx.sys.get_timestamp_millis() + 48 * HOUR;
        let appointment = execute(usecase_factory(&test_ctx, start_ts), &test_ctx.ctx)
            .await
            .unwrap();

        let usecase = UpdateAppointmentUseCase {
            appointment_id: appointment.id.clone(),
            artist_id: None,
            service_id: None,
            start_ts: None,
            end_ts: Some(start_ts - 1),
            status: None,
            notes: None,
        };
        let res = execute(usecase, &test_ctx.ctx).await;
        assert!(matches!(
            res.unwrap_err(),
            UseCaseError::InvalidAppointment(_)
        ));
    }
}
