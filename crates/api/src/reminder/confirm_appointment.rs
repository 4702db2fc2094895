use crate::error::InkGestError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use inkgest_api_structs::confirm_appointment::*;
use inkgest_domain::{Appointment, AppointmentStatus};
use inkgest_infra::InkGestContext;

// These strings are displayed to clients directly and are part of the
// api contract, do not reword them.
pub const INVALID_TOKEN_ERROR: &str = "Invalid confirmation token";
pub const ALREADY_CONFIRMED_ERROR: &str = "Appointment already confirmed";
pub const TOKEN_EXPIRED_ERROR: &str = "Confirmation token expired";

pub async fn confirm_appointment_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<InkGestContext>,
) -> Result<HttpResponse, InkGestError> {
    let usecase = ConfirmAppointmentUseCase {
        token: path_params.token.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|outcome| match outcome {
            ConfirmationOutcome::Confirmed(appointment) => {
                HttpResponse::Ok().json(APIResponse::confirmed(appointment))
            }
            ConfirmationOutcome::Rejected(reason) => {
                HttpResponse::Ok().json(APIResponse::rejected(reason))
            }
        })
        .map_err(InkGestError::from)
}

/// A one-shot transition guarded by three independent preconditions. A
/// rejected confirmation is a normal response, not an http error.
#[derive(Debug)]
pub struct ConfirmAppointmentUseCase {
    pub token: String,
}

#[derive(Debug)]
pub enum ConfirmationOutcome {
    Confirmed(Appointment),
    Rejected(&'static str),
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for InkGestError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ConfirmAppointmentUseCase {
    type Response = ConfirmationOutcome;

    type Error = UseCaseError;

    const NAME: &'static str = "ConfirmAppointment";

    async fn execute(&mut self, ctx: &InkGestContext) -> Result<Self::Response, Self::Error> {
        let mut token = match ctx.repos.confirmation_tokens.find_by_token(&self.token).await {
            Some(token) => token,
            None => return Ok(ConfirmationOutcome::Rejected(INVALID_TOKEN_ERROR)),
        };

        if token.confirmed {
            return Ok(ConfirmationOutcome::Rejected(ALREADY_CONFIRMED_ERROR));
        }

        let now = ctx.sys.get_timestamp_millis();
        if token.is_expired(now) {
            return Ok(ConfirmationOutcome::Rejected(TOKEN_EXPIRED_ERROR));
        }

        let mut appointment = ctx
            .repos
            .appointments
            .find(&token.appointment_id)
            .await
            .ok_or(UseCaseError::StorageError)?;

        token.confirm(now);
        ctx.repos
            .confirmation_tokens
            .save(&token)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        appointment.status = AppointmentStatus::Confirmed;
        appointment.updated = now;
        ctx.repos
            .appointments
            .save(&appointment)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(ConfirmationOutcome::Confirmed(appointment))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reminder::schedule_appointment_reminders::{
        test::insert_appointment, ScheduleAppointmentRemindersUseCase,
    };
    use inkgest_infra::{setup_context_inmemory, ISys};
    use std::sync::Arc;

    struct StaticTimeSys {
        now: i64,
    }
    impl ISys for StaticTimeSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.now
        }
    }

    async fn setup_confirmable(
        ctx: &InkGestContext,
    ) -> (inkgest_domain::Appointment, String) {
        let appointment =
            insert_appointment(ctx, ctx.sys.get_timestamp_millis() + 24 * 60 * 60 * 1000).await;
        let usecase = ScheduleAppointmentRemindersUseCase {
            appointment_id: appointment.id.clone(),
        };
        execute(usecase, ctx).await.unwrap();
        let token = ctx
            .repos
            .confirmation_tokens
            .find_by_appointment(&appointment.id)
            .await
            .remove(0);
        (appointment, token.token)
    }

    #[actix_web::main]
    #[test]
    async fn rejects_unknown_token() {
        let ctx = setup_context_inmemory();
        let usecase = ConfirmAppointmentUseCase {
            token: "nosuchtoken".into(),
        };
        let outcome = execute(usecase, &ctx).await.unwrap();
        match outcome {
            ConfirmationOutcome::Rejected(reason) => {
                assert_eq!(reason, "Invalid confirmation token")
            }
            _ => panic!("Expected rejection"),
        }
    }

    #[actix_web::main]
    #[test]
    async fn confirms_appointment_exactly_once() {
        let ctx = setup_context_inmemory();
        let (appointment, token) = setup_confirmable(&ctx).await;

        let usecase = ConfirmAppointmentUseCase {
            token: token.clone(),
        };
        let outcome = execute(usecase, &ctx).await.unwrap();
        match outcome {
            ConfirmationOutcome::Confirmed(confirmed) => {
                assert_eq!(confirmed.id, appointment.id);
                assert_eq!(confirmed.status, AppointmentStatus::Confirmed);
            }
            ConfirmationOutcome::Rejected(reason) => panic!("Unexpected rejection: {}", reason),
        }

        let stored = ctx
            .repos
            .confirmation_tokens
            .find_by_token(&token)
            .await
            .unwrap();
        assert!(stored.confirmed);
        assert!(stored.confirmed_at.is_some());
        assert_eq!(
            ctx.repos
                .appointments
                .find(&appointment.id)
                .await
                .unwrap()
                .status,
            AppointmentStatus::Confirmed
        );

        // The second attempt short-circuits on the confirmed flag
        let usecase = ConfirmAppointmentUseCase { token };
        let outcome = execute(usecase, &ctx).await.unwrap();
        match outcome {
            ConfirmationOutcome::Rejected(reason) => {
                assert_eq!(reason, "Appointment already confirmed")
            }
            _ => panic!("Expected rejection"),
        }
    }

    #[actix_web::main]
    #[test]
    async fn rejects_expired_token() {
        let mut ctx = setup_context_inmemory();
        let (appointment, token) = setup_confirmable(&ctx).await;

        // Move the clock past the appointment start, which is the token
        // expiry
        let appointment = ctx.repos.appointments.find(&appointment.id).await.unwrap();
        ctx.sys = Arc::new(StaticTimeSys {
            now: appointment.start_ts + 1,
        });

        let usecase = ConfirmAppointmentUseCase { token };
        let outcome = execute(usecase, &ctx).await.unwrap();
        match outcome {
            ConfirmationOutcome::Rejected(reason) => {
                assert_eq!(reason, "Confirmation token expired")
            }
            _ => panic!("Expected rejection"),
        }
    }
}
