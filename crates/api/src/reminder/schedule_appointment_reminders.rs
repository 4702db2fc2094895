use crate::error::InkGestError;
use crate::shared::usecase::UseCase;
use inkgest_domain::{AppointmentConfirmationToken, ReminderSchedule, ReminderType, ID};
use inkgest_infra::InkGestContext;
use tracing::error;

const TWENTY_FOUR_HOURS_MILLIS: i64 = 24 * 60 * 60 * 1000;
const TWO_HOURS_MILLIS: i64 = 2 * 60 * 60 * 1000;

/// Creates or re-targets the three `ReminderSchedule` rows of an
/// `Appointment`: 24 hours before start, 2 hours before start and an
/// immediate confirmation reminder. Existing rows are updated in place
/// so there is never more than one row per (appointment, type).
#[derive(Debug)]
pub struct ScheduleAppointmentRemindersUseCase {
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
impl UseCase for ScheduleAppointmentRemindersUseCase {
    type Response = Vec<ReminderSchedule>;

    type Error = UseCaseError;

    const NAME: &'static str = "ScheduleAppointmentReminders";

    async fn execute(&mut self, ctx: &InkGestContext) -> Result<Self::Response, Self::Error> {
        let appointment = ctx
            .repos
            .appointments
            .find(&self.appointment_id)
            .await
            .ok_or_else(|| UseCaseError::AppointmentNotFound(self.appointment_id.clone()))?;

        let now = ctx.sys.get_timestamp_millis();
        let targets = [
            (
                ReminderType::TwentyFourHours,
                appointment.start_ts - TWENTY_FOUR_HOURS_MILLIS,
            ),
            (
                ReminderType::TwoHours,
                appointment.start_ts - TWO_HOURS_MILLIS,
            ),
            (ReminderType::Confirmation, now),
        ];

        let mut reminders = Vec::with_capacity(targets.len());
        for (reminder_type, scheduled_for) in targets.iter() {
            let existing = ctx
                .repos
                .reminders
                .find_by_appointment_and_type(&appointment.id, *reminder_type)
                .await;

            let reminder = match existing {
                Some(mut reminder) => {
                    reminder.reschedule(*scheduled_for);
                    ctx.repos
                        .reminders
                        .save(&reminder)
                        .await
                        .map_err(|_| UseCaseError::StorageError)?;
                    reminder
                }
                None => {
                    let reminder = ReminderSchedule::new(
                        appointment.id.clone(),
                        appointment.store_id.clone(),
                        *reminder_type,
                        *scheduled_for,
                    );
                    ctx.repos
                        .reminders
                        .insert(&reminder)
                        .await
                        .map_err(|_| UseCaseError::StorageError)?;

                    // The confirmation token is minted together with the
                    // first confirmation reminder and is never reset
                    // afterwards, it stays single use.
                    if *reminder_type == ReminderType::Confirmation {
                        let token = AppointmentConfirmationToken::new(
                            appointment.id.clone(),
                            appointment.start_ts,
                        );
                        if ctx.repos.confirmation_tokens.insert(&token).await.is_err() {
                            error!(
                                "Unable to store confirmation token for appointment: {}",
                                appointment.id
                            );
                        }
                    }
                    reminder
                }
            };
            reminders.push(reminder);
        }

        Ok(reminders)
    }
}

#[cfg(test)]
pub mod test {
    use super::*;
    use crate::shared::usecase::execute;
    use inkgest_domain::{
        Appointment, AppointmentStatus, Artist, Client, ServiceCategory, ServiceOffering, Store,
    };
    use inkgest_infra::setup_context_inmemory;

    pub async fn insert_appointment(ctx: &InkGestContext, start_ts: i64) -> Appointment {
        let store = Store::new("Black Lotus Ink");
        ctx.repos.stores.insert(&store).await.unwrap();
        let client = Client::new(store.id.clone(), "Iris Demarco");
        ctx.repos.clients.insert(&client).await.unwrap();
        let artist = Artist::new(store.id.clone(), "Nico", 40);
        ctx.repos.artists.insert(&artist).await.unwrap();
        let service = ServiceOffering::new(
            store.id.clone(),
            "Full sleeve session",
            1000 * 60 * 60 * 3,
            ServiceCategory::Tattoo,
        );
        ctx.repos.service_offerings.insert(&service).await.unwrap();

        let appointment = Appointment {
            id: Default::default(),
            store_id: store.id.clone(),
            client_id: client.id.clone(),
            artist_id: artist.id.clone(),
            service_id: service.id.clone(),
            start_ts,
            end_ts: start_ts + service.duration,
            status: AppointmentStatus::Scheduled,
            notes: None,
            cancellation_reason: None,
            created: ctx.sys.get_timestamp_millis(),
            updated: ctx.sys.get_timestamp_millis(),
        };
        ctx.repos.appointments.insert(&appointment).await.unwrap();
        appointment
    }

    #[actix_web::main]
    #[test]
    async fn schedules_three_reminders_and_one_token() {
        let ctx = setup_context_inmemory();
        let start_ts = ctx.sys.get_timestamp_millis() + 3 * TWENTY_FOUR_HOURS_MILLIS;
        let appointment = insert_appointment(&ctx, start_ts).await;

        let usecase = ScheduleAppointmentRemindersUseCase {
            appointment_id: appointment.id.clone(),
        };
        let reminders = execute(usecase, &ctx).await.unwrap();
        assert_eq!(reminders.len(), 3);

        let types: Vec<_> = reminders.iter().map(|r| r.reminder_type).collect();
        assert!(types.contains(&ReminderType::TwentyFourHours));
        assert!(types.contains(&ReminderType::TwoHours));
        assert!(types.contains(&ReminderType::Confirmation));

        let day_before = reminders
            .iter()
            .find(|r| r.reminder_type == ReminderType::TwentyFourHours)
            .unwrap();
        assert_eq!(day_before.scheduled_for, start_ts - TWENTY_FOUR_HOURS_MILLIS);
        assert!(!day_before.sent);

        let tokens = ctx
            .repos
            .confirmation_tokens
            .find_by_appointment(&appointment.id)
            .await;
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].expires_at, start_ts);
    }

    #[actix_web::main]
    #[test]
    async fn rescheduling_updates_rows_in_place() {
        let ctx = setup_context_inmemory();
        let start_ts = ctx.sys.get_timestamp_millis() + 3 * TWENTY_FOUR_HOURS_MILLIS;
        let mut appointment = insert_appointment(&ctx, start_ts).await;

        let usecase = ScheduleAppointmentRemindersUseCase {
            appointment_id: appointment.id.clone(),
        };
        execute(usecase, &ctx).await.unwrap();

        // Postpone the appointment by a day and schedule again
        appointment.start_ts += TWENTY_FOUR_HOURS_MILLIS;
        ctx.repos.appointments.save(&appointment).await.unwrap();
        let usecase = ScheduleAppointmentRemindersUseCase {
            appointment_id: appointment.id.clone(),
        };
        execute(usecase, &ctx).await.unwrap();

        let rows = ctx.repos.reminders.find_by_appointment(&appointment.id).await;
        assert_eq!(rows.len(), 3);
        let day_before = rows
            .iter()
            .find(|r| r.reminder_type == ReminderType::TwentyFourHours)
            .unwrap();
        assert_eq!(
            day_before.scheduled_for,
            appointment.start_ts - TWENTY_FOUR_HOURS_MILLIS
        );

        // The token is not reissued on re-scheduling
        let tokens = ctx
            .repos
            .confirmation_tokens
            .find_by_appointment(&appointment.id)
            .await;
        assert_eq!(tokens.len(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_unknown_appointment_without_writes() {
        let ctx = setup_context_inmemory();
        let appointment_id = ID::default();
        let usecase = ScheduleAppointmentRemindersUseCase {
            appointment_id: appointment_id.clone(),
        };
        let res = execute(usecase, &ctx).await;
        assert!(matches!(
            res.unwrap_err(),
            UseCaseError::AppointmentNotFound(_)
        ));
        assert!(ctx
            .repos
            .reminders
            .find_by_appointment(&appointment_id)
            .await
            .is_empty());
    }
}
