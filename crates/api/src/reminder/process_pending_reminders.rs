use crate::error::InkGestError;
use crate::shared::usecase::UseCase;
use inkgest_domain::{
    Appointment, Artist, Client, ReminderSchedule, ReminderType, ServiceOffering, Store,
};
use inkgest_infra::{InkGestContext, ReminderMessage};
use std::collections::HashMap;
use tracing::error;

const APPOINTMENT_GONE_ERROR: &str = "Appointment cancelled or completed";
const REMINDERS_DISABLED_ERROR: &str = "Reminders disabled for client";
const NO_CHANNELS_ERROR: &str = "No notification channels enabled for client";

/// One dispatch pass over every due, unsent reminder. Intended to run on
/// a recurring schedule. Failures on a single reminder never abort the
/// batch, they are recorded on the affected row which stays due and gets
/// retried on the next pass.
#[derive(Debug)]
pub struct ProcessPendingRemindersUseCase;

#[derive(Debug, Default, PartialEq)]
pub struct DispatchSummary {
    pub delivered: usize,
    pub skipped: usize,
    pub failed: usize,
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

async fn get_appointments_from_reminders(
    reminders: &[ReminderSchedule],
    ctx: &InkGestContext,
) -> Result<HashMap<String, Appointment>, UseCaseError> {
    let appointment_ids: Vec<_> = reminders
        .iter()
        .map(|r| r.appointment_id.to_owned())
        .collect();
    Ok(ctx
        .repos
        .appointments
        .find_many(&appointment_ids)
        .await
        .map_err(|_| UseCaseError::StorageError)?
        .into_iter()
        .map(|a| (a.id.as_string(), a))
        .collect())
}

async fn get_clients_from_appointments(
    appointments: &HashMap<String, Appointment>,
    ctx: &InkGestContext,
) -> Result<HashMap<String, Client>, UseCaseError> {
    let client_ids: Vec<_> = appointments
        .values()
        .map(|a| a.client_id.to_owned())
        .collect();
    Ok(ctx
        .repos
        .clients
        .find_many(&client_ids)
        .await
        .map_err(|_| UseCaseError::StorageError)?
        .into_iter()
        .map(|c| (c.id.as_string(), c))
        .collect())
}

async fn get_services_from_appointments(
    appointments: &HashMap<String, Appointment>,
    ctx: &InkGestContext,
) -> Result<HashMap<String, ServiceOffering>, UseCaseError> {
    let service_ids: Vec<_> = appointments
        .values()
        .map(|a| a.service_id.to_owned())
        .collect();
    Ok(ctx
        .repos
        .service_offerings
        .find_many(&service_ids)
        .await
        .map_err(|_| UseCaseError::StorageError)?
        .into_iter()
        .map(|s| (s.id.as_string(), s))
        .collect())
}

struct MessageContext<'a> {
    appointment: &'a Appointment,
    client: &'a Client,
    artist: Option<&'a Artist>,
    service: Option<&'a ServiceOffering>,
    store: Option<&'a Store>,
    language: String,
    confirmation_url: Option<String>,
}

fn build_message(msg_ctx: MessageContext<'_>) -> ReminderMessage {
    let starts_at = match msg_ctx.store {
        Some(store) => store.settings.format_timestamp(msg_ctx.appointment.start_ts),
        None => msg_ctx.appointment.start_ts.to_string(),
    };
    ReminderMessage {
        appointment_id: msg_ctx.appointment.id.clone(),
        client_name: msg_ctx.client.name.clone(),
        artist_name: msg_ctx
            .artist
            .map(|a| a.name.clone())
            .unwrap_or_default(),
        service_name: msg_ctx
            .service
            .map(|s| s.name.clone())
            .unwrap_or_default(),
        starts_at,
        language: msg_ctx.language,
        confirmation_url: msg_ctx.confirmation_url,
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ProcessPendingRemindersUseCase {
    type Response = DispatchSummary;

    type Error = UseCaseError;

    const NAME: &'static str = "ProcessPendingReminders";

    async fn execute(&mut self, ctx: &InkGestContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let due = ctx
            .repos
            .reminders
            .find_due(now)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let appointment_lookup = get_appointments_from_reminders(&due, ctx).await?;
        let client_lookup = get_clients_from_appointments(&appointment_lookup, ctx).await?;
        let service_lookup = get_services_from_appointments(&appointment_lookup, ctx).await?;
        // Artists and stores are shared across most appointments of a
        // batch, resolve them lazily and memoize.
        let mut artist_lookup: HashMap<String, Option<Artist>> = HashMap::new();
        let mut store_lookup: HashMap<String, Option<Store>> = HashMap::new();

        let mut summary = DispatchSummary::default();
        for mut reminder in due {
            let appointment = appointment_lookup.get(&reminder.appointment_id.as_string());

            // Rows whose appointment can no longer take place are closed
            // out terminally, this is not a delivery failure.
            let appointment = match appointment {
                Some(a) if !a.reminders_obsolete() => a,
                _ => {
                    reminder.mark_skipped(now, APPOINTMENT_GONE_ERROR);
                    persist(ctx, &reminder).await;
                    summary.skipped += 1;
                    continue;
                }
            };

            let preferences = match ctx
                .notifier
                .get_communication_preferences(&appointment.client_id)
                .await
            {
                Ok(preferences) => preferences,
                Err(e) => {
                    reminder.mark_attempt_failed(&e.to_string());
                    persist(ctx, &reminder).await;
                    summary.failed += 1;
                    continue;
                }
            };

            if !preferences.reminders_enabled {
                reminder.mark_skipped(now, REMINDERS_DISABLED_ERROR);
                persist(ctx, &reminder).await;
                summary.skipped += 1;
                continue;
            }
            let channels = preferences.delivery_channels();
            if channels.is_empty() {
                reminder.mark_skipped(now, NO_CHANNELS_ERROR);
                persist(ctx, &reminder).await;
                summary.skipped += 1;
                continue;
            }

            let client = match client_lookup.get(&appointment.client_id.as_string()) {
                Some(client) => client,
                None => {
                    reminder.mark_attempt_failed("Client record not found");
                    persist(ctx, &reminder).await;
                    summary.failed += 1;
                    continue;
                }
            };

            let artist_key = appointment.artist_id.as_string();
            if !artist_lookup.contains_key(&artist_key) {
                let artist = ctx.repos.artists.find(&appointment.artist_id).await;
                artist_lookup.insert(artist_key.clone(), artist);
            }
            let store_key = appointment.store_id.as_string();
            if !store_lookup.contains_key(&store_key) {
                let store = ctx.repos.stores.find(&appointment.store_id).await;
                store_lookup.insert(store_key.clone(), store);
            }

            let confirmation_url = if reminder.reminder_type == ReminderType::Confirmation {
                ctx.repos
                    .confirmation_tokens
                    .find_by_appointment(&appointment.id)
                    .await
                    .first()
                    .map(|t| {
                        format!(
                            "{}/api/v1/appointments/confirm/{}",
                            ctx.config.confirmation_base_url, t.token
                        )
                    })
            } else {
                None
            };

            let message = build_message(MessageContext {
                appointment,
                client,
                artist: artist_lookup[&artist_key].as_ref(),
                service: service_lookup.get(&appointment.service_id.as_string()),
                store: store_lookup[&store_key].as_ref(),
                language: preferences.language.clone(),
                confirmation_url,
            });

            // Preferred channel first, remaining enabled channel as
            // fallback.
            let mut last_error = String::new();
            let mut delivered = false;
            for channel in channels {
                match ctx
                    .notifier
                    .send_channel_message(&appointment.client_id, channel, &message)
                    .await
                {
                    Ok(_) => {
                        delivered = true;
                        break;
                    }
                    Err(e) => last_error = e.to_string(),
                }
            }

            if delivered {
                reminder.mark_sent(now);
                summary.delivered += 1;
            } else {
                reminder.mark_attempt_failed(&last_error);
                summary.failed += 1;
            }
            persist(ctx, &reminder).await;
        }

        Ok(summary)
    }
}

async fn persist(ctx: &InkGestContext, reminder: &ReminderSchedule) {
    if let Err(e) = ctx.repos.reminders.save(reminder).await {
        error!(
            "Unable to persist reminder {} after dispatch: {:?}",
            reminder.id, e
        );
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reminder::schedule_appointment_reminders::{
        test::insert_appointment, ScheduleAppointmentRemindersUseCase,
    };
    use crate::shared::usecase::execute;
    use inkgest_domain::{AppointmentStatus, Channel, CommunicationPreferences};
    use inkgest_infra::{setup_context_inmemory, InMemoryNotificationService, ISys};
    use std::sync::Arc;

    pub struct StaticTimeSys {
        pub now: i64,
    }
    impl ISys for StaticTimeSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.now
        }
    }

    struct TestContext {
        ctx: InkGestContext,
        notifier: Arc<InMemoryNotificationService>,
    }

    fn setup(now: i64) -> TestContext {
        let mut ctx = setup_context_inmemory();
        ctx.sys = Arc::new(StaticTimeSys { now });
        let notifier = Arc::new(InMemoryNotificationService::new());
        ctx.notifier = notifier.clone();
        TestContext { ctx, notifier }
    }

    /// Appointment starting within the 2h window so that every scheduled
    /// reminder is immediately due
    async fn insert_due_appointment(ctx: &InkGestContext) -> inkgest_domain::Appointment {
        let appointment =
            insert_appointment(ctx, ctx.sys.get_timestamp_millis() + 1000 * 60 * 60).await;
        let usecase = ScheduleAppointmentRemindersUseCase {
            appointment_id: appointment.id.clone(),
        };
        execute(usecase, ctx).await.unwrap();
        appointment
    }

    #[actix_web::main]
    #[test]
    async fn delivers_due_reminders_and_marks_them_sent() {
        let TestContext { ctx, notifier } = setup(1613862000000);
        let appointment = insert_due_appointment(&ctx).await;

        let summary = execute(ProcessPendingRemindersUseCase, &ctx).await.unwrap();
        assert_eq!(summary.delivered, 3);
        assert_eq!(summary.failed, 0);
        assert_eq!(notifier.sent_count(), 3);

        for reminder in ctx.repos.reminders.find_by_appointment(&appointment.id).await {
            assert!(reminder.sent);
            assert_eq!(reminder.sent_at, Some(1613862000000));
            assert_eq!(reminder.error, None);
        }

        // A second pass has nothing left to do
        let summary = execute(ProcessPendingRemindersUseCase, &ctx).await.unwrap();
        assert_eq!(summary, DispatchSummary::default());
        assert_eq!(notifier.sent_count(), 3);
    }

    #[actix_web::main]
    #[test]
    async fn confirmation_reminder_carries_the_token_link() {
        let TestContext { ctx, notifier } = setup(1613862000000);
        let appointment = insert_due_appointment(&ctx).await;

        execute(ProcessPendingRemindersUseCase, &ctx).await.unwrap();

        let token = ctx
            .repos
            .confirmation_tokens
            .find_by_appointment(&appointment.id)
            .await
            .remove(0);
        let sent = notifier.sent.lock().unwrap();
        let with_link: Vec<_> = sent
            .iter()
            .filter(|m| m.message.confirmation_url.is_some())
            .collect();
        assert_eq!(with_link.len(), 1);
        assert!(with_link[0]
            .message
            .confirmation_url
            .as_ref()
            .unwrap()
            .ends_with(&token.token));
    }

    #[actix_web::main]
    #[test]
    async fn skips_reminders_of_cancelled_appointments_without_notifying() {
        let TestContext { ctx, notifier } = setup(1613862000000);
        let mut appointment = insert_due_appointment(&ctx).await;
        appointment.status = AppointmentStatus::Cancelled;
        ctx.repos.appointments.save(&appointment).await.unwrap();

        let summary = execute(ProcessPendingRemindersUseCase, &ctx).await.unwrap();
        assert_eq!(summary.skipped, 3);
        assert_eq!(notifier.sent_count(), 0);

        for reminder in ctx.repos.reminders.find_by_appointment(&appointment.id).await {
            assert!(reminder.sent);
            assert_eq!(reminder.error.as_deref(), Some(APPOINTMENT_GONE_ERROR));
        }
    }

    #[actix_web::main]
    #[test]
    async fn skips_clients_that_disabled_reminders() {
        let TestContext { ctx, notifier } = setup(1613862000000);
        let appointment = insert_due_appointment(&ctx).await;
        notifier.set_preferences(
            appointment.client_id.clone(),
            CommunicationPreferences {
                reminders_enabled: false,
                ..Default::default()
            },
        );

        let summary = execute(ProcessPendingRemindersUseCase, &ctx).await.unwrap();
        assert_eq!(summary.skipped, 3);
        assert_eq!(notifier.sent_count(), 0);

        for reminder in ctx.repos.reminders.find_by_appointment(&appointment.id).await {
            assert!(reminder.sent);
            assert_eq!(reminder.error.as_deref(), Some(REMINDERS_DISABLED_ERROR));
        }
    }

    #[actix_web::main]
    #[test]
    async fn failed_deliveries_stay_due_and_accumulate_retries() {
        let TestContext { ctx, notifier } = setup(1613862000000);
        let appointment = insert_due_appointment(&ctx).await;
        notifier.fail_channel(Channel::ChatMessage);
        notifier.fail_channel(Channel::Email);

        let summary = execute(ProcessPendingRemindersUseCase, &ctx).await.unwrap();
        assert_eq!(summary.failed, 3);

        for reminder in ctx.repos.reminders.find_by_appointment(&appointment.id).await {
            assert!(!reminder.sent);
            assert_eq!(reminder.retry_count, 1);
            assert!(reminder.error.is_some());
        }

        // Next pass retries the same rows
        let summary = execute(ProcessPendingRemindersUseCase, &ctx).await.unwrap();
        assert_eq!(summary.failed, 3);
        for reminder in ctx.repos.reminders.find_by_appointment(&appointment.id).await {
            assert_eq!(reminder.retry_count, 2);
        }
    }

    #[actix_web::main]
    #[test]
    async fn falls_back_to_email_when_chat_fails() {
        let TestContext { ctx, notifier } = setup(1613862000000);
        insert_due_appointment(&ctx).await;
        notifier.fail_channel(Channel::ChatMessage);

        let summary = execute(ProcessPendingRemindersUseCase, &ctx).await.unwrap();
        assert_eq!(summary.delivered, 3);

        let sent = notifier.sent.lock().unwrap();
        assert!(sent.iter().all(|m| m.channel == Channel::Email));
    }

    #[actix_web::main]
    #[test]
    async fn reminders_scheduled_in_the_future_are_left_alone() {
        let TestContext { ctx, notifier } = setup(1613862000000);
        // Starts in 3 days: only the confirmation reminder is due now
        let appointment = insert_appointment(
            &ctx,
            ctx.sys.get_timestamp_millis() + 3 * 24 * 60 * 60 * 1000,
        )
        .await;
        let usecase = ScheduleAppointmentRemindersUseCase {
            appointment_id: appointment.id.clone(),
        };
        execute(usecase, &ctx).await.unwrap();

        let summary = execute(ProcessPendingRemindersUseCase, &ctx).await.unwrap();
        assert_eq!(summary.delivered, 1);
        assert_eq!(notifier.sent_count(), 1);
    }
}
