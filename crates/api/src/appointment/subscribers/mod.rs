use super::{
    cancel_appointment::CancelAppointmentUseCase,
    create_appointment::CreateAppointmentUseCase,
    update_appointment::{UpdateAppointmentUseCase, UpdatedAppointment},
};
use crate::reminder::cancel_appointment_reminders::CancelAppointmentRemindersUseCase;
use crate::reminder::schedule_appointment_reminders::ScheduleAppointmentRemindersUseCase;
use crate::shared::usecase::{execute, Subscriber};
use inkgest_domain::Appointment;

pub struct ScheduleRemindersOnAppointmentCreated;

#[async_trait::async_trait(?Send)]
impl Subscriber<CreateAppointmentUseCase> for ScheduleRemindersOnAppointmentCreated {
    async fn notify(&self, e: &Appointment, ctx: &inkgest_infra::InkGestContext) {
        let schedule_reminders = ScheduleAppointmentRemindersUseCase {
            appointment_id: e.id.clone(),
        };

        // Sideeffect, ignore result
        let _ = execute(schedule_reminders, ctx).await;
    }
}

pub struct SyncRemindersOnAppointmentUpdated;

#[async_trait::async_trait(?Send)]
impl Subscriber<UpdateAppointmentUseCase> for SyncRemindersOnAppointmentUpdated {
    async fn notify(&self, e: &UpdatedAppointment, ctx: &inkgest_infra::InkGestContext) {
        if e.appointment.reminders_obsolete() {
            let cancel_reminders = CancelAppointmentRemindersUseCase {
                appointment_id: e.appointment.id.clone(),
            };
            let _ = execute(cancel_reminders, ctx).await;
        } else if e.start_changed {
            let schedule_reminders = ScheduleAppointmentRemindersUseCase {
                appointment_id: e.appointment.id.clone(),
            };
            let _ = execute(schedule_reminders, ctx).await;
        }
    }
}

pub struct CancelRemindersOnAppointmentCancelled;

#[async_trait::async_trait(?Send)]
impl Subscriber<CancelAppointmentUseCase> for CancelRemindersOnAppointmentCancelled {
    async fn notify(&self, e: &Appointment, ctx: &inkgest_infra::InkGestContext) {
        let cancel_reminders = CancelAppointmentRemindersUseCase {
            appointment_id: e.id.clone(),
        };

        // Sideeffect, ignore result
        let _ = execute(cancel_reminders, ctx).await;
    }
}
