use inkgest_domain::{ReminderSchedule, ReminderStats, ReminderType, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReminderScheduleDTO {
    pub id: ID,
    pub appointment_id: ID,
    #[serde(rename = "type")]
    pub reminder_type: ReminderType,
    pub scheduled_for: i64,
    pub sent: bool,
    pub sent_at: Option<i64>,
    pub error: Option<String>,
    pub retry_count: i64,
}

impl ReminderScheduleDTO {
    pub fn new(reminder: ReminderSchedule) -> Self {
        Self {
            id: reminder.id.clone(),
            appointment_id: reminder.appointment_id.clone(),
            reminder_type: reminder.reminder_type,
            scheduled_for: reminder.scheduled_for,
            sent: reminder.sent,
            sent_at: reminder.sent_at,
            error: reminder.error,
            retry_count: reminder.retry_count,
        }
    }
}

/// `ReminderStats` already has the wire shape, the DTO is a straight
/// passthrough kept for symmetry with the other modules.
pub type ReminderStatsDTO = ReminderStats;
