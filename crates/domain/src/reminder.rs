use crate::shared::entity::{Entity, ID};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// The kind of reminder to send for an `Appointment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReminderType {
    /// Sent 24 hours before the appointment starts
    #[serde(rename = "24h")]
    TwentyFourHours,
    /// Sent 2 hours before the appointment starts
    #[serde(rename = "2h")]
    TwoHours,
    /// Sent right after booking and carries the confirmation link
    #[serde(rename = "confirmation")]
    Confirmation,
}

impl ReminderType {
    pub fn all() -> [ReminderType; 3] {
        [Self::TwentyFourHours, Self::TwoHours, Self::Confirmation]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TwentyFourHours => "24h",
            Self::TwoHours => "2h",
            Self::Confirmation => "confirmation",
        }
    }
}

impl Display for ReminderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum InvalidReminderTypeError {
    #[error("Invalid reminder type: {0}")]
    Unknown(String),
}

impl FromStr for ReminderType {
    type Err = InvalidReminderTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "24h" => Ok(Self::TwentyFourHours),
            "2h" => Ok(Self::TwoHours),
            "confirmation" => Ok(Self::Confirmation),
            _ => Err(InvalidReminderTypeError::Unknown(s.to_string())),
        }
    }
}

/// A persisted intent to notify a `Client` about an upcoming
/// `Appointment` at `scheduled_for`.
///
/// There is at most one row per (`appointment_id`, `reminder_type`):
/// re-scheduling updates the existing row in place. Rows are never
/// deleted, only marked sent, so they double as delivery history.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderSchedule {
    pub id: ID,
    pub appointment_id: ID,
    /// The `Store` owning the appointment, denormalized so scoped stats
    /// queries need no join
    pub store_id: ID,
    pub reminder_type: ReminderType,
    pub scheduled_for: i64,
    pub sent: bool,
    pub sent_at: Option<i64>,
    pub error: Option<String>,
    pub retry_count: i64,
}

impl ReminderSchedule {
    pub fn new(
        appointment_id: ID,
        store_id: ID,
        reminder_type: ReminderType,
        scheduled_for: i64,
    ) -> Self {
        Self {
            id: Default::default(),
            appointment_id,
            store_id,
            reminder_type,
            scheduled_for,
            sent: false,
            sent_at: None,
            error: None,
            retry_count: 0,
        }
    }

    /// Moves the reminder to a new send time and clears any previous
    /// delivery state. Used when an appointment is re-scheduled.
    pub fn reschedule(&mut self, scheduled_for: i64) {
        self.scheduled_for = scheduled_for;
        self.sent = false;
        self.sent_at = None;
        self.error = None;
        self.retry_count = 0;
    }

    pub fn mark_sent(&mut self, now: i64) {
        self.sent = true;
        self.sent_at = Some(now);
        self.error = None;
    }

    /// Terminal skip: the reminder will never be delivered and the reason
    /// is kept on the row.
    pub fn mark_skipped(&mut self, now: i64, reason: &str) {
        self.sent = true;
        self.sent_at = Some(now);
        self.error = Some(reason.to_string());
    }

    /// Delivery failed, the row stays due and will be retried on the next
    /// dispatch pass.
    pub fn mark_attempt_failed(&mut self, error: &str) {
        self.retry_count += 1;
        self.error = Some(error.to_string());
    }
}

impl Entity for ReminderSchedule {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderCounters {
    pub total_scheduled: i64,
    pub total_sent: i64,
    pub total_failed: i64,
}

impl ReminderCounters {
    fn add(&mut self, reminder: &ReminderSchedule) {
        self.total_scheduled += 1;
        match (reminder.sent, &reminder.error) {
            (true, None) => self.total_sent += 1,
            (true, Some(_)) => self.total_failed += 1,
            (false, _) if reminder.retry_count > 0 => self.total_failed += 1,
            // Still pending with no attempts, counts in neither bucket
            (false, _) => {}
        }
    }
}

/// Read-side aggregation over a set of `ReminderSchedule` rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderStats {
    pub total_scheduled: i64,
    pub total_sent: i64,
    pub total_failed: i64,
    /// `total_sent / total_scheduled * 100` rounded to the nearest
    /// integer, 0 when nothing was scheduled
    pub success_rate: i64,
    pub by_type: HashMap<ReminderType, ReminderCounters>,
}

impl ReminderStats {
    pub fn from_reminders(reminders: &[ReminderSchedule]) -> Self {
        let mut totals = ReminderCounters::default();
        for reminder in reminders {
            totals.add(reminder);
        }

        let by_type = reminders
            .iter()
            .map(|r| (r.reminder_type, r))
            .into_group_map()
            .into_iter()
            .map(|(reminder_type, rows)| {
                let mut counters = ReminderCounters::default();
                for row in rows {
                    counters.add(row);
                }
                (reminder_type, counters)
            })
            .collect();

        let success_rate = if totals.total_scheduled == 0 {
            0
        } else {
            ((totals.total_sent as f64 / totals.total_scheduled as f64) * 100.0).round() as i64
        };

        Self {
            total_scheduled: totals.total_scheduled,
            total_sent: totals.total_sent,
            total_failed: totals.total_failed,
            success_rate,
            by_type,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn reminder_factory(reminder_type: ReminderType) -> ReminderSchedule {
        ReminderSchedule::new(Default::default(), Default::default(), reminder_type, 1000)
    }

    #[test]
    fn it_parses_reminder_type_roundtrip() {
        for reminder_type in ReminderType::all().iter() {
            assert_eq!(
                reminder_type.as_str().parse::<ReminderType>().unwrap(),
                *reminder_type
            );
        }
        assert!("12h".parse::<ReminderType>().is_err());
    }

    #[test]
    fn rescheduling_clears_delivery_state() {
        let mut reminder = reminder_factory(ReminderType::TwoHours);
        reminder.mark_attempt_failed("gateway timeout");
        reminder.mark_skipped(500, "Appointment cancelled");

        reminder.reschedule(2000);
        assert_eq!(reminder.scheduled_for, 2000);
        assert!(!reminder.sent);
        assert_eq!(reminder.sent_at, None);
        assert_eq!(reminder.error, None);
        assert_eq!(reminder.retry_count, 0);
    }

    #[test]
    fn failed_attempts_accumulate_and_leave_row_due() {
        let mut reminder = reminder_factory(ReminderType::TwentyFourHours);
        reminder.mark_attempt_failed("gateway timeout");
        reminder.mark_attempt_failed("gateway unreachable");
        assert!(!reminder.sent);
        assert_eq!(reminder.retry_count, 2);
        assert_eq!(reminder.error.as_deref(), Some("gateway unreachable"));

        reminder.mark_sent(900);
        assert!(reminder.sent);
        assert_eq!(reminder.sent_at, Some(900));
        assert_eq!(reminder.error, None);
    }

    #[test]
    fn it_aggregates_stats_with_rounding() {
        let mut sent_ok_1 = reminder_factory(ReminderType::TwentyFourHours);
        sent_ok_1.mark_sent(10);
        let mut sent_ok_2 = reminder_factory(ReminderType::TwoHours);
        sent_ok_2.mark_sent(20);
        let mut sent_ok_3 = reminder_factory(ReminderType::Confirmation);
        sent_ok_3.mark_sent(30);
        let mut failed = reminder_factory(ReminderType::TwoHours);
        failed.mark_attempt_failed("no channel available");

        let stats = ReminderStats::from_reminders(&[sent_ok_1, sent_ok_2, sent_ok_3, failed]);
        assert_eq!(stats.total_scheduled, 4);
        assert_eq!(stats.total_sent, 3);
        assert_eq!(stats.total_failed, 1);
        assert_eq!(stats.success_rate, 75);

        let two_hours = &stats.by_type[&ReminderType::TwoHours];
        assert_eq!(two_hours.total_scheduled, 2);
        assert_eq!(two_hours.total_sent, 1);
        assert_eq!(two_hours.total_failed, 1);
    }

    #[test]
    fn skips_count_as_failures_and_pending_counts_as_neither() {
        let mut skipped = reminder_factory(ReminderType::TwentyFourHours);
        skipped.mark_skipped(10, "Appointment cancelled or completed");
        let pending = reminder_factory(ReminderType::TwoHours);

        let stats = ReminderStats::from_reminders(&[skipped, pending]);
        assert_eq!(stats.total_scheduled, 2);
        assert_eq!(stats.total_sent, 0);
        assert_eq!(stats.total_failed, 1);
        assert_eq!(stats.success_rate, 0);
    }

    #[test]
    fn empty_stats_have_zero_success_rate() {
        let stats = ReminderStats::from_reminders(&[]);
        assert_eq!(stats.total_scheduled, 0);
        assert_eq!(stats.success_rate, 0);
        assert!(stats.by_type.is_empty());
    }
}
