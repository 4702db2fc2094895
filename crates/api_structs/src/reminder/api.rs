use crate::dtos::{ReminderScheduleDTO, ReminderStatsDTO};
use inkgest_domain::{ReminderSchedule, ReminderStats, ID};
use serde::{Deserialize, Serialize};

pub mod cancel_appointment_reminders {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub appointment_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub success: bool,
        pub data: CancelledReminders,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CancelledReminders {
        pub cancelled_count: i64,
    }

    impl APIResponse {
        pub fn new(cancelled_count: i64) -> Self {
            Self {
                success: true,
                data: CancelledReminders { cancelled_count },
            }
        }
    }
}

pub mod get_reminder_stats {
    use super::*;

    #[derive(Serialize, Deserialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        pub store_id: ID,
        pub start_date: i64,
        pub end_date: i64,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub success: bool,
        pub data: ReminderStatsDTO,
    }

    impl APIResponse {
        pub fn new(stats: ReminderStats) -> Self {
            Self {
                success: true,
                data: stats,
            }
        }
    }
}

pub mod schedule_appointment_reminders {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub success: bool,
        pub data: Vec<ReminderScheduleDTO>,
    }

    impl APIResponse {
        pub fn new(reminders: Vec<ReminderSchedule>) -> Self {
            Self {
                success: true,
                data: reminders.into_iter().map(ReminderScheduleDTO::new).collect(),
            }
        }
    }
}
