use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::NoShow => "no-show",
        }
    }
}

impl Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum InvalidStatusError {
    #[error("Invalid appointment status: {0}")]
    Unknown(String),
}

impl FromStr for AppointmentStatus {
    type Err = InvalidStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "confirmed" => Ok(Self::Confirmed),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "no-show" => Ok(Self::NoShow),
            _ => Err(InvalidStatusError::Unknown(s.to_string())),
        }
    }
}

/// A booked session for a `Client` with an `Artist` at a `Store`.
/// Reminder scheduling and dispatch hang off this entity.
#[derive(Debug, Clone)]
pub struct Appointment {
    pub id: ID,
    pub store_id: ID,
    pub client_id: ID,
    pub artist_id: ID,
    pub service_id: ID,
    pub start_ts: i64,
    pub end_ts: i64,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub cancellation_reason: Option<String>,
    pub created: i64,
    pub updated: i64,
}

impl Appointment {
    /// Reminders are pointless once the appointment can no longer take
    /// place or already has.
    pub fn reminders_obsolete(&self) -> bool {
        matches!(
            self.status,
            AppointmentStatus::Cancelled | AppointmentStatus::Completed
        )
    }
}

impl Entity for Appointment {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_parses_status_roundtrip() {
        for status in [
            AppointmentStatus::Scheduled,
            AppointmentStatus::Confirmed,
            AppointmentStatus::Completed,
            AppointmentStatus::Cancelled,
            AppointmentStatus::NoShow,
        ]
        .iter()
        {
            assert_eq!(status.as_str().parse::<AppointmentStatus>().unwrap(), *status);
        }
        assert!("unknown".parse::<AppointmentStatus>().is_err());
    }
}
