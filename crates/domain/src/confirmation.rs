use crate::shared::entity::{Entity, ID};
use inkgest_utils::create_random_secret;

const TOKEN_LEN: usize = 30;

/// A single-use, time-limited credential that lets a `Client` confirm an
/// `Appointment` without authenticating. Kept forever for audit history.
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentConfirmationToken {
    pub id: ID,
    pub appointment_id: ID,
    /// The opaque string handed out in the confirmation link
    pub token: String,
    pub confirmed: bool,
    pub confirmed_at: Option<i64>,
    pub expires_at: i64,
}

impl AppointmentConfirmationToken {
    pub fn new(appointment_id: ID, expires_at: i64) -> Self {
        Self {
            id: Default::default(),
            appointment_id,
            token: create_random_secret(TOKEN_LEN),
            confirmed: false,
            confirmed_at: None,
            expires_at,
        }
    }

    pub fn is_expired(&self, now: i64) -> bool {
        now > self.expires_at
    }

    pub fn confirm(&mut self, now: i64) {
        self.confirmed = true;
        self.confirmed_at = Some(now);
    }
}

impl Entity for AppointmentConfirmationToken {
    fn id(&self) -> &ID {
        &self.id
    }
}
