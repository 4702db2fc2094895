use inkgest_domain::{AppointmentStatus, ID};

/// Filters for querying `Appointment`s within a `Store`
#[derive(Debug, Clone)]
pub struct AppointmentQuery {
    pub store_id: ID,
    /// Inclusive lower bound on the appointment start time
    pub start_ts: Option<i64>,
    /// Inclusive upper bound on the appointment start time
    pub end_ts: Option<i64>,
    pub artist_id: Option<ID>,
    pub client_id: Option<ID>,
    pub status: Option<AppointmentStatus>,
}
