use inkgest_domain::{Appointment, AppointmentStatus, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDTO {
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

impl AppointmentDTO {
    pub fn new(appointment: Appointment) -> Self {
        Self {
            id: appointment.id.clone(),
            store_id: appointment.store_id.clone(),
            client_id: appointment.client_id.clone(),
            artist_id: appointment.artist_id.clone(),
            service_id: appointment.service_id.clone(),
            start_ts: appointment.start_ts,
            end_ts: appointment.end_ts,
            status: appointment.status,
            notes: appointment.notes,
            cancellation_reason: appointment.cancellation_reason,
            created: appointment.created,
            updated: appointment.updated,
        }
    }
}
