use crate::dtos::AppointmentDTO;
use inkgest_domain::{Appointment, AppointmentStatus, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentResponse {
    pub success: bool,
    pub data: AppointmentDTO,
}

impl AppointmentResponse {
    pub fn new(appointment: Appointment) -> Self {
        Self {
            success: true,
            data: AppointmentDTO::new(appointment),
        }
    }
}

pub mod create_appointment {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub store_id: ID,
        pub client_id: ID,
        pub artist_id: ID,
        pub service_id: ID,
        pub start_ts: i64,
        pub end_ts: i64,
        pub notes: Option<String>,
    }

    pub type APIResponse = AppointmentResponse;
}

pub mod get_appointment {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub appointment_id: ID,
    }

    pub type APIResponse = AppointmentResponse;
}

pub mod get_appointments {
    use super::*;

    #[derive(Serialize, Deserialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        pub store_id: ID,
        pub start_date: Option<i64>,
        pub end_date: Option<i64>,
        pub artist_id: Option<ID>,
        pub client_id: Option<ID>,
        pub status: Option<AppointmentStatus>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub success: bool,
        pub data: Vec<AppointmentDTO>,
    }

    impl APIResponse {
        pub fn new(appointments: Vec<Appointment>) -> Self {
            Self {
                success: true,
                data: appointments.into_iter().map(AppointmentDTO::new).collect(),
            }
        }
    }
}

pub mod update_appointment {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub appointment_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub artist_id: Option<ID>,
        pub service_id: Option<ID>,
        pub start_ts: Option<i64>,
        pub end_ts: Option<i64>,
        pub status: Option<AppointmentStatus>,
        pub notes: Option<String>,
    }

    pub type APIResponse = AppointmentResponse;
}

pub mod cancel_appointment {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub appointment_id: ID,
    }

    #[derive(Serialize, Deserialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        pub reason: Option<String>,
    }

    pub type APIResponse = AppointmentResponse;
}

pub mod confirm_appointment {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub token: String,
    }

    /// Always answered with http 200; failures are part of the payload
    /// and carry one of the stable, user-facing error strings.
    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub success: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub appointment: Option<AppointmentDTO>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub error: Option<String>,
    }

    impl APIResponse {
        pub fn confirmed(appointment: Appointment) -> Self {
            Self {
                success: true,
                appointment: Some(AppointmentDTO::new(appointment)),
                error: None,
            }
        }

        pub fn rejected(error: &str) -> Self {
            Self {
                success: false,
                appointment: None,
                error: Some(error.to_string()),
            }
        }
    }
}
