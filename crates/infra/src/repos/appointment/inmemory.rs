use super::IAppointmentRepo;
use crate::repos::shared::inmemory_repo::*;
use crate::repos::shared::query_structs::AppointmentQuery;
use inkgest_domain::{Appointment, ID};

pub struct InMemoryAppointmentRepo {
    appointments: std::sync::Mutex<Vec<Appointment>>,
}

impl InMemoryAppointmentRepo {
    pub fn new() -> Self {
        Self {
            appointments: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IAppointmentRepo for InMemoryAppointmentRepo {
    async fn insert(&self, appointment: &Appointment) -> anyhow::Result<()> {
        insert(appointment, &self.appointments);
        Ok(())
    }

    async fn save(&self, appointment: &Appointment) -> anyhow::Result<()> {
        save(appointment, &self.appointments);
        Ok(())
    }

    async fn find(&self, appointment_id: &ID) -> Option<Appointment> {
        find(appointment_id, &self.appointments)
    }

    async fn find_many(&self, appointment_ids: &[ID]) -> anyhow::Result<Vec<Appointment>> {
        let res = find_by(&self.appointments, |appointment| {
            appointment_ids.contains(&appointment.id)
        });
        Ok(res)
    }

    async fn find_by_store(&self, query: AppointmentQuery) -> anyhow::Result<Vec<Appointment>> {
        let res = find_by(&self.appointments, |appointment| {
            if appointment.store_id != query.store_id {
                return false;
            }
            if let Some(start_ts) = query.start_ts {
                if appointment.start_ts < start_ts {
                    return false;
                }
            }
            if let Some(end_ts) = query.end_ts {
                if appointment.start_ts > end_ts {
                    return false;
                }
            }
            if let Some(artist_id) = &query.artist_id {
                if appointment.artist_id != *artist_id {
                    return false;
                }
            }
            if let Some(client_id) = &query.client_id {
                if appointment.client_id != *client_id {
                    return false;
                }
            }
            if let Some(status) = query.status {
                if appointment.status != status {
                    return false;
                }
            }
            true
        });
        Ok(res)
    }
}
