use super::IConfirmationTokenRepo;
use crate::repos::shared::inmemory_repo::*;
use inkgest_domain::{AppointmentConfirmationToken, ID};

pub struct InMemoryConfirmationTokenRepo {
    tokens: std::sync::Mutex<Vec<AppointmentConfirmationToken>>,
}

impl InMemoryConfirmationTokenRepo {
    pub fn new() -> Self {
        Self {
            tokens: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IConfirmationTokenRepo for InMemoryConfirmationTokenRepo {
    async fn insert(&self, token: &AppointmentConfirmationToken) -> anyhow::Result<()> {
        insert(token, &self.tokens);
        Ok(())
    }

    async fn save(&self, token: &AppointmentConfirmationToken) -> anyhow::Result<()> {
        save(token, &self.tokens);
        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> Option<AppointmentConfirmationToken> {
        find_one_by(&self.tokens, |t| t.token == token)
    }

    async fn find_by_appointment(
        &self,
        appointment_id: &ID,
    ) -> Vec<AppointmentConfirmationToken> {
        find_by(&self.tokens, |t| t.appointment_id == *appointment_id)
    }
}
