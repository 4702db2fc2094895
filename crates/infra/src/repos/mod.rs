mod appointment;
mod artist;
mod client;
mod confirmation_token;
mod reminder;
mod service_offering;
mod shared;
mod store;

use appointment::{IAppointmentRepo, InMemoryAppointmentRepo, PostgresAppointmentRepo};
use artist::{IArtistRepo, InMemoryArtistRepo, PostgresArtistRepo};
use client::{IClientRepo, InMemoryClientRepo, PostgresClientRepo};
use confirmation_token::{
    IConfirmationTokenRepo, InMemoryConfirmationTokenRepo, PostgresConfirmationTokenRepo,
};
use reminder::{IReminderRepo, InMemoryReminderRepo, PostgresReminderRepo};
use service_offering::{
    IServiceOfferingRepo, InMemoryServiceOfferingRepo, PostgresServiceOfferingRepo,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use store::{IStoreRepo, InMemoryStoreRepo, PostgresStoreRepo};
use tracing::info;

pub use shared::query_structs::*;
pub use shared::repo::UpdateResult;

#[derive(Clone)]
pub struct Repos {
    pub stores: Arc<dyn IStoreRepo>,
    pub clients: Arc<dyn IClientRepo>,
    pub artists: Arc<dyn IArtistRepo>,
    pub service_offerings: Arc<dyn IServiceOfferingRepo>,
    pub appointments: Arc<dyn IAppointmentRepo>,
    pub reminders: Arc<dyn IReminderRepo>,
    pub confirmation_tokens: Arc<dyn IConfirmationTokenRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;

        // This is needed to make sure that db is ready when opening server
        info!("DB CHECKING CONNECTION ...");
        sqlx::query("SELECT 1").execute(&pool).await?;
        info!("DB CHECKING CONNECTION ... [done]");

        Ok(Self {
            stores: Arc::new(PostgresStoreRepo::new(pool.clone())),
            clients: Arc::new(PostgresClientRepo::new(pool.clone())),
            artists: Arc::new(PostgresArtistRepo::new(pool.clone())),
            service_offerings: Arc::new(PostgresServiceOfferingRepo::new(pool.clone())),
            appointments: Arc::new(PostgresAppointmentRepo::new(pool.clone())),
            reminders: Arc::new(PostgresReminderRepo::new(pool.clone())),
            confirmation_tokens: Arc::new(PostgresConfirmationTokenRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            stores: Arc::new(InMemoryStoreRepo::new()),
            clients: Arc::new(InMemoryClientRepo::new()),
            artists: Arc::new(InMemoryArtistRepo::new()),
            service_offerings: Arc::new(InMemoryServiceOfferingRepo::new()),
            appointments: Arc::new(InMemoryAppointmentRepo::new()),
            reminders: Arc::new(InMemoryReminderRepo::new()),
            confirmation_tokens: Arc::new(InMemoryConfirmationTokenRepo::new()),
        }
    }
}
