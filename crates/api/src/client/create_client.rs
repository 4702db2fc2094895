use crate::error::{FieldError, InkGestError};
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use inkgest_api_structs::create_client::*;
use inkgest_domain::{Client, ID};
use inkgest_infra::InkGestContext;

pub async fn create_client_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<InkGestContext>,
) -> Result<HttpResponse, InkGestError> {
    let body = body.0;
    let usecase = CreateClientUseCase {
        store_id: body.store_id,
        name: body.name,
        email: body.email,
        phone: body.phone,
        birth_date: body.birth_date,
        guardian_name: body.guardian_name,
        guardian_phone: body.guardian_phone,
    };

    execute(usecase, &ctx)
        .await
        .map(|client| HttpResponse::Created().json(APIResponse::new(client)))
        .map_err(InkGestError::from)
}

#[derive(Debug)]
pub struct CreateClientUseCase {
    pub store_id: ID,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<i64>,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
}

#[derive(Debug)]
pub enum UseCaseError {
    StoreNotFound(ID),
    InvalidIntake(Vec<FieldError>),
    StorageError,
}

impl From<UseCaseError> for InkGestError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StoreNotFound(store_id) => {
                Self::NotFound(format!("The store with id: {}, was not found.", store_id))
            }
            UseCaseError::InvalidIntake(errors) => Self::Validation(errors),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateClientUseCase {
    type Response = Client;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateClient";

    async fn execute(&mut self, ctx: &InkGestContext) -> Result<Self::Response, Self::Error> {
        if ctx.repos.stores.find(&self.store_id).await.is_none() {
            return Err(UseCaseError::StoreNotFound(self.store_id.clone()));
        }

        let mut client = Client::new(self.store_id.clone(), &self.name);
        client.email = self.email.clone();
        client.phone = self.phone.clone();
        client.birth_date = self.birth_date;
        client.guardian_name = self.guardian_name.clone();
        client.guardian_phone = self.guardian_phone.clone();

        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(FieldError::new("name", "Name must not be empty"));
        }
        let now = ctx.sys.get_timestamp_millis();
        if client.is_minor(now) == Some(true) && !client.has_guardian_info() {
            errors.push(FieldError::new(
                "guardianName",
                "Clients under 18 must provide guardian name and phone",
            ));
        }
        if !errors.is_empty() {
            return Err(UseCaseError::InvalidIntake(errors));
        }

        ctx.repos
            .clients
            .insert(&client)
            .await
            .map(|_| client)
            .map_err(|_| UseCaseError::StorageError)
    }
}
