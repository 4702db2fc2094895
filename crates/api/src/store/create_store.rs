use crate::error::InkGestError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use inkgest_api_structs::create_store::*;
use inkgest_domain::Store;
use inkgest_infra::InkGestContext;

pub async fn create_store_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<InkGestContext>,
) -> Result<HttpResponse, InkGestError> {
    let body = body.0;
    let usecase = CreateStoreUseCase {
        code: body.code,
        name: body.name,
        timezone: body.timezone,
    };

    execute(usecase, &ctx)
        .await
        .map(|store| HttpResponse::Created().json(APIResponse::new(store)))
        .map_err(InkGestError::from)
}

#[derive(Debug)]
pub struct CreateStoreUseCase {
    pub code: String,
    pub name: String,
    pub timezone: Option<String>,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidCreateStoreCode,
    InvalidTimezone(String),
    StorageError,
}

impl From<UseCaseError> for InkGestError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidCreateStoreCode => {
                Self::BadClientData("Invalid code provided for creating a store".into())
            }
            UseCaseError::InvalidTimezone(tz) => {
                Self::BadClientData(format!("Invalid timezone provided: {}", tz))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateStoreUseCase {
    type Response = Store;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateStore";

    async fn execute(&mut self, ctx: &InkGestContext) -> Result<Self::Response, Self::Error> {
        if self.code != ctx.config.create_store_secret_code {
            return Err(UseCaseError::InvalidCreateStoreCode);
        }

        let mut store = Store::new(&self.name);
        if let Some(tz) = &self.timezone {
            store.settings.timezone = tz
                .parse()
                .map_err(|_| UseCaseError::InvalidTimezone(tz.clone()))?;
        }

        ctx.repos
            .stores
            .insert(&store)
            .await
            .map(|_| store)
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use inkgest_infra::setup_context_inmemory;

    #[actix_web::main]
    #[test]
    async fn creates_store_with_valid_code() {
        let ctx = setup_context_inmemory();
        let code = ctx.config.create_store_secret_code.clone();
        let usecase = CreateStoreUseCase {
            code,
            name: "Black Lotus Ink".into(),
            timezone: Some("Europe/Madrid".into()),
        };
        let res = execute(usecase, &ctx).await;
        assert!(res.is_ok());
        let store = res.unwrap();
        assert_eq!(store.settings.timezone, chrono_tz::Europe::Madrid);
        assert!(ctx.repos.stores.find(&store.id).await.is_some());
    }

    #[actix_web::main]
    #[test]
    async fn rejects_invalid_code() {
        let ctx = setup_context_inmemory();
        let mut code = ctx.config.create_store_secret_code.clone();
        code.push_str("a");
        let usecase = CreateStoreUseCase {
            code,
            name: "Black Lotus Ink".into(),
            timezone: None,
        };
        let res = execute(usecase, &ctx).await;
        assert!(res.is_err());
    }
}
