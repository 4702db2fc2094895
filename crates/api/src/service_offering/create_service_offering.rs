use crate::error::{FieldError, InkGestError};
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use inkgest_api_structs::create_service_offering::*;
use inkgest_domain::{ServiceCategory, ServiceOffering, ID};
use inkgest_infra::InkGestContext;

pub async fn create_service_offering_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<InkGestContext>,
) -> Result<HttpResponse, InkGestError> {
    let body = body.0;
    let usecase = CreateServiceOfferingUseCase {
        store_id: body.store_id,
        name: body.name,
        duration: body.duration,
        price_cents: body.price_cents.unwrap_or(0),
        category: body.category,
    };

    execute(usecase, &ctx)
        .await
        .map(|service| HttpResponse::Created().json(APIResponse::new(service)))
        .map_err(InkGestError::from)
}

#[derive(Debug)]
pub struct CreateServiceOfferingUseCase {
    pub store_id: ID,
    pub name: String,
    pub duration: i64,
    pub price_cents: i64,
    pub category: ServiceCategory,
}

#[derive(Debug)]
pub enum UseCaseError {
    StoreNotFound(ID),
    InvalidService(Vec<FieldError>),
    StorageError,
}

impl From<UseCaseError> for InkGestError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StoreNotFound(store_id) => {
                Self::NotFound(format!("The store with id: {}, was not found.", store_id))
            }
            UseCaseError::InvalidService(errors) => Self::Validation(errors),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateServiceOfferingUseCase {
    type Response = ServiceOffering;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateServiceOffering";

    async fn execute(&mut self, ctx: &InkGestContext) -> Result<Self::Response, Self::Error> {
        if ctx.repos.stores.find(&self.store_id).await.is_none() {
            return Err(UseCaseError::StoreNotFound(self.store_id.clone()));
        }

        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(FieldError::new("name", "Name must not be empty"));
        }
        if self.duration <= 0 {
            errors.push(FieldError::new("duration", "Duration must be positive"));
        }
        if self.price_cents < 0 {
            errors.push(FieldError::new("priceCents", "Price must not be negative"));
        }
        if !errors.is_empty() {
            return Err(UseCaseError::InvalidService(errors));
        }

        let mut service = ServiceOffering::new(
            self.store_id.clone(),
            &self.name,
            self.duration,
            self.category,
        );
        service.price_cents = self.price_cents;

        ctx.repos
            .service_offerings
            .insert(&service)
            .await
            .map(|_| service)
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use inkgest_domain::Store;
    use inkgest_infra::setup_context_inmemory;

    #[actix_web::main]
    #[test]
    async fn rejects_non_positive_duration() {
        let ctx = setup_context_inmemory();
        let store = Store::new("Black Lotus Ink");
        ctx.repos.stores.insert(&store).await.unwrap();

        let usecase = CreateServiceOfferingUseCase {
            store_id: store.id.clone(),
            name: "Full sleeve session".into(),
            duration: 0,
            price_cents: 25000,
            category: ServiceCategory::Tattoo,
        };
        let res = execute(usecase, &ctx).await;
        assert!(matches!(res.unwrap_err(), UseCaseError::InvalidService(_)));
    }

    #[actix_web::main]
    #[test]
    async fn creates_service_offering() {
        let ctx = setup_context_inmemory();
        let store = Store::new("Black Lotus Ink");
        ctx.repos.stores.insert(&store).await.unwrap();

        let usecase = CreateServiceOfferingUseCase {
            store_id: store.id.clone(),
            name: "Septum piercing".into(),
            duration: 1000 * 60 * 30,
            price_cents: 4500,
            category: ServiceCategory::Piercing,
        };
        let res = execute(usecase, &ctx).await;
        assert!(res.is_ok());
    }
}
