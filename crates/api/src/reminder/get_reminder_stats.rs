use crate::error::InkGestError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use inkgest_api_structs::get_reminder_stats::*;
use inkgest_domain::{ReminderStats, ID};
use inkgest_infra::InkGestContext;

pub async fn get_reminder_stats_controller(
    query_params: web::Query<QueryParams>,
    ctx: web::Data<InkGestContext>,
) -> Result<HttpResponse, InkGestError> {
    let query = query_params.0;
    let usecase = GetReminderStatsUseCase {
        store_id: query.store_id,
        start_date: query.start_date,
        end_date: query.end_date,
    };

    execute(usecase, &ctx)
        .await
        .map(|stats| HttpResponse::Ok().json(APIResponse::new(stats)))
        .map_err(InkGestError::from)
}

/// Read-side aggregation over the reminder rows of one store within an
/// inclusive `scheduled_for` range.
#[derive(Debug)]
pub struct GetReminderStatsUseCase {
    pub store_id: ID,
    pub start_date: i64,
    pub end_date: i64,
}

#[derive(Debug)]
pub enum UseCaseError {
    StoreNotFound(ID),
    InvalidTimespan,
    StorageError,
}

impl From<UseCaseError> for InkGestError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StoreNotFound(store_id) => {
                Self::NotFound(format!("The store with id: {}, was not found.", store_id))
            }
            UseCaseError::InvalidTimespan => {
                Self::BadClientData("The end date has to come after the start date".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetReminderStatsUseCase {
    type Response = ReminderStats;

    type Error = UseCaseError;

    const NAME: &'static str = "GetReminderStats";

    async fn execute(&mut self, ctx: &InkGestContext) -> Result<Self::Response, Self::Error> {
        if self.end_date < self.start_date {
            return Err(UseCaseError::InvalidTimespan);
        }
        if ctx.repos.stores.find(&self.store_id).await.is_none() {
            return Err(UseCaseError::StoreNotFound(self.store_id.clone()));
        }

        let reminders = ctx
            .repos
            .reminders
            .find_by_store_in_range(&self.store_id, self.start_date, self.end_date)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(ReminderStats::from_reminders(&reminders))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use inkgest_domain::{ReminderSchedule, ReminderType, Store};
    use inkgest_infra::setup_context_inmemory;

    #[actix_web::main]
    #[test]
    async fn aggregates_rows_within_scope() {
        let ctx = setup_context_inmemory();
        let store = Store::new("Black Lotus Ink");
        ctx.repos.stores.insert(&store).await.unwrap();
        let other_store = Store::new("Iron Anchor");
        ctx.repos.stores.insert(&other_store).await.unwrap();

        let mut sent_ok_1 = ReminderSchedule::new(
            ID::default(),
            store.id.clone(),
            ReminderType::TwentyFourHours,
            100,
        );
        sent_ok_1.mark_sent(100);
        let mut sent_ok_2 =
            ReminderSchedule::new(ID::default(), store.id.clone(), ReminderType::TwoHours, 200);
        sent_ok_2.mark_sent(200);
        let mut sent_ok_3 = ReminderSchedule::new(
            ID::default(),
            store.id.clone(),
            ReminderType::Confirmation,
            300,
        );
        sent_ok_3.mark_sent(300);
        let mut failed =
            ReminderSchedule::new(ID::default(), store.id.clone(), ReminderType::TwoHours, 400);
        failed.mark_attempt_failed("gateway timeout");
        // Outside the queried range
        let out_of_range = ReminderSchedule::new(
            ID::default(),
            store.id.clone(),
            ReminderType::TwoHours,
            5000,
        );
        // Other tenant
        let other_store_row = ReminderSchedule::new(
            ID::default(),
            other_store.id.clone(),
            ReminderType::TwoHours,
            250,
        );

        for reminder in [
            &sent_ok_1,
            &sent_ok_2,
            &sent_ok_3,
            &failed,
            &out_of_range,
            &other_store_row,
        ]
        .iter()
        {
            ctx.repos.reminders.insert(reminder).await.unwrap();
        }

        let usecase = GetReminderStatsUseCase {
            store_id: store.id.clone(),
            start_date: 0,
            end_date: 1000,
        };
        let stats = execute(usecase, &ctx).await.unwrap();
        assert_eq!(stats.total_scheduled, 4);
        assert_eq!(stats.total_sent, 3);
        assert_eq!(stats.total_failed, 1);
        assert_eq!(stats.success_rate, 75);
        assert_eq!(stats.by_type[&ReminderType::TwoHours].total_scheduled, 2);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_inverted_timespan() {
        let ctx = setup_context_inmemory();
        let store = Store::new("Black Lotus Ink");
        ctx.repos.stores.insert(&store).await.unwrap();

        let usecase = GetReminderStatsUseCase {
            store_id: store.id.clone(),
            start_date: 1000,
            end_date: 0,
        };
        let res = execute(usecase, &ctx).await;
        assert!(matches!(res.unwrap_err(), UseCaseError::InvalidTimespan));
    }

    #[actix_web::main]
    #[test]
    async fn rejects_unknown_store() {
        let ctx = setup_context_inmemory();
        let usecase = GetReminderStatsUseCase {
            store_id: ID::default(),
            start_date: 0,
            end_date: 1000,
        };
        let res = execute(usecase, &ctx).await;
        assert!(matches!(res.unwrap_err(), UseCaseError::StoreNotFound(_)));
    }
}
