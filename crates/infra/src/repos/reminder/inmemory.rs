use super::IReminderRepo;
use crate::repos::shared::inmemory_repo::*;
use crate::repos::shared::repo::UpdateResult;
use inkgest_domain::{ReminderSchedule, ReminderType, ID};

pub struct InMemoryReminderRepo {
    reminders: std::sync::Mutex<Vec<ReminderSchedule>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &ReminderSchedule) -> anyhow::Result<()> {
        insert(reminder, &self.reminders);
        Ok(())
    }

    async fn save(&self, reminder: &ReminderSchedule) -> anyhow::Result<()> {
        save(reminder, &self.reminders);
        Ok(())
    }

    async fn find_by_appointment_and_type(
        &self,
        appointment_id: &ID,
        reminder_type: ReminderType,
    ) -> Option<ReminderSchedule> {
        find_one_by(&self.reminders, |reminder| {
            reminder.appointment_id == *appointment_id && reminder.reminder_type == reminder_type
        })
    }

    async fn find_by_appointment(&self, appointment_id: &ID) -> Vec<ReminderSchedule> {
        find_by(&self.reminders, |reminder| {
            reminder.appointment_id == *appointment_id
        })
    }

    async fn find_due(&self, before_inc: i64) -> anyhow::Result<Vec<ReminderSchedule>> {
        let res = find_by(&self.reminders, |reminder| {
            !reminder.sent && reminder.scheduled_for <= before_inc
        });
        Ok(res)
    }

    async fn find_by_store_in_range(
        &self,
        store_id: &ID,
        start_ts: i64,
        end_ts: i64,
    ) -> anyhow::Result<Vec<ReminderSchedule>> {
        let res = find_by(&self.reminders, |reminder| {
            reminder.store_id == *store_id
                && reminder.scheduled_for >= start_ts
                && reminder.scheduled_for <= end_ts
        });
        Ok(res)
    }

    async fn cancel_by_appointment(
        &self,
        appointment_id: &ID,
        now: i64,
        error_message: &str,
    ) -> anyhow::Result<UpdateResult> {
        let res = update_many(
            &self.reminders,
            |reminder| reminder.appointment_id == *appointment_id && !reminder.sent,
            |reminder| reminder.mark_skipped(now, error_message),
        );
        Ok(res)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn reminder_factory(
        appointment_id: &ID,
        reminder_type: ReminderType,
        scheduled_for: i64,
    ) -> ReminderSchedule {
        ReminderSchedule::new(
            appointment_id.clone(),
            Default::default(),
            reminder_type,
            scheduled_for,
        )
    }

    #[tokio::test]
    async fn finds_only_unsent_due_rows() {
        let repo = InMemoryReminderRepo::new();
        let appointment_id = ID::default();

        let due = reminder_factory(&appointment_id, ReminderType::TwentyFourHours, 100);
        let future = reminder_factory(&appointment_id, ReminderType::TwoHours, 1000);
        let mut already_sent =
            reminder_factory(&appointment_id, ReminderType::Confirmation, 100);
        already_sent.mark_sent(100);

        repo.insert(&due).await.unwrap();
        repo.insert(&future).await.unwrap();
        repo.insert(&already_sent).await.unwrap();

        let found = repo.find_due(500).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, due.id);
    }

    #[tokio::test]
    async fn cancel_flips_only_unsent_rows() {
        let repo = InMemoryReminderRepo::new();
        let appointment_id = ID::default();

        let pending = reminder_factory(&appointment_id, ReminderType::TwentyFourHours, 100);
        let mut sent = reminder_factory(&appointment_id, ReminderType::Confirmation, 50);
        sent.mark_sent(60);
        let other = reminder_factory(&ID::default(), ReminderType::TwoHours, 100);

        repo.insert(&pending).await.unwrap();
        repo.insert(&sent).await.unwrap();
        repo.insert(&other).await.unwrap();

        let res = repo
            .cancel_by_appointment(&appointment_id, 200, "Appointment cancelled")
            .await
            .unwrap();
        assert_eq!(res.updated_count, 1);

        let rows = repo.find_by_appointment(&appointment_id).await;
        let cancelled = rows.iter().find(|r| r.id == pending.id).unwrap();
        assert_eq!(cancelled.error.as_deref(), Some("Appointment cancelled"));
        assert_eq!(cancelled.sent_at, Some(200));
        let untouched = rows.iter().find(|r| r.id == sent.id).unwrap();
        assert_eq!(untouched.error, None);
        assert_eq!(untouched.sent_at, Some(60));

        // The other appointment stays due
        assert_eq!(repo.find_due(500).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn finds_by_appointment_and_type() {
        let repo = InMemoryReminderRepo::new();
        let appointment_id = ID::default();
        let reminder = reminder_factory(&appointment_id, ReminderType::TwoHours, 100);
        repo.insert(&reminder).await.unwrap();

        assert_eq!(
            repo.find_by_appointment_and_type(&appointment_id, ReminderType::TwoHours)
                .await,
            Some(reminder)
        );
        assert_eq!(
            repo.find_by_appointment_and_type(&appointment_id, ReminderType::Confirmation)
                .await,
            None
        );
    }
}
