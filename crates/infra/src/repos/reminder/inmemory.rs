use super::IReminderRepo;
use crate::repos::shared::inmemory_repo;
use nido_domain::{Reminder, ID};
use std::sync::Mutex;

pub struct InMemoryReminderRepo {
    reminders: Mutex<Vec<Reminder>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        inmemory_repo::insert(reminder, &self.reminders);
        Ok(())
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        inmemory_repo::save(reminder, &self.reminders);
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        inmemory_repo::find(reminder_id, &self.reminders)
    }

    async fn find_by_owner(&self, owner_id: &ID) -> Vec<Reminder> {
        inmemory_repo::find_by(&self.reminders, |r| r.owner_id == *owner_id)
    }

    async fn find_due(&self, now: i64) -> Vec<Reminder> {
        inmemory_repo::find_by(&self.reminders, |r| r.is_due(now))
    }

    async fn delete(&self, reminder_id: &ID) -> Option<Reminder> {
        inmemory_repo::delete(reminder_id, &self.reminders)
    }
}
