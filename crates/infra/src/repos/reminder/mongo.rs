use super::IReminderRepo;
use crate::repos::shared::mongo_repo;
use mongo_repo::MongoDocument;
use mongodb::{
    bson::{doc, Document},
    Collection, Database,
};
use nido_domain::{
    CompletionRecord, ContactDetails, Reminder, ReminderEdit, ReminderStatus, RepeatInterval,
    RepeatPolicy, Tz, ID,
};
use serde::{Deserialize, Serialize};
use tracing::error;

pub struct MongoReminderRepo {
    collection: Collection<Document>,
}

impl MongoReminderRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("reminders"),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for MongoReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        mongo_repo::insert::<_, ReminderMongo>(&self.collection, reminder).await
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        mongo_repo::save::<_, ReminderMongo>(&self.collection, reminder).await
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        let filter = doc! {
            "_id": reminder_id.as_string(),
        };
        mongo_repo::find_one_by::<_, ReminderMongo>(&self.collection, filter).await
    }

    async fn find_by_owner(&self, owner_id: &ID) -> Vec<Reminder> {
        let filter = doc! {
            "owner_id": owner_id.as_string(),
        };
        match mongo_repo::find_many_by::<_, ReminderMongo>(&self.collection, filter).await {
            Ok(reminders) => reminders,
            Err(e) => {
                error!("Unable to query reminders by owner: {:?}", e);
                Vec::new()
            }
        }
    }

    async fn find_due(&self, now: i64) -> Vec<Reminder> {
        // Index-friendly coarse filter, the exact predicate is re-applied
        // on the domain entity below
        let filter = doc! {
            "active": true,
            "$or": [
                { "due_at": { "$lte": now } },
                { "snoozed_until": { "$lte": now } },
                { "next_trigger": { "$lte": now } },
            ]
        };
        match mongo_repo::find_many_by::<_, ReminderMongo>(&self.collection, filter).await {
            Ok(reminders) => reminders.into_iter().filter(|r| r.is_due(now)).collect(),
            Err(e) => {
                error!("Unable to query due reminders: {:?}", e);
                Vec::new()
            }
        }
    }

    async fn delete(&self, reminder_id: &ID) -> Option<Reminder> {
        let filter = doc! {
            "_id": reminder_id.as_string(),
        };
        mongo_repo::delete::<_, ReminderMongo>(&self.collection, filter).await
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ReminderMongo {
    _id: ID,
    owner_id: ID,
    title: String,
    body: String,
    due_at: i64,
    timezone: Tz,
    contact: Option<ContactDetails>,
    active: bool,
    status: String,
    snoozed_until: Option<i64>,
    completion: Option<CompletionRecord>,
    repeat_interval: Option<RepeatInterval>,
    next_trigger: Option<i64>,
    last_triggered_at: Option<i64>,
    trigger_count: i64,
    snooze_count: i64,
    last_completion: Option<CompletionRecord>,
    edit_history: Vec<ReminderEdit>,
    created: i64,
    updated: i64,
}

impl MongoDocument<Reminder> for ReminderMongo {
    fn to_domain(self) -> Reminder {
        let status = match self.status.as_str() {
            "completed" => match self.completion {
                Some(record) => ReminderStatus::Completed(record),
                None => ReminderStatus::Pending,
            },
            "snoozed" => match self.snoozed_until {
                Some(until) => ReminderStatus::Snoozed { until },
                None => ReminderStatus::Pending,
            },
            "dismissed" => ReminderStatus::Dismissed,
            _ => ReminderStatus::Pending,
        };
        let next_trigger = self.next_trigger;
        Reminder {
            id: self._id,
            owner_id: self.owner_id,
            title: self.title,
            body: self.body,
            due_at: self.due_at,
            timezone: self.timezone,
            contact: self.contact,
            active: self.active,
            status,
            repeat: self.repeat_interval.map(|interval| RepeatPolicy {
                interval,
                next_trigger,
            }),
            last_triggered_at: self.last_triggered_at,
            trigger_count: self.trigger_count,
            snooze_count: self.snooze_count,
            last_completion: self.last_completion,
            edit_history: self.edit_history,
            created: self.created,
            updated: self.updated,
        }
    }

    fn from_domain(reminder: &Reminder) -> Self {
        let (status, snoozed_until, completion) = match &reminder.status {
            ReminderStatus::Pending => ("pending", None, None),
            ReminderStatus::Completed(record) => ("completed", None, Some(record.clone())),
            ReminderStatus::Snoozed { until } => ("snoozed", Some(*until), None),
            ReminderStatus::Dismissed => ("dismissed", None, None),
        };
        Self {
            _id: reminder.id.clone(),
            owner_id: reminder.owner_id.clone(),
            title: reminder.title.clone(),
            body: reminder.body.clone(),
            due_at: reminder.due_at,
            timezone: reminder.timezone,
            contact: reminder.contact.clone(),
            active: reminder.active,
            status: status.into(),
            snoozed_until,
            completion,
            repeat_interval: reminder.repeat.as_ref().map(|policy| policy.interval),
            next_trigger: reminder.repeat.as_ref().and_then(|policy| policy.next_trigger),
            last_triggered_at: reminder.last_triggered_at,
            trigger_count: reminder.trigger_count,
            snooze_count: reminder.snooze_count,
            last_completion: reminder.last_completion.clone(),
            edit_history: reminder.edit_history.clone(),
            created: reminder.created,
            updated: reminder.updated,
        }
    }

    fn get_id_filter(&self) -> Document {
        doc! {
            "_id": self._id.as_string()
        }
    }
}
