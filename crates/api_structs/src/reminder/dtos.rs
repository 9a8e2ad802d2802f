use nido_domain::{
    CompletionRecord, ContactDetails, Reminder, ReminderEdit, ReminderStatus, RepeatInterval, ID,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum ReminderStatusDTO {
    Pending,
    Completed,
    Snoozed,
    Dismissed,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub owner_id: ID,
    pub title: String,
    pub body: String,
    pub due_at: i64,
    pub timezone: String,
    pub contact: Option<ContactDetails>,
    pub active: bool,
    pub status: ReminderStatusDTO,
    pub snoozed_until: Option<i64>,
    pub completion: Option<CompletionRecord>,
    pub repeat_interval: Option<RepeatInterval>,
    pub next_trigger: Option<i64>,
    pub last_triggered_at: Option<i64>,
    pub trigger_count: i64,
    pub snooze_count: i64,
    pub last_completion: Option<CompletionRecord>,
    pub edit_history: Vec<ReminderEdit>,
    pub created: i64,
    pub updated: i64,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder) -> Self {
        let (status, snoozed_until, completion) = match reminder.status {
            ReminderStatus::Pending => (ReminderStatusDTO::Pending, None, None),
            ReminderStatus::Completed(record) => {
                (ReminderStatusDTO::Completed, None, Some(record))
            }
            ReminderStatus::Snoozed { until } => (ReminderStatusDTO::Snoozed, Some(until), None),
            ReminderStatus::Dismissed => (ReminderStatusDTO::Dismissed, None, None),
        };
        Self {
            id: reminder.id,
            owner_id: reminder.owner_id,
            title: reminder.title,
            body: reminder.body,
            due_at: reminder.due_at,
            timezone: reminder.timezone.to_string(),
            contact: reminder.contact,
            active: reminder.active,
            status,
            snoozed_until,
            completion,
            repeat_interval: reminder.repeat.as_ref().map(|policy| policy.interval),
            next_trigger: reminder.repeat.as_ref().and_then(|policy| policy.next_trigger),
            last_triggered_at: reminder.last_triggered_at,
            trigger_count: reminder.trigger_count,
            snooze_count: reminder.snooze_count,
            last_completion: reminder.last_completion,
            edit_history: reminder.edit_history,
            created: reminder.created,
            updated: reminder.updated,
        }
    }
}
