use crate::date::get_month_length;
use crate::shared::entity::{Entity, ID};
use chrono::prelude::*;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SNOOZE_MINUTES: i64 = 15;

const MILLIS_PER_DAY: i64 = 1000 * 60 * 60 * 24;

/// A `Reminder` is a dated follow-up note owned by a single `Employee`,
/// usually about a property inquiry. When it becomes due it is delivered to
/// the owner as a push notification and an in-app banner, and for repeating
/// reminders the next occurrence is computed from its `RepeatPolicy`.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    /// The `Employee` that owns this `Reminder` and receives its deliveries
    pub owner_id: ID,
    pub title: String,
    /// Free-form note content, may contain markup from the console editor
    pub body: String,
    /// When the reminder should first fire
    pub due_at: i64,
    /// Timezone the owner picked when creating the reminder. Only kept for
    /// display purposes, all scheduling arithmetic is done on UTC timestamps.
    pub timezone: Tz,
    /// Contact snapshot of the linked inquiry, included in delivery payloads
    pub contact: Option<ContactDetails>,
    /// Master kill switch. An inactive reminder never fires again, whatever
    /// its status or trigger timestamps say.
    pub active: bool,
    pub status: ReminderStatus,
    /// Recurrence settings, `None` for one-shot reminders
    pub repeat: Option<RepeatPolicy>,
    /// When a delivery was last dispatched, used for deduplication
    pub last_triggered_at: Option<i64>,
    pub trigger_count: i64,
    pub snooze_count: i64,
    /// Most recent completion, kept for reporting. For repeating reminders
    /// this survives the status reverting to `Pending` for the next cycle.
    pub last_completion: Option<CompletionRecord>,
    pub edit_history: Vec<ReminderEdit>,
    pub created: i64,
    pub updated: i64,
}

/// Lifecycle state of a `Reminder`. The variants carry the data that is only
/// meaningful in that state, so a snooze timestamp cannot outlive the snooze.
#[derive(Debug, Clone, PartialEq)]
pub enum ReminderStatus {
    Pending,
    Completed(CompletionRecord),
    Snoozed { until: i64 },
    Dismissed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRecord {
    pub note: String,
    pub word_count: usize,
    pub color: ResponseColor,
    pub completed_at: i64,
}

/// Report tag for the quality of a completion note, derived from its word
/// count. Used by the back-office dashboards, never by the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseColor {
    Red,
    Yellow,
    Green,
}

impl ResponseColor {
    pub fn classify(word_count: usize) -> Self {
        if word_count < 10 {
            Self::Red
        } else if word_count <= 20 {
            Self::Yellow
        } else {
            Self::Green
        }
    }
}

pub fn word_count(note: &str) -> usize {
    note.split_whitespace().count()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatInterval {
    Daily,
    Weekly,
    Monthly,
}

impl RepeatInterval {
    /// Advances a timestamp by one interval unit. Monthly advancement keeps
    /// the day of month, clamped to the length of the target month.
    pub fn advance(&self, ts: i64) -> i64 {
        match self {
            Self::Daily => ts + MILLIS_PER_DAY,
            Self::Weekly => ts + 7 * MILLIS_PER_DAY,
            Self::Monthly => {
                let dt = Utc.timestamp_millis(ts);
                let (year, month) = if dt.month() == 12 {
                    (dt.year() + 1, 1)
                } else {
                    (dt.year(), dt.month() + 1)
                };
                let day = std::cmp::min(dt.day(), get_month_length(year, month));
                Utc.ymd(year, month, day)
                    .and_hms_milli(dt.hour(), dt.minute(), dt.second(), dt.timestamp_subsec_millis())
                    .timestamp_millis()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepeatPolicy {
    pub interval: RepeatInterval,
    /// Next time the reminder should fire. `None` whenever the reminder is
    /// inactive.
    pub next_trigger: Option<i64>,
}

/// Contact details of the inquiry a reminder was created from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
}

/// The fields of a `Reminder` covered by the edit log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderContent {
    pub title: String,
    pub body: String,
    pub due_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderEdit {
    pub old: ReminderContent,
    pub new: ReminderContent,
    pub edited_at: i64,
    pub edited_by: ID,
}

/// Field changes requested by an edit. `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct ReminderChanges {
    pub title: Option<String>,
    pub body: Option<String>,
    pub due_at: Option<i64>,
    pub contact: Option<ContactDetails>,
}

impl Reminder {
    pub fn new(
        owner_id: ID,
        title: &str,
        body: &str,
        due_at: i64,
        timezone: Tz,
        repeat_interval: Option<RepeatInterval>,
        now: i64,
    ) -> Self {
        Self {
            id: Default::default(),
            owner_id,
            title: title.into(),
            body: body.into(),
            due_at,
            timezone,
            contact: None,
            active: true,
            status: ReminderStatus::Pending,
            repeat: repeat_interval.map(|interval| RepeatPolicy {
                interval,
                next_trigger: Some(due_at),
            }),
            last_triggered_at: None,
            trigger_count: 0,
            snooze_count: 0,
            last_completion: None,
            edit_history: Vec::new(),
            created: now,
            updated: now,
        }
    }

    pub fn is_repeating(&self) -> bool {
        self.repeat.is_some()
    }

    /// Whether the reminder is eligible for delivery at `now`. One-shot
    /// reminders follow `due_at`, repeating reminders follow `next_trigger`,
    /// snoozed reminders wake up at `snoozed_until`. Inactive, completed and
    /// dismissed reminders are never due.
    pub fn is_due(&self, now: i64) -> bool {
        if !self.active {
            return false;
        }
        let repeat_due = self
            .repeat
            .as_ref()
            .and_then(|policy| policy.next_trigger)
            .map_or(false, |next| next <= now);
        match &self.status {
            ReminderStatus::Pending => match &self.repeat {
                Some(_) => repeat_due,
                None => self.due_at <= now,
            },
            ReminderStatus::Snoozed { until } => *until <= now || repeat_due,
            ReminderStatus::Completed(_) | ReminderStatus::Dismissed => false,
        }
    }

    /// Whether a delivery was dispatched less than `cooldown_millis` ago.
    /// The due-check polls more often than anyone wants to be notified, so
    /// deliveries inside this window are skipped.
    pub fn within_cooldown(&self, now: i64, cooldown_millis: i64) -> bool {
        self.last_triggered_at
            .map_or(false, |last| now - last < cooldown_millis)
    }

    /// Records the completion note. A repeating reminder that is still
    /// active gets its next occurrence computed and goes back to `Pending`,
    /// a one-shot reminder stays in `Completed`.
    ///
    /// Callers must validate that `note` is non-empty.
    pub fn complete(&mut self, note: String, now: i64) {
        let words = word_count(&note);
        let record = CompletionRecord {
            word_count: words,
            color: ResponseColor::classify(words),
            note,
            completed_at: now,
        };
        self.last_completion = Some(record.clone());
        if self.is_repeating() && self.active {
            self.recompute_next_trigger(now);
            self.status = ReminderStatus::Pending;
        } else {
            self.status = ReminderStatus::Completed(record);
        }
        self.updated = now;
    }

    /// Callers must validate that `minutes` is positive
    pub fn snooze(&mut self, minutes: i64, now: i64) {
        self.status = ReminderStatus::Snoozed {
            until: now + minutes * 60 * 1000,
        };
        self.snooze_count += 1;
        self.updated = now;
    }

    /// One-shot reminders move to `Dismissed`. Repeating reminders are
    /// deactivated instead, which suppresses all future deliveries while
    /// keeping their trigger and completion history readable.
    pub fn dismiss(&mut self, now: i64) {
        if self.is_repeating() {
            self.active = false;
            if let Some(policy) = self.repeat.as_mut() {
                policy.next_trigger = None;
            }
        } else {
            self.status = ReminderStatus::Dismissed;
        }
        self.updated = now;
    }

    /// Applies the requested field changes. An entry is appended to the edit
    /// log only when title, body or due date actually changed. Moving the due
    /// date of an active repeating reminder reschedules it from the new date.
    pub fn apply_edit(&mut self, changes: ReminderChanges, edited_by: &ID, now: i64) {
        let old = self.content();
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(body) = changes.body {
            self.body = body;
        }
        let due_at_changed = match changes.due_at {
            Some(due_at) if due_at != self.due_at => {
                self.due_at = due_at;
                true
            }
            _ => false,
        };
        if let Some(contact) = changes.contact {
            self.contact = Some(contact);
            self.updated = now;
        }

        let new = self.content();
        if new != old {
            self.edit_history.push(ReminderEdit {
                old,
                new,
                edited_at: now,
                edited_by: edited_by.clone(),
            });
            self.updated = now;
        }

        if due_at_changed && self.active {
            if let Some(policy) = self.repeat.as_mut() {
                policy.next_trigger = Some(self.due_at);
            }
            self.recompute_next_trigger(now);
        }
    }

    /// Bookkeeping after a delivery was dispatched: stamps the trigger
    /// timestamps, wakes a snoozed reminder back to `Pending` and schedules
    /// the next occurrence of a repeating reminder.
    pub fn mark_triggered(&mut self, now: i64) {
        self.last_triggered_at = Some(now);
        self.trigger_count += 1;
        if let ReminderStatus::Snoozed { .. } = self.status {
            self.status = ReminderStatus::Pending;
        }
        self.recompute_next_trigger(now);
        self.updated = now;
    }

    /// Advances `next_trigger` one interval at a time until it is strictly
    /// after `now`. A single step is not enough when the service was down for
    /// longer than the repeat interval, the occurrences missed in the
    /// meantime are not delivered retroactively.
    pub fn recompute_next_trigger(&mut self, now: i64) {
        let due_at = self.due_at;
        let active = self.active;
        let policy = match self.repeat.as_mut() {
            Some(policy) => policy,
            None => return,
        };
        if !active {
            policy.next_trigger = None;
            return;
        }
        let mut next = policy.next_trigger.unwrap_or(due_at);
        while next <= now {
            next = policy.interval.advance(next);
        }
        policy.next_trigger = Some(next);
    }

    fn content(&self) -> ReminderContent {
        ReminderContent {
            title: self.title.clone(),
            body: self.body.clone(),
            due_at: self.due_at,
        }
    }
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}
