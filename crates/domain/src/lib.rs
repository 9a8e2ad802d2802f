mod date;
mod employee;
mod reminder;
mod shared;

pub use chrono_tz::{Tz, UTC};
pub use employee::Employee;
pub use reminder::{
    word_count, CompletionRecord, ContactDetails, ReminderChanges, ReminderContent, ReminderEdit,
    Reminder, ReminderStatus, RepeatInterval, RepeatPolicy, ResponseColor, DEFAULT_SNOOZE_MINUTES,
};
pub use shared::entity::{Entity, ID};
