use crate::reminder::Reminder;
use crate::shared::entity::{Entity, ID};

/// An `Employee` is a back-office user that owns `Reminder`s about the
/// property inquiries assigned to them. Due reminders are pushed to the
/// employee's registered device token, when one is present.
#[derive(Debug, Clone)]
pub struct Employee {
    pub id: ID,
    pub name: String,
    pub email: String,
    /// FCM registration token of the employee's device. Replaced whenever
    /// the employee signs in on a new device and cleared when the push
    /// provider reports it invalid.
    pub device_token: Option<String>,
    pub is_admin: bool,
}

impl Employee {
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            id: Default::default(),
            name: name.into(),
            email: email.into(),
            device_token: None,
            is_admin: false,
        }
    }

    /// Reminders are exclusively owned, admins can act on any of them
    pub fn can_modify(&self, reminder: &Reminder) -> bool {
        self.is_admin || reminder.owner_id == self.id
    }
}

impl Entity for Employee {
    fn id(&self) -> &ID {
        &self.id
    }
}
