use serde::{Deserialize, Serialize};

/// A Policy is set on an `Employee` session and decides which actions it can
/// and cannot take.
///
/// The `Policy` is embedded in the json web token claims when the session is
/// issued. Every `UseCase` contains a list of `Permission`s that is required
/// to execute it, if the session `Policy` is not authorized for some of these
/// `Permission`s the request will be rejected.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Policy {
    /// `Permission`s allowed by the `Policy`
    allow: Option<Vec<Permission>>,
    /// `Permission`s rejected by the `Policy`
    reject: Option<Vec<Permission>>,
}

impl Policy {
    /// Checks if this `Policy` has the right to the list of `Permission`s
    pub fn authorize(&self, permissions: &[Permission]) -> bool {
        if permissions.is_empty() {
            return true;
        }

        if let Some(rejected) = &self.reject {
            for rejected_permission in rejected {
                if *rejected_permission == Permission::All {
                    return false;
                }
                if permissions.contains(rejected_permission) {
                    return false;
                }
            }
        }

        if let Some(allowed) = &self.allow {
            // First loop to check if All exists
            if allowed.contains(&Permission::All) {
                return true;
            }

            // Check that all permissions are in allowed
            for permission in permissions {
                if !allowed.contains(permission) {
                    return false;
                }
            }

            return true;
        }

        false
    }
}

/// `Permission`s are the different kinds of actions that can be performed.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub enum Permission {
    #[serde(rename = "*")]
    All,
    CreateReminder,
    UpdateReminder,
    CompleteReminder,
    SnoozeReminder,
    DismissReminder,
    DeleteReminder,
}
