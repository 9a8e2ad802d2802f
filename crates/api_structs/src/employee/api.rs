use crate::dtos::EmployeeDTO;
use nido_domain::Employee;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    pub employee: EmployeeDTO,
}

impl EmployeeResponse {
    pub fn new(employee: Employee) -> Self {
        Self {
            employee: EmployeeDTO::new(employee),
        }
    }
}

pub mod create_employee {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub name: String,
        pub email: String,
        pub is_admin: Option<bool>,
    }

    pub type APIResponse = EmployeeResponse;
}

pub mod set_device_token {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        /// `None` clears the stored token, for example after the push
        /// provider reported it invalid
        pub device_token: Option<String>,
    }

    pub type APIResponse = EmployeeResponse;
}
