use nido_domain::{Employee, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDTO {
    pub id: ID,
    pub name: String,
    pub email: String,
    pub device_token: Option<String>,
    pub is_admin: bool,
}

impl EmployeeDTO {
    pub fn new(employee: Employee) -> Self {
        Self {
            id: employee.id,
            name: employee.name,
            email: employee.email,
            device_token: employee.device_token,
            is_admin: employee.is_admin,
        }
    }
}
