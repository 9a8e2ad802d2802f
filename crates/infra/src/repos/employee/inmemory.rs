use super::IEmployeeRepo;
use crate::repos::shared::inmemory_repo;
use nido_domain::{Employee, ID};
use std::sync::Mutex;

pub struct InMemoryEmployeeRepo {
    employees: Mutex<Vec<Employee>>,
}

impl InMemoryEmployeeRepo {
    pub fn new() -> Self {
        Self {
            employees: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IEmployeeRepo for InMemoryEmployeeRepo {
    async fn insert(&self, employee: &Employee) -> anyhow::Result<()> {
        inmemory_repo::insert(employee, &self.employees);
        Ok(())
    }

    async fn save(&self, employee: &Employee) -> anyhow::Result<()> {
        inmemory_repo::save(employee, &self.employees);
        Ok(())
    }

    async fn find(&self, employee_id: &ID) -> Option<Employee> {
        inmemory_repo::find(employee_id, &self.employees)
    }

    async fn find_by_email(&self, email: &str) -> Option<Employee> {
        inmemory_repo::find_by(&self.employees, |e| e.email == email)
            .into_iter()
            .next()
    }

    async fn delete(&self, employee_id: &ID) -> Option<Employee> {
        inmemory_repo::delete(employee_id, &self.employees)
    }
}
