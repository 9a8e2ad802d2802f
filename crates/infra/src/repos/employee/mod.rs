mod inmemory;
mod mongo;

pub use inmemory::InMemoryEmployeeRepo;
pub use mongo::MongoEmployeeRepo;
use nido_domain::{Employee, ID};

#[async_trait::async_trait]
pub trait IEmployeeRepo: Send + Sync {
    async fn insert(&self, employee: &Employee) -> anyhow::Result<()>;
    async fn save(&self, employee: &Employee) -> anyhow::Result<()>;
    async fn find(&self, employee_id: &ID) -> Option<Employee>;
    async fn find_by_email(&self, email: &str) -> Option<Employee>;
    async fn delete(&self, employee_id: &ID) -> Option<Employee>;
}
