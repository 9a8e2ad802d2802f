use super::IEmployeeRepo;
use crate::repos::shared::mongo_repo;
use mongo_repo::MongoDocument;
use mongodb::{
    bson::{doc, Document},
    Collection, Database,
};
use nido_domain::{Employee, ID};
use serde::{Deserialize, Serialize};

pub struct MongoEmployeeRepo {
    collection: Collection<Document>,
}

impl MongoEmployeeRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("employees"),
        }
    }
}

#[async_trait::async_trait]
impl IEmployeeRepo for MongoEmployeeRepo {
    async fn insert(&self, employee: &Employee) -> anyhow::Result<()> {
        mongo_repo::insert::<_, EmployeeMongo>(&self.collection, employee).await
    }

    async fn save(&self, employee: &Employee) -> anyhow::Result<()> {
        mongo_repo::save::<_, EmployeeMongo>(&self.collection, employee).await
    }

    async fn find(&self, employee_id: &ID) -> Option<Employee> {
        let filter = doc! {
            "_id": employee_id.as_string(),
        };
        mongo_repo::find_one_by::<_, EmployeeMongo>(&self.collection, filter).await
    }

    async fn find_by_email(&self, email: &str) -> Option<Employee> {
        let filter = doc! {
            "email": email,
        };
        mongo_repo::find_one_by::<_, EmployeeMongo>(&self.collection, filter).await
    }

    async fn delete(&self, employee_id: &ID) -> Option<Employee> {
        let filter = doc! {
            "_id": employee_id.as_string(),
        };
        mongo_repo::delete::<_, EmployeeMongo>(&self.collection, filter).await
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct EmployeeMongo {
    _id: ID,
    name: String,
    email: String,
    device_token: Option<String>,
    is_admin: bool,
}

impl MongoDocument<Employee> for EmployeeMongo {
    fn to_domain(self) -> Employee {
        Employee {
            id: self._id,
            name: self.name,
            email: self.email,
            device_token: self.device_token,
            is_admin: self.is_admin,
        }
    }

    fn from_domain(employee: &Employee) -> Self {
        Self {
            _id: employee.id.clone(),
            name: employee.name.clone(),
            email: employee.email.clone(),
            device_token: employee.device_token.clone(),
            is_admin: employee.is_admin,
        }
    }

    fn get_id_filter(&self) -> Document {
        doc! {
            "_id": self._id.as_string()
        }
    }
}
