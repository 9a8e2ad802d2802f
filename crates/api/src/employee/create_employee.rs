use crate::error::NidoError;
use crate::shared::{auth::protect_admin_route, usecase::{execute, UseCase}};
use actix_web::{web, HttpRequest, HttpResponse};
use nido_api_structs::create_employee::*;
use nido_domain::Employee;
use nido_infra::NidoContext;

pub async fn create_employee_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<NidoContext>,
) -> Result<HttpResponse, NidoError> {
    protect_admin_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = CreateEmployeeUseCase {
        name: body.name,
        email: body.email,
        is_admin: body.is_admin.unwrap_or(false),
    };

    execute(usecase, &ctx)
        .await
        .map(|employee| HttpResponse::Created().json(APIResponse::new(employee)))
        .map_err(NidoError::from)
}

#[derive(Debug)]
pub struct CreateEmployeeUseCase {
    pub name: String,
    pub email: String,
    pub is_admin: bool,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    EmptyName,
    InvalidEmail(String),
    EmailTaken(String),
    StorageError,
}

impl From<UseCaseError> for NidoError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EmptyName => {
                Self::BadClientData("An employee cannot be created without a name".into())
            }
            UseCaseError::InvalidEmail(email) => {
                Self::BadClientData(format!("Invalid email address provided: {}", email))
            }
            UseCaseError::EmailTaken(email) => Self::Conflict(format!(
                "An employee with the email: {}, already exists.",
                email
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateEmployeeUseCase {
    type Response = Employee;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateEmployee";

    async fn execute(&mut self, ctx: &NidoContext) -> Result<Self::Response, Self::Error> {
        if self.name.trim().is_empty() {
            return Err(UseCaseError::EmptyName);
        }
        if !self.email.contains('@') {
            return Err(UseCaseError::InvalidEmail(self.email.clone()));
        }
        if ctx.repos.employees.find_by_email(&self.email).await.is_some() {
            return Err(UseCaseError::EmailTaken(self.email.clone()));
        }

        let mut employee = Employee::new(&self.name, &self.email);
        employee.is_admin = self.is_admin;

        ctx.repos
            .employees
            .insert(&employee)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(employee)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use nido_infra::setup_context;

    #[actix_web::main]
    #[test]
    async fn creates_employee() {
        let ctx = setup_context().await;

        let mut usecase = CreateEmployeeUseCase {
            name: "Dana".into(),
            email: "dana@example.org".into(),
            is_admin: false,
        };

        let res = usecase.execute(&ctx).await;
        assert!(res.is_ok());
        let employee = res.unwrap();
        assert!(ctx.repos.employees.find(&employee.id).await.is_some());
    }

    #[actix_web::main]
    #[test]
    async fn rejects_duplicate_email() {
        let ctx = setup_context().await;

        let mut usecase = CreateEmployeeUseCase {
            name: "Dana".into(),
            email: "dana@example.org".into(),
            is_admin: false,
        };
        assert!(usecase.execute(&ctx).await.is_ok());

        let mut usecase = CreateEmployeeUseCase {
            name: "Other Dana".into(),
            email: "dana@example.org".into(),
            is_admin: false,
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::EmailTaken("dana@example.org".into())
        );
    }

    #[actix_web::main]
    #[test]
    async fn rejects_invalid_input() {
        let ctx = setup_context().await;

        let mut usecase = CreateEmployeeUseCase {
            name: "  ".into(),
            email: "dana@example.org".into(),
            is_admin: false,
        };
        assert_eq!(usecase.execute(&ctx).await.unwrap_err(), UseCaseError::EmptyName);

        let mut usecase = CreateEmployeeUseCase {
            name: "Dana".into(),
            email: "not-an-email".into(),
            is_admin: false,
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidEmail("not-an-email".into())
        );
    }
}
