use crate::error::NidoError;
use crate::shared::{auth::protect_route, usecase::{execute, UseCase}};
use actix_web::{web, HttpRequest, HttpResponse};
use nido_api_structs::set_device_token::*;
use nido_domain::Employee;
use nido_infra::NidoContext;

pub async fn set_device_token_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<NidoContext>,
) -> Result<HttpResponse, NidoError> {
    let (employee, _policy) = protect_route(&http_req, &ctx).await?;

    let usecase = SetDeviceTokenUseCase {
        employee,
        device_token: body.0.device_token,
    };

    execute(usecase, &ctx)
        .await
        .map(|employee| HttpResponse::Ok().json(APIResponse::new(employee)))
        .map_err(NidoError::from)
}

/// Registers or clears the device the employee wants push deliveries on.
/// This is also the reaction point when a dispatch reported the stored
/// token as invalid.
#[derive(Debug)]
pub struct SetDeviceTokenUseCase {
    pub employee: Employee,
    pub device_token: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for NidoError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SetDeviceTokenUseCase {
    type Response = Employee;

    type Error = UseCaseError;

    const NAME: &'static str = "SetDeviceToken";

    async fn execute(&mut self, ctx: &NidoContext) -> Result<Self::Response, Self::Error> {
        let mut employee = self.employee.clone();
        employee.device_token = self.device_token.clone();

        ctx.repos
            .employees
            .save(&employee)
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
    async fn replaces_and_clears_device_token() {
        let ctx = setup_context().await;
        let employee = Employee::new("Dana", "dana@example.org");
        ctx.repos.employees.insert(&employee).await.unwrap();

        let mut usecase = SetDeviceTokenUseCase {
            employee: employee.clone(),
            device_token: Some("new-device-token".into()),
        };
        assert!(usecase.execute(&ctx).await.is_ok());
        let persisted = ctx.repos.employees.find(&employee.id).await.unwrap();
        assert_eq!(persisted.device_token, Some("new-device-token".into()));

        let mut usecase = SetDeviceTokenUseCase {
            employee: persisted,
            device_token: None,
        };
        assert!(usecase.execute(&ctx).await.is_ok());
        let persisted = ctx.repos.employees.find(&employee.id).await.unwrap();
        assert_eq!(persisted.device_token, None);
    }
}
