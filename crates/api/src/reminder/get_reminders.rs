use crate::error::NidoError;
use crate::shared::{auth::protect_route, usecase::{execute, UseCase}};
use actix_web::{web, HttpRequest, HttpResponse};
use nido_api_structs::get_reminders::*;
use nido_domain::{Reminder, ID};
use nido_infra::NidoContext;

pub async fn get_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<NidoContext>,
) -> Result<HttpResponse, NidoError> {
    let (employee, _policy) = protect_route(&http_req, &ctx).await?;

    let usecase = GetRemindersUseCase {
        owner_id: employee.id,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminders| HttpResponse::Ok().json(APIResponse::new(reminders)))
        .map_err(NidoError::from)
}

#[derive(Debug)]
pub struct GetRemindersUseCase {
    pub owner_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for NidoError {
    fn from(_: UseCaseError) -> Self {
        Self::InternalError
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetRemindersUseCase {
    type Response = Vec<Reminder>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetReminders";

    async fn execute(&mut self, ctx: &NidoContext) -> Result<Self::Response, Self::Error> {
        Ok(ctx.repos.reminders.find_by_owner(&self.owner_id).await)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reminder::test_helpers::{insert_reminder, setup, TestContext};
    use nido_domain::Employee;

    #[actix_web::main]
    #[test]
    async fn lists_only_own_reminders() {
        let TestContext { ctx, employee } = setup().await;
        insert_reminder(&ctx, &employee, 500, None).await;
        insert_reminder(&ctx, &employee, 900, None).await;

        let colleague = Employee::new("Sam", "sam@example.org");
        ctx.repos.employees.insert(&colleague).await.unwrap();
        insert_reminder(&ctx, &colleague, 700, None).await;

        let mut usecase = GetRemindersUseCase {
            owner_id: employee.id.clone(),
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.len(), 2);
        assert!(res.iter().all(|r| r.owner_id == employee.id));
    }
}
