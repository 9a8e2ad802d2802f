use crate::error::NidoError;
use crate::shared::{auth::protect_route, usecase::{execute, UseCase}};
use actix_web::{web, HttpRequest, HttpResponse};
use nido_api_structs::get_reminder::*;
use nido_domain::{Employee, Reminder, ID};
use nido_infra::NidoContext;

pub async fn get_reminder_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<NidoContext>,
) -> Result<HttpResponse, NidoError> {
    let (employee, _policy) = protect_route(&http_req, &ctx).await?;

    let usecase = GetReminderUseCase {
        reminder_id: path_params.reminder_id.clone(),
        employee,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(NidoError::from)
}

#[derive(Debug)]
pub struct GetReminderUseCase {
    pub reminder_id: ID,
    pub employee: Employee,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    NotReminderOwner,
}

impl From<UseCaseError> for NidoError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {}, was not found.",
                reminder_id
            )),
            UseCaseError::NotReminderOwner => {
                Self::Unauthorized("The reminder belongs to a different employee".into())
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "GetReminder";

    async fn execute(&mut self, ctx: &NidoContext) -> Result<Self::Response, Self::Error> {
        let reminder = match ctx.repos.reminders.find(&self.reminder_id).await {
            Some(reminder) => reminder,
            None => return Err(UseCaseError::NotFound(self.reminder_id.clone())),
        };
        if !self.employee.can_modify(&reminder) {
            return Err(UseCaseError::NotReminderOwner);
        }

        Ok(reminder)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reminder::test_helpers::{insert_reminder, setup, TestContext};

    #[actix_web::main]
    #[test]
    async fn returns_own_reminder() {
        let TestContext { ctx, employee } = setup().await;
        let reminder = insert_reminder(&ctx, &employee, 500, None).await;

        let mut usecase = GetReminderUseCase {
            reminder_id: reminder.id.clone(),
            employee,
        };
        let res = usecase.execute(&ctx).await;
        assert!(res.is_ok());
        assert_eq!(res.unwrap().id, reminder.id);
    }

    #[actix_web::main]
    #[test]
    async fn hides_other_employees_reminders() {
        let TestContext { ctx, employee } = setup().await;
        let reminder = insert_reminder(&ctx, &employee, 500, None).await;

        let intruder = Employee::new("Sam", "sam@example.org");
        ctx.repos.employees.insert(&intruder).await.unwrap();

        let mut usecase = GetReminderUseCase {
            reminder_id: reminder.id,
            employee: intruder,
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::NotReminderOwner
        );
    }
}
