use crate::error::NidoError;
use crate::shared::{
    auth::{protect_route, Permission},
    usecase::{execute_with_policy, PermissionBoundary, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use nido_api_structs::dismiss_reminder::*;
use nido_domain::{Employee, Reminder, ReminderStatus, ID};
use nido_infra::NidoContext;

pub async fn dismiss_reminder_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<NidoContext>,
) -> Result<HttpResponse, NidoError> {
    let (employee, policy) = protect_route(&http_req, &ctx).await?;

    let usecase = DismissReminderUseCase {
        reminder_id: path_params.reminder_id.clone(),
        employee,
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(NidoError::from)
}

#[derive(Debug)]
pub struct DismissReminderUseCase {
    pub reminder_id: ID,
    pub employee: Employee,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    NotReminderOwner,
    AlreadyClosed,
    StorageError,
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
            UseCaseError::AlreadyClosed => {
                Self::BadClientData("The reminder is already completed or dismissed".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DismissReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "DismissReminder";

    async fn execute(&mut self, ctx: &NidoContext) -> Result<Self::Response, Self::Error> {
        let mut reminder = match ctx.repos.reminders.find(&self.reminder_id).await {
            Some(reminder) => reminder,
            None => return Err(UseCaseError::NotFound(self.reminder_id.clone())),
        };
        if !self.employee.can_modify(&reminder) {
            return Err(UseCaseError::NotReminderOwner);
        }
        if let ReminderStatus::Completed(_) | ReminderStatus::Dismissed = reminder.status {
            return Err(UseCaseError::AlreadyClosed);
        }

        reminder.dismiss(ctx.sys.get_timestamp_millis());

        ctx.repos
            .reminders
            .save(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(reminder)
    }
}

impl PermissionBoundary for DismissReminderUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::DismissReminder]
    }
}
