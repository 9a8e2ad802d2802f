use crate::error::NidoError;
use crate::shared::{
    auth::{protect_route, Permission},
    usecase::{execute_with_policy, PermissionBoundary, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use nido_api_structs::snooze_reminder::*;
use nido_domain::{Employee, Reminder, ReminderStatus, DEFAULT_SNOOZE_MINUTES, ID};
use nido_infra::NidoContext;

pub async fn snooze_reminder_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<NidoContext>,
) -> Result<HttpResponse, NidoError> {
    let (employee, policy) = protect_route(&http_req, &ctx).await?;

    let usecase = SnoozeReminderUseCase {
        reminder_id: path_params.reminder_id.clone(),
        employee,
        minutes: body.0.minutes.unwrap_or(DEFAULT_SNOOZE_MINUTES),
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(NidoError::from)
}

#[derive(Debug)]
pub struct SnoozeReminderUseCase {
    pub reminder_id: ID,
    pub employee: Employee,
    pub minutes: i64,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    NotReminderOwner,
    InvalidSnoozeDuration(i64),
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
            UseCaseError::InvalidSnoozeDuration(minutes) => Self::BadClientData(format!(
                "A reminder can only be snoozed for a positive number of minutes, got: {}",
                minutes
            )),
            UseCaseError::AlreadyClosed => {
                Self::BadClientData("The reminder is already completed or dismissed".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SnoozeReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "SnoozeReminder";

    async fn execute(&mut self, ctx: &NidoContext) -> Result<Self::Response, Self::Error> {
        if self.minutes <= 0 {
            return Err(UseCaseError::InvalidSnoozeDuration(self.minutes));
        }

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

        reminder.snooze(self.minutes, ctx.sys.get_timestamp_millis());

        ctx.repos
            .reminders
            .save(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(reminder)
    }
}

impl PermissionBoundary for SnoozeReminderUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::SnoozeReminder]
    }
}
