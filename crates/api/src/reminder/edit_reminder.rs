use crate::error::NidoError;
use crate::shared::{
    auth::{protect_route, Permission},
    usecase::{execute_with_policy, PermissionBoundary, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use nido_api_structs::edit_reminder::*;
use nido_domain::{ContactDetails, Employee, Reminder, ReminderChanges, ReminderStatus, ID};
use nido_infra::NidoContext;

pub async fn edit_reminder_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<NidoContext>,
) -> Result<HttpResponse, NidoError> {
    let (employee, policy) = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = EditReminderUseCase {
        reminder_id: path_params.reminder_id.clone(),
        employee,
        title: body.title,
        body: body.body,
        due_at: body.due_at,
        contact: body.contact,
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(NidoError::from)
}

#[derive(Debug)]
pub struct EditReminderUseCase {
    pub reminder_id: ID,
    pub employee: Employee,
    pub title: Option<String>,
    pub body: Option<String>,
    pub due_at: Option<i64>,
    pub contact: Option<ContactDetails>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    NotReminderOwner,
    EmptyTitle,
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
            UseCaseError::EmptyTitle => {
                Self::BadClientData("A reminder cannot have an empty title".into())
            }
            UseCaseError::AlreadyClosed => {
                Self::BadClientData("The reminder is already completed or dismissed".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for EditReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "EditReminder";

    async fn execute(&mut self, ctx: &NidoContext) -> Result<Self::Response, Self::Error> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(UseCaseError::EmptyTitle);
            }
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

        let changes = ReminderChanges {
            title: self.title.clone(),
            body: self.body.clone(),
            due_at: self.due_at,
            contact: self.contact.clone(),
        };
        reminder.apply_edit(changes, &self.employee.id, ctx.sys.get_timestamp_millis());

        ctx.repos
            .reminders
            .save(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(reminder)
    }
}

impl PermissionBoundary for EditReminderUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::UpdateReminder]
    }
}
