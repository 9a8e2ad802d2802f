use crate::error::NidoError;
use crate::shared::{
    auth::{protect_route, Permission},
    usecase::{execute_with_policy, PermissionBoundary, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use nido_api_structs::complete_reminder::*;
use nido_domain::{Employee, Reminder, ReminderStatus, ID};
use nido_infra::NidoContext;

pub async fn complete_reminder_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<NidoContext>,
) -> Result<HttpResponse, NidoError> {
    let (employee, policy) = protect_route(&http_req, &ctx).await?;

    let usecase = CompleteReminderUseCase {
        reminder_id: path_params.reminder_id.clone(),
        employee,
        note: body.0.note,
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(NidoError::from)
}

#[derive(Debug)]
pub struct CompleteReminderUseCase {
    pub reminder_id: ID,
    pub employee: Employee,
    pub note: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    NotReminderOwner,
    EmptyNote,
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
            UseCaseError::EmptyNote => {
                Self::BadClientData("A reminder cannot be completed without a note".into())
            }
            UseCaseError::AlreadyClosed => {
                Self::BadClientData("The reminder is already completed or dismissed".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CompleteReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "CompleteReminder";

    async fn execute(&mut self, ctx: &NidoContext) -> Result<Self::Response, Self::Error> {
        if self.note.trim().is_empty() {
            return Err(UseCaseError::EmptyNote);
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

        reminder.complete(self.note.clone(), ctx.sys.get_timestamp_millis());

        ctx.repos
            .reminders
            .save(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(reminder)
    }
}

impl PermissionBoundary for CompleteReminderUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::CompleteReminder]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reminder::test_helpers::{insert_reminder, setup, TestContext};
    use nido_domain::{RepeatInterval, ResponseColor};

    #[actix_web::main]
    #[test]
    async fn completes_one_shot_reminder_and_classifies_note() {
        let TestContext { ctx, employee } = setup().await;
        let reminder = insert_reminder(&ctx, &employee, 500, None).await;

        let mut usecase = CompleteReminderUseCase {
            reminder_id: reminder.id.clone(),
            employee,
            note: "ok done".into(),
        };

        let res = usecase.execute(&ctx).await;
        assert!(res.is_ok());
        let completed = res.unwrap();
        match &completed.status {
            ReminderStatus::Completed(record) => {
                assert_eq!(record.word_count, 2);
                assert_eq!(record.color, ResponseColor::Red);
            }
            other => panic!("Expected completed status, got: {:?}", other),
        }

        let persisted = ctx.repos.reminders.find(&completed.id).await.unwrap();
        assert_eq!(persisted.status, completed.status);
    }

    #[actix_web::main]
    #[test]
    async fn completing_repeating_reminder_schedules_next_cycle() {
        let TestContext { ctx, employee } = setup().await;
        let reminder = insert_reminder(&ctx, &employee, 500, Some(RepeatInterval::Daily)).await;

        let mut usecase = CompleteReminderUseCase {
            reminder_id: reminder.id.clone(),
            employee,
            note: "left a voicemail and sent the floor plans by mail".into(),
        };

        let res = usecase.execute(&ctx).await;
        assert!(res.is_ok());
        let completed = res.unwrap();
        assert_eq!(completed.status, ReminderStatus::Pending);
        assert!(completed.last_completion.is_some());
        let next = completed.repeat.as_ref().unwrap().next_trigger.unwrap();
        assert!(next > ctx.sys.get_timestamp_millis());
    }

    #[actix_web::main]
    #[test]
    async fn rejects_empty_and_whitespace_notes() {
        let TestContext { ctx, employee } = setup().await;
        let reminder = insert_reminder(&ctx, &employee, 500, None).await;

        for note in ["", "   "].iter() {
            let mut usecase = CompleteReminderUseCase {
                reminder_id: reminder.id.clone(),
                employee: employee.clone(),
                note: (*note).into(),
            };
            let res = usecase.execute(&ctx).await;
            assert_eq!(res.unwrap_err(), UseCaseError::EmptyNote);
        }

        // The failed calls left the reminder untouched
        let persisted = ctx.repos.reminders.find(&reminder.id).await.unwrap();
        assert_eq!(persisted.status, ReminderStatus::Pending);
        assert!(persisted.last_completion.is_none());
    }

    #[actix_web::main]
    #[test]
    async fn rejects_non_owner() {
        let TestContext { ctx, employee } = setup().await;
        let reminder = insert_reminder(&ctx, &employee, 500, None).await;

        let intruder = Employee::new("Sam", "sam@example.org");
        ctx.repos.employees.insert(&intruder).await.unwrap();

        let mut usecase = CompleteReminderUseCase {
            reminder_id: reminder.id.clone(),
            employee: intruder,
            note: "not mine".into(),
        };
        let res = usecase.execute(&ctx).await;
        assert_eq!(res.unwrap_err(), UseCaseError::NotReminderOwner);
    }

    #[actix_web::main]
    #[test]
    async fn admin_can_complete_for_other_employees() {
        let TestContext { ctx, employee } = setup().await;
        let reminder = insert_reminder(&ctx, &employee, 500, None).await;

        let mut admin = Employee::new("Alex", "alex@example.org");
        admin.is_admin = true;
        ctx.repos.employees.insert(&admin).await.unwrap();

        let mut usecase = CompleteReminderUseCase {
            reminder_id: reminder.id.clone(),
            employee: admin,
            note: "closed while Dana is on leave".into(),
        };
        assert!(usecase.execute(&ctx).await.is_ok());
    }

    #[actix_web::main]
    #[test]
    async fn rejects_completing_twice() {
        let TestContext { ctx, employee } = setup().await;
        let reminder = insert_reminder(&ctx, &employee, 500, None).await;

        let mut usecase = CompleteReminderUseCase {
            reminder_id: reminder.id.clone(),
            employee: employee.clone(),
            note: "first time".into(),
        };
        assert!(usecase.execute(&ctx).await.is_ok());

        let mut usecase = CompleteReminderUseCase {
            reminder_id: reminder.id,
            employee,
            note: "second time".into(),
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::AlreadyClosed
        );
    }

    #[actix_web::main]
    #[test]
    async fn rejects_unknown_reminder() {
        let TestContext { ctx, employee } = setup().await;

        let mut usecase = CompleteReminderUseCase {
            reminder_id: ID::new(),
            employee,
            note: "note".into(),
        };
        let res = usecase.execute(&ctx).await;
        assert_eq!(
            res.unwrap_err(),
            UseCaseError::NotFound(usecase.reminder_id.clone())
        );
    }
}
