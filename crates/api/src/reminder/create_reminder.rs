use crate::error::NidoError;
use crate::shared::{
    auth::{protect_route, Permission},
    usecase::{execute_with_policy, PermissionBoundary, Subscriber, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use nido_api_structs::create_reminder::*;
use nido_api_structs::dtos::ReminderDTO;
use nido_domain::{ContactDetails, Reminder, RepeatInterval, Tz, ID, UTC};
use nido_infra::NidoContext;

pub async fn create_reminder_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<NidoContext>,
) -> Result<HttpResponse, NidoError> {
    let (employee, policy) = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = CreateReminderUseCase {
        owner_id: employee.id,
        title: body.title,
        body: body.body,
        due_at: body.due_at,
        timezone: body.timezone,
        repeat_interval: body.repeat_interval,
        contact: body.contact,
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|reminder| HttpResponse::Created().json(APIResponse::new(reminder)))
        .map_err(NidoError::from)
}

#[derive(Debug)]
pub struct CreateReminderUseCase {
    pub owner_id: ID,
    pub title: String,
    pub body: String,
    pub due_at: i64,
    pub timezone: Option<String>,
    pub repeat_interval: Option<RepeatInterval>,
    pub contact: Option<ContactDetails>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    EmptyTitle,
    InvalidTimezone(String),
    StorageError,
}

impl From<UseCaseError> for NidoError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EmptyTitle => {
                Self::BadClientData("A reminder cannot be created without a title".into())
            }
            UseCaseError::InvalidTimezone(tz) => {
                Self::BadClientData(format!("Invalid timezone specified: {}", tz))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateReminder";

    async fn execute(&mut self, ctx: &NidoContext) -> Result<Self::Response, Self::Error> {
        if self.title.trim().is_empty() {
            return Err(UseCaseError::EmptyTitle);
        }
        let timezone: Tz = match &self.timezone {
            Some(timezone) => timezone
                .parse()
                .map_err(|_| UseCaseError::InvalidTimezone(timezone.clone()))?,
            None => UTC,
        };

        let now = ctx.sys.get_timestamp_millis();
        let mut reminder = Reminder::new(
            self.owner_id.clone(),
            &self.title,
            &self.body,
            self.due_at,
            timezone,
            self.repeat_interval,
            now,
        );
        reminder.contact = self.contact.clone();

        ctx.repos
            .reminders
            .insert(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(reminder)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(BroadcastReminderCreated)]
    }
}

impl PermissionBoundary for CreateReminderUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::CreateReminder]
    }
}

/// Lets the console show the new reminder in other open sessions right away
pub struct BroadcastReminderCreated;

#[async_trait::async_trait(?Send)]
impl Subscriber<CreateReminderUseCase> for BroadcastReminderCreated {
    async fn notify(&self, reminder: &Reminder, ctx: &NidoContext) {
        ctx.broadcaster
            .publish("reminder/created", &ReminderDTO::new(reminder.clone()));
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use nido_domain::{Employee, ReminderStatus};
    use nido_infra::setup_context;

    struct TestContext {
        ctx: NidoContext,
        employee: Employee,
    }

    async fn setup() -> TestContext {
        let ctx = setup_context().await;
        let employee = Employee::new("Dana", "dana@example.org");
        ctx.repos.employees.insert(&employee).await.unwrap();

        TestContext { ctx, employee }
    }

    #[actix_web::main]
    #[test]
    async fn creates_one_shot_reminder() {
        let TestContext { ctx, employee } = setup().await;

        let mut usecase = CreateReminderUseCase {
            owner_id: employee.id.clone(),
            title: "Call back Mrs. Larsen".into(),
            body: "She asked about the Elm street duplex".into(),
            due_at: 500,
            timezone: None,
            repeat_interval: None,
            contact: None,
        };

        let res = usecase.execute(&ctx).await;

        assert!(res.is_ok());
        let reminder = res.unwrap();
        assert_eq!(reminder.status, ReminderStatus::Pending);
        assert!(reminder.active);
        assert!(reminder.repeat.is_none());
        assert!(ctx.repos.reminders.find(&reminder.id).await.is_some());
    }

    #[actix_web::main]
    #[test]
    async fn creates_repeating_reminder_scheduled_at_due_date() {
        let TestContext { ctx, employee } = setup().await;

        let mut usecase = CreateReminderUseCase {
            owner_id: employee.id.clone(),
            title: "Weekly portfolio review".into(),
            body: "".into(),
            due_at: 500,
            timezone: Some("Europe/Oslo".into()),
            repeat_interval: Some(RepeatInterval::Weekly),
            contact: None,
        };

        let res = usecase.execute(&ctx).await;

        assert!(res.is_ok());
        let reminder = res.unwrap();
        assert_eq!(reminder.repeat.unwrap().next_trigger, Some(500));
        assert_eq!(reminder.timezone.to_string(), "Europe/Oslo");
    }

    #[actix_web::main]
    #[test]
    async fn rejects_empty_title() {
        let TestContext { ctx, employee } = setup().await;

        let mut usecase = CreateReminderUseCase {
            owner_id: employee.id.clone(),
            title: "   ".into(),
            body: "body".into(),
            due_at: 500,
            timezone: None,
            repeat_interval: None,
            contact: None,
        };

        let res = usecase.execute(&ctx).await;
        assert_eq!(res.unwrap_err(), UseCaseError::EmptyTitle);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_unknown_timezone() {
        let TestContext { ctx, employee } = setup().await;

        let mut usecase = CreateReminderUseCase {
            owner_id: employee.id.clone(),
            title: "Call back".into(),
            body: "".into(),
            due_at: 500,
            timezone: Some("Atlantis/Underwater".into()),
            repeat_interval: None,
            contact: None,
        };

        let res = usecase.execute(&ctx).await;
        assert_eq!(
            res.unwrap_err(),
            UseCaseError::InvalidTimezone("Atlantis/Underwater".into())
        );
    }
}
