use crate::shared::usecase::UseCase;
use nido_domain::ID;
use nido_infra::{NidoContext, PushPayload};
use serde::Serialize;
use tracing::{error, warn};

/// Dispatches notifications for all due reminders. Runs on every tick of the
/// minutely job scheduler.
///
/// Reminders are processed one at a time, a failure for one reminder never
/// affects the rest of the batch. Transport failures are logged and recorded
/// in the report, they do not stop the trigger bookkeeping: a reminder was
/// due whether or not the push provider was reachable.
#[derive(Debug)]
pub struct SendDueRemindersUseCase {}

#[derive(Debug)]
pub enum UseCaseError {}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum DispatchOutcome {
    /// Payload was composed and handed to the transports
    Delivered,
    /// Skipped because the reminder was already delivered inside the
    /// cooldown window
    Deduped,
    /// The push provider rejected the delivery. `invalid_token` is the seam
    /// for an outer layer to clear the owner's stored device token.
    TransportFailed { invalid_token: bool },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchReport {
    pub reminder_id: ID,
    pub outcome: DispatchOutcome,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendDueRemindersUseCase {
    type Response = Vec<DispatchReport>;

    type Error = UseCaseError;

    const NAME: &'static str = "SendDueReminders";

    async fn execute(&mut self, ctx: &NidoContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let due_reminders = ctx.repos.reminders.find_due(now).await;

        let mut reports = Vec::with_capacity(due_reminders.len());
        for mut reminder in due_reminders {
            if reminder.within_cooldown(now, ctx.config.reminder_cooldown) {
                reports.push(DispatchReport {
                    reminder_id: reminder.id.clone(),
                    outcome: DispatchOutcome::Deduped,
                });
                continue;
            }

            let payload = PushPayload {
                reminder_id: reminder.id.clone(),
                owner_id: reminder.owner_id.clone(),
                title: reminder.title.clone(),
                body: reminder.body.clone(),
                contact: reminder.contact.clone(),
            };

            let mut outcome = DispatchOutcome::Delivered;
            match ctx.repos.employees.find(&reminder.owner_id).await {
                Some(owner) => match &owner.device_token {
                    Some(device_token) => {
                        if let Err(e) = ctx.push.send(device_token, &payload).await {
                            error!(
                                "Unable to push reminder: {} to its owner: {}. Error message: {}",
                                reminder.id, owner.id, e.message
                            );
                            outcome = DispatchOutcome::TransportFailed {
                                invalid_token: e.invalid_token,
                            };
                        }
                    }
                    None => warn!(
                        "Owner: {} of due reminder: {} has no registered device token",
                        owner.id, reminder.id
                    ),
                },
                None => warn!(
                    "Due reminder: {} has no matching owner: {}",
                    reminder.id, reminder.owner_id
                ),
            }

            ctx.broadcaster.publish("reminder/due", &payload);

            reminder.mark_triggered(now);
            if let Err(e) = ctx.repos.reminders.save(&reminder).await {
                error!(
                    "Unable to save trigger bookkeeping for reminder: {}. Error: {:?}",
                    reminder.id, e
                );
            }

            reports.push(DispatchReport {
                reminder_id: reminder.id.clone(),
                outcome,
            });
        }

        Ok(reports)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reminder::test_helpers::{insert_reminder, setup, TestContext};
    use crate::shared::usecase::execute;
    use nido_domain::{ReminderStatus, RepeatInterval};
    use nido_infra::{IPushService, ISys, PushError};
    use std::sync::{Arc, Mutex};

    const MINUTE: i64 = 1000 * 60;
    const HOUR: i64 = 60 * MINUTE;
    const DAY: i64 = 24 * HOUR;
    const NOW: i64 = 1613862000000; // Sun Feb 21 2021 00:00:00 GMT+0100

    struct StaticTimeSys(i64);
    impl ISys for StaticTimeSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.0
        }
    }

    struct RecordingPushService {
        pub sent: Mutex<Vec<(String, PushPayload)>>,
    }

    impl RecordingPushService {
        fn new() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl IPushService for RecordingPushService {
        async fn send(&self, device_token: &str, payload: &PushPayload) -> Result<(), PushError> {
            self.sent
                .lock()
                .unwrap()
                .push((device_token.to_string(), payload.clone()));
            Ok(())
        }
    }

    struct FailingPushService {
        invalid_token: bool,
    }

    #[async_trait::async_trait]
    impl IPushService for FailingPushService {
        async fn send(&self, _device_token: &str, _payload: &PushPayload) -> Result<(), PushError> {
            Err(PushError {
                message: "provider unavailable".into(),
                invalid_token: self.invalid_token,
            })
        }
    }

    async fn tick(ctx: &nido_infra::NidoContext) -> Vec<DispatchReport> {
        execute(SendDueRemindersUseCase {}, ctx).await.unwrap()
    }

    #[actix_web::main]
    #[test]
    async fn delivers_due_one_shot_reminder() {
        let TestContext { mut ctx, employee } = setup().await;
        ctx.sys = Arc::new(StaticTimeSys(NOW));
        let push = Arc::new(RecordingPushService::new());
        ctx.push = push.clone();
        let mut banner_events = ctx.broadcaster.subscribe();

        let reminder = insert_reminder(&ctx, &employee, NOW - MINUTE, None).await;

        let reports = tick(&ctx).await;
        assert_eq!(
            reports,
            vec![DispatchReport {
                reminder_id: reminder.id.clone(),
                outcome: DispatchOutcome::Delivered,
            }]
        );

        let sent = push.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "dana-device-token");
        assert_eq!(sent[0].1.title, reminder.title);

        let banner = banner_events.try_recv().unwrap();
        assert_eq!(banner.event, "reminder/due");

        // Completion and dismissal are separate owner actions, delivery
        // leaves the reminder pending
        let persisted = ctx.repos.reminders.find(&reminder.id).await.unwrap();
        assert_eq!(persisted.status, ReminderStatus::Pending);
        assert_eq!(persisted.last_triggered_at, Some(NOW));
        assert_eq!(persisted.trigger_count, 1);
    }

    #[actix_web::main]
    #[test]
    async fn dedups_deliveries_inside_cooldown_window() {
        let TestContext { mut ctx, employee } = setup().await;
        ctx.sys = Arc::new(StaticTimeSys(NOW));
        let push = Arc::new(RecordingPushService::new());
        ctx.push = push.clone();

        let reminder = insert_reminder(&ctx, &employee, NOW - MINUTE, None).await;

        let reports = tick(&ctx).await;
        assert_eq!(reports[0].outcome, DispatchOutcome::Delivered);

        // Next minutely tick, still way inside the one hour cooldown
        ctx.sys = Arc::new(StaticTimeSys(NOW + MINUTE));
        let reports = tick(&ctx).await;
        assert_eq!(
            reports,
            vec![DispatchReport {
                reminder_id: reminder.id.clone(),
                outcome: DispatchOutcome::Deduped,
            }]
        );

        assert_eq!(push.sent.lock().unwrap().len(), 1);
        let persisted = ctx.repos.reminders.find(&reminder.id).await.unwrap();
        assert_eq!(persisted.trigger_count, 1);

        // After the cooldown has elapsed it fires again
        ctx.sys = Arc::new(StaticTimeSys(NOW + HOUR));
        let reports = tick(&ctx).await;
        assert_eq!(reports[0].outcome, DispatchOutcome::Delivered);
        assert_eq!(push.sent.lock().unwrap().len(), 2);
    }

    #[actix_web::main]
    #[test]
    async fn repeating_reminder_skips_missed_occurrences() {
        let TestContext { mut ctx, employee } = setup().await;
        ctx.sys = Arc::new(StaticTimeSys(NOW));
        ctx.push = Arc::new(RecordingPushService::new());

        let due_at = NOW - 25 * HOUR;
        let reminder = insert_reminder(&ctx, &employee, due_at, Some(RepeatInterval::Daily)).await;

        let reports = tick(&ctx).await;
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].outcome, DispatchOutcome::Delivered);

        // due_at + 1 day is still in the past, so the next occurrence lands
        // two days after the original due date
        let persisted = ctx.repos.reminders.find(&reminder.id).await.unwrap();
        assert_eq!(
            persisted.repeat.as_ref().unwrap().next_trigger,
            Some(due_at + 2 * DAY)
        );
        assert!(!persisted.is_due(NOW + MINUTE));
        assert!(persisted.is_due(due_at + 2 * DAY));
    }

    #[actix_web::main]
    #[test]
    async fn wakes_snoozed_reminder_and_delivers() {
        let TestContext { mut ctx, employee } = setup().await;
        ctx.sys = Arc::new(StaticTimeSys(NOW));
        ctx.push = Arc::new(RecordingPushService::new());

        let mut reminder = insert_reminder(&ctx, &employee, NOW - 30 * MINUTE, None).await;
        // Snoozed 15 minutes, 16 minutes ago
        reminder.snooze(15, NOW - 16 * MINUTE);
        ctx.repos.reminders.save(&reminder).await.unwrap();

        let reports = tick(&ctx).await;
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].outcome, DispatchOutcome::Delivered);

        let persisted = ctx.repos.reminders.find(&reminder.id).await.unwrap();
        assert_eq!(persisted.status, ReminderStatus::Pending);
        assert_eq!(persisted.last_triggered_at, Some(NOW));
    }

    #[actix_web::main]
    #[test]
    async fn never_selects_dismissed_repeating_reminder() {
        let TestContext { mut ctx, employee } = setup().await;
        ctx.sys = Arc::new(StaticTimeSys(NOW));
        let push = Arc::new(RecordingPushService::new());
        ctx.push = push.clone();

        let mut reminder =
            insert_reminder(&ctx, &employee, NOW - MINUTE, Some(RepeatInterval::Daily)).await;
        reminder.dismiss(NOW);
        ctx.repos.reminders.save(&reminder).await.unwrap();

        let reports = tick(&ctx).await;
        assert!(reports.is_empty());
        assert!(push.sent.lock().unwrap().is_empty());

        let persisted = ctx.repos.reminders.find(&reminder.id).await.unwrap();
        assert_eq!(persisted.status, ReminderStatus::Pending);
        assert!(!persisted.active);
    }

    #[actix_web::main]
    #[test]
    async fn transport_failure_does_not_stop_bookkeeping() {
        let TestContext { mut ctx, employee } = setup().await;
        ctx.sys = Arc::new(StaticTimeSys(NOW));
        ctx.push = Arc::new(FailingPushService {
            invalid_token: true,
        });

        let reminder = insert_reminder(&ctx, &employee, NOW - MINUTE, None).await;

        let reports = tick(&ctx).await;
        assert_eq!(
            reports[0].outcome,
            DispatchOutcome::TransportFailed {
                invalid_token: true
            }
        );

        // The reminder was due, the provider being down changes nothing
        // about its trigger bookkeeping
        let persisted = ctx.repos.reminders.find(&reminder.id).await.unwrap();
        assert_eq!(persisted.last_triggered_at, Some(NOW));
        assert_eq!(persisted.trigger_count, 1);
    }

    #[actix_web::main]
    #[test]
    async fn missing_device_token_still_counts_as_delivered() {
        let TestContext { mut ctx, mut employee } = setup().await;
        ctx.sys = Arc::new(StaticTimeSys(NOW));
        let push = Arc::new(RecordingPushService::new());
        ctx.push = push.clone();

        employee.device_token = None;
        ctx.repos.employees.save(&employee).await.unwrap();

        let reminder = insert_reminder(&ctx, &employee, NOW - MINUTE, None).await;

        let reports = tick(&ctx).await;
        assert_eq!(reports[0].outcome, DispatchOutcome::Delivered);
        assert!(push.sent.lock().unwrap().is_empty());

        let persisted = ctx.repos.reminders.find(&reminder.id).await.unwrap();
        assert_eq!(persisted.trigger_count, 1);
    }
}
