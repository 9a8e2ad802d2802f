use crate::reminder::send_due_reminders::{DispatchOutcome, SendDueRemindersUseCase};
use crate::shared::usecase::execute;
use actix_web::rt::time::{interval, sleep_until, Instant};
use nido_infra::NidoContext;
use std::time::Duration;
use tracing::info;

/// Seconds until the next wall clock minute starts. The due-check is aligned
/// to minute boundaries so trigger timestamps are easy to reason about.
pub fn get_start_delay(now_ts: i64) -> i64 {
    60 - (now_ts / 1000) % 60
}

pub fn start_send_due_reminders_job(ctx: NidoContext) {
    actix_web::rt::spawn(async move {
        let now = ctx.sys.get_timestamp_millis();
        let secs_to_next_run = get_start_delay(now);
        let start = Instant::now() + Duration::from_secs(secs_to_next_run as u64);

        sleep_until(start).await;
        let mut minutely_interval = interval(Duration::from_secs(60));
        loop {
            minutely_interval.tick().await;

            let usecase = SendDueRemindersUseCase {};
            if let Ok(reports) = execute(usecase, &ctx).await {
                if !reports.is_empty() {
                    let delivered = reports
                        .iter()
                        .filter(|r| r.outcome == DispatchOutcome::Delivered)
                        .count();
                    let deduped = reports
                        .iter()
                        .filter(|r| r.outcome == DispatchOutcome::Deduped)
                        .count();
                    let failed = reports.len() - delivered - deduped;
                    info!(
                        "Reminder due-check done. Delivered: {}, deduped: {}, failed: {}",
                        delivered, deduped, failed
                    );
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_delay_aligns_to_next_minute() {
        assert_eq!(get_start_delay(0), 60);
        assert_eq!(get_start_delay(50 * 1000), 10);
        assert_eq!(get_start_delay(59 * 1000), 1);
        assert_eq!(get_start_delay(60 * 1000), 60);
        assert_eq!(get_start_delay(61 * 1000 + 300), 59);
    }
}
