use crate::reminder::process_pending_reminders::ProcessPendingRemindersUseCase;
use crate::shared::usecase::execute;
use actix_web::rt::time::{interval, sleep};
use inkgest_infra::InkGestContext;
use std::time::Duration;
use tracing::{error, info};

pub fn get_start_delay(now_ts: usize, secs_before_min: usize) -> usize {
    let secs_to_next_minute = 60 - (now_ts / 1000) % 60;
    if secs_to_next_minute > secs_before_min {
        secs_to_next_minute - secs_before_min
    } else {
        secs_to_next_minute + (60 - secs_before_min)
    }
}

/// Runs the reminder dispatch pass once a minute, aligned to minute
/// boundaries. The pass itself never fails on individual reminders, so
/// one bad row cannot stall the loop.
pub fn start_reminder_dispatch_job(ctx: InkGestContext) {
    actix_web::rt::spawn(async move {
        let now = ctx.sys.get_timestamp_millis();
        let secs_to_next_run = get_start_delay(now as usize, 0);
        sleep(Duration::from_secs(secs_to_next_run as u64)).await;

        let mut minutely_interval = interval(Duration::from_secs(60));
        loop {
            minutely_interval.tick().await;
            match execute(ProcessPendingRemindersUseCase, &ctx).await {
                Ok(summary) => {
                    if summary.delivered + summary.skipped + summary.failed > 0 {
                        info!(
                            "Reminder dispatch pass done. Delivered: {}, skipped: {}, failed: {}",
                            summary.delivered, summary.skipped, summary.failed
                        );
                    }
                }
                Err(e) => {
                    error!("Reminder dispatch pass could not run: {:?}", e);
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_delay_works() {
        assert_eq!(get_start_delay(50 * 1000, 5), 5);
        assert_eq!(get_start_delay(50 * 1000, 10), 60);
        assert_eq!(get_start_delay(50 * 1000, 15), 55);
        assert_eq!(get_start_delay(60 * 1000, 60), 60);
        assert_eq!(get_start_delay(60 * 1000, 10), 50);
        assert_eq!(get_start_delay(59 * 1000, 0), 1);
        assert_eq!(get_start_delay(59 * 1000, 1), 60);
    }
}
