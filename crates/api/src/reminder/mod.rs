pub mod cancel_appointment_reminders;
pub mod confirm_appointment;
mod get_reminder_stats;
pub mod process_pending_reminders;
pub mod schedule_appointment_reminders;

use actix_web::web;
use cancel_appointment_reminders::cancel_appointment_reminders_controller;
use confirm_appointment::confirm_appointment_controller;
use get_reminder_stats::get_reminder_stats_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/reminders/{appointment_id}/cancel",
        web::post().to(cancel_appointment_reminders_controller),
    );
    cfg.route(
        "/reminders/stats",
        web::get().to(get_reminder_stats_controller),
    );

    // Confirmation links are opened from emails and chat messages, so the
    // same handler answers both methods.
    cfg.route(
        "/appointments/confirm/{token}",
        web::get().to(confirm_appointment_controller),
    );
    cfg.route(
        "/appointments/confirm/{token}",
        web::post().to(confirm_appointment_controller),
    );
}
