mod complete_reminder;
mod create_reminder;
mod delete_reminder;
mod dismiss_reminder;
mod edit_reminder;
mod get_reminder;
mod get_reminders;
pub mod send_due_reminders;
mod snooze_reminder;

use actix_web::web;
use complete_reminder::complete_reminder_controller;
use create_reminder::create_reminder_controller;
use delete_reminder::delete_reminder_controller;
use dismiss_reminder::dismiss_reminder_controller;
use edit_reminder::edit_reminder_controller;
use get_reminder::get_reminder_controller;
use get_reminders::get_reminders_controller;
use snooze_reminder::snooze_reminder_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/reminders", web::post().to(create_reminder_controller));
    cfg.route("/reminders", web::get().to(get_reminders_controller));

    cfg.route(
        "/reminders/{reminder_id}",
        web::get().to(get_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}",
        web::put().to(edit_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}",
        web::delete().to(delete_reminder_controller),
    );

    cfg.route(
        "/reminders/{reminder_id}/complete",
        web::post().to(complete_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}/snooze",
        web::post().to(snooze_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}/dismiss",
        web::post().to(dismiss_reminder_controller),
    );
}
