mod cancel_appointment;
mod create_appointment;
mod get_appointment;
mod get_appointments;
mod subscribers;
mod update_appointment;

use actix_web::web;
use cancel_appointment::cancel_appointment_controller;
use create_appointment::create_appointment_controller;
use get_appointment::get_appointment_controller;
use get_appointments::get_appointments_controller;
use update_appointment::update_appointment_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/appointments", web::post().to(create_appointment_controller));
    cfg.route("/appointments", web::get().to(get_appointments_controller));

    cfg.route(
        "/appointments/{appointment_id}",
        web::get().to(get_appointment_controller),
    );
    cfg.route(
        "/appointments/{appointment_id}",
        web::put().to(update_appointment_controller),
    );
    cfg.route(
        "/appointments/{appointment_id}",
        web::delete().to(cancel_appointment_controller),
    );
}
