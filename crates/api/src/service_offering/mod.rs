mod create_service_offering;
mod get_service_offering;

use actix_web::web;
use create_service_offering::create_service_offering_controller;
use get_service_offering::get_service_offering_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/services",
        web::post().to(create_service_offering_controller),
    );
    cfg.route(
        "/services/{service_id}",
        web::get().to(get_service_offering_controller),
    );
}
