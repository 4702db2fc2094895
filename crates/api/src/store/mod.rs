mod create_store;
mod get_store;

use actix_web::web;
use create_store::create_store_controller;
use get_store::get_store_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/stores", web::post().to(create_store_controller));
    cfg.route("/stores/{store_id}", web::get().to(get_store_controller));
}
