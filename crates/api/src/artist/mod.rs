mod create_artist;
mod get_artist;

use actix_web::web;
use create_artist::create_artist_controller;
use get_artist::get_artist_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/artists", web::post().to(create_artist_controller));
    cfg.route("/artists/{artist_id}", web::get().to(get_artist_controller));
}
