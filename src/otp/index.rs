use super::controller::{send_otp, verify_otp};
use actix_web::web;

pub fn otp_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/send-otp", web::post().to(send_otp))
        .route("/verify-otp", web::post().to(verify_otp));
}
