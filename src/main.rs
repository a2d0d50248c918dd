use actix_cors::Cors;
use actix_web::http::StatusCode;
use actix_web::middleware::{ErrorHandlers, Logger};
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use env_logger::Env;
use log::info;

use otp_backend::config::AppConfig;
use otp_backend::middleware::error_handler::handle_error;
use otp_backend::middleware::not_found::not_found;
use otp_backend::otp::service::OtpService;
use otp_backend::router::index::routes;
use otp_backend::store::OtpStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env()?;

    // One store for the whole process, shared by every worker
    let otp_service = web::Data::new(OtpService::new(OtpStore::new()));

    info!("Server running on port {}", config.port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .send_wildcard()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .wrap(Logger::default())
            .app_data(otp_service.clone())
            .configure(routes)
            .wrap(
                ErrorHandlers::new()
                    .handler(StatusCode::NOT_FOUND, not_found)
                    .default_handler(handle_error),
            )
            .wrap(cors)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    info!("Server has stopped");

    Ok(())
}
