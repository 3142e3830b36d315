mod config;
mod routes;

use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use config::Settings;
use routes::configure_routes;
use std::env;
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    if let Ok(current_dir) = env::current_dir() {
        log::info!("Current working directory: {}", current_dir.display());
    } else {
        log::error!("Failed to get the current working directory.");
    }

    let settings = Settings::from_env().map_err(|e| {
        log::error!("Invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    if !settings.frontend_dir.join("index.html").is_file() {
        log::warn!(
            "No index.html in {}; build the frontend first",
            settings.frontend_dir.display()
        );
    }
    log::info!("Review API: {}", settings.app_config.api_base_url);
    log::info!("Image host: {}", settings.app_config.image_base_url);

    let bind_address = settings.bind_address();
    log::info!("Starting server on {}", bind_address);

    let app_config = web::Data::new(settings.app_config.clone());
    let frontend_dir = settings.frontend_dir.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(app_config.clone())
            .configure(|cfg| configure_routes(cfg, frontend_dir.clone()))
    })
    .bind(&bind_address)?
    .run()
    .await
}
