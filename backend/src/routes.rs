use std::path::PathBuf;

use actix_files::{Files, NamedFile};
use actix_web::dev::{ServiceRequest, ServiceResponse, fn_service};
use actix_web::{HttpResponse, web};
use shared::AppConfig;

/// Runtime settings for the browser, then the compiled frontend. Paths that
/// match no file get `index.html` so client-side routes survive a reload.
pub fn configure_routes(cfg: &mut web::ServiceConfig, frontend_dir: PathBuf) {
    let index = frontend_dir.join("index.html");

    cfg.service(web::resource("/app-config.json").route(web::get().to(app_config)))
        .service(
            Files::new("/", frontend_dir)
                .index_file("index.html")
                .default_handler(fn_service(move |req: ServiceRequest| {
                    let index = index.clone();
                    async move {
                        let (req, _) = req.into_parts();
                        let file = NamedFile::open_async(&index).await?;
                        let response = file.into_response(&req);
                        Ok::<_, actix_web::Error>(ServiceResponse::new(req, response))
                    }
                })),
        );
}

async fn app_config(config: web::Data<AppConfig>) -> HttpResponse {
    HttpResponse::Ok().json(config.get_ref())
}
