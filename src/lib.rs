use actix_cors::Cors;
use actix_web::http::header::{self, ContentDisposition, DispositionParam, DispositionType};
use actix_web::middleware::Compress;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use actix_web_prometheus::PrometheusMetricsBuilder;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod attendance;
pub mod config;
pub mod render;
pub mod report;
pub mod state;

pub use crate::config::ServerConfig;
pub use crate::state::AppState;

use crate::render::GeneratedDocument;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_type: &str, message: &str) -> Self {
        Self {
            error: error_type.to_string(),
            message: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new("BadRequest", message)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::new("InternalServerError", message)
    }
}

/// Send a generated document as a file download.
pub fn attachment_response(document: GeneratedDocument) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(document.content_type())
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(document.filename)],
        })
        .body(document.bytes)
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up")
    )
)]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::report::handlers::calculate,
        crate::report::handlers::generate_pdf,
        crate::report::handlers::generate_excel,
        crate::attendance::handlers::generate_attendance,
        crate::health,
    ),
    components(
        schemas(
            report::models::ReportRequest,
            report::models::SubjectScore,
            report::models::SubjectResult,
            report::models::ReportResult,
            attendance::models::AttendanceRequest,
            attendance::models::AttendanceRecord,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Grade Report", description = "Grade point / GPA calculation and report downloads."),
        (name = "Attendance", description = "Attendance sheet downloads."),
        (name = "Health", description = "Liveness check.")
    )
)]
pub struct ApiDoc;

/// Register every route of the service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    report::config(cfg);
    attendance::config(cfg);
    cfg.service(web::resource("/health").route(web::get().to(health)));
}

/// CORS policy. With no configured origins any origin is accepted.
pub fn cors(config: &ServerConfig) -> Cors {
    let cors = if config.allowed_origins.is_empty() {
        Cors::default().allow_any_origin()
    } else {
        config
            .allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    cors.allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .expose_headers(vec![header::CONTENT_DISPOSITION])
        .max_age(3600)
}

pub async fn run() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env();
    let app_state = match AppState::new(&config) {
        Ok(state) => web::Data::new(state),
        Err(e) => {
            log::error!("Failed to load report templates: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string()));
        }
    };

    let prometheus = PrometheusMetricsBuilder::new("grade_report_server")
        .endpoint("/metrics")
        .build()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    if config.allowed_origins.is_empty() {
        log::warn!("CORS_ALLOWED_ORIGINS not set, accepting requests from any origin");
    }
    log::info!(
        "Starting server at http://{}:{} (typst: {})",
        config.host,
        config.port,
        config.typst_bin
    );

    let bind_addr = (config.host.clone(), config.port);
    HttpServer::new(move || {
        App::new()
            .wrap(Compress::default())
            .wrap(prometheus.clone())
            .wrap(cors(&config))
            .app_data(app_state.clone())
            .configure(configure)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}
