use actix_web::{web, HttpResponse, Responder};
use log::{error, info, warn};

use crate::attendance::models::{AttendanceQuery, AttendanceRequest};
use crate::render::Generator;
use crate::{attachment_response, AppState, ErrorResponse};

#[utoipa::path(
    post,
    path = "/generate_attendance",
    tag = "Attendance",
    request_body = AttendanceRequest,
    responses(
        (status = 200, description = "Attendance sheet as a PDF or XLSX attachment"),
        (status = 400, description = "Unsupported format", body = ErrorResponse),
        (status = 500, description = "Rendering failed", body = ErrorResponse)
    )
)]
pub async fn generate_attendance(
    state: web::Data<AppState>,
    query: web::Query<AttendanceQuery>,
    req: web::Json<AttendanceRequest>,
) -> impl Responder {
    let format = match query.report_format() {
        Ok(format) => format,
        Err(e) => {
            warn!("Rejected attendance request: {}", e);
            return HttpResponse::BadRequest().json(ErrorResponse::bad_request(&e));
        }
    };

    let request = req.into_inner();
    info!(
        "Generating {} attendance report for class '{}' with {} record(s)",
        format,
        request.class_name,
        request.students.len()
    );

    match web::block(move || state.attendance.generate(&request, format)).await {
        Ok(Ok(document)) => attachment_response(document),
        Ok(Err(e)) => {
            error!("Failed to render attendance report: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::internal_error(&e.to_string()))
        }
        Err(e) => {
            error!("Attendance rendering task failed: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::internal_error(&e.to_string()))
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/generate_attendance").route(web::post().to(generate_attendance)));
}
