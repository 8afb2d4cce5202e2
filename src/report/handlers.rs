use actix_web::{web, HttpResponse, Responder};
use log::{error, info, warn};

use crate::render::{Generator, ReportFormat};
use crate::report::calculator::compute_report;
use crate::report::models::{ReportRequest, ReportResult};
use crate::{attachment_response, AppState, ErrorResponse};

#[utoipa::path(
    post,
    path = "/calculate",
    tag = "Grade Report",
    request_body = ReportRequest,
    responses(
        (status = 200, description = "Computed grade points and GPA", body = ReportResult),
        (status = 400, description = "No subjects or non-numeric marks", body = ErrorResponse)
    )
)]
pub async fn calculate(req: web::Json<ReportRequest>) -> impl Responder {
    let request = req.into_inner();
    info!(
        "Executing calculate handler for {} subject(s)",
        request.subjects.len()
    );

    match compute_report(request.student_name(), &request.subjects) {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(e) => {
            warn!("Rejected grade report request: {}", e);
            HttpResponse::BadRequest().json(ErrorResponse::bad_request(&e.to_string()))
        }
    }
}

#[utoipa::path(
    post,
    path = "/generate_pdf",
    tag = "Grade Report",
    request_body = ReportRequest,
    responses(
        (status = 200, description = "Grade report PDF (attachment grade_report.pdf)"),
        (status = 400, description = "No subjects or non-numeric marks", body = ErrorResponse),
        (status = 500, description = "Rendering failed", body = ErrorResponse)
    )
)]
pub async fn generate_pdf(
    state: web::Data<AppState>,
    req: web::Json<ReportRequest>,
) -> impl Responder {
    render_grade_report(state, req.into_inner(), ReportFormat::Pdf).await
}

#[utoipa::path(
    post,
    path = "/generate_excel",
    tag = "Grade Report",
    request_body = ReportRequest,
    responses(
        (status = 200, description = "Grade report workbook (attachment grade_report.xlsx)"),
        (status = 400, description = "No subjects or non-numeric marks", body = ErrorResponse),
        (status = 500, description = "Rendering failed", body = ErrorResponse)
    )
)]
pub async fn generate_excel(
    state: web::Data<AppState>,
    req: web::Json<ReportRequest>,
) -> impl Responder {
    render_grade_report(state, req.into_inner(), ReportFormat::Xlsx).await
}

async fn render_grade_report(
    state: web::Data<AppState>,
    request: ReportRequest,
    format: ReportFormat,
) -> HttpResponse {
    info!(
        "Generating {} grade report for '{}' with {} subject(s)",
        format,
        request.student_name(),
        request.subjects.len()
    );

    let report = match compute_report(request.student_name(), &request.subjects) {
        Ok(report) => report,
        Err(e) => {
            warn!("Rejected grade report request: {}", e);
            return HttpResponse::BadRequest().json(ErrorResponse::bad_request(&e.to_string()));
        }
    };

    match web::block(move || state.grade_report.generate(&report, format)).await {
        Ok(Ok(document)) => {
            info!(
                "Grade report {} generated ({} bytes)",
                document.filename,
                document.bytes.len()
            );
            attachment_response(document)
        }
        Ok(Err(e)) => {
            error!("Failed to render grade report: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::internal_error(&e.to_string()))
        }
        Err(e) => {
            error!("Grade report rendering task failed: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::internal_error(&e.to_string()))
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/calculate").route(web::post().to(calculate)))
        .service(web::resource("/generate_pdf").route(web::post().to(generate_pdf)))
        .service(web::resource("/generate_excel").route(web::post().to(generate_excel)));
}
