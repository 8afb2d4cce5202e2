mod common;

use actix_web::{http::header, http::StatusCode, test, App};
use grade_report_server::{configure, ErrorResponse};
use serde_json::json;

fn roster() -> serde_json::Value {
    json!({
        "class_name": "SE Comp A",
        "date_time": "2026-10-16 09:30",
        "students": [
            { "name": "Rohan Patil", "prn": "72200123K", "division": "A", "status": "Present" },
            { "name": "Meera Iyer", "prn": "72200456B", "division": "A", "status": "Absent" }
        ]
    })
}

#[actix_web::test]
async fn test_attendance_defaults_to_xlsx() {
    let app = test::init_service(App::new().app_data(common::app_state()).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/generate_attendance")
        .set_json(roster())
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let disposition = resp
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("attendance-se-comp-a.xlsx"));

    let body = test::read_body(resp).await;
    let sheet = common::xlsx_part(&body, "xl/worksheets/sheet1.xml");
    assert!(sheet.contains("Attendance Report"));
    assert!(sheet.contains("2026-10-16 09:30"));
    assert!(sheet.contains("Student Name"));
    assert!(sheet.contains("72200123K"));

    let rohan = sheet.find("Rohan Patil").unwrap();
    let meera = sheet.find("Meera Iyer").unwrap();
    assert!(rohan < meera);
}

#[actix_web::test]
async fn test_attendance_accepts_empty_roster() {
    let app = test::init_service(App::new().app_data(common::app_state()).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/generate_attendance?format=xlsx")
        .set_json(json!({ "class_name": "TE IT", "date_time": "", "students": [] }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_attendance_unknown_format_is_bad_request() {
    let app = test::init_service(App::new().app_data(common::app_state()).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/generate_attendance?format=docx")
        .set_json(roster())
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: ErrorResponse = test::read_body_json(resp).await;
    assert!(body.message.contains("docx"));
}

#[actix_web::test]
async fn test_attendance_pdf_render_failure_is_internal_error() {
    let app = test::init_service(
        App::new()
            .app_data(common::app_state_without_typst())
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/generate_attendance?format=pdf")
        .set_json(roster())
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
