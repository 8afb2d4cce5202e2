use actix_web::web;
use grade_report_server::{AppState, ServerConfig};
use std::io::{Cursor, Read};

/// App state with the default configuration (`typst` from PATH).
pub fn app_state() -> web::Data<AppState> {
    web::Data::new(AppState::new(&ServerConfig::default()).expect("templates should load"))
}

/// App state whose Typst binary cannot be found, for exercising render failures.
pub fn app_state_without_typst() -> web::Data<AppState> {
    let config = ServerConfig {
        typst_bin: "typst-binary-that-does-not-exist".to_string(),
        ..ServerConfig::default()
    };
    web::Data::new(AppState::new(&config).expect("templates should load"))
}

/// Read one part of an XLSX package as text.
pub fn xlsx_part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("valid zip");
    let mut part = archive.by_name(name).expect("part exists");
    let mut content = String::new();
    part.read_to_string(&mut content).expect("utf-8 part");
    content
}
