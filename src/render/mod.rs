//! Document renderers for grade and attendance reports.
//!
//! PDFs are produced by compiling generated Typst source with the Typst CLI;
//! spreadsheets are written directly as XLSX packages.
//! - `GradeReportGenerator` - per-subject marks, grade points and GPA
//! - `AttendanceGenerator` - class attendance sheet

pub mod attendance;
pub mod common;
pub mod engine;
pub mod format;
pub mod grade_report;
pub mod traits;
pub mod xlsx;

pub use attendance::AttendanceGenerator;
pub use engine::TypstRenderEngine;
pub use format::ReportFormat;
pub use grade_report::GradeReportGenerator;
pub use traits::Generator;

use thiserror::Error;

/// Errors that can occur during document generation.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to load Typst template: {0}")]
    TemplateIo(#[source] std::io::Error),
    #[error("failed to create temporary directory: {0}")]
    TempDir(#[source] std::io::Error),
    #[error("failed to write Typst source: {0}")]
    WriteTypst(#[source] std::io::Error),
    #[error("Typst CLI execution failed: {0}")]
    TypstIo(#[source] std::io::Error),
    #[error("Typst CLI exited with status {code}: {stderr}")]
    TypstExit { code: i32, stderr: String },
    #[error("failed to read generated PDF: {0}")]
    ReadPdf(#[source] std::io::Error),
    #[error("failed to write spreadsheet: {0}")]
    Xlsx(#[from] xlsx::XlsxError),
}

/// Result of a successful document generation.
#[derive(Debug)]
pub struct GeneratedDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub format: ReportFormat,
}

impl GeneratedDocument {
    pub fn content_type(&self) -> &'static str {
        self.format.mime_type()
    }
}
