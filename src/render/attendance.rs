//! Generator for class attendance sheets.
//!
//! Records are rendered in the order and exactly as they were submitted.

use std::fs;

use super::common::{format_generated_date, get_static_dir, sanitize_filename, typst_rows, typst_str};
use super::engine::TypstRenderEngine;
use super::traits::Generator;
use super::xlsx::{Cell, Sheet, Workbook, XlsxWriter};
use super::{GeneratedDocument, RenderError, ReportFormat};
use crate::attendance::models::AttendanceRequest;

const TEMPLATE_FILE: &str = "attendance.typ";

pub const TITLE: &str = "Attendance Report";
pub const HEADERS: [&str; 4] = ["Student Name", "PRN", "Division", "Status"];

pub struct AttendanceGenerator {
    template: String,
    engine: TypstRenderEngine,
}

impl AttendanceGenerator {
    pub fn new(engine: TypstRenderEngine) -> Result<Self, RenderError> {
        let template_path = get_static_dir().join(TEMPLATE_FILE);
        let template = fs::read_to_string(&template_path).map_err(RenderError::TemplateIo)?;
        Ok(Self { template, engine })
    }

    pub fn typst_source(&self, request: &AttendanceRequest, generated_on: &str) -> String {
        let rows: Vec<Vec<String>> = request
            .students
            .iter()
            .map(|s| {
                vec![
                    s.name.clone(),
                    s.prn.clone(),
                    s.division.clone(),
                    s.status.clone(),
                ]
            })
            .collect();

        format!(
            r#"{}

#attendance_report(
  class_name: {},
  date_time: {},
  rows: {},
  generated_on: {},
)
"#,
            self.template,
            typst_str(&request.class_name),
            typst_str(&request.date_time),
            typst_rows(&rows),
            typst_str(generated_on),
        )
    }

    pub fn workbook(request: &AttendanceRequest) -> Workbook {
        let mut sheet = Sheet::new("Attendance").with_column_widths(&[28.0, 16.0, 10.0, 10.0]);

        sheet.push_row(vec![Cell::text(TITLE).bold()]);
        sheet.push_row(vec![
            Cell::text("Class").bold(),
            Cell::text(request.class_name.as_str()),
        ]);
        sheet.push_row(vec![
            Cell::text("Date/Time").bold(),
            Cell::text(request.date_time.as_str()),
        ]);
        sheet.push_blank_row();
        sheet.push_row(HEADERS.iter().map(|h| Cell::text(*h).bold()).collect());

        for student in &request.students {
            sheet.push_row(vec![
                Cell::text(student.name.as_str()),
                Cell::text(student.prn.as_str()),
                Cell::text(student.division.as_str()),
                Cell::text(student.status.as_str()),
            ]);
        }

        let mut workbook = Workbook::new();
        workbook.add_sheet(sheet);
        workbook
    }

    /// Download name, e.g. `attendance-se-comp-a.pdf`.
    pub fn filename(request: &AttendanceRequest, format: ReportFormat) -> String {
        format!(
            "attendance-{}.{}",
            sanitize_filename(&request.class_name, "report"),
            format.extension()
        )
    }
}

impl Generator<AttendanceRequest> for AttendanceGenerator {
    fn generate(
        &self,
        request: &AttendanceRequest,
        format: ReportFormat,
    ) -> Result<GeneratedDocument, RenderError> {
        let bytes = match format {
            ReportFormat::Pdf => self.engine.render(&self.typst_source(request, &format_generated_date()))?,
            ReportFormat::Xlsx => XlsxWriter::to_bytes(&Self::workbook(request))?,
        };

        Ok(GeneratedDocument {
            filename: Self::filename(request, format),
            bytes,
            format,
        })
    }
}
