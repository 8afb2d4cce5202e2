//! Generator for the grade calculator report.
//!
//! Renders a `ReportResult` as a paginated PDF (title, student name, one row
//! per subject, overall GPA) or as a single-sheet workbook with the same rows.

use std::fs;

use super::common::{format_generated_date, format_mark, get_static_dir, typst_rows, typst_str};
use super::engine::TypstRenderEngine;
use super::traits::Generator;
use super::xlsx::{Cell, Sheet, Workbook, XlsxWriter};
use super::{GeneratedDocument, RenderError, ReportFormat};
use crate::report::models::ReportResult;

const TEMPLATE_FILE: &str = "grade_report.typ";
const OUTPUT_NAME: &str = "grade_report";

pub const TITLE: &str = "Grade Calculator Report";
pub const HEADERS: [&str; 6] = [
    "Subject",
    "FA1 (20)",
    "FA2 (20)",
    "SA (60)",
    "Total (100)",
    "Grade Pt.",
];

/// GPA as printed on documents.
pub fn format_gpa(gpa: f64) -> String {
    format!("{:.2}", gpa)
}

/// Generator for grade reports.
pub struct GradeReportGenerator {
    template: String,
    engine: TypstRenderEngine,
}

impl GradeReportGenerator {
    /// Create a new generator, loading the Typst layout from `static/`.
    pub fn new(engine: TypstRenderEngine) -> Result<Self, RenderError> {
        let template_path = get_static_dir().join(TEMPLATE_FILE);
        let template = fs::read_to_string(&template_path).map_err(RenderError::TemplateIo)?;
        Ok(Self { template, engine })
    }

    /// Full Typst document: the layout followed by a call with this report's data.
    pub fn typst_source(&self, report: &ReportResult, generated_on: &str) -> String {
        let rows: Vec<Vec<String>> = report
            .subjects
            .iter()
            .map(|s| {
                vec![
                    s.subject_name.clone(),
                    format_mark(s.fa1),
                    format_mark(s.fa2),
                    format_mark(s.sa),
                    format_mark(s.total),
                    s.grade_point.to_string(),
                ]
            })
            .collect();

        format!(
            r#"{}

#grade_report(
  student_name: {},
  rows: {},
  overall_gpa: {},
  generated_on: {},
)
"#,
            self.template,
            typst_str(&report.student_name),
            typst_rows(&rows),
            typst_str(&format_gpa(report.overall_gpa)),
            typst_str(generated_on),
        )
    }

    /// Spreadsheet layout: title, student, header row, subject rows, GPA.
    pub fn workbook(report: &ReportResult) -> Workbook {
        let mut sheet =
            Sheet::new("Grade Report").with_column_widths(&[24.0, 10.0, 10.0, 10.0, 12.0, 10.0]);

        sheet.push_row(vec![Cell::text(TITLE).bold()]);
        sheet.push_row(vec![
            Cell::text("Student Name").bold(),
            Cell::text(report.student_name.as_str()),
        ]);
        sheet.push_blank_row();
        sheet.push_row(HEADERS.iter().map(|h| Cell::text(*h).bold()).collect());

        for subject in &report.subjects {
            sheet.push_row(vec![
                Cell::text(subject.subject_name.as_str()),
                Cell::number(subject.fa1),
                Cell::number(subject.fa2),
                Cell::number(subject.sa),
                Cell::number(subject.total),
                Cell::number(f64::from(subject.grade_point)),
            ]);
        }

        sheet.push_blank_row();
        sheet.push_row(vec![
            Cell::text("Overall GPA").bold(),
            Cell::number((report.overall_gpa * 100.0).round() / 100.0).bold(),
        ]);

        let mut workbook = Workbook::new();
        workbook.add_sheet(sheet);
        workbook
    }
}

impl Generator<ReportResult> for GradeReportGenerator {
    fn generate(
        &self,
        report: &ReportResult,
        format: ReportFormat,
    ) -> Result<GeneratedDocument, RenderError> {
        let bytes = match format {
            ReportFormat::Pdf => self.engine.render(&self.typst_source(report, &format_generated_date()))?,
            ReportFormat::Xlsx => XlsxWriter::to_bytes(&Self::workbook(report))?,
        };

        Ok(GeneratedDocument {
            filename: format!("{}.{}", OUTPUT_NAME, format.extension()),
            bytes,
            format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::models::SubjectResult;

    fn sample_report() -> ReportResult {
        ReportResult {
            student_name: "Asha \"AJ\" Joshi".to_string(),
            subjects: vec![
                SubjectResult {
                    subject_name: "Maths".to_string(),
                    fa1: 18.0,
                    fa2: 17.5,
                    sa: 55.0,
                    total: 90.5,
                    grade_point: 10,
                },
                SubjectResult {
                    subject_name: "Physics".to_string(),
                    fa1: 10.0,
                    fa2: 10.0,
                    sa: 20.0,
                    total: 40.0,
                    grade_point: 5,
                },
            ],
            overall_gpa: 7.5,
        }
    }

    #[test]
    fn test_new_generator() {
        let result = GradeReportGenerator::new(TypstRenderEngine::default());
        assert!(result.is_ok());
    }

    #[test]
    fn test_typst_source_contains_escaped_data_in_order() {
        let generator = GradeReportGenerator::new(TypstRenderEngine::default()).unwrap();
        let source = generator.typst_source(&sample_report(), "16 October 2026");

        assert!(source.starts_with(&generator.template));
        assert!(source.contains(r#"student_name: "Asha \"AJ\" Joshi","#));
        assert!(source.contains(r#"("Maths", "18.0", "17.5", "55.0", "90.5", "10",),"#));
        assert!(source.contains(r#"overall_gpa: "7.50","#));

        let maths = source.find("\"Maths\"").unwrap();
        let physics = source.find("\"Physics\"").unwrap();
        assert!(maths < physics);
    }

    #[test]
    fn test_workbook_layout() {
        let workbook = GradeReportGenerator::workbook(&sample_report());
        let sheet = &workbook.sheets()[0];
        let rows = sheet.rows();

        assert_eq!(rows[0][0], Cell::text(TITLE).bold());
        assert_eq!(rows[1][1], Cell::text("Asha \"AJ\" Joshi"));
        assert_eq!(rows[3].len(), HEADERS.len());
        assert_eq!(rows[4][0], Cell::text("Maths"));
        assert_eq!(rows[4][4], Cell::number(90.5));
        assert_eq!(rows[5][5], Cell::number(5.0));
        assert_eq!(rows[7][1], Cell::number(7.5).bold());
    }

    #[test]
    fn test_workbook_rounds_gpa_to_two_decimals() {
        let mut report = sample_report();
        report.overall_gpa = 20.0 / 3.0;
        let workbook = GradeReportGenerator::workbook(&report);
        let last = workbook.sheets()[0].rows().last().unwrap();
        assert_eq!(last[1], Cell::number(6.67).bold());
    }

    #[test]
    fn test_generate_xlsx_document() {
        let generator = GradeReportGenerator::new(TypstRenderEngine::default()).unwrap();
        let document = generator
            .generate(&sample_report(), ReportFormat::Xlsx)
            .unwrap();

        assert_eq!(document.filename, "grade_report.xlsx");
        assert_eq!(document.content_type(), ReportFormat::Xlsx.mime_type());
        assert_eq!(&document.bytes[..2], b"PK");
    }

    #[test]
    fn test_format_gpa() {
        assert_eq!(format_gpa(10.0), "10.00");
        assert_eq!(format_gpa(2.5), "2.50");
        assert_eq!(format_gpa(20.0 / 3.0), "6.67");
    }
}
