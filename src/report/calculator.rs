//! Grade point and GPA calculation.

use super::models::{ReportResult, SubjectResult, SubjectScore, DEFAULT_SUBJECT_NAME};
use super::validation::{resolve_mark, FieldError, FieldErrors, ValidationError};

/// Lower bound of each band, highest first. Totals below the last band score 0.
const GRADE_BANDS: [(f64, u8); 6] = [
    (90.0, 10),
    (80.0, 9),
    (70.0, 8),
    (60.0, 7),
    (50.0, 6),
    (40.0, 5),
];

/// Map a total out of 100 to a grade point. Out-of-range totals are not
/// rejected: anything at or above 90 is 10, anything below 40 is 0.
pub fn grade_point(total_marks: f64) -> u8 {
    GRADE_BANDS
        .iter()
        .find(|(lower, _)| total_marks >= *lower)
        .map(|(_, point)| *point)
        .unwrap_or(0)
}

/// Compute per-subject totals and grade points plus the overall GPA.
///
/// Subjects keep their input order. Missing marks count as 0; marks that are
/// not numbers are all reported together.
pub fn compute_report(
    student_name: &str,
    subjects: &[SubjectScore],
) -> Result<ReportResult, ValidationError> {
    if subjects.is_empty() {
        return Err(ValidationError::NoSubjects);
    }

    let mut errors = FieldErrors::new();
    let mut results = Vec::with_capacity(subjects.len());

    for (index, subject) in subjects.iter().enumerate() {
        let fa1 = resolve_mark(&subject.fa1, index, "FA1", &mut errors);
        let fa2 = resolve_mark(&subject.fa2, index, "FA2", &mut errors);
        let sa = resolve_mark(&subject.sa, index, "SA", &mut errors);
        let total = fa1 + fa2 + sa;
        if !total.is_finite() {
            errors.add(FieldError::total_out_of_range(index));
        }

        results.push(SubjectResult {
            subject_name: subject
                .subject_name
                .clone()
                .unwrap_or_else(|| DEFAULT_SUBJECT_NAME.to_string()),
            fa1,
            fa2,
            sa,
            total,
            grade_point: grade_point(total),
        });
    }

    errors.into_result()?;

    let total_points: u32 = results.iter().map(|r| u32::from(r.grade_point)).sum();
    let overall_gpa = f64::from(total_points) / results.len() as f64;

    Ok(ReportResult {
        student_name: student_name.to_string(),
        subjects: results,
        overall_gpa,
    })
}
