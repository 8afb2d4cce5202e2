//! Grade report calculation and its HTTP endpoints.

pub mod calculator;
pub mod handlers;
pub mod models;
pub mod validation;


pub use calculator::{compute_report, grade_point};
pub use handlers::config;
pub use models::{RawMark, ReportRequest, ReportResult, SubjectResult, SubjectScore};
pub use validation::{FieldError, FieldErrors, ValidationError};
