use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

pub const DEFAULT_STUDENT_NAME: &str = "Student";
pub const DEFAULT_SUBJECT_NAME: &str = "Unnamed Subject";

/// A single mark as the form submits it: a JSON number, a numeric string,
/// or anything else (which the calculator rejects).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum RawMark {
    Number(f64),
    Text(String),
    Other(Value),
}

impl Default for RawMark {
    fn default() -> Self {
        RawMark::Number(0.0)
    }
}

impl RawMark {
    /// Resolve to a finite number, or `None` if the value is not numeric.
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            RawMark::Number(n) => *n,
            RawMark::Text(s) => s.trim().parse::<f64>().ok()?,
            RawMark::Other(_) => return None,
        };
        value.is_finite().then_some(value)
    }

    /// Short rendering of the raw value for error messages.
    pub fn describe(&self) -> String {
        match self {
            RawMark::Number(n) => n.to_string(),
            RawMark::Text(s) => format!("\"{}\"", s),
            RawMark::Other(v) => v.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema)]
pub struct SubjectScore {
    #[serde(default)]
    pub subject_name: Option<String>,
    #[serde(rename = "FA1", default)]
    #[schema(value_type = f64)]
    pub fa1: RawMark,
    #[serde(rename = "FA2", default)]
    #[schema(value_type = f64)]
    pub fa2: RawMark,
    #[serde(rename = "SA", default)]
    #[schema(value_type = f64)]
    pub sa: RawMark,
}

impl SubjectScore {
    pub fn new(subject_name: &str, fa1: f64, fa2: f64, sa: f64) -> Self {
        Self {
            subject_name: Some(subject_name.to_string()),
            fa1: RawMark::Number(fa1),
            fa2: RawMark::Number(fa2),
            sa: RawMark::Number(sa),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct SubjectResult {
    pub subject_name: String,
    #[serde(rename = "FA1")]
    pub fa1: f64,
    #[serde(rename = "FA2")]
    pub fa2: f64,
    #[serde(rename = "SA")]
    pub sa: f64,
    pub total: f64,
    pub grade_point: u8,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct ReportResult {
    pub student_name: String,
    pub subjects: Vec<SubjectResult>,
    pub overall_gpa: f64,
}

/// Request body shared by the grade report endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema)]
pub struct ReportRequest {
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub subjects: Vec<SubjectScore>,
}

impl ReportRequest {
    pub fn student_name(&self) -> &str {
        self.student_name.as_deref().unwrap_or(DEFAULT_STUDENT_NAME)
    }
}
