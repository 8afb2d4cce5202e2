use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::render::ReportFormat;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, ToSchema)]
pub struct AttendanceRecord {
    #[serde(default)]
    pub name: String,
    /// Permanent Registration Number
    #[serde(default)]
    pub prn: String,
    #[serde(default)]
    pub division: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, ToSchema)]
pub struct AttendanceRequest {
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub date_time: String,
    #[serde(default)]
    pub students: Vec<AttendanceRecord>,
}

/// Query string for `/generate_attendance`.
#[derive(Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AttendanceQuery {
    /// Output format: `pdf` or `xlsx` (default)
    pub format: Option<String>,
}

impl AttendanceQuery {
    pub fn report_format(&self) -> Result<ReportFormat, String> {
        match &self.format {
            Some(value) => value.parse(),
            None => Ok(ReportFormat::Xlsx),
        }
    }
}
