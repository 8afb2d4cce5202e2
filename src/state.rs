//! Shared, read-only application state handed to every handler.

use crate::config::ServerConfig;
use crate::render::{AttendanceGenerator, GradeReportGenerator, RenderError, TypstRenderEngine};

pub struct AppState {
    pub grade_report: GradeReportGenerator,
    pub attendance: AttendanceGenerator,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Result<Self, RenderError> {
        let engine = TypstRenderEngine::new(config.typst_bin.clone());
        Ok(Self {
            grade_report: GradeReportGenerator::new(engine.clone())?,
            attendance: AttendanceGenerator::new(engine)?,
        })
    }
}
