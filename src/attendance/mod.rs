//! Attendance sheets: records are relayed to the renderer without any calculation.

pub mod handlers;
pub mod models;

pub use handlers::config;
pub use models::{AttendanceQuery, AttendanceRecord, AttendanceRequest};
