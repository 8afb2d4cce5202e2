//! Output formats and their MIME types.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Pdf,
    Xlsx,
}

impl ReportFormat {
    /// Get MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Xlsx => "xlsx",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "xlsx" | "excel" => Ok(Self::Xlsx),
            other => Err(format!(
                "Unsupported format '{}'. Use 'pdf' or 'xlsx'",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("PDF".parse::<ReportFormat>(), Ok(ReportFormat::Pdf));
        assert_eq!(" xlsx ".parse::<ReportFormat>(), Ok(ReportFormat::Xlsx));
        assert_eq!("excel".parse::<ReportFormat>(), Ok(ReportFormat::Xlsx));
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let err = "docx".parse::<ReportFormat>().unwrap_err();
        assert!(err.contains("docx"));
    }

    #[test]
    fn test_mime_types() {
        assert_eq!(ReportFormat::Pdf.mime_type(), "application/pdf");
        assert!(ReportFormat::Xlsx.mime_type().contains("spreadsheetml"));
    }
}
