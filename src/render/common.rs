//! Common utilities for document generation.
//!
//! Shared helpers for Typst source building, number and date formatting,
//! and download filenames.

use chrono::Local;
use std::path::Path;

/// Format the current local date (e.g., "16 October 2026").
pub fn format_generated_date() -> String {
    Local::now().format("%-d %B %Y").to_string()
}

/// Escape special characters for Typst strings.
pub fn escape_typst_string(value: &str) -> String {
    value
        .replace('\\', r"\\")
        .replace('"', r#"\""#)
        .replace('\n', r"\n")
        .replace('\r', r"\r")
        .replace('\t', r"\t")
}

/// Quote a value as a Typst string literal.
pub fn typst_str(value: &str) -> String {
    format!("\"{}\"", escape_typst_string(value))
}

/// Build a Typst array-of-arrays literal from table rows.
pub fn typst_rows(rows: &[Vec<String>]) -> String {
    let mut out = String::from("(\n");
    for row in rows {
        let cells: Vec<String> = row.iter().map(|c| typst_str(c)).collect();
        out.push_str(&format!("    ({},),\n", cells.join(", ")));
    }
    out.push_str("  )");
    out
}

/// Format a mark the way the grade form displays it: whole numbers keep
/// one decimal place (`15.0`), other values print in full (`12.25`), and
/// exponents below -4 or from 16 up switch to scientific form (`1e-05`, `1e+16`).
pub fn format_mark(value: f64) -> String {
    let scientific = format!("{:e}", value);
    if let Some((mantissa, exponent)) = scientific.split_once('e') {
        if let Ok(exponent) = exponent.parse::<i32>() {
            if value != 0.0 && !(-4..16).contains(&exponent) {
                let sign = if exponent < 0 { '-' } else { '+' };
                return format!("{}e{}{:02}", mantissa, sign, exponent.abs());
            }
        }
    }

    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Sanitize a string for use in filenames.
pub fn sanitize_filename(name: &str, fallback: &str) -> String {
    let mut result = String::new();
    let mut last_dash = false;

    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            result.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if (ch.is_whitespace() || ch == '-' || ch == '_') && !last_dash && !result.is_empty() {
            result.push('-');
            last_dash = true;
        }
    }

    let result = result.trim_matches('-');
    if result.is_empty() {
        return fallback.to_string();
    }

    result.to_string()
}

/// Get the static assets directory path.
pub fn get_static_dir() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/static"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_typst_string() {
        assert_eq!(escape_typst_string(r#"a "b" \c"#), r#"a \"b\" \\c"#);
        assert_eq!(escape_typst_string("line\nbreak"), r"line\nbreak");
    }

    #[test]
    fn test_typst_rows_keeps_single_cell_rows_as_arrays() {
        let rows = vec![vec!["only".to_string()]];
        assert_eq!(typst_rows(&rows), "(\n    (\"only\",),\n  )");
    }

    #[test]
    fn test_format_mark() {
        assert_eq!(format_mark(15.0), "15.0");
        assert_eq!(format_mark(12.5), "12.5");
        assert_eq!(format_mark(0.0), "0.0");
        assert_eq!(format_mark(-3.0), "-3.0");
        assert_eq!(format_mark(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn test_format_mark_switches_to_scientific_at_the_extremes() {
        assert_eq!(format_mark(1e15), "1000000000000000.0");
        assert_eq!(format_mark(1e16), "1e+16");
        assert_eq!(format_mark(2.5e20), "2.5e+20");
        assert_eq!(format_mark(0.0001), "0.0001");
        assert_eq!(format_mark(1e-5), "1e-05");
        assert_eq!(format_mark(-1.5e-7), "-1.5e-07");
        assert_eq!(format_mark(1e300), "1e+300");
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("SE Comp - A", "report"), "se-comp-a");
        assert_eq!(sanitize_filename("  __  ", "report"), "report");
        assert_eq!(sanitize_filename("TY/B.Tech", "report"), "tybtech");
    }
}
