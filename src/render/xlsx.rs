//! Minimal XLSX (Office Open XML) writer.
//!
//! Only what the reports need: inline strings, numbers, a bold header style
//! and column widths. Cells are written row-major, one worksheet per sheet.

use quick_xml::escape::escape;
use std::io::{Cursor, Seek, Write};
use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Excel rejects sheet names longer than this.
const MAX_SHEET_NAME_LEN: usize = 31;

/// Index into `cellXfs`; 0 is the default style.
const STYLE_BOLD: u32 = 1;

#[derive(Debug, Error)]
pub enum XlsxError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

pub type XlsxResult<T> = Result<T, XlsxError>;

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub value: CellValue,
    pub bold: bool,
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            value: CellValue::Text(value.into()),
            bold: false,
        }
    }

    pub fn number(value: f64) -> Self {
        Self {
            value: CellValue::Number(value),
            bold: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct Sheet {
    name: String,
    rows: Vec<Vec<Cell>>,
    column_widths: Vec<f64>,
}

impl Sheet {
    pub fn new(name: &str) -> Self {
        Self {
            name: sanitize_sheet_name(name),
            rows: Vec::new(),
            column_widths: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    pub fn push_blank_row(&mut self) {
        self.rows.push(Vec::new());
    }

    pub fn with_column_widths(mut self, widths: &[f64]) -> Self {
        self.column_widths = widths.to_vec();
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sheet(&mut self, sheet: Sheet) {
        self.sheets.push(sheet);
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }
}

/// Convert a zero-based column index to its letters (0 -> A, 26 -> AA).
pub fn column_letters(mut col: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push((b'A' + (col % 26) as u8) as char);
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    letters.iter().rev().collect()
}

fn sanitize_sheet_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            other => other,
        })
        .take(MAX_SHEET_NAME_LEN)
        .collect();
    if cleaned.trim().is_empty() {
        "Sheet1".to_string()
    } else {
        cleaned
    }
}

/// Whether `c` is allowed in XML 1.0 character data.
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r') || (c >= '\u{20}' && c != '\u{FFFE}' && c != '\u{FFFF}')
}

/// Escape text for an XML element or attribute, dropping characters XML 1.0 forbids.
fn xml_text(value: &str) -> String {
    if value.chars().all(is_xml_char) {
        escape(value).into_owned()
    } else {
        let cleaned: String = value.chars().filter(|c| is_xml_char(*c)).collect();
        escape(cleaned.as_str()).into_owned()
    }
}

/// XLSX file writer
pub struct XlsxWriter;

impl XlsxWriter {
    /// Write a workbook into an in-memory buffer.
    pub fn to_bytes(workbook: &Workbook) -> XlsxResult<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        Self::write(workbook, &mut buffer)?;
        Ok(buffer.into_inner())
    }

    /// Write a workbook to a writer
    pub fn write<W: Write + Seek>(workbook: &Workbook, writer: W) -> XlsxResult<()> {
        let mut zip = ZipWriter::new(writer);

        Self::write_content_types(&mut zip, workbook)?;
        Self::write_root_rels(&mut zip)?;
        Self::write_workbook_xml(&mut zip, workbook)?;
        Self::write_workbook_rels(&mut zip, workbook)?;
        Self::write_styles_xml(&mut zip)?;

        for (i, sheet) in workbook.sheets().iter().enumerate() {
            Self::write_worksheet(&mut zip, sheet, i)?;
        }

        zip.finish()?;
        Ok(())
    }

    fn write_content_types<W: Write + Seek>(
        zip: &mut ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        zip.start_file("[Content_Types].xml", SimpleFileOptions::default())?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
    <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
        );

        for i in 0..workbook.sheets().len() {
            content.push_str(&format!(
                r#"
    <Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
                i + 1
            ));
        }

        content.push_str("\n</Types>");
        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_root_rels<W: Write + Seek>(zip: &mut ZipWriter<W>) -> XlsxResult<()> {
        zip.start_file("_rels/.rels", SimpleFileOptions::default())?;

        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_workbook_xml<W: Write + Seek>(
        zip: &mut ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        zip.start_file("xl/workbook.xml", SimpleFileOptions::default())?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <sheets>"#,
        );

        for (i, sheet) in workbook.sheets().iter().enumerate() {
            content.push_str(&format!(
                r#"
        <sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                xml_text(sheet.name()),
                i + 1,
                i + 1
            ));
        }

        content.push_str(
            r#"
    </sheets>
</workbook>"#,
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_workbook_rels<W: Write + Seek>(
        zip: &mut ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        zip.start_file("xl/_rels/workbook.xml.rels", SimpleFileOptions::default())?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );

        let sheet_count = workbook.sheets().len();
        for i in 0..sheet_count {
            content.push_str(&format!(
                r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
                i + 1,
                i + 1
            ));
        }

        // Styles take the id after the last worksheet.
        content.push_str(&format!(
            r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#,
            sheet_count + 1
        ));

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_styles_xml<W: Write + Seek>(zip: &mut ZipWriter<W>) -> XlsxResult<()> {
        zip.start_file("xl/styles.xml", SimpleFileOptions::default())?;

        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <fonts count="2">
        <font><sz val="11"/><name val="Calibri"/></font>
        <font><b/><sz val="11"/><name val="Calibri"/></font>
    </fonts>
    <fills count="2">
        <fill><patternFill patternType="none"/></fill>
        <fill><patternFill patternType="gray125"/></fill>
    </fills>
    <borders count="1">
        <border><left/><right/><top/><bottom/><diagonal/></border>
    </borders>
    <cellStyleXfs count="1">
        <xf numFmtId="0" fontId="0" fillId="0" borderId="0"/>
    </cellStyleXfs>
    <cellXfs count="2">
        <xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/>
        <xf numFmtId="0" fontId="1" fillId="0" borderId="0" xfId="0" applyFont="1"/>
    </cellXfs>
    <cellStyles count="1">
        <cellStyle name="Normal" xfId="0" builtinId="0"/>
    </cellStyles>
</styleSheet>"#;

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_worksheet<W: Write + Seek>(
        zip: &mut ZipWriter<W>,
        sheet: &Sheet,
        index: usize,
    ) -> XlsxResult<()> {
        zip.start_file(
            format!("xl/worksheets/sheet{}.xml", index + 1),
            SimpleFileOptions::default(),
        )?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );

        if !sheet.column_widths.is_empty() {
            content.push_str("\n    <cols>");
            for (i, width) in sheet.column_widths.iter().enumerate() {
                content.push_str(&format!(
                    r#"
        <col min="{}" max="{}" width="{}" customWidth="1"/>"#,
                    i + 1,
                    i + 1,
                    width
                ));
            }
            content.push_str("\n    </cols>");
        }

        content.push_str("\n    <sheetData>");

        for (row_idx, row) in sheet.rows().iter().enumerate() {
            if row.is_empty() {
                continue;
            }
            content.push_str(&format!("\n        <row r=\"{}\">", row_idx + 1));

            for (col_idx, cell) in row.iter().enumerate() {
                let cell_ref = format!("{}{}", column_letters(col_idx), row_idx + 1);
                let style_attr = if cell.bold {
                    format!(" s=\"{}\"", STYLE_BOLD)
                } else {
                    String::new()
                };

                match &cell.value {
                    // SpreadsheetML has no literal for NaN or infinity.
                    CellValue::Number(n) if !n.is_finite() => {
                        content.push_str(&format!(
                            "\n            <c r=\"{}\"{} t=\"inlineStr\"><is><t>{}</t></is></c>",
                            cell_ref, style_attr, n
                        ));
                    }
                    CellValue::Number(n) => {
                        content.push_str(&format!(
                            "\n            <c r=\"{}\"{}><v>{}</v></c>",
                            cell_ref, style_attr, n
                        ));
                    }
                    CellValue::Text(s) => {
                        content.push_str(&format!(
                            "\n            <c r=\"{}\"{} t=\"inlineStr\"><is><t xml:space=\"preserve\">{}</t></is></c>",
                            cell_ref,
                            style_attr,
                            xml_text(s)
                        ));
                    }
                }
            }

            content.push_str("\n        </row>");
        }

        content.push_str(
            r#"
    </sheetData>
</worksheet>"#,
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut part = archive.by_name(name).unwrap();
        let mut content = String::new();
        part.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_column_letters() {
        assert_eq!(column_letters(0), "A");
        assert_eq!(column_letters(5), "F");
        assert_eq!(column_letters(25), "Z");
        assert_eq!(column_letters(26), "AA");
        assert_eq!(column_letters(27), "AB");
        assert_eq!(column_letters(701), "ZZ");
        assert_eq!(column_letters(702), "AAA");
    }

    #[test]
    fn test_sheet_name_is_sanitized() {
        assert_eq!(Sheet::new("a/b:c").name(), "a_b_c");
        assert_eq!(Sheet::new(&"x".repeat(40)).name().len(), 31);
        assert_eq!(Sheet::new("   ").name(), "Sheet1");
    }

    #[test]
    fn test_package_contains_required_parts() {
        let mut workbook = Workbook::new();
        workbook.add_sheet(Sheet::new("Report"));
        let bytes = XlsxWriter::to_bytes(&workbook).unwrap();

        let archive = zip::ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "xl/workbook.xml",
            "xl/_rels/workbook.xml.rels",
            "xl/styles.xml",
            "xl/worksheets/sheet1.xml",
        ] {
            assert!(names.contains(&part), "missing {}", part);
        }
    }

    #[test]
    fn test_cells_are_written_with_refs_and_styles() {
        let mut sheet = Sheet::new("Report");
        sheet.push_row(vec![Cell::text("Name").bold(), Cell::number(12.5)]);
        sheet.push_blank_row();
        sheet.push_row(vec![Cell::text("<Tom & Jerry>")]);
        let mut workbook = Workbook::new();
        workbook.add_sheet(sheet);

        let bytes = XlsxWriter::to_bytes(&workbook).unwrap();
        let xml = read_part(&bytes, "xl/worksheets/sheet1.xml");

        assert!(xml.contains(r#"<c r="A1" s="1" t="inlineStr">"#));
        assert!(xml.contains(r#"<c r="B1"><v>12.5</v></c>"#));
        assert!(!xml.contains(r#"<row r="2">"#));
        assert!(xml.contains("&lt;Tom &amp; Jerry&gt;"));
    }

    #[test]
    fn test_control_characters_are_dropped() {
        let mut sheet = Sheet::new("Roll\u{1}Call");
        sheet.push_row(vec![Cell::text("A\u{1}B\u{1b}"), Cell::text("tab\there")]);
        let mut workbook = Workbook::new();
        workbook.add_sheet(sheet);

        let bytes = XlsxWriter::to_bytes(&workbook).unwrap();
        let xml = read_part(&bytes, "xl/worksheets/sheet1.xml");
        let names = read_part(&bytes, "xl/workbook.xml");

        assert!(!xml.contains('\u{1}'));
        assert!(!xml.contains('\u{1b}'));
        assert!(xml.contains(">AB<"));
        assert!(xml.contains("tab\there"));
        assert!(names.contains(r#"name="RollCall""#));
    }

    #[test]
    fn test_non_finite_numbers_are_written_as_text() {
        let mut sheet = Sheet::new("Report");
        sheet.push_row(vec![Cell::number(f64::INFINITY), Cell::number(f64::NAN)]);
        let mut workbook = Workbook::new();
        workbook.add_sheet(sheet);

        let bytes = XlsxWriter::to_bytes(&workbook).unwrap();
        let xml = read_part(&bytes, "xl/worksheets/sheet1.xml");

        assert!(!xml.contains("<v>inf</v>"));
        assert!(!xml.contains("<v>NaN</v>"));
        assert!(xml.contains(r#"<c r="A1" t="inlineStr"><is><t>inf</t></is></c>"#));
        assert!(xml.contains(r#"<c r="B1" t="inlineStr"><is><t>NaN</t></is></c>"#));
    }
}
