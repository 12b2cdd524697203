//! Minimal Office Open XML workbook writer.
//!
//! Produces a standards-conforming `.xlsx` package (zip container with
//! content types, relationships, a shared stylesheet and one worksheet part
//! per sheet). Strings are written inline, so no shared-string table is
//! needed. Output is byte-for-byte deterministic for the same input.

use std::io::{Cursor, Write};

use reviewdesk_core::error::CodecError;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::sheet::CellValue;

const NS_MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const NS_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_PKG_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

const STYLES_XML: &str = concat!(
    r#"<fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts>"#,
    r#"<fills count="2"><fill><patternFill patternType="none"/></fill>"#,
    r#"<fill><patternFill patternType="gray125"/></fill></fills>"#,
    r#"<borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders>"#,
    r#"<cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>"#,
    r#"<cellXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/></cellXfs>"#,
    r#"<cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles>"#,
);

/// Excel's limit on sheet name length.
const MAX_SHEET_NAME: usize = 31;

/// Builds a workbook in memory, sheet by sheet.
#[derive(Debug, Default)]
pub struct WorkbookWriter {
    sheets: Vec<(String, Vec<Vec<CellValue>>)>,
}

impl WorkbookWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sheet. Names are truncated to Excel's 31-character limit.
    pub fn add_sheet(&mut self, name: &str, rows: Vec<Vec<CellValue>>) -> &mut Self {
        let name: String = name.chars().take(MAX_SHEET_NAME).collect();
        self.sheets.push((name, rows));
        self
    }

    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Serialize the package.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        if self.sheets.is_empty() {
            return Err(CodecError::Container("workbook has no sheets".into()));
        }

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let opts = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(zip::DateTime::default());

        let mut put = |path: &str, body: String| -> Result<(), CodecError> {
            zip.start_file(path, opts)
                .map_err(|e| CodecError::Container(e.to_string()))?;
            zip.write_all(body.as_bytes())
                .map_err(|e| CodecError::Container(e.to_string()))
        };

        put("[Content_Types].xml", self.content_types_xml())?;
        put("_rels/.rels", root_rels_xml())?;
        put("xl/workbook.xml", self.workbook_xml())?;
        put("xl/_rels/workbook.xml.rels", self.workbook_rels_xml())?;
        put(
            "xl/styles.xml",
            format!(r#"{XML_DECL}<styleSheet xmlns="{NS_MAIN}">{STYLES_XML}</styleSheet>"#),
        )?;
        for (index, (_, rows)) in self.sheets.iter().enumerate() {
            put(
                &format!("xl/worksheets/sheet{}.xml", index + 1),
                worksheet_xml(rows),
            )?;
        }

        let cursor = zip
            .finish()
            .map_err(|e| CodecError::Container(e.to_string()))?;
        Ok(cursor.into_inner())
    }

    fn content_types_xml(&self) -> String {
        let mut xml = format!(
            concat!(
                "{}",
                r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
                r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
                r#"<Default Extension="xml" ContentType="application/xml"/>"#,
                r#"<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#,
                r#"<Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
            ),
            XML_DECL
        );
        for index in 1..=self.sheets.len() {
            xml.push_str(&format!(
                r#"<Override PartName="/xl/worksheets/sheet{index}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#
            ));
        }
        xml.push_str("</Types>");
        xml
    }

    fn workbook_xml(&self) -> String {
        let mut xml = format!(r#"{XML_DECL}<workbook xmlns="{NS_MAIN}" xmlns:r="{NS_REL}"><sheets>"#);
        for (index, (name, _)) in self.sheets.iter().enumerate() {
            let id = index + 1;
            xml.push_str(&format!(
                r#"<sheet name="{}" sheetId="{id}" r:id="rId{id}"/>"#,
                escape_xml(name)
            ));
        }
        xml.push_str("</sheets></workbook>");
        xml
    }

    fn workbook_rels_xml(&self) -> String {
        let mut xml = format!(r#"{XML_DECL}<Relationships xmlns="{NS_PKG_REL}">"#);
        for index in 1..=self.sheets.len() {
            xml.push_str(&format!(
                r#"<Relationship Id="rId{index}" Type="{NS_REL}/worksheet" Target="worksheets/sheet{index}.xml"/>"#
            ));
        }
        xml.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="{NS_REL}/styles" Target="styles.xml"/>"#,
            self.sheets.len() + 1
        ));
        xml.push_str("</Relationships>");
        xml
    }
}

fn root_rels_xml() -> String {
    format!(
        r#"{XML_DECL}<Relationships xmlns="{NS_PKG_REL}"><Relationship Id="rId1" Type="{NS_REL}/officeDocument" Target="xl/workbook.xml"/></Relationships>"#
    )
}

fn worksheet_xml(rows: &[Vec<CellValue>]) -> String {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    let dimension = if rows.is_empty() || width == 0 {
        "A1".to_string()
    } else {
        format!("A1:{}{}", column_name(width - 1), rows.len())
    };

    let mut xml = format!(
        r#"{XML_DECL}<worksheet xmlns="{NS_MAIN}"><dimension ref="{dimension}"/><sheetData>"#
    );
    for (r, row) in rows.iter().enumerate() {
        let row_num = r + 1;
        xml.push_str(&format!(r#"<row r="{row_num}">"#));
        for (c, cell) in row.iter().enumerate() {
            let cell_ref = format!("{}{row_num}", column_name(c));
            match cell {
                CellValue::Empty => {}
                CellValue::Number(n) => {
                    xml.push_str(&format!(r#"<c r="{cell_ref}"><v>{n}</v></c>"#));
                }
                CellValue::Bool(b) => {
                    xml.push_str(&format!(r#"<c r="{cell_ref}" t="b"><v>{}</v></c>"#, u8::from(*b)));
                }
                CellValue::Text(text) => {
                    xml.push_str(&format!(
                        r#"<c r="{cell_ref}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
                        escape_xml(text)
                    ));
                }
            }
        }
        xml.push_str("</row>");
    }
    xml.push_str("</sheetData></worksheet>");
    xml
}

/// Zero-based column index to its letter name (0 → A, 26 → AA).
pub fn column_name(mut index: usize) -> String {
    let mut name = Vec::new();
    loop {
        name.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    name.reverse();
    String::from_utf8_lossy(&name).into_owned()
}

/// Escape text for XML content and attributes. Control characters that
/// XML 1.0 cannot carry are dropped.
fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(ch),
            c if (c as u32) < 0x20 => {}
            c => out.push(c),
        }
    }
    out
}
