//! Tabular text: CSV parsing into typed cells and grids rendered back to CSV.

use reviewdesk_core::error::CodecError;

/// A spreadsheet cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Number(f64),
    Bool(bool),
    Text(String),
}

impl CellValue {
    /// Type a raw CSV field. Numeric and boolean literals become typed
    /// cells; everything else stays text.
    pub fn infer(field: &str) -> Self {
        if field.is_empty() {
            return CellValue::Empty;
        }
        match field {
            "TRUE" | "true" => return CellValue::Bool(true),
            "FALSE" | "false" => return CellValue::Bool(false),
            _ => {}
        }
        if looks_numeric(field)
            && let Ok(n) = field.parse::<f64>()
            && n.is_finite()
        {
            return CellValue::Number(n);
        }
        CellValue::Text(field.to_string())
    }
}

/// Only plain decimal/scientific literals; rejects "inf", "NaN", " 1".
fn looks_numeric(field: &str) -> bool {
    field.bytes().any(|b| b.is_ascii_digit())
        && field
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E'))
}

/// Parse CSV text into rows of typed cells.
///
/// Ragged rows are accepted as-is. A blank line between records is kept
/// as an empty row, so rows land on the line they were written on.
pub fn parse_csv(content: &str) -> Result<Vec<Vec<CellValue>>, CodecError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| CodecError::Csv(e.to_string()))?;
        // The csv reader skips blank lines; its record position points at
        // the first byte it skipped.
        if let Some(pos) = record.position() {
            let blanks = blank_lines_at(content.as_bytes(), pos.byte() as usize);
            rows.extend(std::iter::repeat_with(Vec::new).take(blanks));
        }
        rows.push(record.iter().map(CellValue::infer).collect());
    }
    Ok(rows)
}

/// Count the empty lines starting at `start`. A `\n` completing the
/// previous record's `\r\n` is not one of them.
fn blank_lines_at(bytes: &[u8], start: usize) -> usize {
    let mut i = start;
    if i > 0 && bytes.get(i - 1) == Some(&b'\r') && bytes.get(i) == Some(&b'\n') {
        i += 1;
    }
    let mut blanks = 0;
    loop {
        match (bytes.get(i), bytes.get(i + 1)) {
            (Some(b'\r'), Some(b'\n')) => i += 2,
            (Some(b'\r' | b'\n'), _) => i += 1,
            _ => return blanks,
        }
        blanks += 1;
    }
}

/// Render a grid of cell strings as CSV, one line per row, no trailing
/// newline.
pub fn render_csv(rows: &[Vec<String>]) -> Result<String, CodecError> {
    let mut lines = Vec::with_capacity(rows.len());
    for row in rows {
        if row.iter().all(|f| f.is_empty()) {
            lines.push(",".repeat(row.len().saturating_sub(1)));
            continue;
        }
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        writer
            .write_record(row)
            .map_err(|e| CodecError::Csv(e.to_string()))?;
        let bytes = writer
            .into_inner()
            .map_err(|e| CodecError::Csv(e.to_string()))?;
        let line = String::from_utf8_lossy(&bytes);
        lines.push(line.trim_end_matches('\n').to_string());
    }
    Ok(lines.join("\n"))
}
