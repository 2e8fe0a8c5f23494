//! Spreadsheet reading - first worksheet to ordered label/value rows

use crate::ingestion::types::{CellValue, RawRow};
use anyhow::{anyhow, Context, Result};
use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader};
use std::io::Cursor;
use std::path::Path;
use tracing::info;

/// Read the first worksheet of a workbook on disk.
pub fn read_workbook(path: &Path) -> Result<Vec<RawRow>> {
    info!("Reading workbook from {:?}", path);

    let mut workbook =
        open_workbook_auto(path).with_context(|| format!("failed to open workbook {path:?}"))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| anyhow!("workbook {path:?} has no sheets"))??;

    let rows = rows_from_range(&range);
    info!("Read {} rows from {:?}", rows.len(), path);
    Ok(rows)
}

/// Read the first worksheet of an in-memory workbook (downloaded exports).
pub fn read_workbook_bytes(bytes: &[u8]) -> Result<Vec<RawRow>> {
    info!("Reading workbook from memory ({} bytes)", bytes.len());

    let cursor = Cursor::new(bytes);
    let mut workbook =
        open_workbook_auto_from_rs(cursor).context("failed to open workbook from bytes")?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| anyhow!("workbook has no sheets"))??;

    Ok(rows_from_range(&range))
}

/// Row 0 is the header row; every other row becomes a label-keyed map.
/// Empty cells are left out of the map and fully empty rows are dropped,
/// matching the sheet-to-records convention of the source exports.
fn rows_from_range(range: &Range<Data>) -> Vec<RawRow> {
    let mut rows = range.rows();

    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect(),
        None => return Vec::new(),
    };

    rows.map(|cells| {
        let mut row = RawRow::new();
        for (label, cell) in headers.iter().zip(cells) {
            if label.is_empty() {
                continue;
            }
            match cell_value(cell) {
                CellValue::Empty => {}
                value => row.insert(label.clone(), value),
            }
        }
        row
    })
    .filter(|row| !row.is_empty())
    .collect()
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => {
            if s.is_empty() {
                CellValue::Empty
            } else {
                CellValue::Text(s.clone())
            }
        }
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        // Date-formatted cells surface as their serial number; the field
        // normalizers decide which columns are calendar dates.
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}
