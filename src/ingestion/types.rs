//! Core data types for the import pipeline
//! Pure data structures with no I/O

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

/// A single spreadsheet cell, as loosely typed as the export format itself.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Empty,
}

impl CellValue {
    /// String form of the cell. Empty cells and empty strings are `None`.
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Text(s) if !s.is_empty() => Some(s.clone()),
            CellValue::Number(n) => Some(format_number(*n)),
            CellValue::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Numeric form of the cell, parsing numeric text.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Render a float the way spreadsheets print it: no trailing `.0` on
/// integral values.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{n:.0}")
    } else {
        n.to_string()
    }
}

/// One spreadsheet row, keyed by the exact header text of each column.
/// Cells that were empty in the sheet are absent.
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    cells: HashMap<String, CellValue>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: impl Into<String>, value: CellValue) {
        self.cells.insert(label.into(), value);
    }

    pub fn get(&self, label: &str) -> Option<&CellValue> {
        self.cells.get(label)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// String form of a cell; `None` for missing or empty cells.
    pub fn text(&self, label: &str) -> Option<String> {
        self.cells.get(label).and_then(CellValue::as_text)
    }

    /// Numeric form of a cell; `None` for missing or non-numeric cells.
    pub fn number(&self, label: &str) -> Option<f64> {
        self.cells.get(label).and_then(CellValue::as_number)
    }
}

impl<S: Into<String>> FromIterator<(S, CellValue)> for RawRow {
    fn from_iter<T: IntoIterator<Item = (S, CellValue)>>(iter: T) -> Self {
        let mut row = RawRow::new();
        for (label, value) in iter {
            row.insert(label, value);
        }
        row
    }
}

/// A raw row plus the fields derived by the row processor.
#[derive(Debug, Clone)]
pub struct EnrichedRow {
    pub row: RawRow,
    pub cleaned_building_name: Option<String>,
    pub address_in_name: bool,
}

impl EnrichedRow {
    pub fn text(&self, label: &str) -> Option<String> {
        self.row.text(label)
    }

    pub fn number(&self, label: &str) -> Option<f64> {
        self.row.number(label)
    }
}

/// One federally owned building, as stored in the `owned` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OwnedRecord {
    pub location_code: Option<String>,
    pub real_property_asset_name: Option<String>,
    pub installation_name: Option<String>,
    pub owned_or_leased: Option<String>,
    pub gsa_region: Option<String>,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub building_rentable_square_feet: Option<String>,
    pub available_square_feet: f64,
    pub construction_date: Option<String>,
    pub congressional_district: Option<String>,
    pub congressional_district_representative_name: Option<String>,
    pub building_status: Option<String>,
    pub real_property_asset_type: Option<String>,
    pub cleaned_building_name: Option<String>,
    pub address_in_name: bool,
}

/// One leased building, as stored in the `leases` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LeaseRecord {
    pub location_code: Option<String>,
    pub real_property_asset_name: Option<String>,
    pub installation_name: Option<String>,
    pub federal_leased_code: Option<String>,
    pub gsa_region: Option<String>,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub building_rentable_square_feet: Option<String>,
    pub available_square_feet: f64,
    pub construction_date: Option<String>,
    pub congressional_district: Option<String>,
    pub congressional_district_representative: Option<String>,
    pub lease_number: Option<String>,
    pub lease_effective_date: Option<NaiveDate>,
    pub lease_expiration_date: Option<NaiveDate>,
    pub real_property_asset_type: Option<String>,
    pub cleaned_building_name: Option<String>,
    pub address_in_name: bool,
}

/// The partial row applied when an incoming lease matches a stored one.
/// Only the lease terms are refreshed; the address block stays as imported.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaseUpdate {
    pub id: i32,
    pub lease_number: Option<String>,
    pub lease_effective_date: Option<NaiveDate>,
    pub lease_expiration_date: Option<NaiveDate>,
    pub federal_leased_code: Option<String>,
}

/// Counters for one import phase.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportStats {
    pub owned_inserted: usize,
    pub leases_inserted: usize,
    pub leases_updated: usize,
}

impl std::fmt::Display for ImportStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "owned inserted: {}, leases inserted: {}, leases updated: {}",
            self.owned_inserted, self.leases_inserted, self.leases_updated
        )
    }
}
