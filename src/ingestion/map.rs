//! Schema mappers - enriched rows into the owned / leases column sets

use crate::ingestion::types::{format_number, CellValue, EnrichedRow, LeaseRecord, OwnedRecord};
use crate::ingestion::utils::{available_square_feet, excel_serial_date};

/// Loose "value or null" coercion for numeric columns stored as decimal
/// strings: empty, zero, and NaN cells all collapse to `None`.
fn numeric_string(row: &EnrichedRow, label: &str) -> Option<String> {
    match row.row.get(label) {
        Some(CellValue::Number(n)) if *n != 0.0 && !n.is_nan() => Some(format_number(*n)),
        Some(CellValue::Text(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Map a buildings-file row to the `owned` column set.
pub fn map_owned(row: &EnrichedRow) -> OwnedRecord {
    OwnedRecord {
        location_code: row.text("Location Code"),
        real_property_asset_name: row.text("Real Property Asset Name"),
        installation_name: row.text("Installation Name"),
        owned_or_leased: row.text("Owned or Leased"),
        gsa_region: row.text("GSA Region"),
        street_address: row.text("Street Address"),
        city: row.text("City"),
        state: row.text("State"),
        zip_code: row.text("Zip Code"),
        latitude: numeric_string(row, "Latitude"),
        longitude: numeric_string(row, "Longitude"),
        building_rentable_square_feet: numeric_string(row, "Building Rentable Square Feet"),
        available_square_feet: available_square_feet(row.number("Available Square Feet")),
        construction_date: row.text("Construction Date"),
        congressional_district: row.text("Congressional District"),
        congressional_district_representative_name: row
            .text("Congressional District Representative Name"),
        building_status: row.text("Building Status"),
        real_property_asset_type: row.text("Real Property Asset Type"),
        cleaned_building_name: row.cleaned_building_name.clone(),
        address_in_name: row.address_in_name,
    }
}

/// Map a leases-file row to the `leases` column set.
pub fn map_lease(row: &EnrichedRow) -> LeaseRecord {
    LeaseRecord {
        location_code: row.text("Location Code"),
        real_property_asset_name: row.text("Real Property Asset Name"),
        installation_name: row.text("Installation Name"),
        federal_leased_code: row.text("Federal Leased Code"),
        gsa_region: row.text("GSA Region"),
        street_address: row.text("Street Address"),
        city: row.text("City"),
        state: row.text("State"),
        zip_code: row.text("Zip Code"),
        latitude: numeric_string(row, "Latitude"),
        longitude: numeric_string(row, "Longitude"),
        building_rentable_square_feet: numeric_string(row, "Building Rentable Square Feet"),
        available_square_feet: available_square_feet(row.number("Available Square Feet")),
        construction_date: row.text("Construction Date"),
        congressional_district: row.text("Congressional District"),
        congressional_district_representative: row.text("Congressional District Representative"),
        lease_number: row.text("Lease Number"),
        lease_effective_date: excel_serial_date(row.number("Lease Effective Date")),
        lease_expiration_date: excel_serial_date(row.number("Lease Expiration Date")),
        // the leases export spells this header with a lower-case "type"
        real_property_asset_type: row.text("Real Property Asset type"),
        cleaned_building_name: row.cleaned_building_name.clone(),
        address_in_name: row.address_in_name,
    }
}

/// Reshape a buildings-file row marked "L" into the `leases` column set.
/// Such rows carry no lease terms, so the lease-only fields are null.
pub fn owned_to_lease(row: &EnrichedRow) -> LeaseRecord {
    LeaseRecord {
        location_code: row.text("Location Code"),
        real_property_asset_name: row.text("Real Property Asset Name"),
        installation_name: row.text("Installation Name"),
        federal_leased_code: None,
        gsa_region: row.text("GSA Region"),
        street_address: row.text("Street Address"),
        city: row.text("City"),
        state: row.text("State"),
        zip_code: row.text("Zip Code"),
        latitude: numeric_string(row, "Latitude"),
        longitude: numeric_string(row, "Longitude"),
        building_rentable_square_feet: numeric_string(row, "Building Rentable Square Feet"),
        available_square_feet: available_square_feet(row.number("Available Square Feet")),
        construction_date: row.text("Construction Date"),
        congressional_district: row.text("Congressional District"),
        congressional_district_representative: row
            .text("Congressional District Representative Name"),
        lease_number: None,
        lease_effective_date: None,
        lease_expiration_date: None,
        real_property_asset_type: row.text("Real Property Asset Type"),
        cleaned_building_name: row.cleaned_building_name.clone(),
        address_in_name: row.address_in_name,
    }
}
