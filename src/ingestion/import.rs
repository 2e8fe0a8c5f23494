//! Import phases - the buildings file replaces, the leases file merges

use crate::ingestion::cleanse::process_row;
use crate::ingestion::dedup::{exact_address_key, reconcile_leases};
use crate::ingestion::map::{map_lease, map_owned, owned_to_lease};
use crate::ingestion::types::{EnrichedRow, ImportStats, LeaseRecord, OwnedRecord, RawRow};
use crate::ingestion::write::{merge_lease_records, replace_property_tables, ImportError};
use crate::store::PropertyStore;
use tracing::info;

/// Ownership flag column in the buildings file.
const OWNERSHIP_COLUMN: &str = "Owned or Leased";
/// Federally owned (fee) assets.
const OWNED_FLAG: &str = "F";
/// Assets the buildings file itself marks as leased.
const LEASED_FLAG: &str = "L";

fn has_flag(row: &EnrichedRow, flag: &str) -> bool {
    row.text(OWNERSHIP_COLUMN).as_deref() == Some(flag)
}

/// Buildings phase: full replace of both tables from one workbook. "F"
/// rows land in `owned`; "L" rows are reshaped into `leases`.
pub async fn import_buildings(
    store: &dyn PropertyStore,
    rows: Vec<RawRow>,
) -> Result<ImportStats, ImportError> {
    let processed: Vec<EnrichedRow> = rows.into_iter().map(process_row).collect();

    let owned: Vec<OwnedRecord> = processed
        .iter()
        .filter(|row| has_flag(row, OWNED_FLAG))
        .map(map_owned)
        .collect();
    let leased: Vec<LeaseRecord> = processed
        .iter()
        .filter(|row| has_flag(row, LEASED_FLAG))
        .map(owned_to_lease)
        .collect();

    info!(
        "Buildings file: {} owned, {} leased of {} rows",
        owned.len(),
        leased.len(),
        processed.len()
    );

    replace_property_tables(store, &owned, &leased).await?;

    Ok(ImportStats {
        owned_inserted: owned.len(),
        leases_inserted: leased.len(),
        leases_updated: 0,
    })
}

/// Leases phase: reconcile the workbook against stored leases by street
/// address, refresh the matches, insert the rest.
pub async fn import_leases(
    store: &dyn PropertyStore,
    rows: Vec<RawRow>,
) -> Result<ImportStats, ImportError> {
    let processed: Vec<EnrichedRow> = rows.into_iter().map(process_row).collect();
    let mapped: Vec<LeaseRecord> = processed.iter().map(map_lease).collect();

    let existing = store.lease_addresses().await?;
    let reconciliation = reconcile_leases(&existing, mapped, exact_address_key);

    info!(
        "Leases file: {} new, {} matched for update",
        reconciliation.inserts.len(),
        reconciliation.updates.len()
    );

    merge_lease_records(store, &reconciliation).await?;

    Ok(ImportStats {
        owned_inserted: 0,
        leases_inserted: reconciliation.inserts.len(),
        leases_updated: reconciliation.updates.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingestion::types::CellValue;
    use crate::store::MemoryStore;
    use chrono::NaiveDate;

    fn building_row(location: &str, flag: &str, address: &str) -> RawRow {
        [
            ("Location Code", CellValue::Text(location.into())),
            ("Real Property Asset Name", CellValue::Text("FEDERAL BUILDING".into())),
            ("Owned or Leased", CellValue::Text(flag.into())),
            ("Street Address", CellValue::Text(address.into())),
            ("City", CellValue::Text("Washington".into())),
        ]
        .into_iter()
        .collect()
    }

    fn lease_row(address: &str, lease_number: &str, effective: f64) -> RawRow {
        [
            ("Real Property Asset Name", CellValue::Text("LEASED OFFICE".into())),
            ("Street Address", CellValue::Text(address.into())),
            ("Lease Number", CellValue::Text(lease_number.into())),
            ("Lease Effective Date", CellValue::Number(effective)),
            ("Federal Leased Code", CellValue::Text("LS".into())),
        ]
        .into_iter()
        .collect()
    }

    #[tokio::test]
    async fn test_buildings_phase_splits_by_ownership_flag() {
        let store = MemoryStore::new();
        let rows = vec![
            building_row("A", "F", "1 FIRST ST"),
            building_row("B", "L", "2 SECOND ST"),
            building_row("C", "F", "3 THIRD ST"),
            // no flag at all: dropped from both tables
            building_row("D", "", "4 FOURTH ST"),
        ];

        let stats = import_buildings(&store, rows).await.unwrap();

        assert_eq!(stats.owned_inserted, 2);
        assert_eq!(stats.leases_inserted, 1);
        assert_eq!(store.owned_rows().len(), 2);

        let leases = store.lease_rows();
        assert_eq!(leases.len(), 1);
        assert_eq!(leases[0].street_address.as_deref(), Some("2 SECOND ST"));
        assert_eq!(leases[0].lease_number, None);
    }

    #[tokio::test]
    async fn test_buildings_phase_is_idempotent() {
        let store = MemoryStore::new();
        let rows = vec![
            building_row("A", "F", "1 FIRST ST"),
            building_row("B", "L", "2 SECOND ST"),
        ];

        import_buildings(&store, rows.clone()).await.unwrap();
        let owned_first = store.owned_rows();
        let leases_first = store.lease_rows();

        import_buildings(&store, rows).await.unwrap();

        assert_eq!(store.owned_rows(), owned_first);
        assert_eq!(store.lease_rows(), leases_first);
    }

    #[tokio::test]
    async fn test_leases_phase_updates_matches_and_inserts_the_rest() {
        let store = MemoryStore::new();

        // the buildings phase left one leased row behind
        import_buildings(&store, vec![building_row("B", "L", "100 MAIN ST")])
            .await
            .unwrap();
        let seeded = store.lease_rows_with_ids();
        let seeded_id = seeded[0].0;

        let stats = import_leases(
            &store,
            vec![
                lease_row("100 MAIN ST", "LDC001", 44927.0),
                lease_row("200 ELM AVE", "LDC002", 45292.0),
            ],
        )
        .await
        .unwrap();

        assert_eq!(stats.leases_updated, 1);
        assert_eq!(stats.leases_inserted, 1);

        let rows = store.lease_rows_with_ids();
        assert_eq!(rows.len(), 2);

        let updated = rows.iter().find(|(id, _)| *id == seeded_id).unwrap();
        assert_eq!(updated.1.lease_number.as_deref(), Some("LDC001"));
        assert_eq!(
            updated.1.lease_effective_date,
            NaiveDate::from_ymd_opt(2023, 1, 1)
        );
        // the matched row keeps its original name block
        assert_eq!(
            updated.1.real_property_asset_name.as_deref(),
            Some("FEDERAL BUILDING")
        );

        let inserted = rows.iter().find(|(id, _)| *id != seeded_id).unwrap();
        assert_eq!(inserted.1.street_address.as_deref(), Some("200 ELM AVE"));
        assert_eq!(inserted.1.lease_number.as_deref(), Some("LDC002"));
    }

    #[tokio::test]
    async fn test_full_run_buildings_then_leases() {
        let store = MemoryStore::new();

        import_buildings(
            &store,
            vec![
                building_row("A", "F", "1 FIRST ST"),
                building_row("B", "L", "100 MAIN ST"),
            ],
        )
        .await
        .unwrap();

        import_leases(&store, vec![lease_row("100 MAIN ST", "LDC001", 44927.0)])
            .await
            .unwrap();

        assert_eq!(store.owned_rows().len(), 1);
        let leases = store.lease_rows();
        assert_eq!(leases.len(), 1);
        assert_eq!(leases[0].lease_number.as_deref(), Some("LDC001"));
    }
}
