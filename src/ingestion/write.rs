//! Batch writers - destructive replace and keyed merge against the store

use crate::ingestion::dedup::Reconciliation;
use crate::ingestion::types::{LeaseRecord, OwnedRecord};
use crate::store::{PropertyStore, StoreError, Table};
use futures::future::try_join_all;
use thiserror::Error;
use tracing::info;

/// Rows per multi-row INSERT statement.
pub const INSERT_BATCH_SIZE: usize = 500;

/// UPDATEs allowed in flight at once; the next batch starts only after the
/// whole batch has settled.
pub const UPDATE_BATCH_SIZE: usize = 100;

#[derive(Debug, Error)]
pub enum ImportError {
    /// The post-delete verification found rows left behind. Nothing may be
    /// inserted on top of a partially cleared table.
    #[error("tables not cleared before reload (owned: {owned}, leases: {leases})")]
    IntegrityCheck { owned: i64, leases: i64 },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Empty both tables, verify both are empty, then insert the owned rows
/// and the leased-from-buildings rows batch by batch.
pub async fn replace_property_tables(
    store: &dyn PropertyStore,
    owned: &[OwnedRecord],
    leased: &[LeaseRecord],
) -> Result<(), ImportError> {
    store.delete_all(Table::Owned).await?;
    store.delete_all(Table::Leases).await?;

    let owned_left = store.count(Table::Owned).await?;
    let leases_left = store.count(Table::Leases).await?;
    if owned_left > 0 || leases_left > 0 {
        return Err(ImportError::IntegrityCheck {
            owned: owned_left,
            leases: leases_left,
        });
    }
    info!("Cleared owned and leases tables");

    for batch in owned.chunks(INSERT_BATCH_SIZE) {
        store.insert_owned(batch).await?;
    }
    for batch in leased.chunks(INSERT_BATCH_SIZE) {
        store.insert_leases(batch).await?;
    }

    Ok(())
}

/// Apply a reconciliation: matched rows first, in concurrent update
/// batches, then the new rows in sequential insert batches.
pub async fn merge_lease_records(
    store: &dyn PropertyStore,
    reconciliation: &Reconciliation,
) -> Result<(), ImportError> {
    for batch in reconciliation.updates.chunks(UPDATE_BATCH_SIZE) {
        try_join_all(batch.iter().map(|update| store.update_lease(update))).await?;
    }

    for batch in reconciliation.inserts.chunks(INSERT_BATCH_SIZE) {
        store.insert_leases(batch).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingestion::types::LeaseUpdate;
    use crate::store::{LeaseAddress, MemoryStore};
    use std::sync::atomic::{AtomicBool, Ordering};

    fn owned_rows(n: usize) -> Vec<OwnedRecord> {
        (0..n)
            .map(|i| OwnedRecord {
                location_code: Some(format!("LOC{i:04}")),
                ..OwnedRecord::default()
            })
            .collect()
    }

    fn lease_rows(n: usize) -> Vec<LeaseRecord> {
        (0..n)
            .map(|i| LeaseRecord {
                street_address: Some(format!("{i} MAIN ST")),
                ..LeaseRecord::default()
            })
            .collect()
    }

    #[tokio::test]
    async fn test_insert_batch_boundaries() {
        let store = MemoryStore::new();
        let reconciliation = Reconciliation {
            inserts: lease_rows(501),
            updates: Vec::new(),
        };

        merge_lease_records(&store, &reconciliation).await.unwrap();

        assert_eq!(
            store.insert_batches(),
            vec![(Table::Leases, 500), (Table::Leases, 1)]
        );
        assert_eq!(store.lease_rows().len(), 501);
    }

    #[tokio::test]
    async fn test_update_batches_all_settle() {
        let store = MemoryStore::new();
        let ids: Vec<i32> = lease_rows(150)
            .into_iter()
            .map(|row| store.seed_lease(row))
            .collect();

        let reconciliation = Reconciliation {
            inserts: Vec::new(),
            updates: ids
                .iter()
                .map(|&id| LeaseUpdate {
                    id,
                    lease_number: Some(format!("LDC{id:04}")),
                    lease_effective_date: None,
                    lease_expiration_date: None,
                    federal_leased_code: None,
                })
                .collect(),
        };

        merge_lease_records(&store, &reconciliation).await.unwrap();

        // 150 matched rows -> two batches (100 + 50), every update applied
        assert_eq!(store.update_count(), 150);
        assert!(store
            .lease_rows()
            .iter()
            .all(|row| row.lease_number.is_some()));
    }

    #[tokio::test]
    async fn test_replace_inserts_in_fixed_batches() {
        let store = MemoryStore::new();
        let owned = owned_rows(1001);
        let leased = lease_rows(2);

        replace_property_tables(&store, &owned, &leased).await.unwrap();

        assert_eq!(
            store.insert_batches(),
            vec![
                (Table::Owned, 500),
                (Table::Owned, 500),
                (Table::Owned, 1),
                (Table::Leases, 2),
            ]
        );
    }

    /// A store whose deletes silently leave rows behind.
    struct StuckStore {
        inserted: AtomicBool,
    }

    #[async_trait::async_trait]
    impl PropertyStore for StuckStore {
        async fn count(&self, _table: Table) -> Result<i64, StoreError> {
            Ok(3)
        }
        async fn delete_all(&self, _table: Table) -> Result<(), StoreError> {
            Ok(())
        }
        async fn insert_owned(&self, _rows: &[OwnedRecord]) -> Result<(), StoreError> {
            self.inserted.store(true, Ordering::SeqCst);
            Ok(())
        }
        async fn insert_leases(&self, _rows: &[LeaseRecord]) -> Result<(), StoreError> {
            self.inserted.store(true, Ordering::SeqCst);
            Ok(())
        }
        async fn update_lease(&self, _update: &LeaseUpdate) -> Result<(), StoreError> {
            Ok(())
        }
        async fn lease_addresses(&self) -> Result<Vec<LeaseAddress>, StoreError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_integrity_gate_blocks_all_inserts() {
        let store = StuckStore {
            inserted: AtomicBool::new(false),
        };

        let result = replace_property_tables(&store, &owned_rows(5), &lease_rows(5)).await;

        assert!(matches!(
            result,
            Err(ImportError::IntegrityCheck { owned: 3, leases: 3 })
        ));
        assert!(!store.inserted.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_empty_inputs_write_nothing() {
        let store = MemoryStore::new();
        replace_property_tables(&store, &[], &[]).await.unwrap();
        merge_lease_records(
            &store,
            &Reconciliation {
                inserts: Vec::new(),
                updates: Vec::new(),
            },
        )
        .await
        .unwrap();

        assert!(store.insert_batches().is_empty());
        assert_eq!(store.update_count(), 0);
    }
}
