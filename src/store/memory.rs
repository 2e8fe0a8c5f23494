//! In-memory store used to exercise the pipeline without a database

use crate::ingestion::types::{LeaseRecord, LeaseUpdate, OwnedRecord};
use crate::store::{LeaseAddress, PropertyStore, StoreError, Table};
use std::sync::Mutex;

/// Mutex-guarded vectors with sequential id assignment. Ids keep counting
/// across `delete_all`, matching SERIAL column semantics. Insert batch
/// sizes are recorded so tests can observe the batching discipline.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    owned: Vec<(i32, OwnedRecord)>,
    leases: Vec<(i32, LeaseRecord)>,
    next_owned_id: i32,
    next_lease_id: i32,
    insert_batches: Vec<(Table, usize)>,
    update_count: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preload a lease row, returning its assigned id.
    pub fn seed_lease(&self, record: LeaseRecord) -> i32 {
        let mut inner = self.inner.lock().expect("memory store poisoned");
        inner.next_lease_id += 1;
        let id = inner.next_lease_id;
        inner.leases.push((id, record));
        id
    }

    pub fn owned_rows(&self) -> Vec<OwnedRecord> {
        let inner = self.inner.lock().expect("memory store poisoned");
        inner.owned.iter().map(|(_, row)| row.clone()).collect()
    }

    pub fn lease_rows(&self) -> Vec<LeaseRecord> {
        let inner = self.inner.lock().expect("memory store poisoned");
        inner.leases.iter().map(|(_, row)| row.clone()).collect()
    }

    pub fn lease_rows_with_ids(&self) -> Vec<(i32, LeaseRecord)> {
        self.inner.lock().expect("memory store poisoned").leases.clone()
    }

    /// `(table, rows)` for every insert call, in call order.
    pub fn insert_batches(&self) -> Vec<(Table, usize)> {
        self.inner.lock().expect("memory store poisoned").insert_batches.clone()
    }

    pub fn update_count(&self) -> usize {
        self.inner.lock().expect("memory store poisoned").update_count
    }
}

#[async_trait::async_trait]
impl PropertyStore for MemoryStore {
    async fn count(&self, table: Table) -> Result<i64, StoreError> {
        let inner = self.inner.lock().expect("memory store poisoned");
        Ok(match table {
            Table::Owned => inner.owned.len() as i64,
            Table::Leases => inner.leases.len() as i64,
        })
    }

    async fn delete_all(&self, table: Table) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("memory store poisoned");
        match table {
            Table::Owned => inner.owned.clear(),
            Table::Leases => inner.leases.clear(),
        }
        Ok(())
    }

    async fn insert_owned(&self, rows: &[OwnedRecord]) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("memory store poisoned");
        inner.insert_batches.push((Table::Owned, rows.len()));
        for row in rows {
            inner.next_owned_id += 1;
            let id = inner.next_owned_id;
            inner.owned.push((id, row.clone()));
        }
        Ok(())
    }

    async fn insert_leases(&self, rows: &[LeaseRecord]) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("memory store poisoned");
        inner.insert_batches.push((Table::Leases, rows.len()));
        for row in rows {
            inner.next_lease_id += 1;
            let id = inner.next_lease_id;
            inner.leases.push((id, row.clone()));
        }
        Ok(())
    }

    async fn update_lease(&self, update: &LeaseUpdate) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("memory store poisoned");
        inner.update_count += 1;
        if let Some((_, row)) = inner.leases.iter_mut().find(|(id, _)| *id == update.id) {
            row.lease_number = update.lease_number.clone();
            row.lease_effective_date = update.lease_effective_date;
            row.lease_expiration_date = update.lease_expiration_date;
            row.federal_leased_code = update.federal_leased_code.clone();
        }
        Ok(())
    }

    async fn lease_addresses(&self) -> Result<Vec<LeaseAddress>, StoreError> {
        let inner = self.inner.lock().expect("memory store poisoned");
        Ok(inner
            .leases
            .iter()
            .map(|(id, row)| LeaseAddress {
                id: *id,
                street_address: row.street_address.clone(),
            })
            .collect())
    }
}
