//! Storage layer - the narrow persistence interface the pipeline writes
//! through, plus its PostgreSQL and in-memory implementations.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::ingestion::types::{LeaseRecord, LeaseUpdate, OwnedRecord};
use thiserror::Error;

/// The two tables owned by the import pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Owned,
    Leases,
}

impl Table {
    pub fn name(&self) -> &'static str {
        match self {
            Table::Owned => "owned",
            Table::Leases => "leases",
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// `(id, street_address)` projection of the `leases` table, the only read
/// the pipeline performs.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct LeaseAddress {
    pub id: i32,
    pub street_address: Option<String>,
}

/// The persistence operations the import pipeline needs, and nothing else.
/// Keeping this seam narrow lets the pipeline run against an in-memory
/// store in tests.
#[async_trait::async_trait]
pub trait PropertyStore: Send + Sync {
    async fn count(&self, table: Table) -> Result<i64, StoreError>;

    async fn delete_all(&self, table: Table) -> Result<(), StoreError>;

    /// Insert a batch of owned rows as one statement.
    async fn insert_owned(&self, rows: &[OwnedRecord]) -> Result<(), StoreError>;

    /// Insert a batch of lease rows as one statement.
    async fn insert_leases(&self, rows: &[LeaseRecord]) -> Result<(), StoreError>;

    /// Refresh the lease terms of one stored lease by id.
    async fn update_lease(&self, update: &LeaseUpdate) -> Result<(), StoreError>;

    /// Every stored lease's id and street address, for the dedup index.
    async fn lease_addresses(&self) -> Result<Vec<LeaseAddress>, StoreError>;
}
