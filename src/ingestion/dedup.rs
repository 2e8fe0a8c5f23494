//! Lease reconciliation - route incoming rows to insert or update
//!
//! Street address is the only key that survives across imports, so it is
//! the merge key, compared exactly as stored. Near-duplicate addresses
//! ("100 Main St" vs "100 MAIN ST") therefore become distinct leases; that
//! is accepted behavior, not something to normalize away here.

use crate::ingestion::types::{LeaseRecord, LeaseUpdate};
use crate::store::LeaseAddress;
use std::collections::HashMap;

/// The default merge key: the stored address string, byte for byte.
pub fn exact_address_key(address: &str) -> String {
    address.to_string()
}

/// Incoming lease rows split by whether they matched a stored lease.
#[derive(Debug, Default)]
pub struct Reconciliation {
    pub inserts: Vec<LeaseRecord>,
    pub updates: Vec<LeaseUpdate>,
}

/// Build an address index over the stored `(id, street_address)` pairs and
/// classify each incoming record. A hit becomes a `LeaseUpdate` carrying
/// only the lease terms plus the matched id; a miss keeps the full record.
/// Records without a street address never match and always insert.
///
/// The key extractor is applied to both sides, so a normalizing key can be
/// swapped in without touching the merge logic. When two stored leases
/// share a key the later id wins, matching a single-pass index build.
pub fn reconcile_leases<K>(
    existing: &[LeaseAddress],
    incoming: Vec<LeaseRecord>,
    key: K,
) -> Reconciliation
where
    K: Fn(&str) -> String,
{
    let mut index: HashMap<String, i32> = HashMap::new();
    for lease in existing {
        if let Some(address) = &lease.street_address {
            index.insert(key(address), lease.id);
        }
    }

    let mut reconciliation = Reconciliation::default();
    for record in incoming {
        let matched = record
            .street_address
            .as_deref()
            .and_then(|address| index.get(&key(address)).copied());

        match matched {
            Some(id) => reconciliation.updates.push(LeaseUpdate {
                id,
                lease_number: record.lease_number,
                lease_effective_date: record.lease_effective_date,
                lease_expiration_date: record.lease_expiration_date,
                federal_leased_code: record.federal_leased_code,
            }),
            None => reconciliation.inserts.push(record),
        }
    }

    reconciliation
}
