//! PostgreSQL store backed by sqlx

use crate::ingestion::types::{LeaseRecord, LeaseUpdate, OwnedRecord};
use crate::store::{LeaseAddress, PropertyStore, StoreError, Table};
use sqlx::{PgPool, QueryBuilder};

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl PropertyStore for PgStore {
    async fn count(&self, table: Table) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar(match table {
            Table::Owned => "SELECT COUNT(*) FROM owned",
            Table::Leases => "SELECT COUNT(*) FROM leases",
        })
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn delete_all(&self, table: Table) -> Result<(), StoreError> {
        sqlx::query(match table {
            Table::Owned => "DELETE FROM owned",
            Table::Leases => "DELETE FROM leases",
        })
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn insert_owned(&self, rows: &[OwnedRecord]) -> Result<(), StoreError> {
        if rows.is_empty() {
            return Ok(());
        }

        let mut builder = QueryBuilder::new(
            "INSERT INTO owned (location_code, real_property_asset_name, installation_name, \
             owned_or_leased, gsa_region, street_address, city, state, zip_code, latitude, \
             longitude, building_rentable_square_feet, available_square_feet, construction_date, \
             congressional_district, congressional_district_representative_name, building_status, \
             real_property_asset_type, cleaned_building_name, address_in_name) ",
        );
        builder.push_values(rows, |mut b, row| {
            b.push_bind(&row.location_code)
                .push_bind(&row.real_property_asset_name)
                .push_bind(&row.installation_name)
                .push_bind(&row.owned_or_leased)
                .push_bind(&row.gsa_region)
                .push_bind(&row.street_address)
                .push_bind(&row.city)
                .push_bind(&row.state)
                .push_bind(&row.zip_code)
                .push_bind(&row.latitude)
                .push_bind(&row.longitude)
                .push_bind(&row.building_rentable_square_feet)
                .push_bind(row.available_square_feet)
                .push_bind(&row.construction_date)
                .push_bind(&row.congressional_district)
                .push_bind(&row.congressional_district_representative_name)
                .push_bind(&row.building_status)
                .push_bind(&row.real_property_asset_type)
                .push_bind(&row.cleaned_building_name)
                .push_bind(row.address_in_name);
        });
        builder.build().execute(&self.pool).await?;
        Ok(())
    }

    async fn insert_leases(&self, rows: &[LeaseRecord]) -> Result<(), StoreError> {
        if rows.is_empty() {
            return Ok(());
        }

        let mut builder = QueryBuilder::new(
            "INSERT INTO leases (location_code, real_property_asset_name, installation_name, \
             federal_leased_code, gsa_region, street_address, city, state, zip_code, latitude, \
             longitude, building_rentable_square_feet, available_square_feet, construction_date, \
             congressional_district, congressional_district_representative, lease_number, \
             lease_effective_date, lease_expiration_date, real_property_asset_type, \
             cleaned_building_name, address_in_name) ",
        );
        builder.push_values(rows, |mut b, row| {
            b.push_bind(&row.location_code)
                .push_bind(&row.real_property_asset_name)
                .push_bind(&row.installation_name)
                .push_bind(&row.federal_leased_code)
                .push_bind(&row.gsa_region)
                .push_bind(&row.street_address)
                .push_bind(&row.city)
                .push_bind(&row.state)
                .push_bind(&row.zip_code)
                .push_bind(&row.latitude)
                .push_bind(&row.longitude)
                .push_bind(&row.building_rentable_square_feet)
                .push_bind(row.available_square_feet)
                .push_bind(&row.construction_date)
                .push_bind(&row.congressional_district)
                .push_bind(&row.congressional_district_representative)
                .push_bind(&row.lease_number)
                .push_bind(row.lease_effective_date)
                .push_bind(row.lease_expiration_date)
                .push_bind(&row.real_property_asset_type)
                .push_bind(&row.cleaned_building_name)
                .push_bind(row.address_in_name);
        });
        builder.build().execute(&self.pool).await?;
        Ok(())
    }

    async fn update_lease(&self, update: &LeaseUpdate) -> Result<(), StoreError> {
        sqlx::query(
            "UPDATE leases SET lease_number = $1, lease_effective_date = $2, \
             lease_expiration_date = $3, federal_leased_code = $4 WHERE id = $5",
        )
        .bind(&update.lease_number)
        .bind(update.lease_effective_date)
        .bind(update.lease_expiration_date)
        .bind(&update.federal_leased_code)
        .bind(update.id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn lease_addresses(&self) -> Result<Vec<LeaseAddress>, StoreError> {
        let addresses =
            sqlx::query_as::<_, LeaseAddress>("SELECT id, street_address FROM leases")
                .fetch_all(&self.pool)
                .await?;
        Ok(addresses)
    }
}
