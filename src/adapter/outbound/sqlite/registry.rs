//! SQLite-backed registry of markets created from this client.

use alloy_primitives::Address;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::database::connection::DbPool;
use super::database::model::CreatedMarketRow;
use super::database::schema::created_markets;
use crate::domain::id::MarketId;
use crate::error::{Error, Result};
use crate::port::outbound::registry::{CreatedMarket, MarketRegistry};

pub struct SqliteMarketRegistry {
    pool: DbPool,
}

impl SqliteMarketRegistry {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn to_row(market: &CreatedMarket) -> CreatedMarketRow {
        CreatedMarketRow {
            id: market.id.to_string(),
            amm_address: market.amm_address.map(|a| a.to_string()),
            title: market.title.clone(),
            category: market.category.clone(),
            creator: market.creator.to_string(),
            created_at: market.created_at.to_rfc3339(),
        }
    }

    fn from_row(row: CreatedMarketRow) -> Result<CreatedMarket> {
        let parse_address =
            |s: &str| s.parse::<Address>().map_err(|e| Error::Parse(format!("{s}: {e}")));

        Ok(CreatedMarket {
            id: row.id.parse()?,
            amm_address: row.amm_address.as_deref().map(parse_address).transpose()?,
            title: row.title,
            category: row.category,
            creator: parse_address(&row.creator)?,
            created_at: DateTime::parse_from_rfc3339(&row.created_at)
                .map_err(|e| Error::Parse(e.to_string()))?
                .with_timezone(&Utc),
        })
    }
}

impl MarketRegistry for SqliteMarketRegistry {
    fn record(&self, market: &CreatedMarket) -> Result<()> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        diesel::replace_into(created_markets::table)
            .values(&Self::to_row(market))
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(())
    }

    fn list(&self) -> Result<Vec<CreatedMarket>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let rows: Vec<CreatedMarketRow> = created_markets::table
            .order((created_markets::created_at.desc(), created_markets::id.asc()))
            .select(CreatedMarketRow::as_select())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(Self::from_row).collect()
    }

    fn get(&self, id: &MarketId) -> Result<Option<CreatedMarket>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let row: Option<CreatedMarketRow> = created_markets::table
            .filter(created_markets::id.eq(id.to_string()))
            .select(CreatedMarketRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;

        row.map(Self::from_row).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::sqlite::database::connection::{create_pool, run_migrations};
    use alloy_primitives::B256;
    use chrono::TimeZone;

    fn registry() -> (SqliteMarketRegistry, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let url = dir.path().join("registry.db");
        let pool = create_pool(url.to_str().unwrap()).unwrap();
        run_migrations(&pool).unwrap();
        (SqliteMarketRegistry::new(pool), dir)
    }

    fn market(byte: u8, day: u32) -> CreatedMarket {
        CreatedMarket {
            id: MarketId::new(B256::repeat_byte(byte)),
            amm_address: Some(Address::repeat_byte(byte)),
            title: format!("Market {byte}"),
            category: "Sports".into(),
            creator: Address::repeat_byte(0xcc),
            created_at: Utc.with_ymd_and_hms(2025, 1, day, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn list_is_newest_first() {
        let (registry, _dir) = registry();
        registry.record(&market(1, 1)).unwrap();
        registry.record(&market(2, 3)).unwrap();
        registry.record(&market(3, 2)).unwrap();

        let titles: Vec<String> = registry.list().unwrap().into_iter().map(|m| m.title).collect();
        assert_eq!(titles, ["Market 2", "Market 3", "Market 1"]);
    }

    #[test]
    fn record_replaces_existing_id() {
        let (registry, _dir) = registry();
        let mut first = market(7, 1);
        first.amm_address = None;
        registry.record(&first).unwrap();

        let updated = market(7, 1);
        registry.record(&updated).unwrap();

        assert_eq!(registry.list().unwrap().len(), 1);
        assert_eq!(registry.get(&updated.id).unwrap(), Some(updated));
    }

    #[test]
    fn get_unknown_is_none() {
        let (registry, _dir) = registry();
        let id = MarketId::new(B256::repeat_byte(9));
        assert!(registry.get(&id).unwrap().is_none());
    }
}
