//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::created_markets;

/// Database row for a created market. Addresses and ids are `0x` hex,
/// timestamps RFC 3339.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = created_markets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CreatedMarketRow {
    pub id: String,
    pub amm_address: Option<String>,
    pub title: String,
    pub category: String,
    pub creator: String,
    pub created_at: String,
}
