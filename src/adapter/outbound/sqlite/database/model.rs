//! Database model types for Diesel ORM.
//!
//! Money columns are stored as text so decimal values survive untouched;
//! timestamps are RFC 3339 strings.

use diesel::prelude::*;

use super::schema::{agents, announcements, cash_offers, sales, teams};

/// Database row for a team.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = teams)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TeamRow {
    pub id: String,
    pub name: String,
    pub color: String,
    pub monthly_volume_target: String,
    pub monthly_unit_target: i64,
    pub created_at: String,
}

/// Database row for an agent.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = agents)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AgentRow {
    pub id: String,
    pub name: String,
    pub team_id: Option<String>,
    pub current_volume: String,
    pub current_units: i64,
    pub created_at: String,
}

/// Database row for a sale.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = sales)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SaleRow {
    pub id: String,
    pub agent_id: String,
    pub amount: String,
    pub units: i64,
    pub created_at: String,
}

/// Database row for an announcement.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = announcements)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AnnouncementRow {
    pub id: String,
    pub title: String,
    pub body: String,
    pub active: i32,
    pub created_at: String,
}

/// Database row for a cash offer.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = cash_offers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CashOfferRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub amount: String,
    pub active: i32,
    pub created_at: String,
}
