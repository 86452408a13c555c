//! SQLite store implementation.
//!
//! Persists teams, agents, sales, announcements and cash offers with Diesel. Sale writes
//! run in a transaction together with the owning agent's counter update.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::SqliteConnection;
use rust_decimal::Decimal;

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::{
    AgentRow, AnnouncementRow, CashOfferRow, SaleRow, TeamRow,
};
use crate::adapter::outbound::sqlite::database::schema::{
    agents, announcements, cash_offers, sales, teams,
};
use crate::domain::money::parse_lenient;
use crate::domain::{
    Agent, AgentId, Announcement, AnnouncementId, CashOffer, CashOfferId, DomainError, Sale,
    SaleId, Team, TeamId,
};
use crate::error::{Error, Result};
use crate::port::{AgentStore, AnnouncementStore, CashOfferStore, SaleStore, TeamStore};

/// SQLite-backed store for every leaderboard entity.
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(
        &self,
    ) -> Result<diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<SqliteConnection>>>
    {
        self.pool.get().map_err(|e| Error::Connection(e.to_string()))
    }
}

fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::Parse(format!("timestamp {raw:?}: {e}")))
}

fn team_to_row(team: &Team) -> TeamRow {
    TeamRow {
        id: team.id.to_string(),
        name: team.name.clone(),
        color: team.color.clone(),
        monthly_volume_target: team.monthly_volume_target.to_string(),
        monthly_unit_target: team.monthly_unit_target,
        created_at: timestamp(&team.created_at),
    }
}

fn team_from_row(row: TeamRow) -> Result<Team> {
    Ok(Team {
        id: TeamId::from(row.id),
        name: row.name,
        color: row.color,
        monthly_volume_target: parse_lenient(&row.monthly_volume_target),
        monthly_unit_target: row.monthly_unit_target,
        created_at: parse_timestamp(&row.created_at)?,
    })
}

fn agent_to_row(agent: &Agent) -> AgentRow {
    AgentRow {
        id: agent.id.to_string(),
        name: agent.name.clone(),
        team_id: agent.team_id.as_ref().map(ToString::to_string),
        current_volume: agent.current_volume.to_string(),
        current_units: agent.current_units,
        created_at: timestamp(&agent.created_at),
    }
}

fn agent_from_row(row: AgentRow) -> Result<Agent> {
    Ok(Agent {
        id: AgentId::from(row.id),
        name: row.name,
        team_id: row.team_id.map(TeamId::from),
        current_volume: parse_lenient(&row.current_volume),
        current_units: row.current_units,
        created_at: parse_timestamp(&row.created_at)?,
    })
}

fn sale_to_row(sale: &Sale) -> SaleRow {
    SaleRow {
        id: sale.id.to_string(),
        agent_id: sale.agent_id.to_string(),
        amount: sale.amount.to_string(),
        units: sale.units,
        created_at: timestamp(&sale.created_at),
    }
}

fn sale_from_row(row: SaleRow) -> Result<Sale> {
    Ok(Sale {
        id: SaleId::from(row.id),
        agent_id: AgentId::from(row.agent_id),
        amount: parse_lenient(&row.amount),
        units: row.units,
        created_at: parse_timestamp(&row.created_at)?,
    })
}

fn announcement_to_row(announcement: &Announcement) -> AnnouncementRow {
    AnnouncementRow {
        id: announcement.id.to_string(),
        title: announcement.title.clone(),
        body: announcement.body.clone(),
        active: i32::from(announcement.active),
        created_at: timestamp(&announcement.created_at),
    }
}

fn announcement_from_row(row: AnnouncementRow) -> Result<Announcement> {
    Ok(Announcement {
        id: AnnouncementId::from(row.id),
        title: row.title,
        body: row.body,
        active: row.active != 0,
        created_at: parse_timestamp(&row.created_at)?,
    })
}

fn cash_offer_to_row(offer: &CashOffer) -> CashOfferRow {
    CashOfferRow {
        id: offer.id.to_string(),
        title: offer.title.clone(),
        description: offer.description.clone(),
        amount: offer.amount.to_string(),
        active: i32::from(offer.active),
        created_at: timestamp(&offer.created_at),
    }
}

fn cash_offer_from_row(row: CashOfferRow) -> Result<CashOffer> {
    Ok(CashOffer {
        id: CashOfferId::from(row.id),
        title: row.title,
        description: row.description,
        amount: parse_lenient(&row.amount),
        active: row.active != 0,
        created_at: parse_timestamp(&row.created_at)?,
    })
}

/// Add `volume` and `units` to an agent's counters inside the caller's
/// transaction. Returns `false` when the agent does not exist, and an error
/// when either counter would overflow, which rolls the transaction back.
fn adjust_counters(
    conn: &mut SqliteConnection,
    agent_id: &str,
    volume: Decimal,
    units: i64,
) -> Result<bool> {
    let current: Option<(String, i64)> = agents::table
        .find(agent_id)
        .select((agents::current_volume, agents::current_units))
        .first(conn)
        .optional()?;

    let Some((raw_volume, current_units)) = current else {
        return Ok(false);
    };

    let overflow = || -> Error {
        DomainError::CounterOverflow {
            agent_id: agent_id.to_string(),
        }
        .into()
    };
    let next_volume = parse_lenient(&raw_volume)
        .checked_add(volume)
        .ok_or_else(overflow)?;
    let next_units = current_units.checked_add(units).ok_or_else(overflow)?;

    diesel::update(agents::table.find(agent_id))
        .set((
            agents::current_volume.eq(next_volume.to_string()),
            agents::current_units.eq(next_units),
        ))
        .execute(conn)?;
    Ok(true)
}

#[async_trait]
impl TeamStore for SqliteStore {
    async fn insert_team(&self, team: &Team) -> Result<()> {
        let mut conn = self.conn()?;
        diesel::insert_into(teams::table)
            .values(&team_to_row(team))
            .execute(&mut conn)?;
        Ok(())
    }

    async fn update_team(&self, team: &Team) -> Result<bool> {
        let mut conn = self.conn()?;
        let row = team_to_row(team);
        let updated = diesel::update(teams::table.find(row.id.as_str()))
            .set((
                teams::name.eq(&row.name),
                teams::color.eq(&row.color),
                teams::monthly_volume_target.eq(&row.monthly_volume_target),
                teams::monthly_unit_target.eq(row.monthly_unit_target),
            ))
            .execute(&mut conn)?;
        Ok(updated > 0)
    }

    /// A team still referenced by agents fails the foreign key and is
    /// reported as [`DomainError::TeamInUse`].
    async fn delete_team(&self, id: &TeamId) -> Result<bool> {
        let mut conn = self.conn()?;
        match diesel::delete(teams::table.find(id.as_str())).execute(&mut conn) {
            Ok(deleted) => Ok(deleted > 0),
            Err(DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)) => {
                let agents: i64 = agents::table
                    .filter(agents::team_id.eq(id.as_str()))
                    .count()
                    .get_result(&mut conn)?;
                Err(DomainError::TeamInUse {
                    team_id: id.to_string(),
                    agents: usize::try_from(agents).unwrap_or(0),
                }
                .into())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn get_team(&self, id: &TeamId) -> Result<Option<Team>> {
        let mut conn = self.conn()?;
        let row: Option<TeamRow> = teams::table
            .find(id.as_str())
            .select(TeamRow::as_select())
            .first(&mut conn)
            .optional()?;
        row.map(team_from_row).transpose()
    }

    async fn list_teams(&self) -> Result<Vec<Team>> {
        let mut conn = self.conn()?;
        let rows: Vec<TeamRow> = teams::table
            .order(teams::name.asc())
            .select(TeamRow::as_select())
            .load(&mut conn)?;
        rows.into_iter().map(team_from_row).collect()
    }
}

#[async_trait]
impl AgentStore for SqliteStore {
    async fn insert_agent(&self, agent: &Agent) -> Result<()> {
        let mut conn = self.conn()?;
        diesel::insert_into(agents::table)
            .values(&agent_to_row(agent))
            .execute(&mut conn)?;
        Ok(())
    }

    async fn update_agent(&self, agent: &Agent) -> Result<bool> {
        let mut conn = self.conn()?;
        let updated = diesel::update(agents::table.find(agent.id.as_str()))
            .set((
                agents::name.eq(&agent.name),
                agents::team_id.eq(agent.team_id.as_ref().map(TeamId::as_str)),
            ))
            .execute(&mut conn)?;
        Ok(updated > 0)
    }

    async fn delete_agent(&self, id: &AgentId) -> Result<bool> {
        let mut conn = self.conn()?;
        conn.transaction::<_, Error, _>(|conn| {
            diesel::delete(sales::table.filter(sales::agent_id.eq(id.as_str()))).execute(conn)?;
            let deleted = diesel::delete(agents::table.find(id.as_str())).execute(conn)?;
            Ok(deleted > 0)
        })
    }

    async fn get_agent(&self, id: &AgentId) -> Result<Option<Agent>> {
        let mut conn = self.conn()?;
        let row: Option<AgentRow> = agents::table
            .find(id.as_str())
            .select(AgentRow::as_select())
            .first(&mut conn)
            .optional()?;
        row.map(agent_from_row).transpose()
    }

    async fn list_agents(&self) -> Result<Vec<Agent>> {
        let mut conn = self.conn()?;
        let rows: Vec<AgentRow> = agents::table
            .order(agents::name.asc())
            .select(AgentRow::as_select())
            .load(&mut conn)?;
        rows.into_iter().map(agent_from_row).collect()
    }

    async fn count_agents_in_team(&self, team_id: &TeamId) -> Result<usize> {
        let mut conn = self.conn()?;
        let count: i64 = agents::table
            .filter(agents::team_id.eq(team_id.as_str()))
            .count()
            .get_result(&mut conn)?;
        usize::try_from(count).map_err(|e| Error::Database(e.to_string()))
    }
}

#[async_trait]
impl SaleStore for SqliteStore {
    async fn insert_sale(&self, sale: &Sale) -> Result<()> {
        let mut conn = self.conn()?;
        let row = sale_to_row(sale);
        conn.transaction::<_, Error, _>(|conn| {
            if !adjust_counters(conn, &row.agent_id, sale.amount, sale.units)? {
                return Err(Error::not_found("agent", &sale.agent_id));
            }
            diesel::insert_into(sales::table).values(&row).execute(conn)?;
            Ok(())
        })
    }

    async fn delete_sale(&self, id: &SaleId) -> Result<Option<Sale>> {
        let mut conn = self.conn()?;
        conn.transaction::<_, Error, _>(|conn| {
            let row: Option<SaleRow> = sales::table
                .find(id.as_str())
                .select(SaleRow::as_select())
                .first(conn)
                .optional()?;
            let Some(row) = row else {
                return Ok(None);
            };
            let sale = sale_from_row(row)?;
            adjust_counters(conn, sale.agent_id.as_str(), -sale.amount, -sale.units)?;
            diesel::delete(sales::table.find(id.as_str())).execute(conn)?;
            Ok(Some(sale))
        })
    }

    async fn list_sales(&self, agent_id: Option<&AgentId>, limit: usize) -> Result<Vec<Sale>> {
        let mut conn = self.conn()?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut query = sales::table
            .select(SaleRow::as_select())
            .order(sales::created_at.desc())
            .limit(limit)
            .into_boxed();
        if let Some(agent_id) = agent_id {
            query = query.filter(sales::agent_id.eq(agent_id.as_str().to_owned()));
        }
        let rows: Vec<SaleRow> = query.load(&mut conn)?;
        rows.into_iter().map(sale_from_row).collect()
    }
}

#[async_trait]
impl AnnouncementStore for SqliteStore {
    async fn insert_announcement(&self, announcement: &Announcement) -> Result<()> {
        let mut conn = self.conn()?;
        diesel::insert_into(announcements::table)
            .values(&announcement_to_row(announcement))
            .execute(&mut conn)?;
        Ok(())
    }

    async fn update_announcement(&self, announcement: &Announcement) -> Result<bool> {
        let mut conn = self.conn()?;
        let row = announcement_to_row(announcement);
        let updated = diesel::update(announcements::table.find(row.id.as_str()))
            .set((
                announcements::title.eq(&row.title),
                announcements::body.eq(&row.body),
                announcements::active.eq(row.active),
            ))
            .execute(&mut conn)?;
        Ok(updated > 0)
    }

    async fn delete_announcement(&self, id: &AnnouncementId) -> Result<bool> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(announcements::table.find(id.as_str())).execute(&mut conn)?;
        Ok(deleted > 0)
    }

    async fn get_announcement(&self, id: &AnnouncementId) -> Result<Option<Announcement>> {
        let mut conn = self.conn()?;
        let row: Option<AnnouncementRow> = announcements::table
            .find(id.as_str())
            .select(AnnouncementRow::as_select())
            .first(&mut conn)
            .optional()?;
        row.map(announcement_from_row).transpose()
    }

    async fn list_announcements(&self, active_only: bool) -> Result<Vec<Announcement>> {
        let mut conn = self.conn()?;
        let mut query = announcements::table
            .select(AnnouncementRow::as_select())
            .order(announcements::created_at.desc())
            .into_boxed();
        if active_only {
            query = query.filter(announcements::active.ne(0));
        }
        let rows: Vec<AnnouncementRow> = query.load(&mut conn)?;
        rows.into_iter().map(announcement_from_row).collect()
    }
}

#[async_trait]
impl CashOfferStore for SqliteStore {
    async fn insert_cash_offer(&self, offer: &CashOffer) -> Result<()> {
        let mut conn = self.conn()?;
        diesel::insert_into(cash_offers::table)
            .values(&cash_offer_to_row(offer))
            .execute(&mut conn)?;
        Ok(())
    }

    async fn update_cash_offer(&self, offer: &CashOffer) -> Result<bool> {
        let mut conn = self.conn()?;
        let row = cash_offer_to_row(offer);
        let updated = diesel::update(cash_offers::table.find(row.id.as_str()))
            .set((
                cash_offers::title.eq(&row.title),
                cash_offers::description.eq(&row.description),
                cash_offers::amount.eq(&row.amount),
                cash_offers::active.eq(row.active),
            ))
            .execute(&mut conn)?;
        Ok(updated > 0)
    }

    async fn delete_cash_offer(&self, id: &CashOfferId) -> Result<bool> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(cash_offers::table.find(id.as_str())).execute(&mut conn)?;
        Ok(deleted > 0)
    }

    async fn get_cash_offer(&self, id: &CashOfferId) -> Result<Option<CashOffer>> {
        let mut conn = self.conn()?;
        let row: Option<CashOfferRow> = cash_offers::table
            .find(id.as_str())
            .select(CashOfferRow::as_select())
            .first(&mut conn)
            .optional()?;
        row.map(cash_offer_from_row).transpose()
    }

    async fn list_cash_offers(&self, active_only: bool) -> Result<Vec<CashOffer>> {
        let mut conn = self.conn()?;
        let mut query = cash_offers::table
            .select(CashOfferRow::as_select())
            .order(cash_offers::created_at.desc())
            .into_boxed();
        if active_only {
            query = query.filter(cash_offers::active.ne(0));
        }
        let rows: Vec<CashOfferRow> = query.load(&mut conn)?;
        rows.into_iter().map(cash_offer_from_row).collect()
    }
}
