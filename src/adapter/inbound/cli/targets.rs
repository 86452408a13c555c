//! Handler for `targets`, and the target table shared with `dashboard`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::TargetsArgs;
use crate::adapter::inbound::cli::output;
use crate::application::dashboard::{behind_schedule, compute_daily_targets};
use crate::application::scheduler::StoreSnapshotSource;
use crate::domain::DailyTarget;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;
use crate::port::{Clock, SnapshotSource, SystemClock};

#[derive(Tabled)]
struct TargetRow {
    #[tabled(rename = "Team")]
    team: String,
    #[tabled(rename = "Volume")]
    volume: String,
    #[tabled(rename = "Vol %")]
    volume_percent: String,
    #[tabled(rename = "Daily Vol")]
    volume_daily: String,
    #[tabled(rename = "Units")]
    units: String,
    #[tabled(rename = "Units %")]
    units_percent: String,
    #[tabled(rename = "Daily Units")]
    units_daily: String,
    #[tabled(rename = "Days Left")]
    days_left: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl TargetRow {
    fn new(target: &DailyTarget) -> Self {
        let status = if target.is_behind_schedule {
            output::negative("behind")
        } else {
            output::positive("on track")
        };
        Self {
            team: target.team_name.clone(),
            volume: format!(
                "{} / {}",
                money(target.volume.current),
                money(target.volume.monthly_target)
            ),
            volume_percent: percent(target.volume.progress_percent),
            volume_daily: money(target.volume.adjusted_daily_target),
            units: format!(
                "{} / {}",
                target.units.current.normalize(),
                target.units.monthly_target.normalize()
            ),
            units_percent: percent(target.units.progress_percent),
            units_daily: target.units.adjusted_daily_target.round_dp(1).normalize().to_string(),
            days_left: format!(
                "{} / {}",
                target.working_days.remaining, target.working_days.total
            ),
            status,
        }
    }
}

fn money(value: Decimal) -> String {
    value.round_dp(2).normalize().to_string()
}

fn percent(value: Decimal) -> String {
    format!("{}%", value.round_dp(1).normalize())
}

/// Render targets as a table.
pub fn render(targets: &[DailyTarget]) -> String {
    let rows: Vec<TargetRow> = targets.iter().map(TargetRow::new).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Print targets as a table, or as a JSON value in `--json` mode.
pub fn print(targets: &[DailyTarget]) -> Result<()> {
    if output::is_json() {
        output::json_output(serde_json::to_value(targets)?);
        return Ok(());
    }
    if targets.is_empty() {
        output::note("No teams");
        return Ok(());
    }
    output::lines(&render(targets));
    Ok(())
}

/// Compute targets for `date` from the configured database.
pub async fn compute(config: &Config, date: NaiveDate) -> Result<Vec<DailyTarget>> {
    let store = bootstrap::open_store(config)?;
    let snapshot = StoreSnapshotSource::new(store).load().await?;
    Ok(compute_daily_targets(
        &snapshot,
        &config.dashboard.calendar(),
        date,
    ))
}

/// Execute `targets`.
pub async fn execute(config: &Config, args: &TargetsArgs) -> Result<()> {
    let date = args.date.unwrap_or_else(|| SystemClock.now().date());
    let targets = compute(config, date).await?;
    let shown: Vec<DailyTarget> = if args.behind {
        behind_schedule(&targets).cloned().collect()
    } else {
        targets
    };

    if !output::is_json() {
        output::section(&format!("Daily Targets for {date}"));
    }
    print(&shown)
}
