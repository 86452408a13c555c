//! Handler for `calendar`.

use serde_json::json;

use crate::adapter::inbound::cli::command::CalendarArgs;
use crate::adapter::inbound::cli::output;
use crate::domain::{WeekendPolicy, WorkingDayCalendar};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::{Clock, SystemClock};

/// Calendar from config, with CLI overrides applied.
fn calendar_for(config: &Config, args: &CalendarArgs) -> WorkingDayCalendar {
    let policy = args
        .policy
        .map_or(config.dashboard.weekend_policy, WeekendPolicy::from);
    let override_total = args
        .override_total
        .or(config.dashboard.working_days_override);
    WorkingDayCalendar::new(policy).with_override(override_total)
}

fn policy_name(policy: WeekendPolicy) -> &'static str {
    match policy {
        WeekendPolicy::SundayOnly => "sunday_only",
        WeekendPolicy::SaturdayAndSunday => "saturday_and_sunday",
    }
}

/// Execute `calendar`.
pub fn execute(config: &Config, args: &CalendarArgs) -> Result<()> {
    let date = args.date.unwrap_or_else(|| SystemClock.now().date());
    let calendar = calendar_for(config, args);
    let days = calendar.working_days(date);

    if output::is_json() {
        output::json_output(json!({
            "date": date,
            "policy": calendar.policy(),
            "override": calendar.override_total(),
            "total": days.total,
            "remaining": days.remaining,
            "elapsed": days.elapsed(),
        }));
        return Ok(());
    }

    output::section("Working Days");
    output::field("Date", date);
    output::field("Policy", policy_name(calendar.policy()));
    if let Some(total) = calendar.override_total() {
        output::field("Override", total);
    }
    output::field("Total", days.total);
    output::field("Remaining", output::highlight(days.remaining));
    output::field("Elapsed", days.elapsed());
    Ok(())
}
