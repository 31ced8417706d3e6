use chrono::NaiveDate;
use clap::Args;
use serde::Deserialize;
use serde_json::Value;

use agent_pace_core::calendar;
use agent_pace_core::types::{Period, WorkCalendar};

use crate::input;

/// Arguments for work-day resolution
#[derive(Args)]
pub struct WorkdaysArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Deserialize)]
struct WorkdaysInput {
    #[serde(default)]
    calendar: WorkCalendar,
    /// Reference date; the containing month is the period
    as_of: NaiveDate,
}

pub fn run_workdays(args: WorkdaysArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let wd_input: WorkdaysInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json> or stdin required for workdays".into());
    };

    let period = Period::month_of(wd_input.as_of);
    let breakdown = calendar::resolve(&period, &wd_input.calendar, wd_input.as_of);
    Ok(serde_json::json!({
        "period": period,
        "result": breakdown,
    }))
}
