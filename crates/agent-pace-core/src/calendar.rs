use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{Period, WorkCalendar};

/// Total, elapsed and remaining work days for a period as of a given day.
/// Invariant: `elapsed + remaining == total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkDayBreakdown {
    pub total: u32,
    pub elapsed: u32,
    pub remaining: u32,
}

/// Count work days in the whole period `[start, end)`.
pub fn total_work_days(period: &Period, calendar: &WorkCalendar) -> u32 {
    count_work_days(period.start, period.end, calendar)
}

/// Count work days in `[start, min(as_of, end))`, inclusive of `as_of`
/// itself when it is a work day inside the period.
pub fn elapsed_work_days(period: &Period, calendar: &WorkCalendar, as_of: NaiveDate) -> u32 {
    if as_of < period.start {
        return 0;
    }
    if as_of >= period.end {
        return total_work_days(period, calendar);
    }
    // Half-open upper bound one past as_of so as_of itself is counted
    let upper = as_of.succ_opt().unwrap_or(period.end).min(period.end);
    count_work_days(period.start, upper, calendar)
}

pub fn remaining_work_days(period: &Period, calendar: &WorkCalendar, as_of: NaiveDate) -> u32 {
    total_work_days(period, calendar) - elapsed_work_days(period, calendar, as_of)
}

/// Resolve all three counts in one pass over the period.
pub fn resolve(period: &Period, calendar: &WorkCalendar, as_of: NaiveDate) -> WorkDayBreakdown {
    let total = total_work_days(period, calendar);
    let elapsed = elapsed_work_days(period, calendar, as_of);
    WorkDayBreakdown {
        total,
        elapsed,
        remaining: total - elapsed,
    }
}

fn count_work_days(from: NaiveDate, until: NaiveDate, calendar: &WorkCalendar) -> u32 {
    from.iter_days()
        .take_while(|d| *d < until)
        .filter(|d| calendar.is_work_day(*d))
        .count() as u32
}
