use chrono::{Datelike, Months, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// All monetary values, in minor currency units (cents).
/// Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Progress ratios expressed as decimals (0.5 = 50%).
pub type Ratio = Decimal;

/// Hour counts (fractional hours allowed)
pub type Hours = Decimal;

/// Tracked activity kinds. Declaration order is the canonical ordering
/// used for bottleneck tie-breaks and map iteration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum ActivityKind {
    Conversations,
    Appointments,
    OffersWritten,
    ListingsTaken,
}

impl ActivityKind {
    pub const ALL: [ActivityKind; 4] = [
        ActivityKind::Conversations,
        ActivityKind::Appointments,
        ActivityKind::OffersWritten,
        ActivityKind::ListingsTaken,
    ];
}

/// Categories a logged hour can fall into.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum HourCategory {
    Prospecting,
    Showings,
    OpenHouses,
    Admin,
    Marketing,
    Social,
    Travel,
    Other,
}

impl HourCategory {
    /// High-value hours are the ones that directly produce GCI and feed
    /// the hourly-efficiency KPI.
    pub fn is_high_value(&self) -> bool {
        matches!(
            self,
            HourCategory::Prospecting | HourCategory::Showings | HourCategory::OpenHouses
        )
    }
}

/// A half-open date range `[start, end)` covering one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    /// The month containing `reference`: `[first of month, first of next month)`.
    pub fn month_of(reference: NaiveDate) -> Self {
        let start = reference.with_day(1).unwrap_or(reference);
        let end = start.checked_add_months(Months::new(1)).unwrap_or(start);
        Period { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }
}

/// Which weekdays count toward goal pacing, plus excluded holidays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkCalendar {
    pub work_weekdays: Vec<Weekday>,
    #[serde(default)]
    pub excluded: BTreeSet<NaiveDate>,
}

impl Default for WorkCalendar {
    fn default() -> Self {
        WorkCalendar {
            work_weekdays: vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
            ],
            excluded: BTreeSet::new(),
        }
    }
}

impl WorkCalendar {
    pub fn is_work_day(&self, date: NaiveDate) -> bool {
        self.work_weekdays.contains(&date.weekday()) && !self.excluded.contains(&date)
    }
}

/// How the monthly income goal is expressed: either a GCI dollar target
/// directly, or a closings count at an average GCI per closing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MonthlyGoal {
    Gci { target: Money },
    Closings { count: u32, avg_gci: Money },
}

impl MonthlyGoal {
    /// Resolve either form to a GCI target in minor units.
    pub fn gci_target(&self) -> Money {
        match self {
            MonthlyGoal::Gci { target } => *target,
            MonthlyGoal::Closings { count, avg_gci } => Decimal::from(*count) * *avg_gci,
        }
    }
}

/// Per-period goal configuration owned by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalSettings {
    pub monthly_goal: MonthlyGoal,
    /// Monthly count targets per activity kind
    pub activity_goals: BTreeMap<ActivityKind, u32>,
    /// Explicit override of income earned so far; when absent, derived
    /// from the financial summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earned_gci_to_date: Option<Money>,
}

/// One logged day. Logging again for the same date replaces the entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyEntry {
    pub date: NaiveDate,
    #[serde(default)]
    pub activities: BTreeMap<ActivityKind, u32>,
    #[serde(default)]
    pub hours: BTreeMap<HourCategory, Hours>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reflection: Option<String>,
}

/// Income / expenses / net for one reporting window, minor units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialPeriod {
    pub income: Money,
    pub expenses: Money,
    pub net: Money,
}

/// Month and year-to-date financials. Supplied only for users whose
/// tier includes financial data; absence is a normal state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub month: FinancialPeriod,
    pub ytd: FinancialPeriod,
}

/// Annual commission cap state, externally supplied.
/// `is_complete` is the source of truth and is never recomputed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapProgress {
    pub paid_so_far: Money,
    pub total_cap: Money,
    pub is_complete: bool,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

impl<T: Serialize> ComputationOutput<T> {
    pub fn new(
        methodology: &str,
        assumptions: &impl Serialize,
        warnings: Vec<String>,
        elapsed_us: u64,
        result: T,
    ) -> Self {
        ComputationOutput {
            result,
            methodology: methodology.to_string(),
            assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
            warnings,
            metadata: ComputationMetadata {
                version: env!("CARGO_PKG_VERSION").to_string(),
                computation_time_us: elapsed_us,
                precision: "rust_decimal_128bit".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_period_month_of_mid_month() {
        let p = Period::month_of(d(2024, 3, 17));
        assert_eq!(p.start, d(2024, 3, 1));
        assert_eq!(p.end, d(2024, 4, 1));
    }

    #[test]
    fn test_period_month_of_december_rolls_year() {
        let p = Period::month_of(d(2024, 12, 31));
        assert_eq!(p.start, d(2024, 12, 1));
        assert_eq!(p.end, d(2025, 1, 1));
    }

    #[test]
    fn test_period_contains_is_half_open() {
        let p = Period::month_of(d(2024, 2, 10));
        assert!(p.contains(d(2024, 2, 1)));
        assert!(p.contains(d(2024, 2, 29)));
        assert!(!p.contains(d(2024, 3, 1)));
        assert!(!p.contains(d(2024, 1, 31)));
    }

    #[test]
    fn test_default_calendar_is_mon_fri() {
        let cal = WorkCalendar::default();
        // 2024-03-04 is a Monday, 2024-03-09 a Saturday
        assert!(cal.is_work_day(d(2024, 3, 4)));
        assert!(!cal.is_work_day(d(2024, 3, 9)));
    }

    #[test]
    fn test_excluded_date_is_not_a_work_day() {
        let mut cal = WorkCalendar::default();
        cal.excluded.insert(d(2024, 7, 4));
        assert!(!cal.is_work_day(d(2024, 7, 4))); // a Thursday
    }

    #[test]
    fn test_closings_goal_resolves_to_gci() {
        let goal = MonthlyGoal::Closings {
            count: 2,
            avg_gci: dec!(400000),
        };
        assert_eq!(goal.gci_target(), dec!(800000));
    }

    #[test]
    fn test_activity_kind_canonical_order() {
        assert_eq!(ActivityKind::ALL[0], ActivityKind::Conversations);
        assert_eq!(ActivityKind::ALL[3], ActivityKind::ListingsTaken);
        assert!(ActivityKind::Conversations < ActivityKind::ListingsTaken);
    }

    #[test]
    fn test_high_value_hour_categories() {
        assert!(HourCategory::Prospecting.is_high_value());
        assert!(HourCategory::OpenHouses.is_high_value());
        assert!(!HourCategory::Admin.is_high_value());
    }
}
