use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{
    ActivityKind, DailyEntry, FinancialSummary, GoalSettings, HourCategory, Hours, Money, Period,
};

/// Actual logged totals over the elapsed portion of a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityTotals {
    pub activities: BTreeMap<ActivityKind, u32>,
    pub hours: BTreeMap<HourCategory, Hours>,
    /// Prospecting + showings + open houses
    pub high_value_hours: Hours,
    pub days_logged: u32,
}

/// Sum activities and hours across entries dated within
/// `[period.start, as_of]`. Entries are keyed by date: a later entry for
/// the same date replaces the earlier one (upsert semantics), so the
/// aggregation is idempotent and never double counts.
pub fn aggregate_entries(
    entries: &[DailyEntry],
    period: &Period,
    as_of: NaiveDate,
) -> ActivityTotals {
    let mut by_date: BTreeMap<NaiveDate, &DailyEntry> = BTreeMap::new();
    for entry in entries {
        if period.contains(entry.date) && entry.date <= as_of {
            by_date.insert(entry.date, entry);
        }
    }

    let mut activities: BTreeMap<ActivityKind, u32> = BTreeMap::new();
    let mut hours: BTreeMap<HourCategory, Hours> = BTreeMap::new();
    let mut high_value_hours = Decimal::ZERO;

    for entry in by_date.values() {
        for (kind, count) in &entry.activities {
            *activities.entry(*kind).or_insert(0) += count;
        }
        for (category, h) in &entry.hours {
            *hours.entry(*category).or_insert(Decimal::ZERO) += *h;
            if category.is_high_value() {
                high_value_hours += *h;
            }
        }
    }

    ActivityTotals {
        activities,
        hours,
        high_value_hours,
        days_logged: by_date.len() as u32,
    }
}

// Thresholds for the busyness flags: more than 30% of logged time (or
// 1.5h outright) on low-value work, or more than 2h of admin, while
// core activity gaps remain.
const LOW_VALUE_SHARE_LIMIT: Decimal = dec!(0.30);
const LOW_VALUE_HOURS_LIMIT: Decimal = dec!(1.5);
const ADMIN_HOURS_LIMIT: Decimal = dec!(2);
const MEASURABLE_HOURS: Decimal = dec!(0.1);

/// Flag time spent on low-value work while activity gaps remain open.
/// Quiet when gaps are closed: busyness is only a problem when the core
/// activities are behind pace.
pub fn flag_low_value_hours(totals: &ActivityTotals, has_gaps: bool) -> Vec<String> {
    let mut flags = Vec::new();

    let total_hours: Decimal = totals.hours.values().copied().sum();
    if !has_gaps || total_hours <= MEASURABLE_HOURS {
        return flags;
    }

    let low_value_hours = total_hours - totals.high_value_hours;
    let low_value_share = low_value_hours / total_hours;
    if low_value_share > LOW_VALUE_SHARE_LIMIT || low_value_hours > LOW_VALUE_HOURS_LIMIT {
        flags.push(format!(
            "You spent {}h on low-value activities while gaps remain in core activities",
            low_value_hours.round_dp(1)
        ));
    }

    let admin_hours = totals
        .hours
        .get(&HourCategory::Admin)
        .copied()
        .unwrap_or(Decimal::ZERO);
    if admin_hours > ADMIN_HOURS_LIMIT {
        flags.push(format!(
            "Admin took {}h while activity gaps remain",
            admin_hours.round_dp(1)
        ));
    }

    flags
}

/// Income earned so far: the explicit settings override wins, then the
/// financial summary's month income, then zero.
pub fn resolve_earned_to_date(
    settings: &GoalSettings,
    financials: Option<&FinancialSummary>,
) -> Money {
    if let Some(earned) = settings.earned_gci_to_date {
        return earned;
    }
    match financials {
        Some(f) => f.month.income,
        None => Decimal::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FinancialPeriod, MonthlyGoal};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn entry(date: NaiveDate, conversations: u32, prospecting: Decimal) -> DailyEntry {
        DailyEntry {
            date,
            activities: BTreeMap::from([(ActivityKind::Conversations, conversations)]),
            hours: BTreeMap::from([(HourCategory::Prospecting, prospecting)]),
            reflection: None,
        }
    }

    fn march() -> Period {
        Period::month_of(d(2024, 3, 1))
    }

    #[test]
    fn test_sums_activities_and_hours() {
        let entries = vec![
            entry(d(2024, 3, 4), 10, dec!(2.5)),
            entry(d(2024, 3, 5), 15, dec!(1.5)),
        ];
        let totals = aggregate_entries(&entries, &march(), d(2024, 3, 31));
        assert_eq!(totals.activities[&ActivityKind::Conversations], 25);
        assert_eq!(totals.hours[&HourCategory::Prospecting], dec!(4.0));
        assert_eq!(totals.high_value_hours, dec!(4.0));
        assert_eq!(totals.days_logged, 2);
    }

    #[test]
    fn test_same_day_logged_twice_last_wins() {
        let entries = vec![
            entry(d(2024, 3, 4), 10, dec!(2)),
            entry(d(2024, 3, 4), 7, dec!(1)),
        ];
        let totals = aggregate_entries(&entries, &march(), d(2024, 3, 31));
        assert_eq!(totals.activities[&ActivityKind::Conversations], 7);
        assert_eq!(totals.hours[&HourCategory::Prospecting], dec!(1));
        assert_eq!(totals.days_logged, 1);
    }

    #[test]
    fn test_entries_after_as_of_are_excluded() {
        let entries = vec![
            entry(d(2024, 3, 4), 10, dec!(2)),
            entry(d(2024, 3, 20), 30, dec!(3)),
        ];
        let totals = aggregate_entries(&entries, &march(), d(2024, 3, 10));
        assert_eq!(totals.activities[&ActivityKind::Conversations], 10);
    }

    #[test]
    fn test_entries_outside_period_are_excluded() {
        let entries = vec![
            entry(d(2024, 2, 28), 99, dec!(9)),
            entry(d(2024, 3, 4), 10, dec!(2)),
        ];
        let totals = aggregate_entries(&entries, &march(), d(2024, 3, 31));
        assert_eq!(totals.activities[&ActivityKind::Conversations], 10);
        assert_eq!(totals.days_logged, 1);
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let entries = vec![
            entry(d(2024, 3, 4), 10, dec!(2.5)),
            entry(d(2024, 3, 5), 15, dec!(1.5)),
        ];
        let first = aggregate_entries(&entries, &march(), d(2024, 3, 31));
        let second = aggregate_entries(&entries, &march(), d(2024, 3, 31));
        assert_eq!(first, second);
    }

    #[test]
    fn test_high_value_excludes_admin_hours() {
        let mut e = entry(d(2024, 3, 4), 0, dec!(2));
        e.hours.insert(HourCategory::Admin, dec!(5));
        e.hours.insert(HourCategory::Showings, dec!(1));
        let totals = aggregate_entries(&[e], &march(), d(2024, 3, 31));
        assert_eq!(totals.high_value_hours, dec!(3));
    }

    fn totals_with_hours(pairs: &[(HourCategory, Decimal)]) -> ActivityTotals {
        let hours: BTreeMap<HourCategory, Decimal> = pairs.iter().copied().collect();
        let high_value_hours = hours
            .iter()
            .filter(|(c, _)| c.is_high_value())
            .map(|(_, h)| *h)
            .sum();
        ActivityTotals {
            activities: BTreeMap::new(),
            hours,
            high_value_hours,
            days_logged: 1,
        }
    }

    #[test]
    fn test_low_value_share_above_30_pct_flags() {
        // 2h prospecting, 1h social: 33% low-value share
        let totals = totals_with_hours(&[
            (HourCategory::Prospecting, dec!(2)),
            (HourCategory::Social, dec!(1)),
        ]);
        let flags = flag_low_value_hours(&totals, true);
        assert_eq!(flags.len(), 1);
        assert!(flags[0].contains("low-value activities"));
    }

    #[test]
    fn test_absolute_low_value_hours_flag_despite_small_share() {
        // 2h of marketing against 8h prospecting: only 20% share but
        // above the 1.5h outright limit
        let totals = totals_with_hours(&[
            (HourCategory::Prospecting, dec!(8)),
            (HourCategory::Marketing, dec!(2)),
        ]);
        let flags = flag_low_value_hours(&totals, true);
        assert_eq!(flags.len(), 1);
        assert!(flags[0].contains("2h on low-value activities"));
    }

    #[test]
    fn test_heavy_admin_day_flags() {
        let totals = totals_with_hours(&[
            (HourCategory::Prospecting, dec!(6)),
            (HourCategory::Admin, dec!(2.5)),
        ]);
        let flags = flag_low_value_hours(&totals, true);
        // 2.5h / 8.5h is a 29% share, below the share limit, but admin
        // alone exceeds 2h — and 2.5h also trips the outright limit
        assert!(flags.iter().any(|f| f.contains("Admin took 2.5h")));
    }

    #[test]
    fn test_no_flags_when_gaps_are_closed() {
        let totals = totals_with_hours(&[
            (HourCategory::Social, dec!(4)),
            (HourCategory::Admin, dec!(3)),
        ]);
        assert!(flag_low_value_hours(&totals, false).is_empty());
    }

    #[test]
    fn test_no_flags_for_unmeasurable_day() {
        let totals = totals_with_hours(&[(HourCategory::Admin, dec!(0.05))]);
        assert!(flag_low_value_hours(&totals, true).is_empty());
    }

    #[test]
    fn test_focused_day_produces_no_flags() {
        let totals = totals_with_hours(&[
            (HourCategory::Prospecting, dec!(4)),
            (HourCategory::Showings, dec!(3)),
            (HourCategory::Admin, dec!(1)),
        ]);
        // 1h / 8h low-value share, admin under limit
        assert!(flag_low_value_hours(&totals, true).is_empty());
    }

    fn settings(earned: Option<Decimal>) -> GoalSettings {
        GoalSettings {
            monthly_goal: MonthlyGoal::Gci {
                target: dec!(800000),
            },
            activity_goals: BTreeMap::new(),
            earned_gci_to_date: earned,
        }
    }

    fn financials(income: Decimal) -> FinancialSummary {
        FinancialSummary {
            month: FinancialPeriod {
                income,
                expenses: dec!(0),
                net: income,
            },
            ytd: FinancialPeriod {
                income,
                expenses: dec!(0),
                net: income,
            },
        }
    }

    #[test]
    fn test_earned_override_wins() {
        let earned =
            resolve_earned_to_date(&settings(Some(dec!(250000))), Some(&financials(dec!(900))));
        assert_eq!(earned, dec!(250000));
    }

    #[test]
    fn test_earned_falls_back_to_month_income() {
        let earned = resolve_earned_to_date(&settings(None), Some(&financials(dec!(300000))));
        assert_eq!(earned, dec!(300000));
    }

    #[test]
    fn test_earned_defaults_to_zero() {
        let earned = resolve_earned_to_date(&settings(None), None);
        assert_eq!(earned, dec!(0));
    }
}
