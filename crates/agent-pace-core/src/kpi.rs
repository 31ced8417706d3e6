use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregate::ActivityTotals;
use crate::goals::GoalPlan;
use crate::types::{FinancialSummary, Money, Ratio};

/// The headline KPIs and progress ratios.
/// Clamped ratios satisfy `0 <= r <= 1` for the progress-bar contract;
/// the raw counterparts stay available for the insight rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kpis {
    /// Month net income when financial data is available, else 0
    pub profit_this_month: Money,
    /// True when profit is a placeholder, never a real zero
    pub financials_locked: bool,
    /// (goal - earned) / remaining work days, floored at zero
    pub required_per_remaining_day: Money,
    /// earned / high-value hours
    pub hourly_efficiency: Money,
    pub activity_progress_ratio: Ratio,
    pub money_progress_ratio: Ratio,
    pub raw_activity_ratio: Ratio,
    pub raw_money_ratio: Ratio,
}

/// Derive all headline KPIs from the already-computed plan and totals.
pub fn derive_kpis(
    plan: &GoalPlan,
    totals: &ActivityTotals,
    earned_to_date: Money,
    remaining_work_days: u32,
    financials: Option<&FinancialSummary>,
    has_financial_data: bool,
) -> Kpis {
    let (profit_this_month, financials_locked) = match financials {
        Some(f) if has_financial_data => (f.month.net, false),
        _ => (Decimal::ZERO, true),
    };

    let required_per_remaining_day = if remaining_work_days == 0 {
        // goal period over, no further daily target applies
        Decimal::ZERO
    } else {
        ((plan.monthly_income_goal - earned_to_date) / Decimal::from(remaining_work_days))
            .max(Decimal::ZERO)
    };

    let hourly_efficiency = safe_div(earned_to_date, totals.high_value_hours);

    let total_actual: Decimal = totals.activities.values().map(|c| Decimal::from(*c)).sum();
    let total_target: Decimal = plan.activity_targets_to_date.values().sum();
    let raw_activity_ratio = safe_div(total_actual, total_target);
    let raw_money_ratio = safe_div(earned_to_date, plan.monthly_income_goal);

    Kpis {
        profit_this_month,
        financials_locked,
        required_per_remaining_day,
        hourly_efficiency,
        activity_progress_ratio: clamp_ratio(raw_activity_ratio),
        money_progress_ratio: clamp_ratio(raw_money_ratio),
        raw_activity_ratio,
        raw_money_ratio,
    }
}

/// Division that clamps a zero denominator to zero instead of producing
/// an error or a non-finite value.
pub fn safe_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator == Decimal::ZERO {
        Decimal::ZERO
    } else {
        numerator / denominator
    }
}

fn clamp_ratio(raw: Ratio) -> Ratio {
    raw.clamp(Decimal::ZERO, Decimal::ONE)
}
