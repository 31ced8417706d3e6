use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;

use crate::aggregate::{aggregate_entries, flag_low_value_hours, resolve_earned_to_date};
use crate::calendar::{self, WorkDayBreakdown};
use crate::cap::{summarize_cap, CapSummary};
use crate::gaps::{analyze_gaps, FocusItem};
use crate::goals::decompose;
use crate::insight::{classify, Insight, InsightInputs};
use crate::kpi::derive_kpis;
use crate::types::{
    ActivityKind, CapProgress, ComputationOutput, DailyEntry, FinancialSummary, GoalSettings,
    Money, Period, Ratio, WorkCalendar,
};
use crate::PaceResult;

/// Everything the engine needs for one snapshot. "Today" is injected so
/// the computation is deterministic; `has_financial_data` is a
/// capability flag, not a subscription tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotInput {
    pub settings: GoalSettings,
    #[serde(default)]
    pub calendar: WorkCalendar,
    #[serde(default)]
    pub entries: Vec<DailyEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financials: Option<FinancialSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cap: Option<CapProgress>,
    #[serde(default)]
    pub has_financial_data: bool,
    pub today: NaiveDate,
}

/// The single immutable output consumed by every presentation surface.
/// Recomputed on every read, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub period: Period,
    pub work_days: WorkDayBreakdown,
    pub daily_income_target: Money,
    pub goal_pace_to_date: Money,
    pub earned_to_date: Money,
    pub required_per_remaining_day: Money,
    pub profit_this_month: Money,
    pub financials_locked: bool,
    pub hourly_efficiency: Money,
    /// Clamped to [0, 1]
    pub activity_progress_ratio: Ratio,
    /// Clamped to [0, 1]
    pub money_progress_ratio: Ratio,
    pub daily_activity_targets: BTreeMap<ActivityKind, u32>,
    pub activity_targets_to_date: BTreeMap<ActivityKind, Decimal>,
    pub gaps: BTreeMap<ActivityKind, Decimal>,
    pub focus_ranking: Vec<FocusItem>,
    /// Busyness callouts: time on low-value work while gaps stay open
    pub low_value_flags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottleneck: Option<ActivityKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cap: Option<CapSummary>,
    pub insights: Vec<Insight>,
}

/// Run the full pipeline: calendar resolution, goal decomposition,
/// aggregation, gap analysis, KPIs, cap summary, insight classification.
///
/// Pure and synchronous: identical inputs (including `today`) produce an
/// identical snapshot. The only aborting errors are invalid
/// configuration; absent optional data degrades to defaults plus a
/// warning in the envelope.
pub fn compute_snapshot(
    input: &SnapshotInput,
) -> PaceResult<ComputationOutput<ProgressSnapshot>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let period = Period::month_of(input.today);
    let work_days = calendar::resolve(&period, &input.calendar, input.today);

    let plan = decompose(&input.settings, work_days.total, work_days.elapsed)?;

    let totals = aggregate_entries(&input.entries, &period, input.today);
    let earned_to_date = resolve_earned_to_date(&input.settings, input.financials.as_ref());

    let gap_analysis = analyze_gaps(&plan.activity_targets_to_date, &totals.activities);
    let has_gaps = gap_analysis.gaps.values().any(|g| *g > Decimal::ZERO);
    let low_value_flags = flag_low_value_hours(&totals, has_gaps);

    let kpis = derive_kpis(
        &plan,
        &totals,
        earned_to_date,
        work_days.remaining,
        input.financials.as_ref(),
        input.has_financial_data,
    );

    if input.has_financial_data && input.financials.is_none() {
        warnings.push(
            "Financial summary unavailable; profit and expense insights reported as locked"
                .to_string(),
        );
    }
    if totals.high_value_hours == Decimal::ZERO && earned_to_date > Decimal::ZERO {
        warnings.push("No high-value hours logged; hourly efficiency reported as 0".to_string());
    }

    let month = input.financials.as_ref().map(|f| &f.month);
    let insights = classify(&InsightInputs {
        earned_to_date,
        goal_pace_to_date: plan.goal_pace_to_date,
        month_income: month.map(|m| m.income),
        month_expenses: month.map(|m| m.expenses),
        has_financial_data: input.has_financial_data,
        bottleneck: gap_analysis.bottleneck,
    });

    let snapshot = ProgressSnapshot {
        period,
        work_days,
        daily_income_target: plan.daily_income_target,
        goal_pace_to_date: plan.goal_pace_to_date,
        earned_to_date,
        required_per_remaining_day: kpis.required_per_remaining_day,
        profit_this_month: kpis.profit_this_month,
        financials_locked: kpis.financials_locked,
        hourly_efficiency: kpis.hourly_efficiency,
        activity_progress_ratio: kpis.activity_progress_ratio,
        money_progress_ratio: kpis.money_progress_ratio,
        daily_activity_targets: plan.daily_activity_targets,
        activity_targets_to_date: plan.activity_targets_to_date,
        gaps: gap_analysis.gaps,
        focus_ranking: gap_analysis.focus_ranking,
        low_value_flags,
        bottleneck: gap_analysis.bottleneck,
        cap: summarize_cap(input.cap.as_ref()),
        insights,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(ComputationOutput::new(
        "Linear work-day goal pacing with gap, KPI and insight analysis",
        &serde_json::json!({
            "period_start": snapshot.period.start,
            "period_end": snapshot.period.end,
            "as_of": input.today,
            "total_work_days": snapshot.work_days.total,
            "entries": input.entries.len(),
            "has_financial_data": input.has_financial_data,
            "cap_configured": input.cap.is_some(),
        }),
        warnings,
        elapsed,
        snapshot,
    ))
}
